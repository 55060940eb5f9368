//! Settings for form rendering and validation.
//!
//! This module provides the [`Settings`] struct, which holds the defaults used
//! when rendering forms (validation endpoint, submit target, swap strategy),
//! the language used for user-facing messages, and logging configuration.
//! Settings are passed explicitly; there is no global instance.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// The htmx script included by default in full HTML documents.
pub const DEFAULT_HTMX_SCRIPT_URL: &str = "https://unpkg.com/htmx.org@2.0.4";

/// The complete set of hxform settings.
///
/// # Examples
///
/// ```
/// use hxform_core::settings::Settings;
///
/// let settings = Settings::default();
/// assert_eq!(settings.validate_endpoint, "/validate");
/// assert_eq!(settings.language_code, "en");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    // ── Core ─────────────────────────────────────────────────────────

    /// Whether debug mode is enabled (pretty logs instead of JSON).
    pub debug: bool,

    // ── Rendering ────────────────────────────────────────────────────

    /// Base URL that per-field validation requests are posted to.
    /// Each field posts to `{validate_endpoint}/{field_name}`.
    pub validate_endpoint: String,
    /// The URL the whole form is submitted to.
    pub form_action: String,
    /// CSS selector of the element receiving the submit response.
    pub form_target: String,
    /// The htmx swap strategy for the submit response (e.g. "innerHTML").
    pub form_swap: String,
    /// Submit button text. `None` uses the message catalog's default.
    pub submit_text: Option<String>,
    /// Whether full HTML documents include the htmx `<script>` tag.
    pub include_htmx: bool,
    /// Source URL of the htmx script.
    pub htmx_script_url: String,

    // ── Internationalization ─────────────────────────────────────────

    /// The language code used to pick the message catalog (e.g. "en", "ja").
    pub language_code: String,

    // ── Logging ──────────────────────────────────────────────────────

    /// The log level (e.g. "info", "debug", "warn").
    pub log_level: String,

    // ── Escape hatch ─────────────────────────────────────────────────

    /// Custom settings that don't fit into the above categories.
    pub extra: HashMap<String, serde_json::Value>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            debug: false,
            validate_endpoint: "/validate".to_string(),
            form_action: "/submit".to_string(),
            form_target: "#response".to_string(),
            form_swap: "innerHTML".to_string(),
            submit_text: None,
            include_htmx: true,
            htmx_script_url: DEFAULT_HTMX_SCRIPT_URL.to_string(),
            language_code: "en".to_string(),
            log_level: "info".to_string(),
            extra: HashMap::new(),
        }
    }
}

impl Settings {
    /// Returns the validation URL for one field.
    ///
    /// # Examples
    ///
    /// ```
    /// use hxform_core::settings::Settings;
    ///
    /// let settings = Settings::default();
    /// assert_eq!(settings.field_validate_url("email"), "/validate/email");
    /// ```
    pub fn field_validate_url(&self, field_name: &str) -> String {
        format!("{}/{field_name}", self.validate_endpoint.trim_end_matches('/'))
    }
}
