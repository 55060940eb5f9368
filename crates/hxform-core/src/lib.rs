//! # hxform-core
//!
//! Core types, settings, and error types for hxform.
//! This crate has no dependencies on the other hxform crates and provides the
//! foundation they build on.
//!
//! ## Modules
//!
//! - [`error`] - Error types and result aliases
//! - [`utils`] - Text and HTML helpers (escaping, field titles)
//! - [`settings`] - Rendering and validation settings
//! - [`settings_loader`] - Loading settings from TOML, JSON, and the environment
//! - [`logging`] - Tracing-based logging integration

pub mod error;
pub mod logging;
pub mod settings;
pub mod settings_loader;
pub mod utils;

// Re-export the most commonly used types at the crate root.
pub use error::{FormsError, FormsResult, ValidationError, ValidationErrors};
pub use settings::Settings;
