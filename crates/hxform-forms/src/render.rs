//! HTML rendering of forms and fields.
//!
//! Every field is wrapped in a `div.form-field` holding its label, its input,
//! optional help text, and an error slot. Inputs carry htmx attributes that
//! post the field to its validation URL on `blur` (text-like inputs) or
//! `change` (checkboxes and selects) and swap the response into the slot.
//! All text taken from the schema is HTML-escaped.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use hxform_core::utils::escape_html;
use hxform_core::{FormsError, FormsResult, Settings};

use crate::descriptor::FieldDescriptor;
use crate::kind::FieldKind;
use crate::messages::{translator_for, Translator};

/// The form id used when none is given.
pub const DEFAULT_FORM_ID: &str = "hxform-form";

/// The htmx swap strategy for the submit response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Swap {
    /// Replace the target's content.
    #[default]
    InnerHtml,
    /// Replace the target element.
    OuterHtml,
    /// Append inside the target.
    BeforeEnd,
    /// Insert after the target.
    AfterEnd,
    /// Insert before the target.
    BeforeBegin,
    /// Prepend inside the target.
    AfterBegin,
    /// Delete the target.
    Delete,
    /// Do not swap.
    None,
}

impl Swap {
    /// Returns the value of the `hx-swap` attribute.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InnerHtml => "innerHTML",
            Self::OuterHtml => "outerHTML",
            Self::BeforeEnd => "beforeend",
            Self::AfterEnd => "afterend",
            Self::BeforeBegin => "beforebegin",
            Self::AfterBegin => "afterbegin",
            Self::Delete => "delete",
            Self::None => "none",
        }
    }
}

impl fmt::Display for Swap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Swap {
    type Err = FormsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "innerHTML" => Ok(Self::InnerHtml),
            "outerHTML" => Ok(Self::OuterHtml),
            "beforeend" => Ok(Self::BeforeEnd),
            "afterend" => Ok(Self::AfterEnd),
            "beforebegin" => Ok(Self::BeforeBegin),
            "afterbegin" => Ok(Self::AfterBegin),
            "delete" => Ok(Self::Delete),
            "none" => Ok(Self::None),
            other => Err(FormsError::Configuration(format!(
                "Unknown swap strategy: {other}"
            ))),
        }
    }
}

/// Options for rendering the `<form>` element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormOptions {
    /// The form's `id`. `None` lets the caller pick a default.
    pub form_id: Option<String>,
    /// The URL the form posts to.
    pub action: String,
    /// CSS selector receiving the submit response.
    pub target: String,
    /// How the response is swapped in.
    pub swap: Swap,
    /// Submit button text. `None` uses the message catalog's label.
    pub submit_text: Option<String>,
}

impl Default for FormOptions {
    fn default() -> Self {
        Self {
            form_id: None,
            action: "/submit".to_string(),
            target: "#response".to_string(),
            swap: Swap::InnerHtml,
            submit_text: None,
        }
    }
}

impl FormOptions {
    /// Builds form options from settings.
    ///
    /// Fails if `form_swap` is not a known swap strategy.
    pub fn from_settings(settings: &Settings) -> FormsResult<Self> {
        Ok(Self {
            form_id: None,
            action: settings.form_action.clone(),
            target: settings.form_target.clone(),
            swap: settings.form_swap.parse()?,
            submit_text: settings.submit_text.clone(),
        })
    }

    /// Returns the element id named by `target` when it is a plain `#id`
    /// selector.
    pub fn target_id(&self) -> Option<&str> {
        self.target
            .strip_prefix('#')
            .filter(|id| !id.is_empty() && id.chars().all(|c| c.is_alphanumeric() || c == '-' || c == '_'))
    }

    /// Sets the form id.
    #[must_use]
    pub fn form_id(mut self, id: impl Into<String>) -> Self {
        self.form_id = Some(id.into());
        self
    }

    /// Sets the submit URL.
    #[must_use]
    pub fn action(mut self, action: impl Into<String>) -> Self {
        self.action = action.into();
        self
    }

    /// Sets the submit button text.
    #[must_use]
    pub fn submit_text(mut self, text: impl Into<String>) -> Self {
        self.submit_text = Some(text.into());
        self
    }
}

/// Renders field descriptors to HTML.
#[derive(Debug, Clone)]
pub struct FormRenderer {
    settings: Settings,
    translator: Arc<dyn Translator>,
}

impl FormRenderer {
    /// Creates a renderer whose messages follow `settings.language_code`.
    pub fn new(settings: Settings) -> Self {
        let translator = translator_for(&settings.language_code);
        Self::with_translator(settings, translator)
    }

    /// Creates a renderer with an explicit message catalog.
    pub fn with_translator(settings: Settings, translator: Arc<dyn Translator>) -> Self {
        Self {
            settings,
            translator,
        }
    }

    /// Returns the settings.
    pub const fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Renders the `<form>` element with every field.
    pub fn render_form(&self, fields: &[FieldDescriptor], options: &FormOptions) -> String {
        let rendered: Vec<String> = fields.iter().map(|f| self.render_field(f)).collect();
        let submit_text = options
            .submit_text
            .clone()
            .unwrap_or_else(|| self.translator.submit_label());

        format!(
            "<form id=\"{id}\" hx-post=\"{action}\" hx-target=\"{target}\" hx-swap=\"{swap}\" class=\"hxform-form\">\n\
             {fields}\n  \
             <div class=\"form-actions\">\n    \
             <button type=\"submit\">{submit}</button>\n  \
             </div>\n\
             </form>",
            id = escape_html(options.form_id.as_deref().unwrap_or(DEFAULT_FORM_ID)),
            action = escape_html(&options.action),
            target = escape_html(&options.target),
            swap = options.swap,
            fields = rendered.join("\n"),
            submit = escape_html(&submit_text),
        )
    }

    /// Renders one field: wrapper, label, input, help text, and error slot.
    pub fn render_field(&self, field: &FieldDescriptor) -> String {
        let name = escape_html(&field.name);
        let required_mark = if field.required {
            r#" <span class="required">*</span>"#
        } else {
            ""
        };

        let mut html = format!(
            "  <div class=\"form-field\" id=\"field-{name}\">\n    <label for=\"{name}\">{label}{required_mark}</label>\n{input}\n",
            label = escape_html(&field.title),
            input = self.render_input(field),
        );
        if let Some(description) = &field.description {
            html.push_str(&format!(
                "    <small class=\"field-description\">{}</small>\n",
                escape_html(description)
            ));
        }
        html.push_str(&format!(
            "    <div class=\"error-message\" id=\"{name}-error\"></div>\n  </div>"
        ));
        html
    }

    fn render_input(&self, field: &FieldDescriptor) -> String {
        let name = escape_html(&field.name);
        let trigger = match field.kind {
            FieldKind::Boolean | FieldKind::Select => "change",
            _ => "blur",
        };
        let hx = format!(
            r##"hx-post="{url}" hx-trigger="{trigger}" hx-target="#{name}-error" hx-swap="innerHTML" hx-vals='{{"_field": "{name}"}}'"##,
            url = escape_html(&self.settings.field_validate_url(&field.name)),
        );
        let attrs = render_attrs(&build_attrs(field));

        match field.kind {
            FieldKind::Select => format!(
                "    <select id=\"{name}\" name=\"{name}\"{attrs} {hx}>\n{options}\n    </select>",
                options = self.render_options(field),
            ),
            kind => {
                let input_type = match kind {
                    FieldKind::Integer | FieldKind::Float => "number",
                    FieldKind::Date => "date",
                    FieldKind::Boolean => "checkbox",
                    _ => "text",
                };
                format!(r#"    <input type="{input_type}" id="{name}" name="{name}"{attrs} {hx}>"#)
            }
        }
    }

    fn render_options(&self, field: &FieldDescriptor) -> String {
        let mut options = Vec::with_capacity(field.options.len() + 1);
        if !field.required {
            options.push(format!(
                r#"      <option value="">{}</option>"#,
                escape_html(&self.translator.select_placeholder())
            ));
        }
        for option in &field.options {
            let selected = if field.is_default_option(option) {
                " selected"
            } else {
                ""
            };
            options.push(format!(
                r#"      <option value="{}"{selected}>{}</option>"#,
                escape_html(&option.value),
                escape_html(&option.label)
            ));
        }
        options.join("\n")
    }
}

/// Collects the HTML attributes implied by a descriptor, in a fixed order.
///
/// Attributes without a value (`required`, `checked`) have `None`.
pub fn build_attrs(field: &FieldDescriptor) -> Vec<(&'static str, Option<String>)> {
    let mut attrs: Vec<(&'static str, Option<String>)> = Vec::new();

    if field.required {
        attrs.push(("required", None));
    }

    match (&field.default, field.kind) {
        (None | Some(hxform_schema::Value::Null), _) | (_, FieldKind::Select) => {}
        (Some(hxform_schema::Value::Bool(checked)), FieldKind::Boolean) => {
            if *checked {
                attrs.push(("checked", None));
            }
        }
        (Some(default), _) => attrs.push(("value", Some(default.to_string()))),
    }

    if let Some(n) = field.min_length {
        attrs.push(("minlength", Some(n.to_string())));
    }
    if let Some(n) = field.max_length {
        attrs.push(("maxlength", Some(n.to_string())));
    }
    if let Some(min) = field.html_min() {
        attrs.push(("min", Some(min.to_string())));
    }
    if let Some(max) = field.html_max() {
        attrs.push(("max", Some(max.to_string())));
    }
    if let Some(pattern) = &field.pattern {
        attrs.push(("pattern", Some(pattern.clone())));
    }
    if field.kind == FieldKind::Float {
        attrs.push(("step", Some("any".to_string())));
    }
    if let Some(placeholder) = &field.placeholder {
        attrs.push(("placeholder", Some(placeholder.clone())));
    }

    attrs
}

/// Formats attributes as ` key="value"` pairs, escaping every value.
fn render_attrs(attrs: &[(&'static str, Option<String>)]) -> String {
    attrs
        .iter()
        .map(|(key, value)| match value {
            Some(v) => format!(r#" {key}="{}""#, escape_html(v)),
            None => format!(" {key}"),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::Japanese;
    use hxform_schema::{SelectOption, Value};

    fn renderer() -> FormRenderer {
        FormRenderer::new(Settings::default())
    }

    #[test]
    fn test_swap_parse_and_display() {
        assert_eq!("outerHTML".parse::<Swap>().unwrap(), Swap::OuterHtml);
        assert_eq!(Swap::BeforeEnd.to_string(), "beforeend");
        assert!("sideways".parse::<Swap>().is_err());
    }

    #[test]
    fn test_form_options_from_settings() {
        let mut settings = Settings::default();
        settings.form_swap = "outerHTML".into();
        settings.submit_text = Some("Go".into());
        let options = FormOptions::from_settings(&settings).unwrap();
        assert_eq!(options.swap, Swap::OuterHtml);
        assert_eq!(options.submit_text.as_deref(), Some("Go"));

        settings.form_swap = "bogus".into();
        assert!(FormOptions::from_settings(&settings).is_err());
    }

    #[test]
    fn test_text_input() {
        let mut field = FieldDescriptor::new("username", FieldKind::String);
        field.min_length = Some(3);
        field.max_length = Some(20);
        let html = renderer().render_field(&field);
        assert!(html.contains(r#"<div class="form-field" id="field-username">"#));
        assert!(html.contains(r#"<label for="username">Username <span class="required">*</span></label>"#));
        assert!(html.contains(
            r#"<input type="text" id="username" name="username" required minlength="3" maxlength="20" hx-post="/validate/username" hx-trigger="blur""#
        ));
        assert!(html.contains(r##"hx-target="#username-error""##));
        assert!(html.contains(r#"hx-vals='{"_field": "username"}'"#));
        assert!(html.contains(r#"<div class="error-message" id="username-error"></div>"#));
        assert!(!html.contains("field-description"));
    }

    #[test]
    fn test_number_inputs() {
        let mut age = FieldDescriptor::new("age", FieldKind::Integer);
        age.ge = Some(18.0);
        age.lt = Some(121.0);
        let html = renderer().render_field(&age);
        assert!(html.contains(r#"type="number""#));
        assert!(html.contains(r#"min="18""#));
        assert!(html.contains(r#"max="120""#));
        assert!(!html.contains("step"));

        let mut price = FieldDescriptor::new("price", FieldKind::Float);
        price.gt = Some(0.0);
        let html = renderer().render_field(&price);
        assert!(!html.contains("min="));
        assert!(html.contains(r#"step="any""#));
    }

    #[test]
    fn test_checkbox() {
        let mut agree = FieldDescriptor::new("agree", FieldKind::Boolean);
        agree.required = false;
        agree.default = Some(Value::Bool(true));
        let html = renderer().render_field(&agree);
        assert!(html.contains(r#"<input type="checkbox" id="agree" name="agree" checked hx-post="/validate/agree" hx-trigger="change""#));
        assert!(!html.contains("required"));

        agree.default = Some(Value::Bool(false));
        assert!(!renderer().render_field(&agree).contains("checked"));
    }

    #[test]
    fn test_date_with_default_value() {
        let mut field = FieldDescriptor::new("start", FieldKind::Date);
        field.required = false;
        field.default = Some(Value::Date(chrono::NaiveDate::from_ymd_opt(2024, 1, 31).unwrap()));
        let html = renderer().render_field(&field);
        assert!(html.contains(r#"<input type="date" id="start" name="start" value="2024-01-31""#));
    }

    #[test]
    fn test_target_id() {
        assert_eq!(FormOptions::default().target_id(), Some("response"));
        let mut options = FormOptions::default();
        options.target = "#form-out_2".into();
        assert_eq!(options.target_id(), Some("form-out_2"));
        for target in ["#", ".result", "closest div", "#a .b", "this"] {
            options.target = target.into();
            assert_eq!(options.target_id(), None, "{target}");
        }
    }

    #[test]
    fn test_select_required_and_optional() {
        let mut field = FieldDescriptor::new("size", FieldKind::Select);
        field.options = vec![SelectOption::new("S", "Small"), SelectOption::new("M", "Medium")];
        let html = renderer().render_field(&field);
        assert!(html.contains(r#"<select id="size" name="size" required hx-post="/validate/size" hx-trigger="change""#));
        assert!(html.contains(r#"<option value="S">Small</option>"#));
        assert!(!html.contains(r#"<option value="">"#));

        field.required = false;
        field.default = Some(Value::from("M"));
        let html = renderer().render_field(&field);
        assert!(html.contains(r#"<option value="">Please select</option>"#));
        assert!(html.contains(r#"<option value="M" selected>Medium</option>"#));
        let select_tag = html.lines().find(|l| l.contains("<select")).unwrap();
        assert!(!select_tag.contains("value="));
    }

    #[test]
    fn test_escaping() {
        let mut field = FieldDescriptor::new("bio", FieldKind::String);
        field.title = r#"<Bio & "more">"#.into();
        field.description = Some("Tom's <b>bio</b>".into());
        field.placeholder = Some(r#"say "hi""#.into());
        field.pattern = Some("^a<b$".into());
        let html = renderer().render_field(&field);
        assert!(html.contains("&lt;Bio &amp; &quot;more&quot;&gt;"));
        assert!(html.contains("Tom&#x27;s &lt;b&gt;bio&lt;/b&gt;"));
        assert!(html.contains(r#"placeholder="say &quot;hi&quot;""#));
        assert!(html.contains(r#"pattern="^a&lt;b$""#));
    }

    #[test]
    fn test_custom_endpoint() {
        let mut settings = Settings::default();
        settings.validate_endpoint = "/api/check/".into();
        let html = FormRenderer::new(settings).render_field(&FieldDescriptor::new("email", FieldKind::String));
        assert!(html.contains(r#"hx-post="/api/check/email""#));
    }

    #[test]
    fn test_render_form() {
        let fields = vec![FieldDescriptor::new("name", FieldKind::String)];
        let options = FormOptions::default().form_id("user-form");
        let html = renderer().render_form(&fields, &options);
        assert!(html.starts_with(
            r##"<form id="user-form" hx-post="/submit" hx-target="#response" hx-swap="innerHTML" class="hxform-form">"##
        ));
        assert!(html.contains(r#"<button type="submit">Submit</button>"#));
        assert!(html.ends_with("</form>"));
    }

    #[test]
    fn test_localized_labels() {
        let renderer = FormRenderer::with_translator(Settings::default(), Arc::new(Japanese));
        let mut field = FieldDescriptor::new("size", FieldKind::Select);
        field.required = false;
        field.options = vec![SelectOption::plain("S")];
        assert!(renderer.render_field(&field).contains("選択してください"));
        let html = renderer.render_form(&[], &FormOptions::default());
        assert!(html.contains("<button type=\"submit\">送信</button>"));
        assert!(html.contains(&format!(r#"id="{DEFAULT_FORM_ID}""#)));
    }
}
