//! The form generator.
//!
//! [`FormGenerator`] ties a schema to everything derived from it: the field
//! descriptors, the converter, the per-field validator, and the renderer. It
//! produces form fragments, single fields, and complete HTML pages.

use std::sync::Arc;

use hxform_core::utils::escape_html;
use hxform_core::{FormsError, FormsResult, Settings};
use hxform_schema::{ModelSchema, SchemaModel};

use crate::convert::FormDataConverter;
use crate::descriptor::FieldDescriptor;
use crate::messages::{translator_for, Translator};
use crate::render::{FormOptions, FormRenderer};
use crate::validator::FieldValidator;

const STYLESHEET: &str = r#"<style>
.hxform-form {
  max-width: 500px;
  margin: 0 auto;
  padding: 20px;
}

.form-field {
  margin-bottom: 15px;
}

.form-field label {
  display: block;
  margin-bottom: 5px;
  font-weight: bold;
}

.form-field input,
.form-field select {
  width: 100%;
  padding: 8px;
  border: 1px solid #ccc;
  border-radius: 4px;
  box-sizing: border-box;
}

.form-field input[type="checkbox"] {
  width: auto;
}

.form-field .required {
  color: red;
}

.form-field .field-description {
  display: block;
  color: #666;
  font-size: 0.9em;
  margin-top: 3px;
}

.error-message {
  min-height: 20px;
  margin-top: 3px;
}

.error-message .error {
  color: #d32f2f;
  font-size: 0.9em;
}

.form-actions {
  margin-top: 20px;
}

.form-actions button {
  background-color: #1976d2;
  color: white;
  padding: 10px 20px;
  border: none;
  border-radius: 4px;
  cursor: pointer;
  font-size: 16px;
}

.form-actions button:hover {
  background-color: #1565c0;
}

.errors {
  background-color: #ffebee;
  border: 1px solid #f44336;
  border-radius: 4px;
  padding: 10px;
  margin-bottom: 15px;
}

.errors ul {
  margin: 0;
  padding-left: 20px;
  color: #c62828;
}

.success {
  background-color: #e8f5e9;
  border: 1px solid #4caf50;
  border-radius: 4px;
  padding: 10px;
  color: #2e7d32;
}
</style>"#;

/// Options for a complete HTML page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageOptions {
    /// Page title and heading. Defaults to the model name.
    pub title: Option<String>,
    /// Options for the embedded form.
    pub form: FormOptions,
    /// Whether to include the htmx `<script>` tag.
    pub include_htmx: bool,
}

impl Default for PageOptions {
    fn default() -> Self {
        Self {
            title: None,
            form: FormOptions::default(),
            include_htmx: true,
        }
    }
}

/// Generates htmx forms from a schema.
///
/// # Examples
///
/// ```
/// use hxform_forms::generator::FormGenerator;
/// use hxform_forms::render::FormOptions;
/// use hxform_schema::{FieldSchema, ModelSchema, TypeExpr};
///
/// let schema = ModelSchema::builder("User")
///     .field(FieldSchema::new("name", TypeExpr::Str).min_length(1))
///     .field(FieldSchema::new("age", TypeExpr::Int).ge(0.0))
///     .build()
///     .unwrap();
///
/// let generator = FormGenerator::new(schema);
/// let html = generator.generate_form(&FormOptions::default());
/// assert!(html.contains(r#"<form id="user-form""#));
/// assert!(html.contains(r#"hx-post="/validate/age""#));
/// ```
#[derive(Debug, Clone)]
pub struct FormGenerator {
    schema: Arc<ModelSchema>,
    settings: Settings,
    translator: Arc<dyn Translator>,
    renderer: FormRenderer,
    validator: FieldValidator,
}

impl FormGenerator {
    /// Creates a generator with default settings.
    pub fn new(schema: impl Into<Arc<ModelSchema>>) -> Self {
        Self::with_settings(schema, Settings::default())
    }

    /// Creates a generator whose message catalog follows
    /// `settings.language_code`.
    pub fn with_settings(schema: impl Into<Arc<ModelSchema>>, settings: Settings) -> Self {
        let translator = translator_for(&settings.language_code);
        Self::with_translator(schema, settings, translator)
    }

    /// Creates a generator with an explicit message catalog.
    pub fn with_translator(
        schema: impl Into<Arc<ModelSchema>>,
        settings: Settings,
        translator: Arc<dyn Translator>,
    ) -> Self {
        let schema = schema.into();
        let renderer = FormRenderer::with_translator(settings.clone(), Arc::clone(&translator));
        let validator = FieldValidator::with_translator(Arc::clone(&schema), Arc::clone(&translator));
        tracing::debug!(
            model = %schema.name(),
            language = translator.language_code(),
            "Created form generator"
        );
        Self {
            schema,
            settings,
            translator,
            renderer,
            validator,
        }
    }

    /// Creates a generator for a typed model.
    pub fn from_model<M: SchemaModel>(settings: Settings) -> FormsResult<Self> {
        Ok(Self::with_settings(M::schema()?, settings))
    }

    /// Returns the schema.
    pub fn schema(&self) -> &ModelSchema {
        &self.schema
    }

    /// Returns the settings.
    pub const fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Returns the field descriptors in declaration order.
    pub fn fields(&self) -> &[FieldDescriptor] {
        self.validator.converter().fields()
    }

    /// Returns the per-field validator.
    pub const fn validator(&self) -> &FieldValidator {
        &self.validator
    }

    /// Returns the form data converter.
    pub const fn converter(&self) -> &FormDataConverter {
        self.validator.converter()
    }

    /// Returns the form options configured by the settings.
    pub fn form_options(&self) -> FormsResult<FormOptions> {
        FormOptions::from_settings(&self.settings)
    }

    /// Returns the default form id: the lowercased model name plus `-form`.
    pub fn default_form_id(&self) -> String {
        format!("{}-form", self.schema.name().to_lowercase())
    }

    /// Renders the whole form.
    pub fn generate_form(&self, options: &FormOptions) -> String {
        let mut options = options.clone();
        if options.form_id.is_none() {
            options.form_id = Some(self.default_form_id());
        }
        self.renderer.render_form(self.fields(), &options)
    }

    /// Renders a single field by name.
    pub fn generate_field(&self, name: &str) -> FormsResult<String> {
        self.fields()
            .iter()
            .find(|f| f.name == name)
            .map(|f| self.renderer.render_field(f))
            .ok_or_else(|| FormsError::UnknownField(name.to_string()))
    }

    /// Returns the stylesheet for generated forms, as a `<style>` element.
    pub const fn generate_css(&self) -> &'static str {
        STYLESHEET
    }

    /// Renders a complete HTML page containing the form.
    pub fn generate_full_html(&self, options: &PageOptions) -> String {
        let title = escape_html(options.title.as_deref().unwrap_or_else(|| self.schema.name()));
        let htmx_script = if options.include_htmx {
            format!(
                r#"<script src="{}"></script>"#,
                escape_html(&self.settings.htmx_script_url)
            )
        } else {
            String::new()
        };

        format!(
            "<!DOCTYPE html>\n\
             <html lang=\"{lang}\">\n\
             <head>\n  \
             <meta charset=\"UTF-8\">\n  \
             <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n  \
             <title>{title}</title>\n  \
             {htmx_script}\n  \
             {css}\n\
             </head>\n\
             <body>\n  \
             <h1>{title}</h1>\n  \
             {form}\n  \
             <div id=\"{response_id}\"></div>\n\
             </body>\n\
             </html>",
            lang = escape_html(self.translator.language_code()),
            css = self.generate_css(),
            form = self.generate_form(&options.form),
            response_id = escape_html(options.form.target_id().unwrap_or("response")),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hxform_schema::{FieldSchema, TypeExpr};

    fn schema() -> ModelSchema {
        ModelSchema::builder("ContactForm")
            .field(FieldSchema::new("name", TypeExpr::Str).min_length(1))
            .field(FieldSchema::new("message", TypeExpr::Str).max_length(500))
            .build()
            .unwrap()
    }

    #[test]
    fn test_default_form_id() {
        let generator = FormGenerator::new(schema());
        assert_eq!(generator.default_form_id(), "contactform-form");
        let html = generator.generate_form(&FormOptions::default().form_id("custom"));
        assert!(html.contains(r#"<form id="custom""#));
    }

    #[test]
    fn test_generate_field() {
        let generator = FormGenerator::new(schema());
        let html = generator.generate_field("message").unwrap();
        assert!(html.contains(r#"maxlength="500""#));
        let err = generator.generate_field("email").unwrap_err();
        assert_eq!(err.to_string(), "Unknown field: email");
    }

    #[test]
    fn test_full_html() {
        let generator = FormGenerator::new(schema());
        let html = generator.generate_full_html(&PageOptions::default());
        assert!(html.starts_with("<!DOCTYPE html>\n<html lang=\"en\">"));
        assert!(html.contains("<title>ContactForm</title>"));
        assert!(html.contains("<h1>ContactForm</h1>"));
        assert!(html.contains(r#"<script src="https://unpkg.com/htmx.org@2.0.4"></script>"#));
        assert!(html.contains(".hxform-form {"));
        assert!(html.contains(r#"<div id="response"></div>"#));
        assert!(html.ends_with("</html>"));
    }

    #[test]
    fn test_full_html_response_follows_target() {
        let settings = Settings {
            form_target: "#out".into(),
            ..Settings::default()
        };
        let generator = FormGenerator::with_settings(schema(), settings);
        let options = PageOptions {
            form: generator.form_options().unwrap(),
            ..PageOptions::default()
        };
        let html = generator.generate_full_html(&options);
        assert!(html.contains(r##"hx-target="#out""##));
        assert!(html.contains(r#"<div id="out"></div>"#));
        assert!(!html.contains(r#"<div id="response">"#));

        let options = PageOptions {
            form: FormOptions {
                target: "closest div".into(),
                ..FormOptions::default()
            },
            ..PageOptions::default()
        };
        assert!(generator
            .generate_full_html(&options)
            .contains(r#"<div id="response"></div>"#));
    }

    #[test]
    fn test_full_html_without_htmx() {
        let generator = FormGenerator::new(schema());
        let options = PageOptions {
            title: Some("Contact <us>".into()),
            include_htmx: false,
            ..PageOptions::default()
        };
        let html = generator.generate_full_html(&options);
        assert!(!html.contains("<script"));
        assert!(html.contains("<title>Contact &lt;us&gt;</title>"));
    }

    #[test]
    fn test_japanese_settings() {
        let settings = Settings {
            language_code: "ja".into(),
            ..Settings::default()
        };
        let generator = FormGenerator::with_settings(schema(), settings);
        let html = generator.generate_full_html(&PageOptions::default());
        assert!(html.contains("<html lang=\"ja\">"));
        assert!(html.contains("送信"));
    }

    #[test]
    fn test_accessors() {
        let generator = FormGenerator::new(schema());
        assert_eq!(generator.fields().len(), 2);
        assert_eq!(generator.converter().fields().len(), 2);
        assert_eq!(generator.schema().name(), "ContactForm");
        assert_eq!(generator.form_options().unwrap(), FormOptions::default());
        assert!(generator.generate_css().starts_with("<style>"));
    }
}
