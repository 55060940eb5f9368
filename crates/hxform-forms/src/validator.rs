//! Per-field validation.
//!
//! [`FieldValidator`] answers the question an htmx `blur`/`change` request
//! asks: is this one field's current value acceptable? Each field is checked
//! against its own declared type and constraints only. Whole-model rules are
//! evaluated by [`FieldValidator::validate_and_parse`] and nowhere else.

use std::sync::Arc;

use indexmap::IndexMap;

use hxform_core::logging::validation_span;
use hxform_core::utils::escape_html;
use hxform_schema::engine::validate_value;
use hxform_schema::{FormData, ModelSchema, Record};

use crate::convert::{FormDataConverter, NON_FIELD_ERRORS};
use crate::messages::{default_translator, Translator};

/// The verdict for one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationOutcome {
    /// Whether the value is acceptable.
    pub is_valid: bool,
    /// The user-facing message when invalid.
    pub error_message: Option<String>,
}

impl ValidationOutcome {
    /// A passing outcome.
    pub const fn valid() -> Self {
        Self {
            is_valid: true,
            error_message: None,
        }
    }

    /// A failing outcome with a message.
    pub fn invalid(message: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            error_message: Some(message.into()),
        }
    }

    /// Returns `true` if the value is acceptable.
    pub const fn is_valid(&self) -> bool {
        self.is_valid
    }

    /// Returns the message, if any.
    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    /// Renders the outcome as the HTML swapped into a field's error slot.
    ///
    /// ```
    /// use hxform_forms::validator::ValidationOutcome;
    ///
    /// assert_eq!(ValidationOutcome::valid().to_html(), "");
    /// assert_eq!(
    ///     ValidationOutcome::invalid("<b>bad</b>").to_html(),
    ///     r#"<span class="error">&lt;b&gt;bad&lt;/b&gt;</span>"#
    /// );
    /// ```
    pub fn to_html(&self) -> String {
        match &self.error_message {
            Some(message) if !self.is_valid && !message.is_empty() => {
                format!(r#"<span class="error">{}</span>"#, escape_html(message))
            }
            _ => String::new(),
        }
    }
}

/// Validates individual fields of a model and whole submissions.
///
/// # Examples
///
/// ```
/// use hxform_forms::validator::FieldValidator;
/// use hxform_schema::{FieldSchema, FormData, ModelSchema, TypeExpr, Value};
///
/// let schema = ModelSchema::builder("User")
///     .field(FieldSchema::new("age", TypeExpr::Int).ge(18.0))
///     .build()
///     .unwrap();
/// let validator = FieldValidator::new(schema);
///
/// let mut data = FormData::new();
/// data.insert("age".into(), Value::from("17"));
/// let outcome = validator.validate_field("age", &data);
/// assert!(!outcome.is_valid());
/// assert_eq!(outcome.error_message(), Some("This value must be at least 18"));
/// ```
#[derive(Debug, Clone)]
pub struct FieldValidator {
    schema: Arc<ModelSchema>,
    converter: FormDataConverter,
    translator: Arc<dyn Translator>,
}

impl FieldValidator {
    /// Creates a validator using the default message catalog.
    pub fn new(schema: impl Into<Arc<ModelSchema>>) -> Self {
        Self::with_translator(schema, default_translator())
    }

    /// Creates a validator whose messages come from `translator`.
    pub fn with_translator(
        schema: impl Into<Arc<ModelSchema>>,
        translator: Arc<dyn Translator>,
    ) -> Self {
        let schema = schema.into();
        let converter = FormDataConverter::with_translator(Arc::clone(&schema), Arc::clone(&translator));
        Self {
            schema,
            converter,
            translator,
        }
    }

    /// Returns the converter used to prepare submissions.
    pub const fn converter(&self) -> &FormDataConverter {
        &self.converter
    }

    /// Validates one field of a submission in isolation.
    ///
    /// Unknown names, missing required values, and type or constraint
    /// failures are reported as invalid outcomes, never as errors.
    pub fn validate_field(&self, name: &str, data: &FormData) -> ValidationOutcome {
        let span = validation_span(self.schema.name());
        let _guard = span.enter();

        let (Some(field), Some(descriptor)) = (self.schema.field(name), self.converter.field(name))
        else {
            tracing::debug!(field = name, "Validation requested for unknown field");
            return ValidationOutcome::invalid(self.translator.unknown_field(name));
        };

        let value = crate::convert::convert_field(descriptor, data.get(name));
        let outcome = match value {
            None => self.empty_outcome(descriptor.required),
            Some(v) if v.is_empty() => self.empty_outcome(descriptor.required),
            Some(v) => match validate_value(field, &v) {
                Ok(_) => ValidationOutcome::valid(),
                Err(errors) => errors
                    .first()
                    .map_or_else(ValidationOutcome::valid, |e| {
                        ValidationOutcome::invalid(self.translator.translate(e))
                    }),
            },
        };

        tracing::debug!(field = name, valid = outcome.is_valid, "Field validated");
        outcome
    }

    fn empty_outcome(&self, required: bool) -> ValidationOutcome {
        if required {
            ValidationOutcome::invalid(self.translator.required())
        } else {
            ValidationOutcome::valid()
        }
    }

    /// Validates every declared field independently, in declaration order.
    ///
    /// Whole-model rules are not evaluated.
    pub fn validate_all(&self, data: &FormData) -> IndexMap<String, ValidationOutcome> {
        self.schema
            .fields()
            .iter()
            .map(|f| (f.name.clone(), self.validate_field(&f.name, data)))
            .collect()
    }

    /// Validates every field and, if all pass, parses the whole submission.
    ///
    /// Whole-model rule failures are merged into the returned outcomes: an
    /// error naming a field marks that field invalid; an error naming none is
    /// reported under `__all__`.
    pub fn validate_and_parse(
        &self,
        data: &FormData,
    ) -> (Option<Record>, IndexMap<String, ValidationOutcome>) {
        let mut outcomes = self.validate_all(data);
        if !outcomes.values().all(ValidationOutcome::is_valid) {
            return (None, outcomes);
        }

        match self.converter.parse(data) {
            Ok(record) => (Some(record), outcomes),
            Err(errors) => {
                let span = validation_span(self.schema.name());
                let _guard = span.enter();
                tracing::debug!(errors = errors.len(), "Whole-model validation failed");

                for (key, message) in self.converter.error_map(&errors) {
                    let entry = outcomes
                        .entry(key)
                        .or_insert_with(ValidationOutcome::valid);
                    if entry.is_valid {
                        *entry = ValidationOutcome::invalid(message);
                    }
                }
                (None, outcomes)
            }
        }
    }

    /// Renders a whole-submission response: a success banner when every
    /// outcome is valid, otherwise a list of `field: message` entries.
    pub fn error_response(&self, outcomes: &IndexMap<String, ValidationOutcome>) -> String {
        let items: Vec<String> = outcomes
            .iter()
            .filter(|(_, outcome)| !outcome.is_valid)
            .map(|(name, outcome)| {
                let message = escape_html(outcome.error_message().unwrap_or_default());
                if name == NON_FIELD_ERRORS {
                    format!("<li>{message}</li>")
                } else {
                    format!("<li>{}: {message}</li>", escape_html(name))
                }
            })
            .collect();

        if items.is_empty() {
            format!(
                r#"<div class="success">{}</div>"#,
                escape_html(&self.translator.no_problems())
            )
        } else {
            format!(r#"<div class="errors"><ul>{}</ul></div>"#, items.concat())
        }
    }
}
