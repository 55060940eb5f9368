//! Model schemas and whole-model rules.
//!
//! A [`ModelSchema`] is the declared shape of a model: its name, its fields in
//! declaration order, and the [`ModelRule`]s that span several fields. Schemas
//! are constructed through [`ModelSchemaBuilder`], which checks the
//! declaration before handing out an immutable schema.
//!
//! Typed models implement [`SchemaModel`] to expose their schema and to be
//! built from a validated [`Record`].

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use hxform_core::{FormsError, FormsResult, ValidationError};

use crate::field::FieldSchema;
use crate::record::Record;
use crate::types::TypeExpr;

/// A validation rule spanning more than one field.
///
/// Rules run only after every field of an instance has validated, so they
/// can rely on all declared fields being present in the record.
///
/// # Examples
///
/// ```
/// use hxform_core::ValidationError;
/// use hxform_schema::{ModelRule, Record, Value};
///
/// #[derive(Debug)]
/// struct EndAfterStart;
///
/// impl ModelRule for EndAfterStart {
///     fn check(&self, record: &Record) -> Result<(), Vec<ValidationError>> {
///         match (record.get_date("start"), record.get_date("end")) {
///             (Some(s), Some(e)) if e < s => Err(vec![
///                 ValidationError::new("Value error, end before start", "value_error").at("end"),
///             ]),
///             _ => Ok(()),
///         }
///     }
///
///     fn name(&self) -> &str {
///         "EndAfterStart"
///     }
/// }
///
/// assert!(EndAfterStart.check(&Record::new()).is_ok());
/// ```
pub trait ModelRule: Send + Sync + fmt::Debug {
    /// Checks a fully validated record.
    fn check(&self, record: &Record) -> Result<(), Vec<ValidationError>>;

    /// Returns a human-readable name for this rule.
    fn name(&self) -> &str;
}

/// Requires two fields to hold equal values (e.g. password confirmation).
///
/// A mismatch is reported as a location-less `value_error`, like any other
/// whole-model failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldsMatch {
    /// The reference field.
    pub field: String,
    /// The field that must equal `field`.
    pub other: String,
    /// The message reported on mismatch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl FieldsMatch {
    /// Creates a rule requiring `other` to equal `field`.
    pub fn new(field: impl Into<String>, other: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            other: other.into(),
            message: None,
        }
    }

    /// Sets the message reported on mismatch.
    #[must_use]
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl ModelRule for FieldsMatch {
    fn check(&self, record: &Record) -> Result<(), Vec<ValidationError>> {
        if record.get(&self.field) == record.get(&self.other) {
            return Ok(());
        }
        let message = self
            .message
            .clone()
            .unwrap_or_else(|| format!("{} does not match {}", self.other, self.field));
        Err(vec![ValidationError::new(
            format!("Value error, {message}"),
            "value_error",
        )])
    }

    fn name(&self) -> &str {
        "FieldsMatch"
    }
}

/// The declared shape of a model.
///
/// Cloning is cheap for the rule list, which is shared.
#[derive(Debug, Clone)]
pub struct ModelSchema {
    name: String,
    fields: Vec<FieldSchema>,
    rules: Vec<Arc<dyn ModelRule>>,
}

impl ModelSchema {
    /// Starts building a schema for the model `name`.
    pub fn builder(name: impl Into<String>) -> ModelSchemaBuilder {
        ModelSchemaBuilder {
            name: name.into(),
            fields: Vec::new(),
            rules: Vec::new(),
        }
    }

    /// Returns the model name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the fields in declaration order.
    pub fn fields(&self) -> &[FieldSchema] {
        &self.fields
    }

    /// Looks up a field by name.
    pub fn field(&self, name: &str) -> Option<&FieldSchema> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Returns the whole-model rules.
    pub fn rules(&self) -> &[Arc<dyn ModelRule>] {
        &self.rules
    }
}

/// Builder for [`ModelSchema`].
///
/// ```
/// use hxform_schema::{FieldSchema, FieldsMatch, ModelSchema, TypeExpr};
///
/// let schema = ModelSchema::builder("Signup")
///     .field(FieldSchema::new("password", TypeExpr::Str).min_length(8))
///     .field(FieldSchema::new("password_confirm", TypeExpr::Str))
///     .rule(FieldsMatch::new("password", "password_confirm"))
///     .build()
///     .unwrap();
/// assert_eq!(schema.fields().len(), 2);
/// assert_eq!(schema.rules().len(), 1);
/// ```
#[derive(Debug)]
pub struct ModelSchemaBuilder {
    name: String,
    fields: Vec<FieldSchema>,
    rules: Vec<Arc<dyn ModelRule>>,
}

impl ModelSchemaBuilder {
    /// Appends a field.
    #[must_use]
    pub fn field(mut self, field: FieldSchema) -> Self {
        self.fields.push(field);
        self
    }

    /// Appends several fields.
    #[must_use]
    pub fn fields(mut self, fields: impl IntoIterator<Item = FieldSchema>) -> Self {
        self.fields.extend(fields);
        self
    }

    /// Appends a whole-model rule.
    #[must_use]
    pub fn rule(mut self, rule: impl ModelRule + 'static) -> Self {
        self.rules.push(Arc::new(rule));
        self
    }

    /// Appends an already shared rule.
    #[must_use]
    pub fn shared_rule(mut self, rule: Arc<dyn ModelRule>) -> Self {
        self.rules.push(rule);
        self
    }

    /// Checks the declaration and builds the schema.
    ///
    /// Fails with [`FormsError::Schema`] on duplicate field names, empty
    /// literal or option lists, and patterns that do not compile.
    pub fn build(self) -> FormsResult<ModelSchema> {
        let mut seen = HashSet::new();
        for field in &self.fields {
            if field.name.is_empty() {
                return Err(FormsError::Schema(format!(
                    "Model '{}' declares a field with an empty name",
                    self.name
                )));
            }
            if !seen.insert(field.name.as_str()) {
                return Err(FormsError::Schema(format!(
                    "Model '{}' declares field '{}' more than once",
                    self.name, field.name
                )));
            }
            check_type(&self.name, &field.name, &field.ty)?;
            if let Some(pattern) = &field.effective_constraints().pattern {
                regex::Regex::new(pattern).map_err(|e| {
                    FormsError::Schema(format!(
                        "Invalid pattern for field '{}.{}': {e}",
                        self.name, field.name
                    ))
                })?;
            }
        }

        tracing::debug!(
            model = %self.name,
            fields = self.fields.len(),
            rules = self.rules.len(),
            "Built model schema"
        );

        Ok(ModelSchema {
            name: self.name,
            fields: self.fields,
            rules: self.rules,
        })
    }
}

fn check_type(model: &str, field: &str, ty: &TypeExpr) -> FormsResult<()> {
    match ty {
        TypeExpr::Literal { values } if values.is_empty() => Err(FormsError::Schema(format!(
            "Field '{model}.{field}' declares an empty literal"
        ))),
        TypeExpr::Choices { options } if options.is_empty() => Err(FormsError::Schema(format!(
            "Field '{model}.{field}' declares a select without options"
        ))),
        TypeExpr::Union { members } if members.is_empty() => Err(FormsError::Schema(format!(
            "Field '{model}.{field}' declares an empty union"
        ))),
        TypeExpr::Union { members } => members.iter().try_for_each(|m| check_type(model, field, m)),
        TypeExpr::Annotated { inner, constraints } => {
            if let Some(pattern) = &constraints.pattern {
                regex::Regex::new(pattern).map_err(|e| {
                    FormsError::Schema(format!("Invalid pattern for field '{model}.{field}': {e}"))
                })?;
            }
            check_type(model, field, inner)
        }
        _ => Ok(()),
    }
}

/// A typed model with a declared schema.
///
/// ```
/// use hxform_core::FormsResult;
/// use hxform_schema::{FieldSchema, ModelSchema, SchemaModel, TypeExpr};
/// use serde::Deserialize;
///
/// #[derive(Debug, Deserialize)]
/// struct User {
///     name: String,
///     age: i64,
/// }
///
/// impl SchemaModel for User {
///     fn schema() -> FormsResult<ModelSchema> {
///         ModelSchema::builder("User")
///             .field(FieldSchema::new("name", TypeExpr::Str).min_length(1))
///             .field(FieldSchema::new("age", TypeExpr::Int).ge(0.0))
///             .build()
///     }
/// }
///
/// assert_eq!(User::schema().unwrap().name(), "User");
/// ```
pub trait SchemaModel: DeserializeOwned {
    /// Returns the model's schema.
    fn schema() -> FormsResult<ModelSchema>;

    /// Builds the model from a validated record.
    fn from_record(record: &Record) -> FormsResult<Self> {
        record.deserialize()
    }
}
