//! Core error types for hxform.
//!
//! This module provides [`ValidationError`], the structured error reported by
//! the schema engine for a single failed check, and [`FormsError`], the error
//! enum returned by fallible library operations (unknown fields, malformed
//! schemas, configuration problems, I/O).

use std::collections::HashMap;
use std::fmt;

use thiserror::Error;

/// A single structured validation error.
///
/// Each error carries the location of the offending value (`loc`, usually a
/// one-element path holding the field name), a stable error-kind `code`
/// (e.g. `"string_too_short"`), the engine's raw message, and a context map of
/// bound values (e.g. `ge = "18"` for range errors).
///
/// # Examples
///
/// ```
/// use hxform_core::error::ValidationError;
///
/// let err = ValidationError::new("Input should be greater than or equal to 18", "greater_than_equal")
///     .at("age")
///     .with_param("ge", "18");
/// assert_eq!(err.field(), Some("age"));
/// assert_eq!(err.params.get("ge").map(String::as_str), Some("18"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// The engine's raw (untranslated) message.
    pub message: String,
    /// A short code identifying the kind of failure.
    pub code: String,
    /// Context values for the message (bounds, limits).
    pub params: HashMap<String, String>,
    /// Location path of the offending value. Empty for whole-model errors.
    pub loc: Vec<String>,
}

impl ValidationError {
    /// Creates a new `ValidationError` with a message and code and no location.
    pub fn new(message: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: code.into(),
            params: HashMap::new(),
            loc: Vec::new(),
        }
    }

    /// Prepends a path segment to the error location.
    #[must_use]
    pub fn at(mut self, segment: impl Into<String>) -> Self {
        self.loc.insert(0, segment.into());
        self
    }

    /// Adds a context parameter to this validation error.
    #[must_use]
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Returns the top-level field this error targets, if any.
    pub fn field(&self) -> Option<&str> {
        self.loc.first().map(String::as_str)
    }

    /// Returns the context parameter stored under `key`.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.loc.is_empty() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{}: {}", self.loc.join("."), self.message)
        }
    }
}

impl std::error::Error for ValidationError {}

/// The list of errors produced by one whole-instance validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(pub Vec<ValidationError>);

impl ValidationErrors {
    /// Returns the errors in the order the engine reported them.
    pub fn errors(&self) -> &[ValidationError] {
        &self.0
    }

    /// Returns the errors targeting the given field.
    pub fn for_field<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a ValidationError> {
        self.0.iter().filter(move |e| e.field() == Some(field))
    }

    /// Returns `true` if no errors were recorded.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the number of errors.
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl From<Vec<ValidationError>> for ValidationErrors {
    fn from(errors: Vec<ValidationError>) -> Self {
        Self(errors)
    }
}

impl IntoIterator for ValidationErrors {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for error in &self.0 {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{error}")?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// The primary error type for hxform.
#[derive(Error, Debug)]
pub enum FormsError {
    /// A field name was not declared by the schema.
    #[error("Unknown field: {0}")]
    UnknownField(String),

    /// The schema definition itself is malformed.
    #[error("Schema error: {0}")]
    Schema(String),

    /// Submitted data failed whole-instance validation.
    #[error("Validation error: {0}")]
    Validation(ValidationErrors),

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// An error occurred during serialization or deserialization.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// An I/O error occurred.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<ValidationErrors> for FormsError {
    fn from(errors: ValidationErrors) -> Self {
        Self::Validation(errors)
    }
}

/// A convenience type alias for `Result<T, FormsError>`.
pub type FormsResult<T> = Result<T, FormsError>;
