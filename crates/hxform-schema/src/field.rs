//! Field declarations.
//!
//! A [`FieldSchema`] is one declared field of a model: its name, declared
//! [`TypeExpr`], optional default, display metadata, free-form extras, and
//! [`Constraints`]. Fields are built with chained setters:
//!
//! ```
//! use hxform_schema::{FieldSchema, TypeExpr};
//!
//! let age = FieldSchema::new("age", TypeExpr::Int)
//!     .ge(18.0)
//!     .le(120.0)
//!     .title("Age")
//!     .placeholder("18 or older");
//! assert!(age.is_required());
//! assert_eq!(age.placeholder_text(), Some("18 or older"));
//! ```

use serde::{Deserialize, Serialize};

use crate::types::{Constraints, TypeExpr};
use crate::value::Value;

/// The declaration of a single model field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSchema {
    /// The field name, unique within its model.
    pub name: String,
    /// The declared type.
    #[serde(rename = "type")]
    pub ty: TypeExpr,
    /// The default used when the field is absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    /// Display title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Help text shown under the input.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Free-form extra metadata (e.g. `"placeholder"`).
    #[serde(default, skip_serializing_if = "serde_json::Map::is_empty")]
    pub extra: serde_json::Map<String, serde_json::Value>,
    /// Constraints declared on the field itself.
    #[serde(flatten)]
    pub constraints: Constraints,
}

impl FieldSchema {
    /// Creates a field with no default, metadata, or constraints.
    pub fn new(name: impl Into<String>, ty: TypeExpr) -> Self {
        Self {
            name: name.into(),
            ty,
            default: None,
            title: None,
            description: None,
            extra: serde_json::Map::new(),
            constraints: Constraints::default(),
        }
    }

    /// Sets the default value.
    #[must_use]
    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Sets the display title.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Stores a free-form extra value.
    #[must_use]
    pub fn extra(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }

    /// Sets the input placeholder (stored in `extra` under `"placeholder"`).
    #[must_use]
    pub fn placeholder(self, text: impl Into<String>) -> Self {
        self.extra("placeholder", serde_json::Value::String(text.into()))
    }

    /// Replaces all field-level constraints.
    #[must_use]
    pub fn constraints(mut self, constraints: Constraints) -> Self {
        self.constraints = constraints;
        self
    }

    /// Sets the minimum string length.
    #[must_use]
    pub fn min_length(mut self, n: usize) -> Self {
        self.constraints.min_length = Some(n);
        self
    }

    /// Sets the maximum string length.
    #[must_use]
    pub fn max_length(mut self, n: usize) -> Self {
        self.constraints.max_length = Some(n);
        self
    }

    /// Sets the inclusive lower bound.
    #[must_use]
    pub fn ge(mut self, bound: f64) -> Self {
        self.constraints.ge = Some(bound);
        self
    }

    /// Sets the inclusive upper bound.
    #[must_use]
    pub fn le(mut self, bound: f64) -> Self {
        self.constraints.le = Some(bound);
        self
    }

    /// Sets the exclusive lower bound.
    #[must_use]
    pub fn gt(mut self, bound: f64) -> Self {
        self.constraints.gt = Some(bound);
        self
    }

    /// Sets the exclusive upper bound.
    #[must_use]
    pub fn lt(mut self, bound: f64) -> Self {
        self.constraints.lt = Some(bound);
        self
    }

    /// Sets the regular expression string values must match.
    #[must_use]
    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        self.constraints.pattern = Some(pattern.into());
        self
    }

    /// Returns `true` if the field accepts null.
    pub fn is_nullable(&self) -> bool {
        self.ty.is_nullable()
    }

    /// Returns `true` if the field has no default and is not nullable.
    pub fn is_required(&self) -> bool {
        self.default.is_none() && !self.is_nullable()
    }

    /// Returns the effective constraints: those attached by an outer
    /// annotation, overridden by the field's own.
    pub fn effective_constraints(&self) -> Constraints {
        self.ty
            .annotated_constraints()
            .map_or_else(|| self.constraints.clone(), |c| c.merged_with(&self.constraints))
    }

    /// Returns the placeholder text from `extra`, if it is a string.
    pub fn placeholder_text(&self) -> Option<&str> {
        self.extra.get("placeholder").and_then(serde_json::Value::as_str)
    }
}
