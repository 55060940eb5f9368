//! Field descriptors.
//!
//! A [`FieldDescriptor`] is the flattened, render-ready view of one declared
//! field: its resolved [`FieldKind`], whether it is required, its display
//! strings, and the constraints that map onto HTML attributes. Descriptors are
//! derived once from a schema and read-only afterwards.

use serde::Serialize;

use hxform_schema::{SelectOption, Value};

use crate::kind::FieldKind;

/// The render-ready description of a single form field.
///
/// Numeric bounds are only set for integer and float fields; `options` is
/// only non-empty for selects.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldDescriptor {
    /// The field name, used for the input's `name` and `id`.
    pub name: String,
    /// The resolved field kind.
    pub kind: FieldKind,
    /// Whether a value must be submitted.
    pub required: bool,
    /// The label text.
    pub title: String,
    /// Help text shown under the input.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// The default value. Always `None` for required fields.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    /// Minimum string length.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,
    /// Maximum string length.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    /// Inclusive lower bound.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ge: Option<f64>,
    /// Inclusive upper bound.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub le: Option<f64>,
    /// Exclusive lower bound.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gt: Option<f64>,
    /// Exclusive upper bound.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lt: Option<f64>,
    /// Regular expression the value must match.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    /// Select options in declaration order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<SelectOption>,
    /// Input placeholder.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
}

impl FieldDescriptor {
    /// Creates a required descriptor with no constraints, titled from its name.
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        let name = name.into();
        Self {
            title: hxform_core::utils::title_from_name(&name),
            name,
            kind,
            required: true,
            description: None,
            default: None,
            min_length: None,
            max_length: None,
            ge: None,
            le: None,
            gt: None,
            lt: None,
            pattern: None,
            options: Vec::new(),
            placeholder: None,
        }
    }

    /// Returns `true` if this descriptor is a select.
    pub fn is_select(&self) -> bool {
        self.kind == FieldKind::Select
    }

    /// Returns the HTML `min` attribute: `ge`, or for integers the integer
    /// above `gt`. A float's exclusive bound has no HTML equivalent.
    pub fn html_min(&self) -> Option<f64> {
        self.ge.or_else(|| self.integer_bound(self.gt, 1.0))
    }

    /// Returns the HTML `max` attribute: `le`, or for integers the integer
    /// below `lt`.
    pub fn html_max(&self) -> Option<f64> {
        self.le.or_else(|| self.integer_bound(self.lt, -1.0))
    }

    fn integer_bound(&self, exclusive: Option<f64>, step: f64) -> Option<f64> {
        exclusive.filter(|_| self.kind == FieldKind::Integer).map(|b| b + step)
    }

    /// Returns `true` if `option` is the default selection.
    pub fn is_default_option(&self, option: &SelectOption) -> bool {
        self.default
            .as_ref()
            .is_some_and(|d| !d.is_null() && d.to_string() == option.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_titles_from_name() {
        let d = FieldDescriptor::new("birth_date", FieldKind::Date);
        assert_eq!(d.title, "Birth Date");
        assert!(d.required);
        assert!(d.options.is_empty());
    }

    #[test]
    fn test_html_bounds() {
        let mut d = FieldDescriptor::new("n", FieldKind::Integer);
        assert_eq!(d.html_min(), None);
        d.gt = Some(0.0);
        d.lt = Some(10.0);
        assert_eq!(d.html_min(), Some(1.0));
        assert_eq!(d.html_max(), Some(9.0));
        d.ge = Some(5.0);
        d.le = Some(7.0);
        assert_eq!(d.html_min(), Some(5.0));
        assert_eq!(d.html_max(), Some(7.0));
    }

    #[test]
    fn test_float_exclusive_bounds_not_shifted() {
        let mut d = FieldDescriptor::new("price", FieldKind::Float);
        d.gt = Some(0.0);
        d.lt = Some(100.0);
        assert_eq!(d.html_min(), None);
        assert_eq!(d.html_max(), None);
        d.ge = Some(0.5);
        assert_eq!(d.html_min(), Some(0.5));
    }

    #[test]
    fn test_default_option() {
        let mut d = FieldDescriptor::new("size", FieldKind::Select);
        d.options = vec![SelectOption::plain("S"), SelectOption::plain("M")];
        d.default = Some(Value::from("M"));
        assert!(!d.is_default_option(&d.options[0]));
        assert!(d.is_default_option(&d.options[1]));
    }

    #[test]
    fn test_serialize_skips_empty() {
        let json = serde_json::to_value(FieldDescriptor::new("name", FieldKind::String)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"name": "name", "kind": "string", "required": true, "title": "Name"})
        );
    }
}
