//! Validated model instances.
//!
//! A [`Record`] is what whole-instance validation produces: every declared
//! field, in declaration order, mapped to its coerced [`Value`]. Records can
//! be read through typed accessors or deserialized into a user struct.

use indexmap::IndexMap;
use serde::de::DeserializeOwned;

use hxform_core::FormsError;

use crate::value::Value;

/// A validated instance of a model.
///
/// # Examples
///
/// ```
/// use hxform_schema::{Record, Value};
///
/// let mut record = Record::new();
/// record.insert("name", Value::from("John"));
/// record.insert("age", Value::Int(25));
///
/// assert_eq!(record.get_str("name"), Some("John"));
/// assert_eq!(record.get_int("age"), Some(25));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    values: IndexMap<String, Value>,
}

impl Record {
    /// Creates an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a field value, keeping first-insertion order.
    pub fn insert(&mut self, name: impl Into<String>, value: Value) {
        self.values.insert(name.into(), value);
    }

    /// Returns the value of a field.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Returns a string field.
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }

    /// Returns an integer field.
    pub fn get_int(&self, name: &str) -> Option<i64> {
        match self.get(name) {
            Some(Value::Int(i)) => Some(*i),
            _ => None,
        }
    }

    /// Returns a float field. Integers are widened.
    #[allow(clippy::cast_precision_loss)]
    pub fn get_float(&self, name: &str) -> Option<f64> {
        match self.get(name) {
            Some(Value::Float(f)) => Some(*f),
            Some(Value::Int(i)) => Some(*i as f64),
            _ => None,
        }
    }

    /// Returns a boolean field.
    pub fn get_bool(&self, name: &str) -> Option<bool> {
        match self.get(name) {
            Some(Value::Bool(b)) => Some(*b),
            _ => None,
        }
    }

    /// Returns a date field.
    pub fn get_date(&self, name: &str) -> Option<chrono::NaiveDate> {
        match self.get(name) {
            Some(Value::Date(d)) => Some(*d),
            _ => None,
        }
    }

    /// Iterates over `(field, value)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Returns the number of fields.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Converts the record to a JSON object.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Object(
            self.values
                .iter()
                .map(|(k, v)| (k.clone(), v.to_json()))
                .collect(),
        )
    }

    /// Deserializes the record into a typed model.
    ///
    /// Dates are passed as ISO-8601 strings, which `chrono::NaiveDate`
    /// deserializes directly.
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T, FormsError> {
        serde_json::from_value(self.to_json()).map_err(|e| {
            FormsError::Serialization(format!("Failed to deserialize record: {e}"))
        })
    }

    /// Consumes the record, returning the underlying ordered map.
    pub fn into_inner(self) -> IndexMap<String, Value> {
        self.values
    }
}

impl FromIterator<(String, Value)> for Record {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Order {
        product: String,
        quantity: i64,
        price: f64,
        gift_wrap: bool,
        delivery_date: Option<NaiveDate>,
    }

    fn order_record() -> Record {
        let mut r = Record::new();
        r.insert("product", Value::from("Tea"));
        r.insert("quantity", Value::Int(2));
        r.insert("price", Value::Float(4.5));
        r.insert("gift_wrap", Value::Bool(false));
        r.insert(
            "delivery_date",
            Value::Date(NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()),
        );
        r
    }

    #[test]
    fn test_typed_accessors() {
        let r = order_record();
        assert_eq!(r.get_int("quantity"), Some(2));
        assert_eq!(r.get_float("quantity"), Some(2.0));
        assert_eq!(r.get_bool("gift_wrap"), Some(false));
        assert_eq!(r.get_str("quantity"), None);
        assert_eq!(r.get_date("delivery_date"), NaiveDate::from_ymd_opt(2025, 3, 1));
    }

    #[test]
    fn test_iteration_order_is_insertion_order() {
        let record = order_record();
        let names: Vec<&str> = record.iter().map(|(k, _)| k).collect();
        assert_eq!(names, ["product", "quantity", "price", "gift_wrap", "delivery_date"]);
    }

    #[test]
    fn test_deserialize_into_struct() {
        let order: Order = order_record().deserialize().unwrap();
        assert_eq!(order.product, "Tea");
        assert_eq!(order.delivery_date, NaiveDate::from_ymd_opt(2025, 3, 1));
    }

    #[test]
    fn test_deserialize_null_into_option() {
        let mut r = order_record();
        r.insert("delivery_date", Value::Null);
        let order: Order = r.deserialize().unwrap();
        assert_eq!(order.delivery_date, None);
    }

    #[test]
    fn test_deserialize_mismatch_is_error() {
        let mut r = order_record();
        r.insert("quantity", Value::from("two"));
        let err = r.deserialize::<Order>().unwrap_err();
        assert!(err.to_string().contains("Failed to deserialize record"));
    }
}
