//! Form data conversion.
//!
//! Browsers submit every field as a string, and omit unchecked checkboxes
//! entirely. [`FormDataConverter`] turns such a submission into values of the
//! right kind before the engine sees them. Conversion never fails: a value
//! that cannot be converted is passed through unchanged, and the engine
//! reports the error.

use std::sync::Arc;

use indexmap::IndexMap;
use serde::de::DeserializeOwned;

use hxform_core::{FormsResult, ValidationErrors};
use hxform_schema::engine::validate_instance;
use hxform_schema::{parse_iso_date, FormData, ModelSchema, Record, Value};

use crate::descriptor::FieldDescriptor;
use crate::introspect::introspect;
use crate::kind::FieldKind;
use crate::messages::{default_translator, Translator};

/// The key under which errors that target no single field are reported.
pub const NON_FIELD_ERRORS: &str = "__all__";

const TRUTHY_TOKENS: &[&str] = &["on", "true", "1", "yes", "checked"];

/// Converts submitted form data and validates it into a [`Record`].
///
/// # Examples
///
/// ```
/// use hxform_forms::convert::FormDataConverter;
/// use hxform_schema::{FieldSchema, FormData, ModelSchema, TypeExpr, Value};
///
/// let schema = ModelSchema::builder("User")
///     .field(FieldSchema::new("name", TypeExpr::Str).min_length(1))
///     .field(FieldSchema::new("age", TypeExpr::Int).ge(0.0))
///     .field(FieldSchema::new("is_admin", TypeExpr::Bool).default_value(false))
///     .build()
///     .unwrap();
/// let converter = FormDataConverter::new(schema);
///
/// let mut data = FormData::new();
/// data.insert("name".into(), Value::from("John"));
/// data.insert("age".into(), Value::from("25"));
///
/// let converted = converter.convert(&data);
/// assert_eq!(converted.get("age"), Some(&Value::Int(25)));
/// assert_eq!(converted.get("is_admin"), Some(&Value::Bool(false)));
///
/// let record = converter.parse(&data).unwrap();
/// assert_eq!(record.get_int("age"), Some(25));
/// ```
#[derive(Debug, Clone)]
pub struct FormDataConverter {
    schema: Arc<ModelSchema>,
    fields: Vec<FieldDescriptor>,
    translator: Arc<dyn Translator>,
}

impl FormDataConverter {
    /// Creates a converter using the default message catalog.
    pub fn new(schema: impl Into<Arc<ModelSchema>>) -> Self {
        Self::with_translator(schema, default_translator())
    }

    /// Creates a converter whose error maps use `translator`.
    pub fn with_translator(
        schema: impl Into<Arc<ModelSchema>>,
        translator: Arc<dyn Translator>,
    ) -> Self {
        let schema = schema.into();
        let fields = introspect(&schema);
        Self {
            schema,
            fields,
            translator,
        }
    }

    /// Returns the schema.
    pub fn schema(&self) -> &ModelSchema {
        &self.schema
    }

    /// Returns the field descriptors in declaration order.
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Returns the descriptor of a field.
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Returns the message catalog.
    pub fn translator(&self) -> &Arc<dyn Translator> {
        &self.translator
    }

    /// Converts a submission. Only declared fields are kept; absent
    /// checkboxes become `false` and other absent fields stay absent.
    pub fn convert(&self, data: &FormData) -> FormData {
        self.fields
            .iter()
            .filter_map(|field| {
                convert_field(field, data.get(&field.name)).map(|v| (field.name.clone(), v))
            })
            .collect()
    }

    /// Converts a submission and validates it as a whole instance.
    pub fn parse(&self, data: &FormData) -> Result<Record, ValidationErrors> {
        validate_instance(&self.schema, &self.convert(data))
    }

    /// Like [`parse`](Self::parse), but reports failures as a map from field
    /// name to translated message. Only the first error per field is kept;
    /// errors without a location are reported under [`NON_FIELD_ERRORS`].
    pub fn parse_safe(&self, data: &FormData) -> (Option<Record>, IndexMap<String, String>) {
        match self.parse(data) {
            Ok(record) => (Some(record), IndexMap::new()),
            Err(errors) => (None, self.error_map(&errors)),
        }
    }

    /// Converts, validates, and deserializes a submission into `T`.
    pub fn parse_into<T: DeserializeOwned>(&self, data: &FormData) -> FormsResult<T> {
        self.parse(data)?.deserialize()
    }

    /// Translates whole-instance errors into a field-keyed message map.
    pub fn error_map(&self, errors: &ValidationErrors) -> IndexMap<String, String> {
        let mut map = IndexMap::new();
        for error in errors.errors() {
            let key = error.field().unwrap_or(NON_FIELD_ERRORS).to_string();
            map.entry(key)
                .or_insert_with(|| self.translator.translate(error));
        }
        map
    }
}

/// Converts one field's submitted value.
///
/// Returns `None` when the field should be left out of the converted data.
pub fn convert_field(field: &FieldDescriptor, value: Option<&Value>) -> Option<Value> {
    match value {
        None if field.kind == FieldKind::Boolean => Some(Value::Bool(false)),
        None => None,
        Some(value) => Some(convert_value(field, value)),
    }
}

/// Converts one present value to the field's kind.
///
/// Empty values become null for optional fields and are kept as-is for
/// required ones. Values that fail to convert are returned unchanged.
#[allow(clippy::cast_precision_loss)]
pub fn convert_value(field: &FieldDescriptor, value: &Value) -> Value {
    if value.is_empty() {
        return if field.required {
            value.clone()
        } else {
            Value::Null
        };
    }

    let converted = match (field.kind, value) {
        (FieldKind::Integer, Value::String(s)) => s.trim().parse::<i64>().ok().map(Value::Int),
        (FieldKind::Float, Value::String(s)) => s.trim().parse::<f64>().ok().map(Value::Float),
        (FieldKind::Float, Value::Int(i)) => Some(Value::Float(*i as f64)),
        (FieldKind::Boolean, Value::String(s)) => {
            Some(Value::Bool(TRUTHY_TOKENS.contains(&s.to_lowercase().as_str())))
        }
        (FieldKind::Boolean, Value::Int(i)) => Some(Value::Bool(*i != 0)),
        (FieldKind::Boolean, Value::Float(f)) => Some(Value::Bool(*f != 0.0)),
        (FieldKind::Boolean, Value::Date(_)) => Some(Value::Bool(true)),
        (FieldKind::Date, Value::String(s)) => parse_iso_date(s).map(Value::Date),
        (FieldKind::String | FieldKind::Select, Value::String(_)) => Some(value.clone()),
        (FieldKind::String | FieldKind::Select, other) => Some(Value::String(other.to_string())),
        _ => Some(value.clone()),
    };

    converted.unwrap_or_else(|| {
        tracing::trace!(
            field = %field.name,
            kind = %field.kind,
            "Conversion failed; deferring to validation"
        );
        value.clone()
    })
}

/// Converts and validates a submission against `schema`.
pub fn parse_form_data(schema: &ModelSchema, data: &FormData) -> Result<Record, ValidationErrors> {
    FormDataConverter::new(schema.clone()).parse(data)
}

/// Converts and validates a submission, reporting failures as a message map.
pub fn parse_form_data_safe(
    schema: &ModelSchema,
    data: &FormData,
) -> (Option<Record>, IndexMap<String, String>) {
    FormDataConverter::new(schema.clone()).parse_safe(data)
}

/// Builds form data from an `application/x-www-form-urlencoded` body.
///
/// Every value is a string. When a name repeats, the last value wins.
///
/// ```
/// use hxform_forms::convert::parse_urlencoded;
/// use hxform_schema::Value;
///
/// let data = parse_urlencoded("name=John+Smith&age=25&note=a%26b");
/// assert_eq!(data.get("name"), Some(&Value::from("John Smith")));
/// assert_eq!(data.get("note"), Some(&Value::from("a&b")));
/// ```
pub fn parse_urlencoded(body: &str) -> FormData {
    url::form_urlencoded::parse(body.trim_start_matches('?').as_bytes())
        .map(|(k, v)| (k.into_owned(), Value::String(v.into_owned())))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use hxform_schema::{FieldSchema, FieldsMatch, TypeExpr};
    use serde::Deserialize;

    fn user_schema() -> ModelSchema {
        ModelSchema::builder("User")
            .field(FieldSchema::new("name", TypeExpr::Str).min_length(1))
            .field(FieldSchema::new("age", TypeExpr::Int).ge(0.0))
            .field(FieldSchema::new("score", TypeExpr::optional(TypeExpr::Float)))
            .field(FieldSchema::new("is_admin", TypeExpr::Bool).default_value(false))
            .field(FieldSchema::new("birth_date", TypeExpr::optional(TypeExpr::Date)))
            .field(FieldSchema::new("role", TypeExpr::literal(["user", "staff"])).default_value("user"))
            .build()
            .unwrap()
    }

    fn data(pairs: &[(&str, &str)]) -> FormData {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), Value::from(*v)))
            .collect()
    }

    #[test]
    fn test_convert_integer_and_absent_checkbox() {
        let converter = FormDataConverter::new(user_schema());
        let converted = converter.convert(&data(&[("name", "John"), ("age", "25")]));
        assert_eq!(converted.get("name"), Some(&Value::from("John")));
        assert_eq!(converted.get("age"), Some(&Value::Int(25)));
        assert_eq!(converted.get("is_admin"), Some(&Value::Bool(false)));
        assert!(converted.get("score").is_none());
    }

    #[test]
    fn test_convert_checkbox_tokens() {
        let converter = FormDataConverter::new(user_schema());
        for (token, expected) in [("on", true), ("CHECKED", true), ("yes", true), ("off", false), ("x", false)] {
            let converted = converter.convert(&data(&[("is_admin", token)]));
            assert_eq!(converted.get("is_admin"), Some(&Value::Bool(expected)), "{token}");
        }
    }

    #[test]
    fn test_convert_empty_values() {
        let converter = FormDataConverter::new(user_schema());
        let converted = converter.convert(&data(&[("name", ""), ("score", ""), ("birth_date", "")]));
        assert_eq!(converted.get("name"), Some(&Value::from("")));
        assert_eq!(converted.get("score"), Some(&Value::Null));
        assert_eq!(converted.get("birth_date"), Some(&Value::Null));
    }

    #[test]
    fn test_convert_failures_pass_through() {
        let converter = FormDataConverter::new(user_schema());
        let converted = converter.convert(&data(&[
            ("age", "twenty"),
            ("score", "high"),
            ("birth_date", "tomorrow"),
        ]));
        assert_eq!(converted.get("age"), Some(&Value::from("twenty")));
        assert_eq!(converted.get("score"), Some(&Value::from("high")));
        assert_eq!(converted.get("birth_date"), Some(&Value::from("tomorrow")));
    }

    #[test]
    fn test_convert_dates_require_padded_iso_format() {
        let converter = FormDataConverter::new(user_schema());
        let converted = converter.convert(&data(&[("birth_date", "2024-01-05")]));
        assert_eq!(
            converted.get("birth_date"),
            Some(&Value::Date(chrono::NaiveDate::from_ymd_opt(2024, 1, 5).unwrap()))
        );
        for raw in ["2024-1-5", "+2024-01-05"] {
            let converted = converter.convert(&data(&[("birth_date", raw)]));
            assert_eq!(converted.get("birth_date"), Some(&Value::from(raw)), "{raw}");
            let (record, errors) = converter.parse_safe(&data(&[("name", "a"), ("age", "1"), ("birth_date", raw)]));
            assert!(record.is_none(), "{raw}");
            assert!(errors.contains_key("birth_date"), "{raw}");
        }
    }

    #[test]
    fn test_convert_typed_inputs() {
        let converter = FormDataConverter::new(user_schema());
        let mut input = FormData::new();
        input.insert("score".into(), Value::Int(3));
        input.insert("is_admin".into(), Value::Bool(true));
        input.insert("role".into(), Value::Int(7));
        input.insert("age".into(), Value::from(" 42 "));
        let converted = converter.convert(&input);
        assert_eq!(converted.get("score"), Some(&Value::Float(3.0)));
        assert_eq!(converted.get("is_admin"), Some(&Value::Bool(true)));
        assert_eq!(converted.get("role"), Some(&Value::from("7")));
        assert_eq!(converted.get("age"), Some(&Value::Int(42)));
    }

    #[test]
    fn test_convert_drops_undeclared_keys() {
        let converter = FormDataConverter::new(user_schema());
        let converted = converter.convert(&data(&[("name", "a"), ("_field", "name")]));
        assert!(converted.get("_field").is_none());
    }

    #[test]
    fn test_parse_safe_maps_errors() {
        let converter = FormDataConverter::new(user_schema());
        let (record, errors) = converter.parse_safe(&data(&[("name", ""), ("age", "-5")]));
        assert!(record.is_none());
        assert_eq!(errors.get("name").map(String::as_str), Some("This value is too short"));
        assert_eq!(errors.get("age").map(String::as_str), Some("This value must be at least 0"));
    }

    #[test]
    fn test_parse_safe_non_field_errors() {
        let schema = ModelSchema::builder("Signup")
            .field(FieldSchema::new("password", TypeExpr::Str))
            .field(FieldSchema::new("password_confirm", TypeExpr::Str))
            .rule(FieldsMatch::new("password", "password_confirm"))
            .build()
            .unwrap();
        let (record, errors) =
            parse_form_data_safe(&schema, &data(&[("password", "a"), ("password_confirm", "b")]));
        assert!(record.is_none());
        assert_eq!(errors.get(NON_FIELD_ERRORS).map(String::as_str), Some("Invalid value"));
    }

    #[test]
    fn test_parse_into_struct() {
        #[derive(Debug, Deserialize)]
        struct User {
            name: String,
            age: i64,
            is_admin: bool,
            role: String,
        }

        let converter = FormDataConverter::new(user_schema());
        let user: User = converter
            .parse_into(&data(&[("name", "Ann"), ("age", "30"), ("is_admin", "on")]))
            .unwrap();
        assert_eq!(user.name, "Ann");
        assert_eq!(user.age, 30);
        assert!(user.is_admin);
        assert_eq!(user.role, "user");
    }

    #[test]
    fn test_parse_form_data_helper() {
        let record = parse_form_data(&user_schema(), &data(&[("name", "Bo"), ("age", "1")])).unwrap();
        assert_eq!(record.get_str("role"), Some("user"));
    }

    #[test]
    fn test_parse_urlencoded_last_value_wins() {
        let data = parse_urlencoded("?a=1&a=2&b=");
        assert_eq!(data.get("a"), Some(&Value::from("2")));
        assert_eq!(data.get("b"), Some(&Value::from("")));
    }
}
