//! Validation entry points.
//!
//! [`validate_value`] checks a single value against a single field's declared
//! type and constraints, in isolation from the rest of the model.
//! [`validate_instance`] validates a whole submission: every declared field is
//! coerced and checked, absent fields fall back to their default (or null when
//! nullable), and the model's [`ModelRule`](crate::ModelRule)s run once every
//! field has passed.
//!
//! Coercion is lax, the way form submissions need it: numeric strings become
//! numbers, the usual boolean tokens become booleans, and ISO-8601 strings
//! become dates. Every failure is a [`ValidationError`] carrying one of the
//! stable [`codes`].

use std::collections::HashMap;
use std::sync::{OnceLock, PoisonError, RwLock};

use regex::Regex;

use hxform_core::{ValidationError, ValidationErrors};

use crate::field::FieldSchema;
use crate::model::ModelSchema;
use crate::record::Record;
use crate::types::{Constraints, SelectOption, TypeExpr};
use crate::value::{parse_iso_date, FormData, Value};

/// Stable error-kind codes reported by the engine.
pub mod codes {
    /// A string is shorter than `min_length`.
    pub const STRING_TOO_SHORT: &str = "string_too_short";
    /// A string is longer than `max_length`.
    pub const STRING_TOO_LONG: &str = "string_too_long";
    /// A generic value error, used by whole-model rules.
    pub const VALUE_ERROR: &str = "value_error";
    /// The value has the wrong type.
    pub const TYPE_ERROR: &str = "type_error";
    /// A required field is absent.
    pub const MISSING: &str = "missing";
    /// A string could not be parsed as an integer.
    pub const INT_PARSING: &str = "int_parsing";
    /// A string could not be parsed as a float.
    pub const FLOAT_PARSING: &str = "float_parsing";
    /// A value could not be interpreted as a boolean.
    pub const BOOL_PARSING: &str = "bool_parsing";
    /// A string could not be parsed as a date.
    pub const DATE_PARSING: &str = "date_parsing";
    /// A string does not match `pattern`.
    pub const STRING_PATTERN_MISMATCH: &str = "string_pattern_mismatch";
    /// A number is below `ge`.
    pub const GREATER_THAN_EQUAL: &str = "greater_than_equal";
    /// A number is above `le`.
    pub const LESS_THAN_EQUAL: &str = "less_than_equal";
    /// A number is not above `gt`.
    pub const GREATER_THAN: &str = "greater_than";
    /// A number is not below `lt`.
    pub const LESS_THAN: &str = "less_than";
    /// A value is not one of the declared literals.
    pub const LITERAL_ERROR: &str = "literal_error";
    /// A value is not one of the declared options.
    pub const ENUM: &str = "enum";
}

const TRUE_TOKENS: &[&str] = &["1", "on", "t", "true", "y", "yes"];
const FALSE_TOKENS: &[&str] = &["0", "off", "f", "false", "n", "no"];

/// Validates one value against one field's type and constraints.
///
/// Whole-model rules and the other fields of the model are not consulted.
/// The returned errors carry no location.
///
/// # Examples
///
/// ```
/// use hxform_schema::engine::validate_value;
/// use hxform_schema::{FieldSchema, TypeExpr, Value};
///
/// let age = FieldSchema::new("age", TypeExpr::Int).ge(18.0);
/// assert_eq!(validate_value(&age, &Value::from("18")), Ok(Value::Int(18)));
///
/// let errors = validate_value(&age, &Value::from("17")).unwrap_err();
/// assert_eq!(errors[0].code, "greater_than_equal");
/// assert_eq!(errors[0].param("ge"), Some("18"));
/// ```
pub fn validate_value(field: &FieldSchema, value: &Value) -> Result<Value, Vec<ValidationError>> {
    let coerced = coerce(field.ty.strip_annotated(), value)?;
    check_constraints(&field.effective_constraints(), &coerced)?;
    Ok(coerced)
}

/// Validates a whole submission against a model.
///
/// Each error is located at its field. Model rules run only when every field
/// validated; their errors keep whatever location the rule gave them.
pub fn validate_instance(schema: &ModelSchema, data: &FormData) -> Result<Record, ValidationErrors> {
    let _span = tracing::debug_span!("validate_instance", model = %schema.name()).entered();

    let mut record = Record::new();
    let mut errors = Vec::new();

    for field in schema.fields() {
        let result = match data.get(&field.name) {
            Some(value) => validate_value(field, value),
            None => match &field.default {
                Some(default) => Ok(default.clone()),
                None if field.is_nullable() => Ok(Value::Null),
                None => Err(vec![ValidationError::new("Field required", codes::MISSING)]),
            },
        };
        match result {
            Ok(value) => record.insert(field.name.clone(), value),
            Err(field_errors) => {
                errors.extend(field_errors.into_iter().map(|e| e.at(field.name.clone())));
            }
        }
    }

    if errors.is_empty() {
        for rule in schema.rules() {
            if let Err(rule_errors) = rule.check(&record) {
                tracing::debug!(rule = rule.name(), "Model rule failed");
                errors.extend(rule_errors);
            }
        }
    }

    if errors.is_empty() {
        tracing::debug!("Instance validated");
        Ok(record)
    } else {
        tracing::debug!(errors = errors.len(), "Instance rejected");
        Err(ValidationErrors::from(errors))
    }
}

// ============================================================
// Coercion
// ============================================================

fn coerce(ty: &TypeExpr, value: &Value) -> Result<Value, Vec<ValidationError>> {
    match ty {
        TypeExpr::Str | TypeExpr::Named { .. } => match value {
            Value::String(s) => Ok(Value::String(s.clone())),
            _ => Err(single("Input should be a valid string", codes::TYPE_ERROR)),
        },
        TypeExpr::Int => coerce_int(value),
        TypeExpr::Float => coerce_float(value),
        TypeExpr::Bool => coerce_bool(value),
        TypeExpr::Date => coerce_date(value),
        TypeExpr::NoneType => match value {
            Value::Null => Ok(Value::Null),
            _ => Err(single("Input should be None", codes::TYPE_ERROR)),
        },
        TypeExpr::Literal { values } => coerce_literal(values, value),
        TypeExpr::Choices { options } => coerce_choice(options, value),
        TypeExpr::Union { members } => coerce_union(members, value),
        TypeExpr::Annotated { inner, constraints } => {
            let coerced = coerce(inner, value)?;
            check_constraints(constraints, &coerced)?;
            Ok(coerced)
        }
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn coerce_int(value: &Value) -> Result<Value, Vec<ValidationError>> {
    match value {
        Value::Int(i) => Ok(Value::Int(*i)),
        Value::Float(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => {
            Ok(Value::Int(*f as i64))
        }
        Value::Float(_) => Err(single(
            "Input should be a valid integer, got a number with a fractional part",
            codes::INT_PARSING,
        )),
        Value::String(s) => s.trim().parse::<i64>().map(Value::Int).map_err(|_| {
            single(
                "Input should be a valid integer, unable to parse string as an integer",
                codes::INT_PARSING,
            )
        }),
        _ => Err(single("Input should be a valid integer", codes::TYPE_ERROR)),
    }
}

#[allow(clippy::cast_precision_loss)]
fn coerce_float(value: &Value) -> Result<Value, Vec<ValidationError>> {
    match value {
        Value::Float(f) => Ok(Value::Float(*f)),
        Value::Int(i) => Ok(Value::Float(*i as f64)),
        Value::String(s) => s.trim().parse::<f64>().map(Value::Float).map_err(|_| {
            single(
                "Input should be a valid number, unable to parse string as a number",
                codes::FLOAT_PARSING,
            )
        }),
        _ => Err(single("Input should be a valid number", codes::TYPE_ERROR)),
    }
}

fn coerce_bool(value: &Value) -> Result<Value, Vec<ValidationError>> {
    let invalid = || single("Input should be a valid boolean, unable to interpret input", codes::BOOL_PARSING);
    match value {
        Value::Bool(b) => Ok(Value::Bool(*b)),
        Value::Int(0) => Ok(Value::Bool(false)),
        Value::Int(1) => Ok(Value::Bool(true)),
        Value::String(s) => {
            let token = s.trim().to_lowercase();
            if TRUE_TOKENS.contains(&token.as_str()) {
                Ok(Value::Bool(true))
            } else if FALSE_TOKENS.contains(&token.as_str()) {
                Ok(Value::Bool(false))
            } else {
                Err(invalid())
            }
        }
        _ => Err(invalid()),
    }
}

fn coerce_date(value: &Value) -> Result<Value, Vec<ValidationError>> {
    match value {
        Value::Date(d) => Ok(Value::Date(*d)),
        Value::String(s) => parse_iso_date(s.trim())
            .map(Value::Date)
            .ok_or_else(|| {
                single(
                    "Input should be a valid date in the format YYYY-MM-DD",
                    codes::DATE_PARSING,
                )
            }),
        _ => Err(single("Input should be a valid date", codes::TYPE_ERROR)),
    }
}

fn coerce_literal(values: &[Value], value: &Value) -> Result<Value, Vec<ValidationError>> {
    if let Some(hit) = values.iter().find(|v| *v == value) {
        return Ok(hit.clone());
    }
    if let Value::String(s) = value {
        if let Some(hit) = values.iter().find(|v| v.to_string() == *s) {
            return Ok(hit.clone());
        }
    }
    let expected = expected_list(values.iter().map(|v| match v {
        Value::String(s) => format!("'{s}'"),
        other => other.to_string(),
    }));
    Err(vec![ValidationError::new(
        format!("Input should be {expected}"),
        codes::LITERAL_ERROR,
    )
    .with_param("expected", expected)])
}

fn coerce_choice(options: &[SelectOption], value: &Value) -> Result<Value, Vec<ValidationError>> {
    if !value.is_null() {
        let submitted = value.to_string();
        if options.iter().any(|o| o.value == submitted) {
            return Ok(Value::String(submitted));
        }
    }
    let expected = expected_list(options.iter().map(|o| format!("'{}'", o.value)));
    Err(vec![ValidationError::new(
        format!("Input should be {expected}"),
        codes::ENUM,
    )
    .with_param("expected", expected)])
}

fn coerce_union(members: &[TypeExpr], value: &Value) -> Result<Value, Vec<ValidationError>> {
    if value.is_null() && members.iter().any(TypeExpr::is_nullable) {
        return Ok(Value::Null);
    }
    let mut first_errors = None;
    for member in members.iter().filter(|m| !matches!(m, TypeExpr::NoneType)) {
        match coerce(member, value) {
            Ok(coerced) => return Ok(coerced),
            Err(errors) if first_errors.is_none() => first_errors = Some(errors),
            Err(_) => {}
        }
    }
    Err(first_errors.unwrap_or_else(|| single("Input should be None", codes::TYPE_ERROR)))
}

// ============================================================
// Constraints
// ============================================================

#[allow(clippy::cast_precision_loss)]
fn check_constraints(constraints: &Constraints, value: &Value) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    match value {
        Value::String(s) => {
            let len = s.chars().count();
            if let Some(min) = constraints.min_length {
                if len < min {
                    errors.push(
                        ValidationError::new(
                            format!("String should have at least {min} {}", characters(min)),
                            codes::STRING_TOO_SHORT,
                        )
                        .with_param("min_length", min.to_string()),
                    );
                }
            }
            if let Some(max) = constraints.max_length {
                if len > max {
                    errors.push(
                        ValidationError::new(
                            format!("String should have at most {max} {}", characters(max)),
                            codes::STRING_TOO_LONG,
                        )
                        .with_param("max_length", max.to_string()),
                    );
                }
            }
            if let Some(pattern) = &constraints.pattern {
                match cached_regex(pattern) {
                    Ok(re) if re.is_match(s) => {}
                    Ok(_) => errors.push(
                        ValidationError::new(
                            format!("String should match pattern '{pattern}'"),
                            codes::STRING_PATTERN_MISMATCH,
                        )
                        .with_param("pattern", pattern.clone()),
                    ),
                    Err(e) => errors.push(ValidationError::new(
                        format!("Value error, invalid pattern: {e}"),
                        codes::VALUE_ERROR,
                    )),
                }
            }
        }
        Value::Int(i) => check_bounds(constraints, *i as f64, &mut errors),
        Value::Float(f) => check_bounds(constraints, *f, &mut errors),
        _ => {}
    }
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_bounds(constraints: &Constraints, n: f64, errors: &mut Vec<ValidationError>) {
    let checks: [(Option<f64>, fn(f64, f64) -> bool, &str, &str, &str); 4] = [
        (constraints.gt, |n, b| n > b, "greater than", codes::GREATER_THAN, "gt"),
        (constraints.ge, |n, b| n >= b, "greater than or equal to", codes::GREATER_THAN_EQUAL, "ge"),
        (constraints.lt, |n, b| n < b, "less than", codes::LESS_THAN, "lt"),
        (constraints.le, |n, b| n <= b, "less than or equal to", codes::LESS_THAN_EQUAL, "le"),
    ];
    for (bound, holds, phrase, code, key) in checks {
        if let Some(bound) = bound {
            if !holds(n, bound) {
                errors.push(
                    ValidationError::new(format!("Input should be {phrase} {bound}"), code)
                        .with_param(key, bound.to_string()),
                );
            }
        }
    }
}

const fn characters(n: usize) -> &'static str {
    if n == 1 {
        "character"
    } else {
        "characters"
    }
}

fn expected_list(items: impl Iterator<Item = String>) -> String {
    let items: Vec<String> = items.collect();
    match items.split_last() {
        None => String::new(),
        Some((last, [])) => last.clone(),
        Some((last, rest)) => format!("{} or {last}", rest.join(", ")),
    }
}

fn single(message: &str, code: &str) -> Vec<ValidationError> {
    vec![ValidationError::new(message, code)]
}

fn cached_regex(pattern: &str) -> Result<Regex, regex::Error> {
    static CACHE: OnceLock<RwLock<HashMap<String, Regex>>> = OnceLock::new();
    let cache = CACHE.get_or_init(|| RwLock::new(HashMap::new()));

    if let Some(re) = cache
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .get(pattern)
    {
        return Ok(re.clone());
    }
    let re = Regex::new(pattern)?;
    cache
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .insert(pattern.to_string(), re.clone());
    Ok(re)
}
