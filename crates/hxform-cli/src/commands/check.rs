//! The `check` management command.
//!
//! Loads a schema and runs checks that catch mistakes the schema builder
//! accepts: contradictory constraints, defaults that fail their own field's
//! validation, and settings that produce broken markup.

use std::io::Write;

use hxform_core::{FormsError, Settings};
use hxform_forms::{resolve_kind, Swap};
use hxform_schema::engine::validate_value;
use hxform_schema::ModelSchema;

use super::{load_schema, schema_arg};
use crate::command::ManagementCommand;

/// Checks a schema and the current settings for problems.
pub struct CheckCommand;

/// The result of a single check.
#[derive(Debug, Clone)]
pub struct CheckMessage {
    /// The severity level of this check result.
    pub level: CheckLevel,
    /// A human-readable description of the issue.
    pub msg: String,
    /// An optional hint for how to resolve the issue.
    pub hint: Option<String>,
    /// A unique identifier for this check (e.g. "fields.E001").
    pub id: String,
}

impl CheckMessage {
    fn new(level: CheckLevel, id: &str, msg: String) -> Self {
        Self {
            level,
            msg,
            hint: None,
            id: id.to_string(),
        }
    }

    fn hint(mut self, hint: &str) -> Self {
        self.hint = Some(hint.to_string());
        self
    }
}

/// Severity levels for check results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum CheckLevel {
    /// A warning that may indicate a problem.
    Warning,
    /// An error that must be resolved.
    Error,
}

impl std::fmt::Display for CheckLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Warning => write!(f, "WARNING"),
            Self::Error => write!(f, "ERROR"),
        }
    }
}

/// Runs every check against a built schema and the settings.
pub fn run_checks(schema: &ModelSchema, settings: &Settings) -> Vec<CheckMessage> {
    let mut messages = Vec::new();

    for field in schema.fields() {
        let name = &field.name;
        let constraints = field.effective_constraints();

        if let (Some(min), Some(max)) = (constraints.min_length, constraints.max_length) {
            if min > max {
                messages.push(CheckMessage::new(
                    CheckLevel::Error,
                    "fields.E001",
                    format!("'{name}': min_length {min} is greater than max_length {max}"),
                ));
            }
        }

        // Inclusive bounds take precedence, matching the rendered min/max.
        let lower = constraints.ge.map(|b| (b, false)).or(constraints.gt.map(|b| (b, true)));
        let upper = constraints.le.map(|b| (b, false)).or(constraints.lt.map(|b| (b, true)));
        if let (Some((lower, lower_exclusive)), Some((upper, upper_exclusive))) = (lower, upper) {
            let exclusive = lower_exclusive || upper_exclusive;
            if lower > upper || (exclusive && lower >= upper) {
                messages.push(CheckMessage::new(
                    CheckLevel::Error,
                    "fields.E002",
                    format!("'{name}': no value satisfies lower bound {lower} and upper bound {upper}"),
                ));
            }
        }

        if constraints.has_bounds() && !resolve_kind(&field.ty).is_numeric() {
            messages.push(
                CheckMessage::new(
                    CheckLevel::Warning,
                    "fields.W001",
                    format!("'{name}': numeric bounds on a non-numeric field are not rendered"),
                )
                .hint("Move the bounds to an integer or float field"),
            );
        }

        if let Some(default) = &field.default {
            if !default.is_null() {
                if let Err(errors) = validate_value(field, default) {
                    let reason = errors.first().map_or("", |e| e.message.as_str());
                    messages.push(CheckMessage::new(
                        CheckLevel::Error,
                        "fields.E003",
                        format!("'{name}': default {default} is invalid: {reason}"),
                    ));
                }
            }
        }
    }

    if let Err(e) = settings.form_swap.parse::<Swap>() {
        messages.push(CheckMessage::new(CheckLevel::Error, "settings.E001", e.to_string()));
    }

    let endpoint = &settings.validate_endpoint;
    if !(endpoint.starts_with('/') || endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
        messages.push(
            CheckMessage::new(
                CheckLevel::Warning,
                "settings.W001",
                format!("validate_endpoint '{endpoint}' is a relative URL"),
            )
            .hint("Start it with '/' so field validation works from any page"),
        );
    }

    let language = settings.language_code.to_ascii_lowercase();
    if !(language.starts_with("en") || language.starts_with("ja")) {
        messages.push(
            CheckMessage::new(
                CheckLevel::Warning,
                "settings.W002",
                format!("No message catalog for language '{}'; English is used", settings.language_code),
            ),
        );
    }

    messages
}

impl ManagementCommand for CheckCommand {
    fn name(&self) -> &'static str {
        "check"
    }

    fn help(&self) -> &'static str {
        "Check a schema and the settings for problems"
    }

    fn add_arguments(&self, cmd: clap::Command) -> clap::Command {
        cmd.arg(schema_arg())
    }

    fn handle(
        &self,
        matches: &clap::ArgMatches,
        settings: &Settings,
        out: &mut dyn Write,
    ) -> Result<(), FormsError> {
        let schema = load_schema(matches)?;
        let messages = run_checks(&schema, settings);

        let errors = messages.iter().filter(|m| m.level == CheckLevel::Error).count();
        let warnings = messages.len() - errors;

        for msg in &messages {
            let hint_text = msg
                .hint
                .as_ref()
                .map_or(String::new(), |h| format!("\n\tHINT: {h}"));
            writeln!(out, "{} ({}): {}{}", msg.level, msg.id, msg.msg, hint_text)?;
        }

        if messages.is_empty() {
            writeln!(
                out,
                "Schema '{}' ({} fields): no issues found",
                schema.name(),
                schema.fields().len()
            )?;
        } else {
            writeln!(
                out,
                "Check identified {} issue(s) ({errors} error(s), {warnings} warning(s))",
                messages.len()
            )?;
        }
        tracing::info!(errors, warnings, model = %schema.name(), "Schema check finished");

        if errors > 0 {
            return Err(FormsError::Configuration(format!(
                "Check found {errors} error(s)"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hxform_schema::{FieldSchema, TypeExpr};

    fn ids(schema: &ModelSchema, settings: &Settings) -> Vec<String> {
        run_checks(schema, settings).into_iter().map(|m| m.id).collect()
    }

    #[test]
    fn test_clean_schema_has_no_issues() {
        let schema = ModelSchema::builder("User")
            .field(FieldSchema::new("name", TypeExpr::Str).min_length(1).max_length(50))
            .field(FieldSchema::new("age", TypeExpr::Int).ge(0.0).le(150.0).default_value(30))
            .build()
            .unwrap();
        assert!(run_checks(&schema, &Settings::default()).is_empty());
    }

    #[test]
    fn test_contradictory_constraints() {
        let schema = ModelSchema::builder("M")
            .field(FieldSchema::new("code", TypeExpr::Str).min_length(5).max_length(2))
            .field(FieldSchema::new("n", TypeExpr::Int).gt(10.0).lt(5.0))
            .build()
            .unwrap();
        let found = ids(&schema, &Settings::default());
        assert!(found.contains(&"fields.E001".to_string()));
        assert!(found.contains(&"fields.E002".to_string()));
    }

    #[test]
    fn test_empty_exclusive_range() {
        let schema = ModelSchema::builder("M")
            .field(FieldSchema::new("a", TypeExpr::Int).gt(5.0).lt(5.0))
            .field(FieldSchema::new("b", TypeExpr::Float).ge(5.0).lt(5.0))
            .field(FieldSchema::new("c", TypeExpr::Float).gt(5.0).le(5.0))
            .build()
            .unwrap();
        let messages = run_checks(&schema, &Settings::default());
        assert_eq!(messages.len(), 3);
        assert!(messages.iter().all(|m| m.id == "fields.E002"));
        assert!(messages[0].msg.starts_with("'a':"));
    }

    #[test]
    fn test_single_point_inclusive_range_is_allowed() {
        let schema = ModelSchema::builder("M")
            .field(FieldSchema::new("a", TypeExpr::Int).ge(5.0).le(5.0))
            .field(FieldSchema::new("b", TypeExpr::Float).gt(4.0).lt(5.0))
            .build()
            .unwrap();
        assert!(run_checks(&schema, &Settings::default()).is_empty());
    }

    #[test]
    fn test_invalid_default() {
        let schema = ModelSchema::builder("M")
            .field(FieldSchema::new("age", TypeExpr::Int).ge(18.0).default_value(3))
            .build()
            .unwrap();
        let messages = run_checks(&schema, &Settings::default());
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].id, "fields.E003");
        assert_eq!(messages[0].level, CheckLevel::Error);
        assert!(messages[0].msg.contains("default 3"));
    }

    #[test]
    fn test_bounds_on_string_warns() {
        let schema = ModelSchema::builder("M")
            .field(FieldSchema::new("code", TypeExpr::Str).ge(1.0))
            .build()
            .unwrap();
        assert_eq!(ids(&schema, &Settings::default()), ["fields.W001"]);
    }

    #[test]
    fn test_settings_checks() {
        let schema = ModelSchema::builder("M")
            .field(FieldSchema::new("a", TypeExpr::Str))
            .build()
            .unwrap();
        let settings = Settings {
            form_swap: "sideways".into(),
            validate_endpoint: "validate".into(),
            language_code: "fr".into(),
            ..Settings::default()
        };
        assert_eq!(
            ids(&schema, &settings),
            ["settings.E001", "settings.W001", "settings.W002"]
        );
    }

    #[test]
    fn test_check_level_display_and_order() {
        assert_eq!(CheckLevel::Warning.to_string(), "WARNING");
        assert_eq!(CheckLevel::Error.to_string(), "ERROR");
        assert!(CheckLevel::Warning < CheckLevel::Error);
    }
}
