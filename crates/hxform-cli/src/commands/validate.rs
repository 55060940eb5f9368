//! The `validate` management command.
//!
//! Validates a URL-encoded submission against a schema, reporting every
//! field's outcome and, when the whole submission is valid, the parsed
//! record.

use std::io::Write;

use hxform_core::{FormsError, Settings, ValidationError, ValidationErrors};
use hxform_forms::{parse_urlencoded, translator_for, FieldValidator};

use super::{load_schema, schema_arg};
use crate::command::ManagementCommand;

/// Validates submitted form data against a schema.
pub struct ValidateCommand;

impl ManagementCommand for ValidateCommand {
    fn name(&self) -> &'static str {
        "validate"
    }

    fn help(&self) -> &'static str {
        "Validate URL-encoded form data against a schema"
    }

    fn add_arguments(&self, cmd: clap::Command) -> clap::Command {
        cmd.arg(schema_arg())
            .arg(
                clap::Arg::new("data")
                    .required(true)
                    .value_name("DATA")
                    .help("Form data, e.g. 'name=John&age=25'"),
            )
            .arg(
                clap::Arg::new("json")
                    .long("json")
                    .action(clap::ArgAction::SetTrue)
                    .help("Print the report as JSON"),
            )
    }

    fn handle(
        &self,
        matches: &clap::ArgMatches,
        settings: &Settings,
        out: &mut dyn Write,
    ) -> Result<(), FormsError> {
        let schema = load_schema(matches)?;
        let body = matches.get_one::<String>("data").map_or("", String::as_str);
        let data = parse_urlencoded(body);

        let validator = FieldValidator::with_translator(schema, translator_for(&settings.language_code));
        let (record, outcomes) = validator.validate_and_parse(&data);

        if matches.get_flag("json") {
            let report = serde_json::json!({
                "valid": record.is_some(),
                "fields": outcomes
                    .iter()
                    .map(|(name, outcome)| serde_json::json!({
                        "name": name,
                        "valid": outcome.is_valid(),
                        "message": outcome.error_message(),
                    }))
                    .collect::<Vec<_>>(),
                "record": record.as_ref().map(hxform_schema::Record::to_json),
            });
            let json = serde_json::to_string_pretty(&report)
                .map_err(|e| FormsError::Serialization(e.to_string()))?;
            writeln!(out, "{json}")?;
        } else {
            for (name, outcome) in &outcomes {
                match outcome.error_message() {
                    Some(message) if !outcome.is_valid() => writeln!(out, "{name}: {message}")?,
                    _ => writeln!(out, "{name}: ok")?,
                }
            }
            if let Some(record) = &record {
                writeln!(out, "valid: {}", record.to_json())?;
            }
        }

        if record.is_some() {
            return Ok(());
        }

        let errors: Vec<ValidationError> = outcomes
            .iter()
            .filter(|(_, outcome)| !outcome.is_valid())
            .map(|(name, outcome)| {
                ValidationError::new(outcome.error_message().unwrap_or_default(), "invalid")
                    .at(name.clone())
            })
            .collect();
        Err(FormsError::Validation(ValidationErrors::from(errors)))
    }
}
