//! The `fields` management command.
//!
//! Prints the field descriptors derived from a schema, one per line or as
//! JSON.

use std::io::Write;

use hxform_core::{FormsError, Settings};
use hxform_forms::{introspect, FieldDescriptor};

use super::{load_schema, schema_arg};
use crate::command::ManagementCommand;

/// Lists the form fields derived from a schema.
pub struct FieldsCommand;

/// Formats one descriptor as a single summary line.
pub fn describe(field: &FieldDescriptor) -> String {
    let mut line = format!(
        "{}\t{}\t{}",
        field.name,
        field.kind,
        if field.required { "required" } else { "optional" }
    );
    if !field.options.is_empty() {
        let values: Vec<&str> = field.options.iter().map(|o| o.value.as_str()).collect();
        line.push_str(&format!("\toptions: {}", values.join(", ")));
    }
    line
}

impl ManagementCommand for FieldsCommand {
    fn name(&self) -> &'static str {
        "fields"
    }

    fn help(&self) -> &'static str {
        "List the form fields derived from a schema"
    }

    fn add_arguments(&self, cmd: clap::Command) -> clap::Command {
        cmd.arg(schema_arg()).arg(
            clap::Arg::new("json")
                .long("json")
                .action(clap::ArgAction::SetTrue)
                .help("Print the descriptors as JSON"),
        )
    }

    fn handle(
        &self,
        matches: &clap::ArgMatches,
        _settings: &Settings,
        out: &mut dyn Write,
    ) -> Result<(), FormsError> {
        let fields = introspect(&load_schema(matches)?);

        if matches.get_flag("json") {
            let json = serde_json::to_string_pretty(&fields)
                .map_err(|e| FormsError::Serialization(e.to_string()))?;
            writeln!(out, "{json}")?;
        } else {
            for field in &fields {
                writeln!(out, "{}", describe(field))?;
            }
        }
        Ok(())
    }
}
