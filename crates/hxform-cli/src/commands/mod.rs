//! Built-in management commands.
//!
//! Every command takes a schema document path (TOML, or JSON with a `.json`
//! extension) as its first positional argument.

pub mod check;
pub mod fields;
pub mod render;
pub mod validate;

pub use check::CheckCommand;
pub use fields::FieldsCommand;
pub use render::RenderCommand;
pub use validate::ValidateCommand;

use std::path::PathBuf;

use hxform_core::FormsError;
use hxform_schema::{ModelSchema, SchemaDocument};

use crate::command::CommandRegistry;

/// Registers all built-in management commands into the given registry.
pub fn register_builtin_commands(registry: &mut CommandRegistry) {
    registry.register(Box::new(RenderCommand));
    registry.register(Box::new(FieldsCommand));
    registry.register(Box::new(ValidateCommand));
    registry.register(Box::new(CheckCommand));
}

/// The positional schema argument shared by every command.
pub(crate) fn schema_arg() -> clap::Arg {
    clap::Arg::new("schema")
        .required(true)
        .value_name("SCHEMA")
        .value_parser(clap::value_parser!(PathBuf))
        .help("Path to the schema document")
}

/// Loads and builds the schema named by the `schema` argument.
pub(crate) fn load_schema(matches: &clap::ArgMatches) -> Result<ModelSchema, FormsError> {
    let path = matches
        .get_one::<PathBuf>("schema")
        .ok_or_else(|| FormsError::Configuration("No schema path given".to_string()))?;
    SchemaDocument::from_file(path)?.into_schema()
}
