//! Management command framework for hxform.
//!
//! This module provides the [`ManagementCommand`] trait for defining CLI commands
//! and [`CommandRegistry`] for registering and dispatching them.
//!
//! ## Defining a Custom Command
//!
//! ```rust
//! use std::io::Write;
//!
//! use hxform_cli::command::ManagementCommand;
//! use hxform_core::{FormsError, Settings};
//!
//! struct GreetCommand;
//!
//! impl ManagementCommand for GreetCommand {
//!     fn name(&self) -> &'static str { "greet" }
//!     fn help(&self) -> &'static str { "Say hello" }
//!
//!     fn handle(
//!         &self,
//!         _matches: &clap::ArgMatches,
//!         _settings: &Settings,
//!         out: &mut dyn Write,
//!     ) -> Result<(), FormsError> {
//!         writeln!(out, "Hello from hxform!")?;
//!         Ok(())
//!     }
//! }
//! ```

use std::collections::HashMap;
use std::io::Write;
use std::path::PathBuf;

use hxform_core::{settings_loader, FormsError, Settings};

/// A management command that can be registered and invoked through the CLI.
///
/// Implementations define a name, help text, optional arguments, and a
/// handler that writes its report to `out`.
pub trait ManagementCommand: Send + Sync {
    /// Returns the name of this command (used to invoke it from the CLI).
    fn name(&self) -> &'static str;

    /// Returns a short help description for this command.
    fn help(&self) -> &'static str;

    /// Adds custom arguments to the clap command.
    ///
    /// The default implementation returns the command unchanged.
    fn add_arguments(&self, cmd: clap::Command) -> clap::Command {
        cmd
    }

    /// Executes the command with the given argument matches and settings.
    fn handle(
        &self,
        matches: &clap::ArgMatches,
        settings: &Settings,
        out: &mut dyn Write,
    ) -> Result<(), FormsError>;
}

/// A registry of management commands, keyed by name.
pub struct CommandRegistry {
    commands: HashMap<&'static str, Box<dyn ManagementCommand>>,
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandRegistry {
    /// Creates a new empty command registry.
    pub fn new() -> Self {
        Self {
            commands: HashMap::new(),
        }
    }

    /// Registers a management command.
    ///
    /// If a command with the same name already exists, it is replaced.
    pub fn register(&mut self, command: Box<dyn ManagementCommand>) {
        self.commands.insert(command.name(), command);
    }

    /// Returns a reference to the command with the given name, if registered.
    pub fn get(&self, name: &str) -> Option<&dyn ManagementCommand> {
        self.commands.get(name).map(AsRef::as_ref)
    }

    /// Returns a sorted list of all registered command names.
    pub fn list_commands(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.commands.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Returns the number of registered commands.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Returns `true` if no commands are registered.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Builds the top-level clap `Command` with every registered subcommand
    /// and the global `--settings` option.
    pub fn build_cli(&self) -> clap::Command {
        let mut app = clap::Command::new("hxform")
            .about("Schema-driven htmx form utility")
            .version(env!("CARGO_PKG_VERSION"))
            .subcommand_required(true)
            .arg(
                clap::Arg::new("settings")
                    .long("settings")
                    .global(true)
                    .value_name("FILE")
                    .value_parser(clap::value_parser!(PathBuf))
                    .help("Settings file (TOML, or JSON with a .json extension)"),
            );

        for name in self.list_commands() {
            if let Some(cmd) = self.commands.get(name) {
                let subcmd = clap::Command::new(cmd.name()).about(cmd.help());
                app = app.subcommand(cmd.add_arguments(subcmd));
            }
        }

        app
    }

    /// Executes the command identified by the given argument matches.
    pub fn execute(
        &self,
        matches: &clap::ArgMatches,
        settings: &Settings,
        out: &mut dyn Write,
    ) -> Result<(), FormsError> {
        let (name, sub_matches) = matches.subcommand().ok_or_else(|| {
            FormsError::Configuration("No subcommand specified".to_string())
        })?;

        let cmd = self
            .get(name)
            .ok_or_else(|| FormsError::Configuration(format!("Unknown command: {name}")))?;

        tracing::debug!(command = name, "Running management command");
        cmd.handle(sub_matches, settings, out)
    }
}

/// Loads settings for a CLI run: the `--settings` file when given, otherwise
/// defaults. Environment overrides apply in both cases.
pub fn load_settings(matches: &clap::ArgMatches) -> Result<Settings, FormsError> {
    match matches.get_one::<PathBuf>("settings") {
        Some(path) => settings_loader::from_file_with_env(path),
        None => Ok(settings_loader::from_env()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TestCommand {
        cmd_name: &'static str,
    }

    impl ManagementCommand for TestCommand {
        fn name(&self) -> &'static str {
            self.cmd_name
        }

        fn help(&self) -> &'static str {
            "A test command"
        }

        fn add_arguments(&self, cmd: clap::Command) -> clap::Command {
            cmd.arg(
                clap::Arg::new("verbose")
                    .long("verbose")
                    .action(clap::ArgAction::SetTrue),
            )
        }

        fn handle(
            &self,
            matches: &clap::ArgMatches,
            _settings: &Settings,
            out: &mut dyn Write,
        ) -> Result<(), FormsError> {
            writeln!(out, "verbose={}", matches.get_flag("verbose"))?;
            Ok(())
        }
    }

    struct FailingCommand;

    impl ManagementCommand for FailingCommand {
        fn name(&self) -> &'static str {
            "fail"
        }

        fn help(&self) -> &'static str {
            "A command that always fails"
        }

        fn handle(
            &self,
            _matches: &clap::ArgMatches,
            _settings: &Settings,
            _out: &mut dyn Write,
        ) -> Result<(), FormsError> {
            Err(FormsError::Configuration("deliberate failure".to_string()))
        }
    }

    #[test]
    fn test_registry_new_is_empty() {
        let registry = CommandRegistry::default();
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
    }

    #[test]
    fn test_register_and_get() {
        let mut registry = CommandRegistry::new();
        registry.register(Box::new(TestCommand { cmd_name: "test" }));
        assert_eq!(registry.len(), 1);
        let cmd = registry.get("test").unwrap();
        assert_eq!(cmd.name(), "test");
        assert_eq!(cmd.help(), "A test command");
        assert!(registry.get("nonexistent").is_none());
    }

    #[test]
    fn test_list_commands_sorted() {
        let mut registry = CommandRegistry::new();
        registry.register(Box::new(TestCommand { cmd_name: "zebra" }));
        registry.register(Box::new(TestCommand { cmd_name: "alpha" }));
        registry.register(Box::new(TestCommand { cmd_name: "middle" }));
        assert_eq!(registry.list_commands(), vec!["alpha", "middle", "zebra"]);
    }

    #[test]
    fn test_register_replaces_existing() {
        let mut registry = CommandRegistry::new();
        registry.register(Box::new(TestCommand { cmd_name: "test" }));
        registry.register(Box::new(TestCommand { cmd_name: "test" }));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_execute_with_arguments() {
        let mut registry = CommandRegistry::new();
        registry.register(Box::new(TestCommand { cmd_name: "test" }));

        let matches = registry
            .build_cli()
            .try_get_matches_from(["hxform", "test", "--verbose"])
            .unwrap();
        let mut out = Vec::new();
        registry
            .execute(&matches, &Settings::default(), &mut out)
            .unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "verbose=true\n");
    }

    #[test]
    fn test_execute_failing_command() {
        let mut registry = CommandRegistry::new();
        registry.register(Box::new(FailingCommand));

        let matches = registry
            .build_cli()
            .try_get_matches_from(["hxform", "fail"])
            .unwrap();
        let result = registry.execute(&matches, &Settings::default(), &mut Vec::new());
        assert!(result.is_err());
    }

    #[test]
    fn test_subcommand_required() {
        let registry = CommandRegistry::new();
        assert!(registry.build_cli().try_get_matches_from(["hxform"]).is_err());
    }

    #[test]
    fn test_settings_is_global() {
        let mut registry = CommandRegistry::new();
        registry.register(Box::new(TestCommand { cmd_name: "test" }));
        let matches = registry
            .build_cli()
            .try_get_matches_from(["hxform", "test", "--settings", "hxform.toml"])
            .unwrap();
        assert_eq!(
            matches.get_one::<PathBuf>("settings"),
            Some(&PathBuf::from("hxform.toml"))
        );
    }

    #[test]
    fn test_load_settings_defaults() {
        let registry = CommandRegistry::new();
        let matches = registry
            .build_cli()
            .subcommand_required(false)
            .try_get_matches_from(["hxform"])
            .unwrap();
        let settings = load_settings(&matches).unwrap();
        assert_eq!(settings.validate_endpoint, "/validate");
    }
}
