//! hxform command-line utility.
//!
//! ## Usage
//!
//! ```bash
//! hxform render user.toml -o user.html
//! hxform fields user.toml --json
//! hxform validate user.toml 'name=John&age=25'
//! hxform check user.toml --settings hxform.toml
//! ```

use hxform_cli::command::{load_settings, CommandRegistry};
use hxform_cli::commands::register_builtin_commands;
use hxform_core::logging::setup_logging;

fn main() -> anyhow::Result<()> {
    let mut registry = CommandRegistry::new();
    register_builtin_commands(&mut registry);

    let matches = registry.build_cli().get_matches();
    let settings = load_settings(&matches)?;
    setup_logging(&settings);
    tracing::debug!(language = %settings.language_code, "Settings loaded");

    let stdout = std::io::stdout();
    registry.execute(&matches, &settings, &mut stdout.lock())?;
    Ok(())
}
