//! The `render` management command.
//!
//! Renders a complete HTML page for a schema, to stdout or to a file.

use std::io::Write;
use std::path::PathBuf;

use hxform_core::{FormsError, Settings};
use hxform_forms::{FormGenerator, FormOptions, PageOptions};

use super::{load_schema, schema_arg};
use crate::command::ManagementCommand;

/// Renders a schema's form as a full HTML page.
pub struct RenderCommand;

impl ManagementCommand for RenderCommand {
    fn name(&self) -> &'static str {
        "render"
    }

    fn help(&self) -> &'static str {
        "Render a schema as a complete HTML page"
    }

    fn add_arguments(&self, cmd: clap::Command) -> clap::Command {
        cmd.arg(schema_arg())
            .arg(
                clap::Arg::new("output")
                    .long("output")
                    .short('o')
                    .value_name("FILE")
                    .value_parser(clap::value_parser!(PathBuf))
                    .help("Write the page to FILE instead of stdout"),
            )
            .arg(
                clap::Arg::new("title")
                    .long("title")
                    .help("Page title (defaults to the model name)"),
            )
            .arg(
                clap::Arg::new("action")
                    .long("action")
                    .help("URL the form submits to"),
            )
            .arg(
                clap::Arg::new("form-id")
                    .long("form-id")
                    .help("The form's id attribute"),
            )
            .arg(
                clap::Arg::new("no-htmx")
                    .long("no-htmx")
                    .action(clap::ArgAction::SetTrue)
                    .help("Leave out the htmx script tag"),
            )
            .arg(
                clap::Arg::new("fragment")
                    .long("fragment")
                    .action(clap::ArgAction::SetTrue)
                    .help("Render only the <form> element"),
            )
    }

    fn handle(
        &self,
        matches: &clap::ArgMatches,
        settings: &Settings,
        out: &mut dyn Write,
    ) -> Result<(), FormsError> {
        let schema = load_schema(matches)?;
        let generator = FormGenerator::with_settings(schema, settings.clone());

        let mut form = FormOptions::from_settings(settings)?;
        if let Some(action) = matches.get_one::<String>("action") {
            form.action.clone_from(action);
        }
        form.form_id = matches.get_one::<String>("form-id").cloned();

        let html = if matches.get_flag("fragment") {
            generator.generate_form(&form)
        } else {
            generator.generate_full_html(&PageOptions {
                title: matches.get_one::<String>("title").cloned(),
                form,
                include_htmx: settings.include_htmx && !matches.get_flag("no-htmx"),
            })
        };

        match matches.get_one::<PathBuf>("output") {
            Some(path) => {
                std::fs::write(path, &html)?;
                tracing::info!(path = %path.display(), "Wrote rendered form");
                writeln!(out, "Wrote {}", path.display())?;
            }
            None => writeln!(out, "{html}")?,
        }
        Ok(())
    }
}
