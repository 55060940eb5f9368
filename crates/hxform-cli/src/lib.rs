//! # hxform-cli
//!
//! Management commands for hxform schema documents.
//!
//! This crate provides:
//!
//! - **Management commands** - A framework for defining and registering CLI commands
//! - **Built-in commands** - `render`, `fields`, `validate` and `check`
//!
//! ## Quick Start
//!
//! ```rust
//! use hxform_cli::command::CommandRegistry;
//! use hxform_cli::commands::register_builtin_commands;
//!
//! let mut registry = CommandRegistry::new();
//! register_builtin_commands(&mut registry);
//!
//! let names = registry.list_commands();
//! assert!(names.contains(&"render"));
//! assert!(names.contains(&"check"));
//! ```

// These clippy lints are intentionally allowed:
// - result_large_err: FormsError carries the collected validation errors
// - doc_markdown: backtick requirements for documentation items are too strict
#![allow(clippy::result_large_err)]
#![allow(clippy::doc_markdown)]

pub mod command;
pub mod commands;

// Re-export primary types at the crate root for convenience.
pub use command::{load_settings, CommandRegistry, ManagementCommand};
pub use commands::register_builtin_commands;
