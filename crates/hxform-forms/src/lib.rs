//! # hxform-forms
//!
//! Schema-driven HTML forms with htmx field validation.
//!
//! Given a [`ModelSchema`](hxform_schema::ModelSchema), this crate derives
//! one [`FieldDescriptor`] per declared field and uses them to render forms,
//! convert browser submissions into typed values, and validate fields one at
//! a time as the user fills the form in.
//!
//! ## Modules
//!
//! - [`kind`] - Field-kind resolution
//! - [`descriptor`] - Render-ready field descriptors
//! - [`introspect`] - Schema introspection
//! - [`convert`] - Form data conversion and whole-submission parsing
//! - [`messages`] - Error taxonomy and message catalogs
//! - [`validator`] - Per-field validation and error responses
//! - [`render`] - HTML rendering
//! - [`generator`] - The [`FormGenerator`] tying it all together

pub mod convert;
pub mod descriptor;
pub mod generator;
pub mod introspect;
pub mod kind;
pub mod messages;
pub mod render;
pub mod validator;

pub use convert::{
    parse_form_data, parse_form_data_safe, parse_urlencoded, FormDataConverter, NON_FIELD_ERRORS,
};
pub use descriptor::FieldDescriptor;
pub use generator::{FormGenerator, PageOptions};
pub use introspect::introspect;
pub use kind::{resolve, resolve_kind, FieldKind, ResolvedKind};
pub use messages::{translator_for, English, ErrorMessage, Japanese, Translator};
pub use render::{FormOptions, FormRenderer, Swap};
pub use validator::{FieldValidator, ValidationOutcome};
