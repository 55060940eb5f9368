//! # hxform
//!
//! Schema-driven HTML forms with htmx field validation.
//!
//! This is the meta-crate that re-exports all sub-crates for convenient access.
//! You can depend on `hxform` to get everything, or depend on individual
//! crates for finer-grained control.
//!
//! ```rust
//! use hxform::forms::FormGenerator;
//! use hxform::schema::{FieldSchema, ModelSchema, TypeExpr};
//!
//! let schema = ModelSchema::builder("User")
//!     .field(FieldSchema::new("name", TypeExpr::Str).min_length(1))
//!     .field(FieldSchema::new("age", TypeExpr::Int).ge(0.0))
//!     .build()
//!     .unwrap();
//!
//! let generator = FormGenerator::new(schema);
//! let form = generator.generate_form(&Default::default());
//! assert!(form.contains(r#"hx-post="/validate/name""#));
//! ```

/// Settings, error types, logging, and HTML helpers.
pub use hxform_core as core;

/// Model schemas, type expressions, and the validation engine.
#[cfg(feature = "schema")]
pub use hxform_schema as schema;

/// Introspection, conversion, per-field validation, and rendering.
#[cfg(feature = "forms")]
pub use hxform_forms as forms;

/// Management commands (CLI).
#[cfg(feature = "cli")]
pub use hxform_cli as cli;

/// Third-party crates re-exported for user convenience.
pub use chrono;
pub use indexmap;
pub use serde;
pub use serde_json;
pub use tracing;
pub use tracing_subscriber;

/// The most commonly used types.
pub mod prelude {
    pub use hxform_core::{FormsError, FormsResult, Settings, ValidationError, ValidationErrors};

    #[cfg(feature = "schema")]
    pub use hxform_schema::{
        FieldSchema, FormData, ModelSchema, Record, SchemaDocument, SchemaModel, TypeExpr, Value,
    };

    #[cfg(feature = "forms")]
    pub use hxform_forms::{
        FieldValidator, FormDataConverter, FormGenerator, FormOptions, PageOptions,
        ValidationOutcome,
    };
}
