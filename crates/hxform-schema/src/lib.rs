//! # hxform-schema
//!
//! Declarative model schemas and the validation engine consumed by the
//! hxform form layer.
//!
//! A [`ModelSchema`] lists a model's fields in declaration order. Each
//! [`FieldSchema`] carries a [`TypeExpr`] (possibly wrapped in optional,
//! union, or annotated layers), an optional default, display metadata, a
//! free-form `extra` map, and declarative [`Constraints`]. Whole-model rules
//! implement [`ModelRule`].
//!
//! The [`engine`] module provides the two validation entry points:
//! [`engine::validate_value`] checks one value against one field in isolation,
//! and [`engine::validate_instance`] validates a whole submission into a
//! [`Record`], running model rules last.
//!
//! ## Modules
//!
//! - [`value`] - The [`Value`] enum for submitted and validated data
//! - [`types`] - Type expressions, select options, and constraints
//! - [`field`] - Field declarations
//! - [`model`] - Model schemas, the schema builder, and whole-model rules
//! - [`record`] - Validated instances
//! - [`engine`] - Validation entry points and error codes
//! - [`document`] - Loading schemas from TOML and JSON documents

pub mod document;
pub mod engine;
pub mod field;
pub mod model;
pub mod record;
pub mod types;
pub mod value;

pub use document::SchemaDocument;
pub use field::FieldSchema;
pub use model::{FieldsMatch, ModelRule, ModelSchema, ModelSchemaBuilder, SchemaModel};
pub use record::Record;
pub use types::{Constraints, SelectOption, TypeExpr};
pub use value::{parse_iso_date, FormData, Value};
