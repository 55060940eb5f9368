//! Loading schemas from TOML and JSON documents.
//!
//! A schema document names the model, lists its fields, and optionally lists
//! field pairs that must match:
//!
//! ```toml
//! name = "Signup"
//!
//! [[fields]]
//! name = "username"
//! type = { kind = "str" }
//! min_length = 3
//! title = "Username"
//!
//! [[fields]]
//! name = "password"
//! type = { kind = "str" }
//! min_length = 8
//!
//! [[fields]]
//! name = "password_confirm"
//! type = { kind = "str" }
//!
//! [[matching]]
//! field = "password"
//! other = "password_confirm"
//! message = "Passwords do not match"
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use hxform_core::{FormsError, FormsResult};

use crate::field::FieldSchema;
use crate::model::{FieldsMatch, ModelSchema};

/// A serialized model schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaDocument {
    /// The model name.
    pub name: String,
    /// The fields, in declaration order.
    #[serde(default)]
    pub fields: Vec<FieldSchema>,
    /// Field pairs that must hold equal values.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub matching: Vec<FieldsMatch>,
}

impl SchemaDocument {
    /// Parses a TOML document.
    pub fn from_toml_str(source: &str) -> FormsResult<Self> {
        toml::from_str(source)
            .map_err(|e| FormsError::Schema(format!("Failed to parse TOML schema: {e}")))
    }

    /// Parses a JSON document.
    pub fn from_json_str(source: &str) -> FormsResult<Self> {
        serde_json::from_str(source)
            .map_err(|e| FormsError::Schema(format!("Failed to parse JSON schema: {e}")))
    }

    /// Reads a document from a file. Files ending in `.json` are parsed as
    /// JSON, everything else as TOML.
    pub fn from_file(path: impl AsRef<Path>) -> FormsResult<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        tracing::debug!(path = %path.display(), json = is_json, "Loading schema document");
        if is_json {
            Self::from_json_str(&source)
        } else {
            Self::from_toml_str(&source)
        }
    }

    /// Serializes the document as pretty-printed JSON.
    pub fn to_json_string(&self) -> FormsResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| FormsError::Serialization(format!("Failed to serialize schema: {e}")))
    }

    /// Builds the [`ModelSchema`], checking the declaration.
    pub fn into_schema(self) -> FormsResult<ModelSchema> {
        self.matching
            .into_iter()
            .fold(
                ModelSchema::builder(self.name).fields(self.fields),
                |builder, rule| builder.rule(rule),
            )
            .build()
    }
}
