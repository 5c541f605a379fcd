//! Metadata schema contract.
//!
//! The schema maps each field name to a descriptor object. The only part of a
//! descriptor mlindex reads is the boolean [`MULTILANG_ANNOTATION`]. Both a bare
//! `{ field: descriptor }` map and a JSON-Schema document with a top-level
//! `properties` object are accepted.

use std::collections::BTreeMap;
use std::path::Path;

use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::language::MULTILANG_ANNOTATION;

/// Descriptor of one schema field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldSchema {
    descriptor: Map<String, Value>,
}

impl FieldSchema {
    /// Whether the field carries `"geonode:multilang": true`.
    pub fn is_multilang(&self) -> bool {
        match self.descriptor.get(MULTILANG_ANNOTATION) {
            None => false,
            Some(Value::Bool(flag)) => *flag,
            Some(other) => {
                log::warn!("Ignoring non-boolean {MULTILANG_ANNOTATION} annotation: {other}");
                false
            }
        }
    }

    /// Raw descriptor entry.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.descriptor.get(key)
    }
}

/// Field name → descriptor lookup.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetadataSchema {
    fields: BTreeMap<String, FieldSchema>,
}

impl MetadataSchema {
    /// Build a schema from a JSON value.
    pub fn from_value(value: Value) -> Result<Self> {
        let Value::Object(mut root) = value else {
            return Err(Error::Schema("schema must be a JSON object".to_string()));
        };

        let properties = match root.remove("properties") {
            Some(Value::Object(properties)) => properties,
            Some(_) => {
                return Err(Error::Schema("'properties' must be a JSON object".to_string()));
            }
            None => root,
        };

        let fields = properties
            .into_iter()
            .map(|(name, descriptor)| {
                let descriptor = match descriptor {
                    Value::Object(map) => map,
                    _ => Map::new(),
                };
                (name, FieldSchema { descriptor })
            })
            .collect();

        Ok(Self { fields })
    }

    /// Parse a schema from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)
            .map_err(|e| Error::parse(format!("Invalid schema JSON: {e}")))?;
        Self::from_value(value)
    }

    /// Load a schema from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::io_with_path(e, path))?;
        Self::from_json_str(&content)
    }

    /// Look up a field descriptor.
    ///
    /// Unknown fields are an [`Error::SchemaLookup`].
    pub fn field(&self, name: &str) -> Result<&FieldSchema> {
        self.fields
            .get(name)
            .ok_or_else(|| Error::schema_lookup(name))
    }

    /// Whether the schema declares `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Declared field names, sorted.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }
}
