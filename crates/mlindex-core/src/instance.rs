//! Metadata instance contract.
//!
//! An instance maps field names, plain or localized (`{base}_multilang_{lang}`),
//! to text. Absent keys are never an error; callers decide the default.

use std::collections::BTreeMap;
use std::path::Path;

use serde_json::Value;

use crate::error::{Error, Result};

/// Field name → text value for one resource.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetadataInstance {
    values: BTreeMap<String, String>,
}

impl MetadataInstance {
    /// Create an empty instance.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an instance from a JSON object.
    ///
    /// Strings are kept verbatim, numbers and booleans use their JSON text.
    /// `null`, arrays and objects carry no indexable text and are skipped.
    pub fn from_value(value: Value) -> Result<Self> {
        let Value::Object(map) = value else {
            return Err(Error::parse("metadata instance must be a JSON object"));
        };

        let mut values = BTreeMap::new();
        for (name, value) in map {
            match value {
                Value::String(s) => {
                    values.insert(name, s);
                }
                Value::Number(n) => {
                    values.insert(name, n.to_string());
                }
                Value::Bool(b) => {
                    values.insert(name, b.to_string());
                }
                Value::Null => {}
                Value::Array(_) | Value::Object(_) => {
                    log::debug!("Skipping non-scalar instance field '{name}'");
                }
            }
        }

        Ok(Self { values })
    }

    /// Parse an instance from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)
            .map_err(|e| Error::parse(format!("Invalid instance JSON: {e}")))?;
        Self::from_value(value)
    }

    /// Load an instance from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::io_with_path(e, path))?;
        Self::from_json_str(&content)
    }

    /// Value of `name`, if present.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Set a value, returning `self` for chaining.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(name.into(), value.into());
        self
    }

    /// Number of populated fields.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no field is populated.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for MetadataInstance
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
