//! Error types for mlindex-core

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Result type alias for mlindex operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while computing or persisting index records
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// A field referenced by an index group is missing from the metadata schema.
    #[error("Field '{field}' not found in metadata schema")]
    SchemaLookup {
        /// The field name that was looked up.
        field: String,
    },

    /// The schema document itself is malformed.
    #[error("Invalid schema: {0}")]
    Schema(String),

    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O failure with the path that caused it.
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        /// Path being accessed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Input that could not be parsed (JSON, TOML).
    #[error("Parse error: {0}")]
    Parse(String),

    /// Record store failure.
    #[error("Record store error: {0}")]
    Store(String),
}

impl Error {
    /// Creates a schema lookup error for the given field.
    pub fn schema_lookup(field: impl Into<String>) -> Self {
        Error::SchemaLookup {
            field: field.into(),
        }
    }

    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Error::Config(message.into())
    }

    /// Creates a parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Error::Parse(message.into())
    }

    /// Creates a record store error.
    pub fn store(message: impl Into<String>) -> Self {
        Error::Store(message.into())
    }

    /// Wraps an I/O error with the path that produced it.
    pub fn io_with_path(source: std::io::Error, path: impl AsRef<Path>) -> Self {
        Error::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Returns `true` when the error comes from a schema lookup.
    pub fn is_schema_lookup(&self) -> bool {
        matches!(self, Error::SchemaLookup { .. })
    }
}
