//! mlindex Core: shared types, errors, and field classification.
//!
//! This crate provides the foundational types used across all mlindex crates.
//! It has no internal mlindex dependencies.
//!
//! # Modules
//!
//! - [`error`]: Error types and Result alias
//! - [`language`]: Active languages and the localized field-name convention
//! - [`schema`]: Metadata schema contract (multilingual annotation lookup)
//! - [`instance`]: Metadata instance contract (field values)
//! - [`config`]: Locales and index group configuration
//! - [`fields`]: Per-call field value table and title backfill

#![doc = include_str!("../README.md")]

pub mod config;
pub mod error;
pub mod fields;
pub mod instance;
pub mod language;
pub mod schema;

// Re-export key types at crate root for convenience
pub use config::{IndexGroupConfig, IndexingConfig};
pub use error::{Error, Result};
pub use fields::{FieldValueTable, LocalizedValues, TITLE_FIELD};
pub use instance::MetadataInstance;
pub use language::{
    LanguageCatalog, LanguageCode, MULTILANG_ANNOTATION, is_multilang, localized_field_name,
};
pub use schema::{FieldSchema, MetadataSchema};
