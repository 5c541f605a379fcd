//! Multilingual full-text index computation for mlindex.
//!
//! This crate turns a resource's metadata into search-index records, one
//! neutral record per monolingual index group and one record per active
//! language for groups with multilingual fields, and keeps the record store
//! free of records of the wrong locality.
//!
//! # Features
//!
//! - `fts-tantivy` (default): Tantivy analyzers with per-language stopwords
//!   and stemming
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      mlindex-fts                            │
//! ├─────────────────────────────────────────────────────────────┤
//! │  IndexComputer (classify → backfill → per-group plan)       │
//! │  IndexPlan / ApplyStats                                     │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Vectorizer trait                                           │
//! │  ├── SimpleVectorizer (lower-cased tokens)                  │
//! │  └── TantivyVectorizer (stopwords + stemming per language)  │
//! ├─────────────────────────────────────────────────────────────┤
//! │  RecordStore trait                                          │
//! │  ├── MemoryRecordStore                                      │
//! │  └── JsonFileStore (atomic file replace)                    │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust
//! use mlindex_core::{IndexingConfig, MetadataInstance, MetadataSchema};
//! use mlindex_fts::{IndexComputer, MemoryRecordStore, RecordStore, VectorizerConfig};
//!
//! # tokio_test::block_on(async {
//! let indexing = IndexingConfig::from_toml_str(r#"
//!     languages = ["en", "fr"]
//!
//!     [[indexes]]
//!     name = "title"
//!     fields = ["title"]
//! "#).unwrap();
//! let computer = IndexComputer::from_config(&indexing, &VectorizerConfig::default()).unwrap();
//!
//! let schema = MetadataSchema::from_json_str(r#"{"title": {"geonode:multilang": true}}"#).unwrap();
//! let instance = MetadataInstance::new().with("title_multilang_en", "Rivers");
//!
//! let store = MemoryRecordStore::new();
//! let stats = computer
//!     .update_index(&"42".into(), &schema, &instance, &store)
//!     .await
//!     .unwrap();
//!
//! // one localized record per language, the French one backfilled
//! assert_eq!(stats.created, 2);
//! # });
//! ```

// Core modules (always available)
pub mod computer;
pub mod file_store;
pub mod plan;
pub mod record;
pub mod store;
pub mod types;
pub mod vector;
pub mod vectorizer;

// Feature-gated Tantivy modules
#[cfg(feature = "fts-tantivy")]
pub mod analyzer;

#[cfg(feature = "fts-tantivy")]
pub mod stopwords;

// Re-exports
pub use computer::IndexComputer;
pub use file_store::JsonFileStore;
pub use plan::{ApplyStats, IndexOp, IndexPlan};
pub use record::{IndexRecord, LanguageFilter, RecordKey, ResourceId};
pub use store::{MemoryRecordStore, RecordStore, RecordTable};
pub use types::VectorizerConfig;
pub use vector::SearchVector;
pub use vectorizer::{SimpleVectorizer, Vectorizer, create_vectorizer};

#[cfg(feature = "fts-tantivy")]
pub use analyzer::TantivyVectorizer;

#[cfg(feature = "fts-tantivy")]
pub use stopwords::StopwordFilter;
