//! Index computation for one resource.
//!
//! `IndexComputer` turns a resource's metadata into index records:
//!
//! 1. Classify the fields of every index group and gather their values
//!    ([`FieldValueTable::classify`]).
//! 2. Backfill empty title languages ([`FieldValueTable::with_title_backfill`]).
//! 3. Per index group, in configured order:
//!    - every field plain → one neutral record, then drop localized records
//!    - any field multilingual → one record per active language, then drop
//!      the neutral record
//!
//! The result is an [`IndexPlan`] handed to a [`RecordStore`] in one call.
//! Classification runs before anything is written, so an unknown field leaves
//! the store untouched.
//!
//! # Usage
//!
//! ```rust,ignore
//! use mlindex_fts::{IndexComputer, JsonFileStore};
//!
//! let computer = IndexComputer::from_config(&config.indexing, &config.vectorizer)?;
//! let store = JsonFileStore::open(&records_path)?;
//!
//! let stats = computer
//!     .update_index(&"42".into(), &schema, &instance, &store)
//!     .await?;
//! println!("{} upserted, {} deleted", stats.upserted(), stats.deleted);
//! ```

use std::sync::Arc;

use mlindex_core::config::involved_fields;
use mlindex_core::{
    FieldValueTable, IndexGroupConfig, IndexingConfig, LanguageCatalog, MetadataInstance,
    MetadataSchema, Result,
};

use crate::plan::{ApplyStats, IndexPlan};
use crate::record::{LanguageFilter, ResourceId};
use crate::store::RecordStore;
use crate::types::VectorizerConfig;
use crate::vectorizer::{Vectorizer, create_vectorizer};

/// Computes and applies the index records of a resource.
///
/// Holds no per-resource state; share one instance (`Arc`) between tasks.
pub struct IndexComputer {
    catalog: Arc<LanguageCatalog>,
    groups: Vec<IndexGroupConfig>,
    vectorizer: Box<dyn Vectorizer>,
}

impl IndexComputer {
    /// Create a computer from its collaborators.
    pub fn new(
        catalog: Arc<LanguageCatalog>,
        groups: Vec<IndexGroupConfig>,
        vectorizer: Box<dyn Vectorizer>,
    ) -> Self {
        Self {
            catalog,
            groups,
            vectorizer,
        }
    }

    /// Build a computer from configuration.
    ///
    /// Validates `indexing`, builds the language catalog and the configured
    /// vectorizer backend.
    pub fn from_config(indexing: &IndexingConfig, vectorizer: &VectorizerConfig) -> Result<Self> {
        indexing.validate()?;
        let catalog = Arc::new(indexing.catalog()?);
        let vectorizer = create_vectorizer(vectorizer, &catalog);

        log::info!(
            "Index computer ready: {} group(s), languages [{}], vectorizer '{}'",
            indexing.indexes.len(),
            catalog
                .active_languages()
                .iter()
                .map(|l| l.as_str())
                .collect::<Vec<_>>()
                .join(", "),
            vectorizer.name()
        );

        Ok(Self::new(catalog, indexing.indexes.clone(), vectorizer))
    }

    /// The language catalog in use.
    pub fn catalog(&self) -> &LanguageCatalog {
        &self.catalog
    }

    /// Configured index groups, in processing order.
    pub fn groups(&self) -> &[IndexGroupConfig] {
        &self.groups
    }

    /// Union of the group fields, in first-seen order.
    pub fn involved_fields(&self) -> Vec<&str> {
        involved_fields(&self.groups)
    }

    /// Classify the involved fields and apply the title backfill.
    pub fn field_values(
        &self,
        schema: &MetadataSchema,
        instance: &MetadataInstance,
    ) -> Result<FieldValueTable> {
        let table =
            FieldValueTable::classify(self.involved_fields(), schema, instance, &self.catalog)?;
        Ok(table.with_title_backfill(instance))
    }

    /// Compute the writes for `resource` without touching any store.
    pub fn plan(
        &self,
        resource: &ResourceId,
        schema: &MetadataSchema,
        instance: &MetadataInstance,
    ) -> Result<IndexPlan> {
        let values = self.field_values(schema, instance)?;
        let mut plan = IndexPlan::new(resource.clone());

        for group in &self.groups {
            if values.all_plain(&group.fields) {
                log::debug!("Index '{}' of {resource}: neutral", group.name);
                let text = values.index_text(&group.fields, None);
                let vector = self.vectorizer.compute_vector(&text, None);
                plan.upsert(&group.name, None, vector);
                plan.delete(&group.name, LanguageFilter::Localized);
            } else {
                log::debug!("Index '{}' of {resource}: localized", group.name);
                for lang in self.catalog.active_languages() {
                    let text = values.index_text(&group.fields, Some(lang));
                    let vector = self.vectorizer.compute_vector(&text, Some(lang));
                    plan.upsert(&group.name, Some(lang.clone()), vector);
                }
                plan.delete(&group.name, LanguageFilter::Neutral);
            }
        }

        Ok(plan)
    }

    /// Recompute the index records of `resource` and apply them to `store`.
    ///
    /// Idempotent: repeating a call with the same inputs leaves the same
    /// record set. Fails with
    /// [`Error::SchemaLookup`](mlindex_core::Error::SchemaLookup) before any
    /// write when a group references a field the schema lacks.
    pub async fn update_index(
        &self,
        resource: &ResourceId,
        schema: &MetadataSchema,
        instance: &MetadataInstance,
        store: &dyn RecordStore,
    ) -> Result<ApplyStats> {
        let plan = self.plan(resource, schema, instance)?;
        let stats = store.apply(&plan).await?;

        log::info!(
            "Indexed resource {resource} into '{}': {} created, {} updated, {} deleted",
            store.name(),
            stats.created,
            stats.updated,
            stats.deleted
        );

        Ok(stats)
    }
}

impl std::fmt::Debug for IndexComputer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IndexComputer")
            .field("languages", &self.catalog.active_languages())
            .field("groups", &self.groups.len())
            .field("vectorizer", &self.vectorizer.name())
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
