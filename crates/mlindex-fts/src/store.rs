//! Record store trait and in-memory implementation.
//!
//! This module defines the `RecordStore` trait the index computer writes
//! through, plus [`RecordTable`], the ordered record map shared by the bundled
//! stores.
//!
//! # Stores
//!
//! - `MemoryRecordStore`: process-local, for tests and embedding
//! - `JsonFileStore`: a JSON file on disk (see [`crate::file_store`])
//!
//! # Example
//!
//! ```rust
//! use mlindex_fts::{MemoryRecordStore, RecordKey, RecordStore, ResourceId, SearchVector};
//!
//! # tokio_test::block_on(async {
//! let store = MemoryRecordStore::new();
//! let resource = ResourceId::new("42");
//!
//! store
//!     .upsert(RecordKey::neutral(resource.clone(), "title"), SearchVector::new())
//!     .await
//!     .unwrap();
//!
//! assert_eq!(store.records_for(&resource).await.unwrap().len(), 1);
//! # });
//! ```

use std::collections::BTreeMap;

use async_trait::async_trait;
use mlindex_core::Result;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::plan::{ApplyStats, IndexOp, IndexPlan};
use crate::record::{IndexRecord, LanguageFilter, RecordKey, ResourceId};
use crate::vector::SearchVector;

/// Abstract record store.
///
/// Implementations persist [`IndexRecord`]s keyed by
/// `(resource, index name, language)`.
///
/// # Atomicity
///
/// `upsert` and `delete_where` are independent operations. `apply` should
/// apply a whole plan or nothing; the default implementation runs the ops one
/// by one and stops at the first failure, so stores that can do better
/// override it.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Create or overwrite a record. Returns `true` when it was created.
    async fn upsert(&self, key: RecordKey, vector: SearchVector) -> Result<bool>;

    /// Delete the records of `(resource, index_name)` matching `filter`.
    ///
    /// Returns the number of records removed.
    async fn delete_where(
        &self,
        resource: &ResourceId,
        index_name: &str,
        filter: &LanguageFilter,
    ) -> Result<usize>;

    /// All records of a resource, ordered by index name then language.
    async fn records_for(&self, resource: &ResourceId) -> Result<Vec<IndexRecord>>;

    /// Apply every operation of `plan`, in order.
    async fn apply(&self, plan: &IndexPlan) -> Result<ApplyStats> {
        let mut stats = ApplyStats::default();
        for op in &plan.ops {
            match op {
                IndexOp::Upsert {
                    index_name,
                    language,
                    vector,
                } => {
                    let key = RecordKey {
                        resource: plan.resource.clone(),
                        index_name: index_name.clone(),
                        language: language.clone(),
                    };
                    if self.upsert(key, vector.clone()).await? {
                        stats.created += 1;
                    } else {
                        stats.updated += 1;
                    }
                }
                IndexOp::Delete { index_name, filter } => {
                    stats.deleted += self
                        .delete_where(&plan.resource, index_name, filter)
                        .await?;
                }
            }
        }
        Ok(stats)
    }

    /// Get the store name for diagnostics.
    fn name(&self) -> &str;
}

/// Ordered record map with the store semantics, without synchronization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<IndexRecord>", into = "Vec<IndexRecord>")]
pub struct RecordTable {
    records: BTreeMap<RecordKey, IndexRecord>,
}

impl RecordTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create or overwrite a record. Returns `true` when it was created.
    ///
    /// A record whose vector is unchanged keeps its `indexed_at`.
    pub fn upsert(&mut self, key: RecordKey, vector: SearchVector) -> bool {
        match self.records.get_mut(&key) {
            Some(existing) if existing.vector == vector => false,
            Some(existing) => {
                *existing = IndexRecord::new(key, vector);
                false
            }
            None => {
                let record = IndexRecord::new(key.clone(), vector);
                self.records.insert(key, record);
                true
            }
        }
    }

    /// Delete matching records of `(resource, index_name)`.
    pub fn delete_where(
        &mut self,
        resource: &ResourceId,
        index_name: &str,
        filter: &LanguageFilter,
    ) -> usize {
        let before = self.records.len();
        self.records.retain(|key, _| {
            !(key.resource == *resource
                && key.index_name == index_name
                && filter.matches(key.language.as_ref()))
        });
        before - self.records.len()
    }

    /// Records of `resource`, in key order.
    pub fn records_for(&self, resource: &ResourceId) -> Vec<IndexRecord> {
        self.records
            .values()
            .filter(|record| record.key.resource == *resource)
            .cloned()
            .collect()
    }

    /// Look up one record.
    pub fn get(&self, key: &RecordKey) -> Option<&IndexRecord> {
        self.records.get(key)
    }

    /// Apply every operation of `plan`, in order.
    pub fn apply(&mut self, plan: &IndexPlan) -> ApplyStats {
        let mut stats = ApplyStats::default();
        for op in &plan.ops {
            match op {
                IndexOp::Upsert {
                    index_name,
                    language,
                    vector,
                } => {
                    let key = RecordKey {
                        resource: plan.resource.clone(),
                        index_name: index_name.clone(),
                        language: language.clone(),
                    };
                    if self.upsert(key, vector.clone()) {
                        stats.created += 1;
                    } else {
                        stats.updated += 1;
                    }
                }
                IndexOp::Delete { index_name, filter } => {
                    stats.deleted += self.delete_where(&plan.resource, index_name, filter);
                }
            }
        }
        stats
    }

    /// Total number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl From<Vec<IndexRecord>> for RecordTable {
    fn from(records: Vec<IndexRecord>) -> Self {
        Self {
            records: records
                .into_iter()
                .map(|record| (record.key.clone(), record))
                .collect(),
        }
    }
}

impl From<RecordTable> for Vec<IndexRecord> {
    fn from(table: RecordTable) -> Self {
        table.records.into_values().collect()
    }
}

/// In-memory record store.
///
/// `apply` holds the write lock for the whole plan, so a plan is applied
/// atomically with respect to every other operation on the store.
#[derive(Debug, Default)]
pub struct MemoryRecordStore {
    table: RwLock<RecordTable>,
}

impl MemoryRecordStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every record.
    pub async fn snapshot(&self) -> RecordTable {
        self.table.read().await.clone()
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn upsert(&self, key: RecordKey, vector: SearchVector) -> Result<bool> {
        Ok(self.table.write().await.upsert(key, vector))
    }

    async fn delete_where(
        &self,
        resource: &ResourceId,
        index_name: &str,
        filter: &LanguageFilter,
    ) -> Result<usize> {
        Ok(self
            .table
            .write()
            .await
            .delete_where(resource, index_name, filter))
    }

    async fn records_for(&self, resource: &ResourceId) -> Result<Vec<IndexRecord>> {
        Ok(self.table.read().await.records_for(resource))
    }

    async fn apply(&self, plan: &IndexPlan) -> Result<ApplyStats> {
        Ok(self.table.write().await.apply(plan))
    }

    fn name(&self) -> &str {
        "memory"
    }
}

// ============================================================================
// Tests
// ============================================================================
