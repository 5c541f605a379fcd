//! Index plans.
//!
//! An [`IndexPlan`] is the ordered list of writes computed for one resource:
//! per index group, the upserts of its records followed by the deletion of
//! the records of the other locality. Stores apply a plan as one unit.

use mlindex_core::LanguageCode;
use serde::{Deserialize, Serialize};

use crate::record::{LanguageFilter, RecordKey, ResourceId};
use crate::vector::SearchVector;

/// One write against a record store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum IndexOp {
    /// Create or overwrite a record.
    Upsert {
        /// Index group name.
        index_name: String,
        /// Record language, `None` for neutral.
        language: Option<LanguageCode>,
        /// Vector to store.
        vector: SearchVector,
    },
    /// Remove the records of an index group matching a filter.
    Delete {
        /// Index group name.
        index_name: String,
        /// Which records to remove.
        filter: LanguageFilter,
    },
}

/// Writes for one resource, in application order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexPlan {
    /// Resource the plan applies to.
    pub resource: ResourceId,
    /// Operations in order.
    pub ops: Vec<IndexOp>,
}

impl IndexPlan {
    /// Empty plan for `resource`.
    pub fn new(resource: ResourceId) -> Self {
        Self {
            resource,
            ops: Vec::new(),
        }
    }

    /// Append an upsert.
    pub fn upsert(
        &mut self,
        index_name: &str,
        language: Option<LanguageCode>,
        vector: SearchVector,
    ) {
        self.ops.push(IndexOp::Upsert {
            index_name: index_name.to_string(),
            language,
            vector,
        });
    }

    /// Append a deletion.
    pub fn delete(&mut self, index_name: &str, filter: LanguageFilter) {
        self.ops.push(IndexOp::Delete {
            index_name: index_name.to_string(),
            filter,
        });
    }

    /// Keys of every upserted record, in order.
    pub fn upserted_keys(&self) -> impl Iterator<Item = RecordKey> + '_ {
        self.ops.iter().filter_map(|op| match op {
            IndexOp::Upsert {
                index_name,
                language,
                ..
            } => Some(RecordKey {
                resource: self.resource.clone(),
                index_name: index_name.clone(),
                language: language.clone(),
            }),
            IndexOp::Delete { .. } => None,
        })
    }

    /// Number of operations.
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// Whether the plan has no operation.
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }
}

/// Outcome of applying a plan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplyStats {
    /// Records created.
    pub created: usize,
    /// Records overwritten.
    pub updated: usize,
    /// Records removed.
    pub deleted: usize,
}

impl ApplyStats {
    /// Records created or overwritten.
    pub fn upserted(&self) -> usize {
        self.created + self.updated
    }
}

impl std::ops::AddAssign for ApplyStats {
    fn add_assign(&mut self, other: Self) {
        self.created += other.created;
        self.updated += other.updated;
        self.deleted += other.deleted;
    }
}
