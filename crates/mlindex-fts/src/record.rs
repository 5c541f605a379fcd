//! Persisted index records.
//!
//! An [`IndexRecord`] is identified by `(resource, index name, language)`
//! where a `None` language marks the neutral record. For one
//! `(resource, index name)` pair a store holds either one neutral record or
//! any number of localized ones, never both.

use std::fmt;

use chrono::{DateTime, Utc};
use mlindex_core::LanguageCode;
use serde::{Deserialize, Serialize};

use crate::vector::SearchVector;

/// Identity of an indexed resource.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceId(String);

impl ResourceId {
    /// Create a resource id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ResourceId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ResourceId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// `(resource, index name, language)` key of a record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RecordKey {
    /// Indexed resource.
    pub resource: ResourceId,
    /// Index group name.
    pub index_name: String,
    /// Language, or `None` for the neutral record.
    pub language: Option<LanguageCode>,
}

impl RecordKey {
    /// Key of the neutral record.
    pub fn neutral(resource: ResourceId, index_name: impl Into<String>) -> Self {
        Self {
            resource,
            index_name: index_name.into(),
            language: None,
        }
    }

    /// Key of a localized record.
    pub fn localized(
        resource: ResourceId,
        index_name: impl Into<String>,
        language: LanguageCode,
    ) -> Self {
        Self {
            resource,
            index_name: index_name.into(),
            language: Some(language),
        }
    }

    /// Whether this is a neutral key.
    pub fn is_neutral(&self) -> bool {
        self.language.is_none()
    }
}

impl fmt::Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.language {
            Some(lang) => write!(f, "{}/{}/{lang}", self.resource, self.index_name),
            None => write!(f, "{}/{}/-", self.resource, self.index_name),
        }
    }
}

/// Which records of a `(resource, index name)` pair a deletion targets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LanguageFilter {
    /// The neutral record.
    Neutral,
    /// Every localized record.
    Localized,
    /// The record of one language.
    Exact(LanguageCode),
}

impl LanguageFilter {
    /// Whether a record with `language` matches the filter.
    pub fn matches(&self, language: Option<&LanguageCode>) -> bool {
        match (self, language) {
            (LanguageFilter::Neutral, None) => true,
            (LanguageFilter::Localized, Some(_)) => true,
            (LanguageFilter::Exact(want), Some(have)) => want == have,
            _ => false,
        }
    }
}

/// A persisted index entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexRecord {
    /// Record identity.
    #[serde(flatten)]
    pub key: RecordKey,
    /// Analyzed text.
    pub vector: SearchVector,
    /// When the vector was last written.
    pub indexed_at: DateTime<Utc>,
}

impl IndexRecord {
    /// Create a record stamped with the current time.
    pub fn new(key: RecordKey, vector: SearchVector) -> Self {
        Self {
            key,
            vector,
            indexed_at: Utc::now(),
        }
    }
}
