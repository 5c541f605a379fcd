//! Common types for the FTS module.
//!
//! These types are used across all vectorizer backends and are always
//! available regardless of feature flags.

use serde::{Deserialize, Serialize};

/// Vectorizer configuration.
///
/// Selects the text analysis backend and tunes its filters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VectorizerConfig {
    /// Backend type: "tantivy" or "simple".
    #[serde(default = "default_backend")]
    pub backend: String,

    /// Apply per-language Snowball stemming to localized text.
    #[serde(default = "default_true")]
    pub stemming_enabled: bool,

    /// Drop per-language stopwords from localized text.
    #[serde(default = "default_true")]
    pub stopwords_enabled: bool,

    /// Custom stopwords to add for every language.
    #[serde(default)]
    pub custom_stopwords: Vec<String>,

    /// Words to preserve (not filter as stopwords).
    #[serde(default)]
    pub allowlist: Vec<String>,
}

fn default_backend() -> String {
    "tantivy".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for VectorizerConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            stemming_enabled: default_true(),
            stopwords_enabled: default_true(),
            custom_stopwords: Vec::new(),
            allowlist: Vec::new(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
