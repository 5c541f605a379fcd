//! Per-language stopword lists.
//!
//! Localized index text drops the common words of its language before
//! stemming. Lists come from the `stop-words` crate and support:
//!
//! - Allowlist: Words to preserve even if they're stopwords
//! - Custom stopwords: Additional words to filter in every language
//!
//! Languages without a bundled list get an empty filter (nothing removed).
//!
//! # Example
//!
//! ```rust
//! use mlindex_fts::stopwords::StopwordFilter;
//! use mlindex_fts::VectorizerConfig;
//!
//! let en = "en".parse().unwrap();
//! let filter = StopwordFilter::new(&VectorizerConfig::default(), &en);
//! let words = filter.words();
//! assert!(words.iter().any(|w| w == "the"));
//! assert!(!words.iter().any(|w| w == "river"));
//! ```

use std::collections::HashSet;

use mlindex_core::LanguageCode;
use stop_words::{LANGUAGE, get};

use crate::types::VectorizerConfig;

/// Stopword list for one language.
pub struct StopwordFilter {
    stopwords: HashSet<String>,
    enabled: bool,
}

impl StopwordFilter {
    /// Build the filter for `language` from configuration.
    pub fn new(config: &VectorizerConfig, language: &LanguageCode) -> Self {
        if !config.stopwords_enabled {
            return Self::disabled();
        }

        let mut stopwords: HashSet<String> = match stopword_language(language) {
            Some(lang) => get(lang).iter().map(|s| s.to_lowercase()).collect(),
            None => {
                log::debug!("No stopword list for language '{language}'");
                HashSet::new()
            }
        };

        for word in &config.custom_stopwords {
            stopwords.insert(word.to_lowercase());
        }

        // Analyzed tokens are lower-cased, so the allowlist is too
        for word in &config.allowlist {
            stopwords.remove(&word.to_lowercase());
        }

        Self {
            stopwords,
            enabled: true,
        }
    }

    /// Create a disabled filter (removes nothing).
    pub fn disabled() -> Self {
        Self {
            stopwords: HashSet::new(),
            enabled: false,
        }
    }

    /// Get the number of stopwords in the filter.
    pub fn stopword_count(&self) -> usize {
        self.stopwords.len()
    }

    /// Check if filtering is enabled.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Stopwords, sorted, for handing to an analyzer.
    pub fn words(&self) -> Vec<String> {
        let mut words: Vec<String> = self.stopwords.iter().cloned().collect();
        words.sort_unstable();
        words
    }
}

impl std::fmt::Debug for StopwordFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StopwordFilter")
            .field("enabled", &self.enabled)
            .field("stopword_count", &self.stopwords.len())
            .finish()
    }
}

fn stopword_language(code: &LanguageCode) -> Option<LANGUAGE> {
    let lang = match code.as_str() {
        "en" => LANGUAGE::English,
        "fr" => LANGUAGE::French,
        "de" => LANGUAGE::German,
        "it" => LANGUAGE::Italian,
        "es" => LANGUAGE::Spanish,
        "pt" => LANGUAGE::Portuguese,
        "nl" => LANGUAGE::Dutch,
        "ru" => LANGUAGE::Russian,
        _ => return None,
    };
    Some(lang)
}

// ============================================================================
// Tests
// ============================================================================
