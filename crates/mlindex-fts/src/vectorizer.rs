//! Text vectorization trait and factory.
//!
//! A [`Vectorizer`] turns the concatenated text of an index group into a
//! [`SearchVector`], optionally using a language-specific analyzer. Neutral
//! text (no language) always goes through the simple analyzer: tokenize and
//! lower-case, nothing else.
//!
//! # Backends
//!
//! - `TantivyVectorizer`: Tantivy analyzers with per-language stopwords and
//!   stemming (requires `fts-tantivy` feature)
//! - `SimpleVectorizer`: lower-cased alphanumeric tokens for every language
//!
//! # Example
//!
//! ```rust
//! use mlindex_core::LanguageCatalog;
//! use mlindex_fts::{create_vectorizer, VectorizerConfig};
//!
//! let catalog = LanguageCatalog::from_locales(["en"]).unwrap();
//! let config = VectorizerConfig { backend: "simple".to_string(), ..Default::default() };
//! let vectorizer = create_vectorizer(&config, &catalog);
//!
//! let vector = vectorizer.compute_vector("River Delta", None);
//! assert!(vector.contains("river"));
//! ```

use mlindex_core::{LanguageCatalog, LanguageCode};

use crate::types::VectorizerConfig;
use crate::vector::SearchVector;

/// Converts raw text into a search vector.
///
/// Implementations are pure: the same text and language always yield the
/// same vector.
pub trait Vectorizer: Send + Sync {
    /// Analyze `text`, using the analyzer for `language` when given.
    fn compute_vector(&self, text: &str, language: Option<&LanguageCode>) -> SearchVector;

    /// Get the backend name for diagnostics.
    fn name(&self) -> &str;
}

/// Create a vectorizer based on configuration.
///
/// Selection logic:
/// 1. `"tantivy"` with the `fts-tantivy` feature → `TantivyVectorizer` with
///    analyzers for every language of `catalog`
/// 2. Otherwise → `SimpleVectorizer`
#[cfg_attr(not(feature = "fts-tantivy"), allow(unused_variables))]
pub fn create_vectorizer(
    config: &VectorizerConfig,
    catalog: &LanguageCatalog,
) -> Box<dyn Vectorizer> {
    match config.backend.as_str() {
        #[cfg(feature = "fts-tantivy")]
        "tantivy" => Box::new(crate::analyzer::TantivyVectorizer::new(config, catalog)),
        "simple" => Box::new(SimpleVectorizer),
        other => {
            log::warn!("Vectorizer backend '{other}' unavailable, falling back to simple");
            Box::new(SimpleVectorizer)
        }
    }
}

/// Language-agnostic vectorizer.
///
/// Splits on anything that is not alphanumeric and lower-cases. Used for
/// neutral records and as a fallback when Tantivy is not compiled in.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleVectorizer;

impl Vectorizer for SimpleVectorizer {
    fn compute_vector(&self, text: &str, _language: Option<&LanguageCode>) -> SearchVector {
        text.split(|c: char| !c.is_alphanumeric())
            .filter(|token| !token.is_empty())
            .zip(1u32..)
            .map(|(token, position)| (token.to_lowercase(), position))
            .collect()
    }

    fn name(&self) -> &str {
        "simple"
    }
}

// ============================================================================
// Tests
// ============================================================================
