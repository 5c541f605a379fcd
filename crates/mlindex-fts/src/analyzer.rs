//! Tantivy-backed vectorizer.
//!
//! This module is only available with the `fts-tantivy` feature.
//!
//! # Analyzers
//!
//! Neutral text uses the simple chain:
//! - SimpleTokenizer → RemoveLongFilter(40) → LowerCaser
//!
//! Localized text adds, when available for the language:
//! - StopWordFilter (lists from [`StopwordFilter`])
//! - Stemmer (Snowball)
//!
//! One analyzer is built per active language up front. A language outside
//! the catalog is analyzed with the neutral chain.

use std::collections::HashMap;

use mlindex_core::{LanguageCatalog, LanguageCode};
use tantivy::tokenizer::{
    Language, LowerCaser, RemoveLongFilter, SimpleTokenizer, Stemmer, StopWordFilter,
    TextAnalyzer, TokenStream,
};

use crate::stopwords::StopwordFilter;
use crate::types::VectorizerConfig;
use crate::vector::SearchVector;
use crate::vectorizer::Vectorizer;

/// Tokens longer than this many bytes are dropped.
const MAX_TOKEN_LENGTH: usize = 40;

/// Vectorizer built on Tantivy text analyzers.
pub struct TantivyVectorizer {
    neutral: TextAnalyzer,
    localized: HashMap<LanguageCode, TextAnalyzer>,
}

impl TantivyVectorizer {
    /// Build analyzers for every active language of `catalog`.
    pub fn new(config: &VectorizerConfig, catalog: &LanguageCatalog) -> Self {
        let localized = catalog
            .active_languages()
            .iter()
            .map(|lang| (lang.clone(), language_analyzer(config, lang)))
            .collect();

        Self {
            neutral: neutral_analyzer(),
            localized,
        }
    }

    /// Whether a dedicated analyzer exists for `lang`.
    pub fn has_analyzer(&self, lang: &LanguageCode) -> bool {
        self.localized.contains_key(lang)
    }

    fn analyzer_for(&self, language: Option<&LanguageCode>) -> TextAnalyzer {
        match language {
            Some(lang) => match self.localized.get(lang) {
                Some(analyzer) => analyzer.clone(),
                None => {
                    log::debug!("No analyzer for language '{lang}', using neutral analyzer");
                    self.neutral.clone()
                }
            },
            None => self.neutral.clone(),
        }
    }
}

impl Vectorizer for TantivyVectorizer {
    fn compute_vector(&self, text: &str, language: Option<&LanguageCode>) -> SearchVector {
        let mut analyzer = self.analyzer_for(language);
        let mut stream = analyzer.token_stream(text);

        let mut vector = SearchVector::new();
        while stream.advance() {
            let token = stream.token();
            vector.push(token.text.clone(), token.position as u32 + 1);
        }
        vector
    }

    fn name(&self) -> &str {
        "tantivy"
    }
}

impl std::fmt::Debug for TantivyVectorizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut languages: Vec<&str> = self.localized.keys().map(LanguageCode::as_str).collect();
        languages.sort_unstable();
        f.debug_struct("TantivyVectorizer")
            .field("languages", &languages)
            .finish()
    }
}

/// Lower-cased tokens, no language processing.
pub fn neutral_analyzer() -> TextAnalyzer {
    TextAnalyzer::builder(SimpleTokenizer::default())
        .filter(RemoveLongFilter::limit(MAX_TOKEN_LENGTH))
        .filter(LowerCaser)
        .build()
}

/// Analyzer for `lang`: neutral chain plus stopwords and stemming where
/// available and enabled.
pub fn language_analyzer(config: &VectorizerConfig, lang: &LanguageCode) -> TextAnalyzer {
    let stemmer = if config.stemming_enabled {
        stemmer_language(lang)
    } else {
        None
    };
    let filter = StopwordFilter::new(config, lang);
    log::debug!(
        "Analyzer for '{lang}': {} stopword(s), stemming {}",
        filter.stopword_count(),
        if stemmer.is_some() { "on" } else { "off" }
    );
    let stopwords = (filter.is_enabled() && filter.stopword_count() > 0).then(|| filter.words());

    let builder = TextAnalyzer::builder(SimpleTokenizer::default())
        .filter(RemoveLongFilter::limit(MAX_TOKEN_LENGTH))
        .filter(LowerCaser);

    match (stopwords, stemmer) {
        (Some(words), Some(language)) => builder
            .filter(StopWordFilter::remove(words))
            .filter(Stemmer::new(language))
            .build(),
        (Some(words), None) => builder.filter(StopWordFilter::remove(words)).build(),
        (None, Some(language)) => builder.filter(Stemmer::new(language)).build(),
        (None, None) => builder.build(),
    }
}

fn stemmer_language(code: &LanguageCode) -> Option<Language> {
    let language = match code.as_str() {
        "ar" => Language::Arabic,
        "da" => Language::Danish,
        "nl" => Language::Dutch,
        "en" => Language::English,
        "fi" => Language::Finnish,
        "fr" => Language::French,
        "de" => Language::German,
        "el" => Language::Greek,
        "hu" => Language::Hungarian,
        "it" => Language::Italian,
        "no" | "nb" => Language::Norwegian,
        "pt" => Language::Portuguese,
        "ro" => Language::Romanian,
        "ru" => Language::Russian,
        "es" => Language::Spanish,
        "sv" => Language::Swedish,
        "ta" => Language::Tamil,
        "tr" => Language::Turkish,
        _ => return None,
    };
    Some(language)
}

// ============================================================================
// Tests
// ============================================================================
