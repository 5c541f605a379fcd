//! Supported languages and the localized field-name convention.
//!
//! A [`LanguageCatalog`] is built once from the configured locale identifiers
//! and shared by handle. It answers two questions:
//!
//! - which languages are active, in configured order
//! - what the localized variant of a multilingual field is called
//!
//! # Example
//!
//! ```
//! use mlindex_core::language::LanguageCatalog;
//!
//! let catalog = LanguageCatalog::from_locales(["en-US", "fr", "en-GB", "it"]).unwrap();
//! let codes: Vec<&str> = catalog.active_languages().iter().map(|l| l.as_str()).collect();
//! assert_eq!(codes, ["en", "fr", "it"]);
//!
//! let en = &catalog.active_languages()[0];
//! assert_eq!(catalog.localized_field_name("title", en), "title_multilang_en");
//! ```

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::schema::MetadataSchema;

/// Schema annotation key that marks a field as multilingual.
pub const MULTILANG_ANNOTATION: &str = "geonode:multilang";

/// Infix between a base field name and the language code.
const MULTILANG_INFIX: &str = "_multilang_";

/// A primary language subtag such as `en` or `fr`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LanguageCode(String);

impl LanguageCode {
    /// Derive a language code from a locale identifier.
    ///
    /// The identifier is truncated to its primary subtag (`en-US` and `en_US`
    /// both become `en`) and lower-cased.
    pub fn from_locale(locale: &str) -> Result<Self> {
        let primary = locale
            .trim()
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();

        if primary.is_empty() || !primary.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(Error::config(format!("Invalid locale identifier '{locale}'")));
        }

        Ok(Self(primary))
    }

    /// The code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for LanguageCode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_locale(s)
    }
}

impl TryFrom<String> for LanguageCode {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::from_locale(&value)
    }
}

impl From<LanguageCode> for String {
    fn from(code: LanguageCode) -> Self {
        code.0
    }
}

impl AsRef<str> for LanguageCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Ordered, de-duplicated set of active languages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageCatalog {
    languages: Vec<LanguageCode>,
}

impl LanguageCatalog {
    /// Build a catalog from configured locale identifiers.
    ///
    /// Duplicates collapse to their first occurrence. Fails if no locale is
    /// given or any entry is not a valid identifier.
    pub fn from_locales<I, S>(locales: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let mut languages = Vec::new();

        for locale in locales {
            let code = LanguageCode::from_locale(locale.as_ref())?;
            if seen.insert(code.clone()) {
                languages.push(code);
            }
        }

        if languages.is_empty() {
            return Err(Error::config("At least one language must be configured"));
        }

        Ok(Self { languages })
    }

    /// Active language codes in configured order.
    pub fn active_languages(&self) -> &[LanguageCode] {
        &self.languages
    }

    /// Whether `code` is one of the active languages.
    pub fn contains(&self, code: &LanguageCode) -> bool {
        self.languages.contains(code)
    }

    /// Number of active languages.
    pub fn len(&self) -> usize {
        self.languages.len()
    }

    /// Always `false` for a constructed catalog; provided for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.languages.is_empty()
    }

    /// Name of the localized variant of `base_name` for `lang`.
    pub fn localized_field_name(&self, base_name: &str, lang: &LanguageCode) -> String {
        localized_field_name(base_name, lang)
    }

    /// `(language, localized field name)` pairs for every active language.
    pub fn localized_field_names<'a>(
        &'a self,
        base_name: &'a str,
    ) -> impl Iterator<Item = (&'a LanguageCode, String)> + 'a {
        self.languages
            .iter()
            .map(move |lang| (lang, localized_field_name(base_name, lang)))
    }

    /// Whether `field_name` is annotated multilingual in `schema`.
    ///
    /// See [`is_multilang`].
    pub fn is_multilang(&self, field_name: &str, schema: &MetadataSchema) -> Result<bool> {
        is_multilang(field_name, schema)
    }
}

/// `{base_name}_multilang_{lang}`.
pub fn localized_field_name(base_name: &str, lang: &LanguageCode) -> String {
    format!("{base_name}{MULTILANG_INFIX}{lang}")
}

/// Read the multilingual annotation of `field_name`.
///
/// A field without the annotation is monolingual. A field missing from the
/// schema is an [`Error::SchemaLookup`].
pub fn is_multilang(field_name: &str, schema: &MetadataSchema) -> Result<bool> {
    Ok(schema.field(field_name)?.is_multilang())
}
