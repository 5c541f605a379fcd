//! Per-call field value table.
//!
//! [`FieldValueTable::classify`] splits the fields involved in indexing into
//! multilingual fields (one value per active language) and plain fields (one
//! optional value), reading both from the metadata instance. The table is
//! immutable once built; [`FieldValueTable::with_title_backfill`] consumes it
//! and returns the backfilled version.

use std::collections::BTreeMap;

use crate::error::Result;
use crate::instance::MetadataInstance;
use crate::language::{LanguageCatalog, LanguageCode};
use crate::schema::MetadataSchema;

/// Field that receives the missing-language backfill.
pub const TITLE_FIELD: &str = "title";

/// Values of one multilingual field, in catalog language order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalizedValues {
    values: Vec<(LanguageCode, String)>,
}

impl LocalizedValues {
    /// Value for `lang`, if the language is active.
    pub fn get(&self, lang: &LanguageCode) -> Option<&str> {
        self.values
            .iter()
            .find(|(code, _)| code == lang)
            .map(|(_, value)| value.as_str())
    }

    /// `(language, value)` pairs in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = (&LanguageCode, &str)> {
        self.values.iter().map(|(code, value)| (code, value.as_str()))
    }

    /// Whether any language has an empty value.
    pub fn has_missing(&self) -> bool {
        self.values.iter().any(|(_, value)| value.is_empty())
    }
}

/// Multilingual and plain values of the fields involved in indexing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldValueTable {
    multilang: BTreeMap<String, LocalizedValues>,
    plain: BTreeMap<String, Option<String>>,
}

impl FieldValueTable {
    /// Classify `fields` against `schema` and gather their values.
    ///
    /// Missing localized values default to the empty string, missing plain
    /// values to `None`. A field absent from the schema aborts with
    /// [`Error::SchemaLookup`](crate::Error::SchemaLookup).
    pub fn classify<'a, I>(
        fields: I,
        schema: &MetadataSchema,
        instance: &MetadataInstance,
        catalog: &LanguageCatalog,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut table = Self::default();

        for field in fields {
            if catalog.is_multilang(field, schema)? {
                let values = catalog
                    .localized_field_names(field)
                    .map(|(lang, name)| {
                        let value = instance.get(&name).unwrap_or_default().to_string();
                        (lang.clone(), value)
                    })
                    .collect();
                table
                    .multilang
                    .insert(field.to_string(), LocalizedValues { values });
            } else {
                table
                    .plain
                    .insert(field.to_string(), instance.get(field).map(str::to_string));
            }
        }

        Ok(table)
    }

    /// Fill empty title languages with a merged fallback.
    ///
    /// Applies only when `title` was classified multilingual and at least one
    /// language is empty. The fallback joins, with single spaces, every
    /// non-empty per-language title in catalog order followed by the plain
    /// `title` value of `instance`. Each empty language receives it; when there
    /// is nothing to merge they stay empty.
    pub fn with_title_backfill(mut self, instance: &MetadataInstance) -> Self {
        let Some(title) = self.multilang.get_mut(TITLE_FIELD) else {
            return self;
        };
        if !title.has_missing() {
            return self;
        }

        let plain = instance.get(TITLE_FIELD).filter(|value| !value.is_empty());
        let merged = title
            .values
            .iter()
            .map(|(_, value)| value.as_str())
            .filter(|value| !value.is_empty())
            .chain(plain)
            .collect::<Vec<_>>()
            .join(" ");

        for (lang, value) in title.values.iter_mut() {
            if value.is_empty() {
                log::debug!("Filling in title for empty lang {lang}");
                value.clone_from(&merged);
            }
        }

        self
    }

    /// Whether `field` was classified multilingual.
    pub fn is_multilang(&self, field: &str) -> bool {
        self.multilang.contains_key(field)
    }

    /// Whether every field of a group is plain.
    pub fn all_plain<S: AsRef<str>>(&self, fields: &[S]) -> bool {
        fields.iter().all(|field| !self.is_multilang(field.as_ref()))
    }

    /// Per-language values of a multilingual field.
    pub fn localized(&self, field: &str) -> Option<&LocalizedValues> {
        self.multilang.get(field)
    }

    /// Plain value of a monolingual field; `None` when absent.
    pub fn plain(&self, field: &str) -> Option<&str> {
        self.plain.get(field).and_then(|value| value.as_deref())
    }

    /// Text for `field` under `lang`.
    ///
    /// Multilingual fields resolve to their `lang` value, plain fields to
    /// their single value. Anything missing is the empty string.
    pub fn value_for(&self, field: &str, lang: Option<&LanguageCode>) -> &str {
        match (self.multilang.get(field), lang) {
            (Some(values), Some(lang)) => values.get(lang).unwrap_or_default(),
            (Some(_), None) => "",
            (None, _) => self.plain(field).unwrap_or_default(),
        }
    }

    /// Space-joined text of `fields`, in the given order.
    pub fn index_text<S: AsRef<str>>(&self, fields: &[S], lang: Option<&LanguageCode>) -> String {
        fields
            .iter()
            .map(|field| self.value_for(field.as_ref(), lang))
            .collect::<Vec<_>>()
            .join(" ")
    }
}
