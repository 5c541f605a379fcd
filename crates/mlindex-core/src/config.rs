//! Indexing configuration: active locales and index groups.
//!
//! ```toml
//! languages = ["en-US", "fr", "it"]
//!
//! [[indexes]]
//! name = "title"
//! fields = ["title"]
//!
//! [[indexes]]
//! name = "all"
//! fields = ["title", "abstract"]
//! ```

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::language::LanguageCatalog;

/// A named group of fields whose concatenated text forms one searchable unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexGroupConfig {
    /// Index name, unique across the configuration.
    pub name: String,
    /// Fields in concatenation order.
    pub fields: Vec<String>,
}

impl IndexGroupConfig {
    /// Create a group from a name and its ordered fields.
    pub fn new<I, S>(name: impl Into<String>, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }
}

/// Locale identifiers plus the ordered index groups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexingConfig {
    /// Locale identifiers (`en-US`, `fr`, ...), in preference order.
    #[serde(default = "default_languages")]
    pub languages: Vec<String>,

    /// Index groups, processed in this order.
    #[serde(default = "default_indexes")]
    pub indexes: Vec<IndexGroupConfig>,
}

fn default_languages() -> Vec<String> {
    vec!["en".to_string()]
}

fn default_indexes() -> Vec<IndexGroupConfig> {
    vec![IndexGroupConfig::new("title", ["title"])]
}

impl Default for IndexingConfig {
    fn default() -> Self {
        Self {
            languages: default_languages(),
            indexes: default_indexes(),
        }
    }
}

impl IndexingConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)
            .map_err(|e| Error::parse(format!("Invalid indexing config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Check group names and field lists, and that the locales resolve.
    pub fn validate(&self) -> Result<()> {
        let mut names = HashSet::new();
        for group in &self.indexes {
            if group.name.trim().is_empty() {
                return Err(Error::config("Index group name must not be empty"));
            }
            if !names.insert(group.name.as_str()) {
                return Err(Error::config(format!(
                    "Duplicate index group '{}'",
                    group.name
                )));
            }
            if group.fields.is_empty() {
                return Err(Error::config(format!(
                    "Index group '{}' has no fields",
                    group.name
                )));
            }
        }

        self.catalog().map(|_| ())
    }

    /// Build the language catalog for the configured locales.
    pub fn catalog(&self) -> Result<LanguageCatalog> {
        LanguageCatalog::from_locales(&self.languages)
    }

    /// Union of all group fields, in first-seen order.
    pub fn involved_fields(&self) -> Vec<&str> {
        involved_fields(&self.indexes)
    }
}

/// Union of the fields of `groups`, in first-seen order.
pub fn involved_fields(groups: &[IndexGroupConfig]) -> Vec<&str> {
    let mut seen = HashSet::new();
    groups
        .iter()
        .flat_map(|group| group.fields.iter())
        .map(String::as_str)
        .filter(|field| seen.insert(*field))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = IndexingConfig::default();
        assert_eq!(config.languages, ["en"]);
        assert_eq!(config.indexes.len(), 1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_toml() {
        let config = IndexingConfig::from_toml_str(
            r#"
            languages = ["en-US", "fr"]

            [[indexes]]
            name = "title"
            fields = ["title"]

            [[indexes]]
            name = "all"
            fields = ["title", "abstract", "purpose"]
            "#,
        )
        .unwrap();

        assert_eq!(config.indexes[1].name, "all");
        assert_eq!(config.involved_fields(), ["title", "abstract", "purpose"]);
        assert_eq!(config.catalog().unwrap().len(), 2);
    }

    #[test]
    fn test_defaults_fill_missing_sections() {
        let config = IndexingConfig::from_toml_str(r#"languages = ["it"]"#).unwrap();
        assert_eq!(config.indexes, default_indexes());
    }

    #[test]
    fn test_duplicate_group_rejected() {
        let config = IndexingConfig {
            languages: vec!["en".into()],
            indexes: vec![
                IndexGroupConfig::new("a", ["title"]),
                IndexGroupConfig::new("a", ["abstract"]),
            ],
        };
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_empty_fields_rejected() {
        let config = IndexingConfig {
            languages: vec!["en".into()],
            indexes: vec![IndexGroupConfig::new("a", Vec::<String>::new())],
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_languages_rejected() {
        let err = IndexingConfig::from_toml_str("languages = []").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_invalid_toml_is_parse_error() {
        let err = IndexingConfig::from_toml_str("languages = ").unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }
}
