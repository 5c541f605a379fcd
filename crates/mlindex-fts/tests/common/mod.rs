//! Common fixtures for index computation tests.

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::Arc;

use mlindex_core::{IndexGroupConfig, LanguageCatalog, MetadataInstance, MetadataSchema};
use mlindex_fts::{IndexComputer, IndexRecord, RecordStore, ResourceId, SimpleVectorizer};
use serde_json::json;

/// Active languages used across the suite.
pub const LANGUAGES: [&str; 3] = ["en", "fr", "it"];

/// Computer over `groups` with the fixture languages and the simple vectorizer.
pub fn computer(groups: Vec<IndexGroupConfig>) -> IndexComputer {
    let catalog = Arc::new(LanguageCatalog::from_locales(LANGUAGES).unwrap());
    IndexComputer::new(catalog, groups, Box::new(SimpleVectorizer))
}

/// The default groups: a multilingual title, a mixed group and a plain group.
pub fn default_groups() -> Vec<IndexGroupConfig> {
    vec![
        IndexGroupConfig::new("title", ["title"]),
        IndexGroupConfig::new("all", ["title", "abstract", "purpose"]),
        IndexGroupConfig::new("ids", ["doi", "purpose"]),
    ]
}

/// Schema with `title`/`abstract` multilingual and `doi`/`purpose` plain.
pub fn schema() -> MetadataSchema {
    schema_with_multilang(&["title", "abstract"])
}

/// Schema declaring the four fixture fields, with `multilang` annotated.
pub fn schema_with_multilang(multilang: &[&str]) -> MetadataSchema {
    let mut fields = serde_json::Map::new();
    for name in ["title", "abstract", "doi", "purpose"] {
        fields.insert(
            name.to_string(),
            json!({ "type": "string", "geonode:multilang": multilang.contains(&name) }),
        );
    }
    MetadataSchema::from_value(serde_json::Value::Object(fields)).unwrap()
}

/// An instance with every field populated in every language.
pub fn full_instance() -> MetadataInstance {
    MetadataInstance::new()
        .with("title", "Rivers plain")
        .with("title_multilang_en", "Rivers")
        .with("title_multilang_fr", "Rivières")
        .with("title_multilang_it", "Fiumi")
        .with("abstract", "Hydrography plain")
        .with("abstract_multilang_en", "Hydrography of Europe")
        .with("abstract_multilang_fr", "Hydrographie de l'Europe")
        .with("abstract_multilang_it", "Idrografia dell'Europa")
        .with("doi", "10.1234/rivers")
        .with("purpose", "Flood planning")
}

/// Resource id helper.
pub fn rid(id: &str) -> ResourceId {
    ResourceId::new(id)
}

/// Records of `resource`, grouped by index name → languages (`"-"` = neutral).
pub async fn layout(store: &dyn RecordStore, resource: &ResourceId) -> BTreeMap<String, Vec<String>> {
    let mut layout: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for record in store.records_for(resource).await.unwrap() {
        let lang = record
            .key
            .language
            .as_ref()
            .map(|l| l.to_string())
            .unwrap_or_else(|| "-".to_string());
        layout.entry(record.key.index_name.clone()).or_default().push(lang);
    }
    layout
}

/// Assert that no index of `resource` mixes neutral and localized records.
pub async fn assert_exclusive(store: &dyn RecordStore, resource: &ResourceId) {
    for (index, langs) in layout(store, resource).await {
        let neutral = langs.iter().filter(|l| *l == "-").count();
        if neutral > 0 {
            assert_eq!(langs, ["-"], "index '{index}' mixes neutral and localized records");
        }
    }
}

/// Record lookup by index name and language code (`None` = neutral).
pub fn find<'a>(records: &'a [IndexRecord], index: &str, lang: Option<&str>) -> Option<&'a IndexRecord> {
    records.iter().find(|r| {
        r.key.index_name == index && r.key.language.as_ref().map(|l| l.as_str()) == lang
    })
}
