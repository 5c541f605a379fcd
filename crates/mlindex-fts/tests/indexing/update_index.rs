//! End-to-end `update_index` behavior against the in-memory store.

use mlindex_core::{IndexGroupConfig, MetadataInstance};
use mlindex_fts::{MemoryRecordStore, RecordStore};

use crate::common::{
    assert_exclusive, computer, default_groups, find, full_instance, layout, rid, schema,
};

#[tokio::test]
async fn test_update_index_emits_expected_layout() {
    let computer = computer(default_groups());
    let store = MemoryRecordStore::new();
    let resource = rid("r1");

    let stats = computer
        .update_index(&resource, &schema(), &full_instance(), &store)
        .await
        .expect("update should succeed");

    // title: 3 localized, all: 3 localized, ids: 1 neutral
    assert_eq!(stats.created, 7);
    assert_eq!(stats.updated, 0);
    assert_eq!(stats.deleted, 0);

    let layout = layout(&store, &resource).await;
    assert_eq!(layout["title"], ["en", "fr", "it"]);
    assert_eq!(layout["all"], ["en", "fr", "it"]);
    assert_eq!(layout["ids"], ["-"]);
}

#[tokio::test]
async fn test_localized_text_concatenates_in_field_order() {
    let computer = computer(default_groups());
    let store = MemoryRecordStore::new();
    let resource = rid("r1");

    computer
        .update_index(&resource, &schema(), &full_instance(), &store)
        .await
        .unwrap();
    let records = store.records_for(&resource).await.unwrap();

    let fr = find(&records, "all", Some("fr")).unwrap();
    // title, abstract, purpose → positions follow the group order
    assert_eq!(fr.vector.positions("rivières"), Some(&[1][..]));
    assert_eq!(fr.vector.positions("hydrographie"), Some(&[2][..]));
    assert!(fr.vector.contains("flood"));
    assert!(!fr.vector.contains("rivers"));

    let ids = find(&records, "ids", None).unwrap();
    assert!(ids.vector.contains("rivers"));
    assert!(ids.vector.contains("planning"));
}

#[tokio::test]
async fn test_title_backfill_reaches_every_language() {
    let computer = computer(vec![IndexGroupConfig::new("title", ["title"])]);
    let store = MemoryRecordStore::new();
    let resource = rid("r1");
    let instance = MetadataInstance::new()
        .with("title_multilang_en", "Hello")
        .with("title", "Plain");

    computer
        .update_index(&resource, &schema(), &instance, &store)
        .await
        .unwrap();
    let records = store.records_for(&resource).await.unwrap();

    let en = find(&records, "title", Some("en")).unwrap();
    assert!(en.vector.contains("hello"));
    assert!(!en.vector.contains("plain"));

    for lang in ["fr", "it"] {
        let record = find(&records, "title", Some(lang)).unwrap();
        assert_eq!(record.vector.positions("hello"), Some(&[1][..]));
        assert_eq!(record.vector.positions("plain"), Some(&[2][..]));
    }
}

#[tokio::test]
async fn test_all_empty_title_still_indexes_every_language() {
    let computer = computer(vec![IndexGroupConfig::new("title", ["title"])]);
    let store = MemoryRecordStore::new();
    let resource = rid("r1");

    let stats = computer
        .update_index(&resource, &schema(), &MetadataInstance::new(), &store)
        .await
        .unwrap();

    assert_eq!(stats.created, 3);
    for record in store.records_for(&resource).await.unwrap() {
        assert!(record.vector.is_empty());
    }
}

#[tokio::test]
async fn test_missing_plain_values_are_empty_text() {
    let computer = computer(vec![IndexGroupConfig::new("ids", ["doi", "purpose"])]);
    let store = MemoryRecordStore::new();
    let resource = rid("r1");

    computer
        .update_index(&resource, &schema(), &MetadataInstance::new(), &store)
        .await
        .unwrap();

    let records = store.records_for(&resource).await.unwrap();
    assert_eq!(records.len(), 1);
    assert!(records[0].key.is_neutral());
    assert!(records[0].vector.is_empty());
}

#[tokio::test]
async fn test_unknown_field_writes_nothing() {
    let computer = computer(vec![
        IndexGroupConfig::new("title", ["title"]),
        IndexGroupConfig::new("broken", ["title", "keywords"]),
    ]);
    let store = MemoryRecordStore::new();
    let resource = rid("r1");

    let err = computer
        .update_index(&resource, &schema(), &full_instance(), &store)
        .await
        .unwrap_err();

    assert!(err.is_schema_lookup());
    assert!(err.to_string().contains("keywords"));
    assert!(store.records_for(&resource).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_resources_are_isolated() {
    let computer = computer(default_groups());
    let store = MemoryRecordStore::new();

    computer
        .update_index(&rid("r1"), &schema(), &full_instance(), &store)
        .await
        .unwrap();
    computer
        .update_index(&rid("r2"), &schema(), &MetadataInstance::new(), &store)
        .await
        .unwrap();

    assert_exclusive(&store, &rid("r1")).await;
    assert_exclusive(&store, &rid("r2")).await;
    assert_eq!(store.records_for(&rid("r1")).await.unwrap().len(), 7);
    assert_eq!(store.records_for(&rid("r2")).await.unwrap().len(), 7);
}

#[tokio::test]
async fn test_repeated_update_leaves_records_identical() {
    let computer = computer(default_groups());
    let store = MemoryRecordStore::new();
    let resource = rid("r1");

    computer
        .update_index(&resource, &schema(), &full_instance(), &store)
        .await
        .unwrap();
    let once = store.records_for(&resource).await.unwrap();

    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    let stats = computer
        .update_index(&resource, &schema(), &full_instance(), &store)
        .await
        .unwrap();
    let twice = store.records_for(&resource).await.unwrap();

    assert_eq!(stats.created, 0);
    assert_eq!(stats.deleted, 0);
    assert_eq!(once, twice);
}
