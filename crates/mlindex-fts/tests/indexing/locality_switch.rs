//! Clean-up when an index group changes between neutral and localized.

use mlindex_core::IndexGroupConfig;
use mlindex_fts::{MemoryRecordStore, RecordKey, RecordStore, SearchVector};

use crate::common::{
    assert_exclusive, computer, full_instance, layout, rid, schema, schema_with_multilang,
};

#[tokio::test]
async fn test_localized_group_becomes_neutral() {
    let groups = vec![IndexGroupConfig::new("main", ["title", "doi"])];
    let computer = computer(groups);
    let store = MemoryRecordStore::new();
    let resource = rid("r1");

    computer
        .update_index(&resource, &schema(), &full_instance(), &store)
        .await
        .unwrap();
    assert_eq!(layout(&store, &resource).await["main"], ["en", "fr", "it"]);

    // title is no longer annotated multilingual
    let stats = computer
        .update_index(&resource, &schema_with_multilang(&[]), &full_instance(), &store)
        .await
        .unwrap();

    assert_eq!(stats.created, 1);
    assert_eq!(stats.deleted, 3);
    assert_eq!(layout(&store, &resource).await["main"], ["-"]);
    assert_exclusive(&store, &resource).await;
}

#[tokio::test]
async fn test_neutral_group_becomes_mixed() {
    let store = MemoryRecordStore::new();
    let resource = rid("r1");

    // first configuration: only plain fields
    computer(vec![IndexGroupConfig::new("main", ["doi"])])
        .update_index(&resource, &schema(), &full_instance(), &store)
        .await
        .unwrap();
    assert_eq!(layout(&store, &resource).await["main"], ["-"]);

    // reconfigured: the group now includes a multilingual field
    let stats = computer(vec![IndexGroupConfig::new("main", ["doi", "abstract"])])
        .update_index(&resource, &schema(), &full_instance(), &store)
        .await
        .unwrap();

    assert_eq!(stats.created, 3);
    assert_eq!(stats.deleted, 1);
    assert_eq!(layout(&store, &resource).await["main"], ["en", "fr", "it"]);
    assert_exclusive(&store, &resource).await;
}

#[tokio::test]
async fn test_stale_records_of_unrelated_groups_are_kept() {
    let store = MemoryRecordStore::new();
    let resource = rid("r1");

    store
        .upsert(RecordKey::neutral(resource.clone(), "legacy"), SearchVector::new())
        .await
        .unwrap();

    computer(vec![IndexGroupConfig::new("main", ["title"])])
        .update_index(&resource, &schema(), &full_instance(), &store)
        .await
        .unwrap();

    let layout = layout(&store, &resource).await;
    assert_eq!(layout["legacy"], ["-"]);
    assert_eq!(layout["main"], ["en", "fr", "it"]);
}

#[tokio::test]
async fn test_mixed_group_overwrites_existing_vectors() {
    let computer = computer(vec![IndexGroupConfig::new("main", ["title"])]);
    let store = MemoryRecordStore::new();
    let resource = rid("r1");

    store
        .upsert(
            RecordKey::localized(resource.clone(), "main", "en".parse().unwrap()),
            [("stale", 1)].into_iter().collect(),
        )
        .await
        .unwrap();

    let stats = computer
        .update_index(&resource, &schema(), &full_instance(), &store)
        .await
        .unwrap();
    assert_eq!(stats.updated, 1);
    assert_eq!(stats.created, 2);

    let records = store.records_for(&resource).await.unwrap();
    assert!(records.iter().all(|r| !r.vector.contains("stale")));
}
