//! `update_index` against the JSON file store.

use mlindex_core::IndexGroupConfig;
use mlindex_fts::{JsonFileStore, RecordStore};

use crate::common::{computer, default_groups, full_instance, layout, rid, schema};

#[tokio::test]
async fn test_file_store_keeps_records_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("records.json");
    let resource = rid("r1");

    {
        let store = JsonFileStore::open(&path).unwrap();
        computer(default_groups())
            .update_index(&resource, &schema(), &full_instance(), &store)
            .await
            .unwrap();
    }

    let store = JsonFileStore::open(&path).unwrap();
    let layout = layout(&store, &resource).await;
    assert_eq!(layout["title"], ["en", "fr", "it"]);
    assert_eq!(layout["ids"], ["-"]);
}

#[tokio::test]
async fn test_file_store_switch_cleans_up_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("records.json");
    let resource = rid("r1");

    let store = JsonFileStore::open(&path).unwrap();
    computer(vec![IndexGroupConfig::new("main", ["title"])])
        .update_index(&resource, &schema(), &full_instance(), &store)
        .await
        .unwrap();
    computer(vec![IndexGroupConfig::new("main", ["doi"])])
        .update_index(&resource, &schema(), &full_instance(), &store)
        .await
        .unwrap();

    let table = JsonFileStore::load(&path).unwrap().unwrap();
    let records = table.records_for(&resource);
    assert_eq!(records.len(), 1);
    assert!(records[0].key.is_neutral());
    assert_eq!(store.records_for(&resource).await.unwrap(), records);
}

#[tokio::test]
async fn test_independent_handles_index_different_resources() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("records.json");
    let computer = computer(default_groups());

    let first = JsonFileStore::open(&path).unwrap();
    let second = JsonFileStore::open(&path).unwrap();

    computer
        .update_index(&rid("r1"), &schema(), &full_instance(), &first)
        .await
        .unwrap();
    computer
        .update_index(&rid("r2"), &schema(), &full_instance(), &second)
        .await
        .unwrap();

    let reopened = JsonFileStore::open(&path).unwrap();
    assert_eq!(reopened.records_for(&rid("r1")).await.unwrap().len(), 7);
    assert_eq!(reopened.records_for(&rid("r2")).await.unwrap().len(), 7);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_concurrent_updates_through_separate_handles() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("records.json");
    let computer = computer(default_groups());
    let (schema, instance) = (schema(), full_instance());

    let stores: Vec<JsonFileStore> = (0..3)
        .map(|_| JsonFileStore::open(&path).unwrap())
        .collect();
    let (a, b, c) = (rid("a"), rid("b"), rid("c"));

    let (ra, rb, rc) = tokio::join!(
        computer.update_index(&a, &schema, &instance, &stores[0]),
        computer.update_index(&b, &schema, &instance, &stores[1]),
        computer.update_index(&c, &schema, &instance, &stores[2]),
    );
    ra.unwrap();
    rb.unwrap();
    rc.unwrap();

    let table = JsonFileStore::load(&path).unwrap().unwrap();
    assert_eq!(table.len(), 3 * 7);
}

#[tokio::test]
async fn test_identical_update_does_not_rewrite_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("records.json");
    let store = JsonFileStore::open(&path).unwrap();
    let computer = computer(default_groups());

    computer
        .update_index(&rid("r1"), &schema(), &full_instance(), &store)
        .await
        .unwrap();
    let before = std::fs::read_to_string(&path).unwrap();

    computer
        .update_index(&rid("r1"), &schema(), &full_instance(), &store)
        .await
        .unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), before);
}
