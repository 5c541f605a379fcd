//! Property tests: exclusivity and idempotence over random inputs.

use mlindex_core::{IndexGroupConfig, MetadataInstance, MetadataSchema};
use mlindex_fts::{MemoryRecordStore, RecordStore};
use proptest::prelude::*;

use crate::common::{assert_exclusive, computer, layout, rid, schema_with_multilang};

const FIELDS: [&str; 4] = ["title", "abstract", "doi", "purpose"];

fn arb_schema() -> impl Strategy<Value = MetadataSchema> {
    proptest::sample::subsequence(FIELDS.to_vec(), 0..=FIELDS.len())
        .prop_map(|multilang| schema_with_multilang(&multilang))
}

fn arb_groups() -> impl Strategy<Value = Vec<IndexGroupConfig>> {
    proptest::collection::vec(
        proptest::sample::subsequence(FIELDS.to_vec(), 1..=FIELDS.len()),
        1..4,
    )
    .prop_map(|groups| {
        groups
            .into_iter()
            .enumerate()
            .map(|(i, fields)| IndexGroupConfig::new(format!("g{i}"), fields))
            .collect()
    })
}

fn arb_instance() -> impl Strategy<Value = MetadataInstance> {
    let keys: Vec<String> = FIELDS
        .iter()
        .flat_map(|f| {
            std::iter::once(f.to_string())
                .chain(["en", "fr", "it"].iter().map(move |l| format!("{f}_multilang_{l}")))
        })
        .collect();
    proptest::collection::vec(proptest::option::of("[a-z]{1,8}( [a-z]{1,8})?"), keys.len())
        .prop_map(move |values| {
            keys.iter()
                .zip(values)
                .filter_map(|(k, v)| v.map(|v| (k.clone(), v)))
                .collect()
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn test_update_is_exclusive_and_idempotent(
        first_schema in arb_schema(),
        second_schema in arb_schema(),
        groups in arb_groups(),
        instance in arb_instance(),
    ) {
        tokio_test::block_on(async {
            let computer = computer(groups.clone());
            let store = MemoryRecordStore::new();
            let resource = rid("r1");

            // a prior classification leaves its records behind
            computer
                .update_index(&resource, &first_schema, &instance, &store)
                .await
                .unwrap();
            assert_exclusive(&store, &resource).await;

            computer
                .update_index(&resource, &second_schema, &instance, &store)
                .await
                .unwrap();
            assert_exclusive(&store, &resource).await;
            let once = store.records_for(&resource).await.unwrap();

            computer
                .update_index(&resource, &second_schema, &instance, &store)
                .await
                .unwrap();
            let twice = store.records_for(&resource).await.unwrap();

            // timestamps included: an identical update rewrites nothing
            assert_eq!(once, twice);

            // every group is present with the expected locality
            let layout = layout(&store, &resource).await;
            for group in &groups {
                let langs = &layout[&group.name];
                let neutral = group
                    .fields
                    .iter()
                    .all(|f| !second_schema.field(f).unwrap().is_multilang());
                if neutral {
                    assert_eq!(langs, &["-"]);
                } else {
                    assert_eq!(langs, &["en", "fr", "it"]);
                }
            }
        });
    }
}
