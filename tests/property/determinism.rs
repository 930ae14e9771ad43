//! Property-based tests for merge determinism guarantees

use nmbuild::catalog::{self, Fragment, FragmentSet};
use proptest::prelude::*;
use serde_json::{json, Value};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn group_fragment(key: &str, item: i64) -> Fragment {
    Fragment {
        key: key.to_string(),
        path: PathBuf::from(format!("{}.json", key)),
        document: json!({"catalog": [{"name": key, "items": [item]}]}),
    }
}

/// Distinct fragment keys, each paired with an item
fn keyed_items() -> impl Strategy<Value = Vec<(String, i64)>> {
    prop::collection::btree_map("[a-z0-9_]{1,8}", any::<i64>(), 1..12)
        .prop_map(|map| map.into_iter().collect())
}

proptest! {
    /// Input order never affects the merged document
    #[test]
    fn test_merge_groups_ignores_input_order(
        (entries, shuffled) in keyed_items().prop_flat_map(|entries| {
            let shuffled = Just(entries.clone()).prop_shuffle();
            (Just(entries), shuffled)
        })
    ) {
        let ordered: Vec<Fragment> = entries.iter().map(|(k, v)| group_fragment(k, *v)).collect();
        let reordered: Vec<Fragment> = shuffled.iter().map(|(k, v)| group_fragment(k, *v)).collect();

        let a = catalog::merge_groups(FragmentSet::from_fragments(PathBuf::from("d"), ordered)).unwrap();
        let b = catalog::merge_groups(FragmentSet::from_fragments(PathBuf::from("d"), reordered)).unwrap();

        prop_assert_eq!(
            catalog::to_compact_string(&a).unwrap(),
            catalog::to_compact_string(&b).unwrap()
        );

        // Items appear in key order: the base's own item, then one per later fragment
        let items = a["catalog"][0]["items"].as_array().unwrap().clone();
        let expected: Vec<Value> = entries.iter().map(|(_, v)| json!(v)).collect();
        prop_assert_eq!(items, expected);
    }

    /// Merging a merged group document alone is the identity
    #[test]
    fn test_merge_groups_idempotent(entries in keyed_items()) {
        let fragments: Vec<Fragment> = entries.iter().map(|(k, v)| group_fragment(k, *v)).collect();
        let merged = catalog::merge_groups(FragmentSet::from_fragments(PathBuf::from("d"), fragments)).unwrap();

        let solo = Fragment {
            key: "merged".to_string(),
            path: PathBuf::from("merged.json"),
            document: merged.clone(),
        };
        let again = catalog::merge_groups(FragmentSet::from_fragments(PathBuf::from("d"), vec![solo])).unwrap();

        prop_assert_eq!(again, merged);
    }

    /// Catalog merge keeps the first key's settings and orders the rest by key
    #[test]
    fn test_merge_catalog_orders_entries_by_key(entries in keyed_items()) {
        let fragments: Vec<Fragment> = entries
            .iter()
            .rev()
            .map(|(k, _)| Fragment {
                key: k.clone(),
                path: PathBuf::from(format!("{}.json", k)),
                document: json!({"settings": k, "catalog": [{"name": k}]}),
            })
            .collect();

        let merged = catalog::merge_catalog(FragmentSet::from_fragments(PathBuf::from("d"), fragments)).unwrap();

        let (first, rest) = entries.split_first().unwrap();
        prop_assert_eq!(&merged["settings"], &json!(first.0));
        let names: Vec<Value> = merged["catalog"].as_array().unwrap().iter().map(|e| e["name"].clone()).collect();
        let expected: Vec<Value> = rest.iter().map(|(k, _)| json!(k)).collect();
        prop_assert_eq!(names, expected);
    }
}

/// Files created in different orders produce byte-identical output on disk
#[test]
fn test_file_creation_order_does_not_matter() {
    let names = ["20_Water.json", "00_Base.json", "10_Land.json", "05_Air.json"];

    let write_all = |order: &[&str]| {
        let temp = TempDir::new().unwrap();
        for name in order {
            let key = name.trim_end_matches(".json");
            fs::write(
                temp.path().join(name),
                format!(r#"{{"catalog":[{{"items":[{{"name":"{}"}}]}}]}}"#, key),
            )
            .unwrap();
        }
        let set = FragmentSet::load(temp.path()).unwrap();
        let output = temp.path().join("out").join("merged.json");
        catalog::write_document(&output, &catalog::merge_groups(set).unwrap()).unwrap();
        fs::read(output).unwrap()
    };

    let mut reversed = names;
    reversed.reverse();
    assert_eq!(write_all(&names[..]), write_all(&reversed[..]));
}
