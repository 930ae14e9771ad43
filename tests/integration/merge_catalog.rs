//! Integration tests for merge-catalog

use super::test_utils::FixtureWorkspace;
use nmbuild::error::{BuildError, CatalogError};
use nmbuild::tasks::{Task, TaskRunner};
use serde_json::{json, Value};

const CATALOG_OUTPUT: &str = "wwwroot/init/nm.json";

fn read_catalog(ws: &FixtureWorkspace) -> Value {
    serde_json::from_str(&ws.read(CATALOG_OUTPUT)).unwrap()
}

/// Settings plus one layer fragment yields the layer as the whole catalog
#[test]
fn test_settings_and_layers() {
    let ws = FixtureWorkspace::new();
    ws.write_group("a.json", r#"{"catalog":[{"items":[]}]}"#);
    ws.write_datasource("000_settings.json", r#"{"catalog":[]}"#);
    ws.write_datasource("010_layers.json", r#"{"catalog":[{"name":"Layers"}]}"#);

    TaskRunner::new(ws.layout()).run(Task::MergeCatalog).unwrap();

    let catalog = read_catalog(&ws);
    assert_eq!(catalog["catalog"][0], json!({"items": []}));
    assert_eq!(catalog["catalog"][1], json!({"name": "Layers"}));
}

/// merge-catalog re-runs merge-groups and picks up its output as a fragment
#[test]
fn test_catalog_includes_fresh_group_document() {
    let ws = FixtureWorkspace::with_sample_fragments();

    let reports = TaskRunner::new(ws.layout()).run(Task::MergeCatalog).unwrap();

    let tasks: Vec<Task> = reports.iter().map(|r| r.task).collect();
    assert_eq!(tasks, vec![Task::MergeGroups, Task::MergeCatalog]);
    assert_eq!(reports[1].fragments, Some(3));

    assert_eq!(
        ws.read(CATALOG_OUTPUT),
        r#"{"corsDomains":["corsproxy.example"],"catalog":[{"name":"National Data Sets","items":["x","y"]},{"name":"State Data"}]}"#
    );
}

/// A stale group document is replaced before the catalog reads it
#[test]
fn test_group_changes_flow_into_catalog() {
    let ws = FixtureWorkspace::with_sample_fragments();
    let runner = TaskRunner::new(ws.layout());
    runner.run(Task::MergeDatasources).unwrap();

    ws.write_group("c.json", r#"{"catalog":[{"items":["z"]}]}"#);
    runner.run(Task::MergeDatasources).unwrap();

    assert_eq!(read_catalog(&ws)["catalog"][0]["items"], json!(["x", "y", "z"]));
}

/// The settings fragment sorts first because of its key, not because of creation order
#[test]
fn test_settings_sorted_first_by_key() {
    let ws = FixtureWorkspace::new();
    ws.write_group("a.json", r#"{"catalog":[{"items":[]}]}"#);
    ws.write_datasource("20_Extra.json", r#"{"catalog":[{"name":"Extra"}]}"#);
    ws.write_datasource("000_settings.json", r#"{"initialCamera":{"west":105},"catalog":[]}"#);

    TaskRunner::new(ws.layout()).run(Task::MergeCatalog).unwrap();

    let catalog = read_catalog(&ws);
    assert_eq!(catalog["initialCamera"], json!({"west": 105}));
    let names: Vec<&Value> = catalog["catalog"].as_array().unwrap().iter().collect();
    assert_eq!(names.len(), 2);
    assert_eq!(names[1], &json!({"name": "Extra"}));
}

/// A top-level fragment without `catalog` fails instead of being skipped
#[test]
fn test_fragment_without_catalog_fails() {
    let ws = FixtureWorkspace::with_sample_fragments();
    ws.write_datasource("30_Broken.json", r#"{"name":"forgot the catalog"}"#);

    let result = TaskRunner::new(ws.layout()).run(Task::MergeCatalog);

    match result {
        Err(BuildError::Catalog(CatalogError::MissingField { fragment, field })) => {
            assert_eq!(fragment, "30_Broken");
            assert_eq!(field, "catalog");
        }
        other => panic!("expected missing field, got {:?}", other),
    }
    assert!(!ws.path(CATALOG_OUTPUT).exists());
}

/// Invalid JSON names the offending file
#[test]
fn test_invalid_json_names_file() {
    let ws = FixtureWorkspace::with_sample_fragments();
    ws.write_datasource("40_Typo.json", r#"{"catalog": [ {"name": "x"}, ]}"#);

    let result = TaskRunner::new(ws.layout()).run(Task::MergeCatalog);

    match result {
        Err(BuildError::Catalog(CatalogError::Parse { path, .. })) => {
            assert!(path.ends_with("40_Typo.json"))
        }
        other => panic!("expected parse error, got {:?}", other),
    }
}
