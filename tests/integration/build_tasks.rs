//! Integration tests for the supporting tasks and the full build

use super::test_utils::FixtureWorkspace;
use nmbuild::error::BuildError;
use nmbuild::tasks::{Task, TaskRunner, VersionControl};
use std::fs;
use std::path::Path;

struct StaticVersion(&'static str);

impl VersionControl for StaticVersion {
    fn describe(&self, _workspace: &Path) -> Result<String, BuildError> {
        Ok(self.0.to_string())
    }

    fn has_local_modifications(&self, _workspace: &Path) -> Result<bool, BuildError> {
        Ok(false)
    }
}

struct BrokenVersionControl;

impl VersionControl for BrokenVersionControl {
    fn describe(&self, _workspace: &Path) -> Result<String, BuildError> {
        Err(BuildError::VersionControl("fatal: No names found".to_string()))
    }

    fn has_local_modifications(&self, _workspace: &Path) -> Result<bool, BuildError> {
        Ok(true)
    }
}

fn write_framework_assets(ws: &FixtureWorkspace) {
    let source = ws.path("node_modules/terriajs/wwwroot");
    fs::create_dir_all(source.join("build").join("Cesium")).unwrap();
    fs::write(source.join("images.json"), "{}").unwrap();
    fs::write(source.join("build").join("Cesium").join("Cesium.js"), "// cesium").unwrap();
}

/// Every task creates the build directory first
#[test]
fn test_tasks_create_build_directory() {
    let ws = FixtureWorkspace::with_sample_fragments();
    assert!(!ws.path("wwwroot/build").exists());

    TaskRunner::new(ws.layout()).run(Task::MergeGroups).unwrap();

    assert!(ws.path("wwwroot/build").is_dir());
}

#[test]
fn test_prepare_terriajs_copies_asset_tree() {
    let ws = FixtureWorkspace::new();
    write_framework_assets(&ws);

    let reports = TaskRunner::new(ws.layout()).run(Task::PrepareTerriajs).unwrap();

    assert_eq!(reports[0].detail.as_deref(), Some("2 files copied"));
    assert_eq!(ws.read("wwwroot/build/TerriaJS/images.json"), "{}");
    assert_eq!(
        ws.read("wwwroot/build/TerriaJS/build/Cesium/Cesium.js"),
        "// cesium"
    );
}

#[test]
fn test_build_runs_all_steps_in_order() {
    let ws = FixtureWorkspace::with_sample_fragments();
    write_framework_assets(&ws);
    let runner =
        TaskRunner::new(ws.layout()).with_version_control(Box::new(StaticVersion("v2016.1.0")));

    let reports = runner.run(Task::Build).unwrap();

    let tasks: Vec<Task> = reports.iter().map(|r| r.task).collect();
    assert_eq!(
        tasks,
        vec![
            Task::PrepareTerriajs,
            Task::StampVersion,
            Task::MergeGroups,
            Task::MergeCatalog
        ]
    );
    assert_eq!(ws.read("version.js"), "module.exports = 'v2016.1.0';");
    assert!(ws.path("wwwroot/init/nm.json").is_file());
    assert!(ws.path("wwwroot/build/TerriaJS/images.json").is_file());
}

/// A failing step stops the build before later steps run
#[test]
fn test_build_stops_at_first_failure() {
    let ws = FixtureWorkspace::with_sample_fragments();
    write_framework_assets(&ws);
    let runner = TaskRunner::new(ws.layout()).with_version_control(Box::new(BrokenVersionControl));

    let result = runner.run(Task::Build);

    assert!(matches!(result, Err(BuildError::VersionControl(_))));
    assert!(ws.path("wwwroot/build/TerriaJS/images.json").is_file());
    assert!(!ws.path("version.js").exists());
    assert!(!ws.path("wwwroot/init/nm.json").exists());
}
