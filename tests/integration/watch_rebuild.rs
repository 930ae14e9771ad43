//! Integration test for watch mode rebuilds

use super::test_utils::FixtureWorkspace;
use nmbuild::config::Layout;
use nmbuild::tasks::TaskRunner;
use nmbuild::watch::{WatchConfig, WatchDaemon};
use std::fs;
use std::path::Path;
use std::thread;
use std::time::{Duration, Instant};

fn wait_for(timeout: Duration, mut condition: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + timeout;
    while Instant::now() < deadline {
        if condition() {
            return true;
        }
        thread::sleep(Duration::from_millis(50));
    }
    condition()
}

/// Run a daemon over `layout`, apply `change` once the initial merge is out, and report
/// whether `rebuilt` became true before the daemon was stopped.
fn run_watch(
    layout: Layout,
    change: impl FnOnce(),
    mut rebuilt: impl FnMut() -> bool,
) -> bool {
    let catalog_output = layout.catalog_output.clone();
    let daemon = WatchDaemon::new(TaskRunner::new(layout), WatchConfig { debounce_ms: 50 });
    let running = daemon.running_handle();

    let handle = thread::spawn(move || daemon.start());

    // The initial merge runs before watching starts
    assert!(wait_for(Duration::from_secs(10), || catalog_output.is_file()));
    // Give the watcher time to register
    thread::sleep(Duration::from_millis(300));

    change();
    let result = wait_for(Duration::from_secs(10), &mut rebuilt);

    *running.write() = false;
    let outcome = handle.join().unwrap();
    assert!(outcome.is_ok());
    result
}

fn catalog_contains(path: &Path, needle: &str) -> bool {
    fs::read_to_string(path)
        .map(|s| s.contains(needle))
        .unwrap_or(false)
}

#[test]
fn test_group_change_rebuilds_catalog() {
    let ws = FixtureWorkspace::with_sample_fragments();
    let rebuilt = run_watch(
        ws.layout(),
        || ws.write_group("c.json", r#"{"catalog":[{"items":["z"]}]}"#),
        || catalog_contains(&ws.path("wwwroot/init/nm.json"), r#""items":["x","y","z"]"#),
    );
    assert!(rebuilt, "catalog was not rebuilt after a group change");
}

#[cfg(unix)]
#[test]
fn test_symlinked_workspace_rebuilds_catalog() {
    let ws = FixtureWorkspace::with_sample_fragments();
    let links = tempfile::TempDir::new().unwrap();
    let link = links.path().join("site");
    std::os::unix::fs::symlink(ws.root(), &link).unwrap();

    let rebuilt = run_watch(
        Layout::for_workspace(&link),
        || ws.write_group("c.json", r#"{"catalog":[{"items":["z"]}]}"#),
        || catalog_contains(&ws.path("wwwroot/init/nm.json"), r#""items":["x","y","z"]"#),
    );
    assert!(rebuilt, "catalog was not rebuilt through a symlinked workspace");
}

#[test]
fn test_dotted_workspace_rebuilds_catalog() {
    let ws = FixtureWorkspace::with_sample_fragments();
    let dotted = ws.path("datasources").join("..");

    let rebuilt = run_watch(
        Layout::for_workspace(&dotted),
        || ws.write_datasource("20_Extra.json", r#"{"catalog":[{"name":"Extra"}]}"#),
        || catalog_contains(&ws.path("wwwroot/init/nm.json"), r#"{"name":"Extra"}"#),
    );
    assert!(rebuilt, "catalog was not rebuilt through a dotted workspace path");
}

#[test]
fn test_framework_asset_change_refreshes_mirror() {
    let ws = FixtureWorkspace::with_sample_fragments();
    let source = ws.path("node_modules/terriajs/wwwroot");
    fs::create_dir_all(source.join("images")).unwrap();
    fs::write(source.join("images/logo.svg"), "<svg/>").unwrap();

    let mirrored = ws.path("wwwroot/build/TerriaJS/images/added.svg");
    let rebuilt = run_watch(
        ws.layout(),
        || fs::write(source.join("images/added.svg"), "<svg id=\"added\"/>").unwrap(),
        || mirrored.is_file(),
    );

    assert!(rebuilt, "framework assets were not re-mirrored after a change");
    assert!(ws.path("wwwroot/build/TerriaJS/images/logo.svg").is_file());
}
