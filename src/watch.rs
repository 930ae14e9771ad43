//! Watch Mode Daemon
//!
//! Long-lived process that monitors the data-source directories and re-runs the catalog
//! merges when fragments change. Group and catalog changes end in the same rebuild, since
//! the catalog merge consumes the group document. When the framework asset tree exists it
//! is watched as well, and changes under it re-run prepare-terriajs.

use crate::config::Layout;
use crate::error::BuildError;
use crate::tasks::TaskRunner;
use notify::{Event, EventKind, RecursiveMode, Watcher};
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};

/// Watch mode configuration
#[derive(Debug, Clone)]
pub struct WatchConfig {
    /// Quiet period after the last relevant event before a rebuild runs
    pub debounce_ms: u64,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self { debounce_ms: 100 }
    }
}

/// Which fragment directory a change belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ChangeKind {
    /// A group fragment changed
    Group,
    /// A top-level catalog fragment changed
    Catalog,
    /// Anything under the framework asset source changed
    FrameworkAssets,
}

/// Paths the daemon watches and compares incoming events against.
///
/// Every path is canonicalized where it exists. The same canonical roots are handed to the
/// watcher, so event paths come back under them whatever form the workspace path had.
#[derive(Debug, Clone)]
pub struct WatchTargets {
    datasources_dir: PathBuf,
    groups_dir: PathBuf,
    group_output: PathBuf,
    framework_assets_source: PathBuf,
}

impl WatchTargets {
    pub fn from_layout(layout: &Layout) -> Self {
        Self {
            datasources_dir: canonical_or_self(&layout.datasources_dir),
            groups_dir: canonical_or_self(&layout.groups_dir),
            group_output: canonical_file(&layout.group_output),
            framework_assets_source: canonical_or_self(&layout.framework_assets_source),
        }
    }

    /// Root passed to the watcher for fragment changes
    pub fn datasources_dir(&self) -> &Path {
        &self.datasources_dir
    }

    /// Root passed to the watcher for framework asset changes
    pub fn framework_assets_source(&self) -> &Path {
        &self.framework_assets_source
    }

    /// Classify a changed path, or `None` when the change cannot affect any build output.
    pub fn classify(&self, path: &Path) -> Option<ChangeKind> {
        if path.starts_with(&self.framework_assets_source) {
            return Some(ChangeKind::FrameworkAssets);
        }

        crate::catalog::fragment_key(path)?;

        if path == self.group_output {
            return None;
        }

        let parent = path.parent()?;
        if parent == self.groups_dir {
            Some(ChangeKind::Group)
        } else if parent == self.datasources_dir {
            Some(ChangeKind::Catalog)
        } else {
            None
        }
    }
}

fn canonical_or_self(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}

/// Canonicalize through the parent so files that do not exist yet still resolve
fn canonical_file(path: &Path) -> PathBuf {
    match (path.parent(), path.file_name()) {
        (Some(parent), Some(name)) => canonical_or_self(parent).join(name),
        _ => path.to_path_buf(),
    }
}

/// Event batcher for grouping and debouncing changes
struct EventBatcher {
    debounce: Duration,
    pending: BTreeMap<PathBuf, ChangeKind>,
    last_event: Option<Instant>,
}

impl EventBatcher {
    fn new(debounce: Duration) -> Self {
        Self {
            debounce,
            pending: BTreeMap::new(),
            last_event: None,
        }
    }

    /// Record a change; a later change to the same path replaces the earlier one
    fn add(&mut self, path: PathBuf, kind: ChangeKind, now: Instant) {
        self.pending.insert(path, kind);
        self.last_event = Some(now);
    }

    /// Ready once something is pending and the debounce window has passed quietly
    fn is_ready(&self, now: Instant) -> bool {
        match self.last_event {
            Some(last) => !self.pending.is_empty() && now.duration_since(last) >= self.debounce,
            None => false,
        }
    }

    /// Time left until the pending batch becomes ready
    fn time_until_ready(&self, now: Instant) -> Duration {
        match self.last_event {
            Some(last) if !self.pending.is_empty() => {
                self.debounce.saturating_sub(now.duration_since(last))
            }
            _ => self.debounce,
        }
    }

    /// Get and clear pending changes
    fn take_batch(&mut self) -> Vec<(PathBuf, ChangeKind)> {
        self.last_event = None;
        std::mem::take(&mut self.pending).into_iter().collect()
    }
}

/// Watch mode daemon
pub struct WatchDaemon {
    runner: TaskRunner,
    config: WatchConfig,
    running: Arc<RwLock<bool>>,
}

impl WatchDaemon {
    pub fn new(runner: TaskRunner, config: WatchConfig) -> Self {
        Self {
            runner,
            config,
            running: Arc::new(RwLock::new(false)),
        }
    }

    /// Shared flag; writing `false` makes [`WatchDaemon::start`] return at its next tick
    pub fn running_handle(&self) -> Arc<RwLock<bool>> {
        Arc::clone(&self.running)
    }

    /// Start the watch daemon
    ///
    /// This will:
    /// 1. Run merge-datasources once, and prepare-terriajs when the asset source exists
    /// 2. Start the file watcher on the data-source directory and the asset source
    /// 3. Re-run the affected tasks whenever a debounced batch of changes is ready
    pub fn start(&self) -> Result<(), BuildError> {
        *self.running.write() = true;

        info!("Running initial datasource merge");
        self.runner.ensure_build_dir()?;
        self.runner.merge_datasources()?;

        let layout = self.runner.layout();
        let targets = WatchTargets::from_layout(layout);
        let watch_assets = targets.framework_assets_source().is_dir();
        if watch_assets {
            info!("Preparing framework assets");
            self.runner.prepare_framework_assets()?;
        } else {
            warn!(
                source = %layout.display_path(&layout.framework_assets_source).display(),
                "Framework asset source not found, not watching it"
            );
        }

        let (tx, rx) = mpsc::channel();
        let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| {
            if let Err(e) = tx.send(res) {
                error!("Error sending watch event: {}", e);
            }
        })?;
        watcher.watch(targets.datasources_dir(), RecursiveMode::Recursive)?;
        if watch_assets {
            watcher.watch(targets.framework_assets_source(), RecursiveMode::Recursive)?;
        }

        info!(
            datasources = %targets.datasources_dir().display(),
            framework_assets = watch_assets,
            debounce_ms = self.config.debounce_ms,
            "Watching for changes"
        );

        let mut batcher = EventBatcher::new(Duration::from_millis(self.config.debounce_ms));

        loop {
            if !*self.running.read() {
                break;
            }

            match rx.recv_timeout(batcher.time_until_ready(Instant::now())) {
                Ok(Ok(event)) => {
                    for (path, kind) in relevant_changes(&targets, event) {
                        debug!(path = ?path, kind = ?kind, "Fragment changed");
                        batcher.add(path, kind, Instant::now());
                    }
                }
                Ok(Err(e)) => {
                    warn!("Watch error: {}", e);
                }
                Err(mpsc::RecvTimeoutError::Timeout) => {}
                Err(mpsc::RecvTimeoutError::Disconnected) => {
                    error!("Watcher channel disconnected");
                    break;
                }
            }

            if batcher.is_ready(Instant::now()) {
                self.rebuild(batcher.take_batch());
            }
        }

        info!("Watch stopped");
        Ok(())
    }

    /// Stop the watch daemon
    pub fn stop(&self) {
        *self.running.write() = false;
    }

    /// Failures are logged and the daemon keeps watching
    fn rebuild(&self, batch: Vec<(PathBuf, ChangeKind)>) {
        let count = |kind: ChangeKind| batch.iter().filter(|(_, k)| *k == kind).count();
        let groups = count(ChangeKind::Group);
        let catalog = count(ChangeKind::Catalog);
        let assets = count(ChangeKind::FrameworkAssets);
        info!(
            changes = batch.len(),
            group_changes = groups,
            asset_changes = assets,
            "Changes detected, rebuilding"
        );

        if assets > 0 {
            match self.runner.prepare_framework_assets() {
                Ok(report) => info!(elapsed_ms = report.elapsed_ms, "Framework assets refreshed"),
                Err(e) => error!("Framework asset refresh failed: {}", e),
            }
        }

        if groups + catalog > 0 {
            match self.runner.merge_datasources() {
                Ok(reports) => {
                    let elapsed: u64 = reports.iter().map(|r| r.elapsed_ms).sum();
                    info!(elapsed_ms = elapsed, "Catalog rebuilt");
                }
                Err(e) => error!("Rebuild failed: {}", e),
            }
        }
    }
}

/// Changes in an event that affect the catalog
fn relevant_changes(targets: &WatchTargets, event: Event) -> Vec<(PathBuf, ChangeKind)> {
    match event.kind {
        EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_) => {}
        _ => return Vec::new(),
    }

    event
        .paths
        .into_iter()
        .filter_map(|path| targets.classify(&path).map(|kind| (path, kind)))
        .collect()
}
