//! Build tasks
//!
//! Named tasks over a resolved [`Layout`]. Dependencies between tasks are plain calls in a
//! fixed order: merge-catalog always re-runs merge-groups first, because the group document
//! is one of the catalog's input fragments.

pub mod assets;
pub mod merge;
pub mod version;

use crate::config::Layout;
use crate::error::BuildError;
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use std::time::Instant;
use tracing::debug;

pub use version::{GitCli, VersionControl};

/// Task names as invoked from the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Task {
    MergeGroups,
    MergeCatalog,
    MergeDatasources,
    PrepareTerriajs,
    StampVersion,
    Build,
}

impl Task {
    pub fn name(&self) -> &'static str {
        match self {
            Task::MergeGroups => "merge-groups",
            Task::MergeCatalog => "merge-catalog",
            Task::MergeDatasources => "merge-datasources",
            Task::PrepareTerriajs => "prepare-terriajs",
            Task::StampVersion => "stamp-version",
            Task::Build => "build",
        }
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Outcome of one executed task step
#[derive(Debug, Clone, Serialize)]
pub struct TaskReport {
    pub task: Task,
    /// Number of fragments merged, for merge steps
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fragments: Option<usize>,
    /// Files or directories produced by the step
    pub written: Vec<PathBuf>,
    /// Step-specific summary, e.g. the stamped version
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    pub elapsed_ms: u64,
    /// RFC 3339 completion time
    pub finished_at: String,
}

impl TaskReport {
    pub(crate) fn finish(task: Task, started: Instant) -> Self {
        Self {
            task,
            fragments: None,
            written: Vec::new(),
            detail: None,
            elapsed_ms: started.elapsed().as_millis() as u64,
            finished_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub(crate) fn with_fragments(mut self, count: usize) -> Self {
        self.fragments = Some(count);
        self
    }

    pub(crate) fn with_written(mut self, path: PathBuf) -> Self {
        self.written.push(path);
        self
    }

    pub(crate) fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

/// Runs tasks against one workspace layout
pub struct TaskRunner {
    layout: Layout,
    version_control: Box<dyn VersionControl>,
}

impl TaskRunner {
    pub fn new(layout: Layout) -> Self {
        Self {
            layout,
            version_control: Box::new(GitCli),
        }
    }

    /// Replace the version control backend used by stamp-version
    pub fn with_version_control(mut self, version_control: Box<dyn VersionControl>) -> Self {
        self.version_control = version_control;
        self
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Run a task and everything it depends on, returning one report per executed step.
    ///
    /// Stops at the first failing step.
    pub fn run(&self, task: Task) -> Result<Vec<TaskReport>, BuildError> {
        self.ensure_build_dir()?;

        match task {
            Task::MergeGroups => Ok(vec![self.merge_groups()?]),
            Task::MergeCatalog | Task::MergeDatasources => self.merge_datasources(),
            Task::PrepareTerriajs => Ok(vec![self.prepare_framework_assets()?]),
            Task::StampVersion => Ok(vec![self.stamp_version()?]),
            Task::Build => {
                let mut reports = vec![self.prepare_framework_assets()?, self.stamp_version()?];
                reports.extend(self.merge_datasources()?);
                Ok(reports)
            }
        }
    }

    /// merge-groups followed by the catalog merge that consumes its output
    pub fn merge_datasources(&self) -> Result<Vec<TaskReport>, BuildError> {
        let groups = self.merge_groups()?;
        let catalog = merge::run_merge_catalog(&self.layout)?;
        Ok(vec![groups, catalog])
    }

    pub fn merge_groups(&self) -> Result<TaskReport, BuildError> {
        merge::run_merge_groups(&self.layout)
    }

    pub fn prepare_framework_assets(&self) -> Result<TaskReport, BuildError> {
        assets::run_prepare_assets(&self.layout)
    }

    pub fn stamp_version(&self) -> Result<TaskReport, BuildError> {
        version::run_stamp_version(&self.layout, self.version_control.as_ref())
    }

    /// Create the build directory if it does not exist yet
    pub fn ensure_build_dir(&self) -> Result<(), BuildError> {
        let build_dir = &self.layout.build_dir;
        if !build_dir.is_dir() {
            debug!(build_dir = ?build_dir, "Creating build directory");
            std::fs::create_dir_all(build_dir).map_err(|e| BuildError::io(build_dir, e))?;
        }
        Ok(())
    }
}
