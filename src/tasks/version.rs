//! stamp-version: record the version control description of the working tree

use super::{Task, TaskReport};
use crate::config::Layout;
use crate::error::BuildError;
use std::path::Path;
use std::process::Command;
use std::time::Instant;
use tracing::{info, warn};

const LOCAL_MODIFICATIONS_SUFFIX: &str = " (plus local modifications)";

/// Source of the version description for a workspace
pub trait VersionControl: Send + Sync {
    /// Human-readable version, e.g. the output of `git describe`
    fn describe(&self, workspace: &Path) -> Result<String, BuildError>;

    /// Whether the working tree differs from the described revision
    fn has_local_modifications(&self, workspace: &Path) -> Result<bool, BuildError>;
}

/// `git` command-line backend
#[derive(Debug, Default, Clone, Copy)]
pub struct GitCli;

impl GitCli {
    fn run(&self, workspace: &Path, args: &[&str]) -> Result<String, BuildError> {
        let output = Command::new("git")
            .args(args)
            .current_dir(workspace)
            .output()
            .map_err(|e| {
                BuildError::VersionControl(format!("failed to run git {}: {}", args.join(" "), e))
            })?;

        if !output.status.success() {
            return Err(BuildError::VersionControl(format!(
                "git {} exited with {}: {}",
                args.join(" "),
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl VersionControl for GitCli {
    fn describe(&self, workspace: &Path) -> Result<String, BuildError> {
        Ok(self.run(workspace, &["describe"])?.trim().to_string())
    }

    fn has_local_modifications(&self, workspace: &Path) -> Result<bool, BuildError> {
        Ok(!self.run(workspace, &["status", "--porcelain"])?.is_empty())
    }
}

/// Version string with the local-modification marker applied
pub fn version_string(description: &str, modified: bool) -> String {
    if modified {
        format!("{}{}", description, LOCAL_MODIFICATIONS_SUFFIX)
    } else {
        description.to_string()
    }
}

/// Contents of the generated version module
pub fn render_version_module(version: &str) -> String {
    let escaped = version.replace('\\', "\\\\").replace('\'', "\\'");
    format!("module.exports = '{}';", escaped)
}

pub fn run_stamp_version(
    layout: &Layout,
    version_control: &dyn VersionControl,
) -> Result<TaskReport, BuildError> {
    let started = Instant::now();

    let description = version_control.describe(&layout.workspace_root)?;
    if description.is_empty() {
        warn!("Version control returned an empty description");
    }
    let modified = version_control.has_local_modifications(&layout.workspace_root)?;
    let version = version_string(&description, modified);

    let target = &layout.version_module;
    if let Some(parent) = target.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| BuildError::io(parent, e))?;
    }
    std::fs::write(target, render_version_module(&version))
        .map_err(|e| BuildError::io(target, e))?;

    info!(version = %version, module = %layout.display_path(target).display(), "Version stamped");

    Ok(TaskReport::finish(Task::StampVersion, started)
        .with_written(target.clone())
        .with_detail(version))
}
