//! prepare-terriajs: mirror the framework's static assets into the build directory

use super::{Task, TaskReport};
use crate::config::Layout;
use crate::error::BuildError;
use std::fs;
use std::path::Path;
use std::time::Instant;
use tracing::info;
use walkdir::WalkDir;

pub fn run_prepare_assets(layout: &Layout) -> Result<TaskReport, BuildError> {
    let started = Instant::now();
    let source = &layout.framework_assets_source;
    let dest = &layout.framework_assets_dest;

    if !source.is_dir() {
        return Err(BuildError::MissingDirectory(source.clone()));
    }

    let copied = copy_tree(source, dest)?;

    info!(
        files = copied,
        source = %layout.display_path(source).display(),
        dest = %layout.display_path(dest).display(),
        "Framework assets prepared"
    );

    Ok(TaskReport::finish(Task::PrepareTerriajs, started)
        .with_written(dest.clone())
        .with_detail(format!("{} files copied", copied)))
}

/// Copy every file under `source` to the same relative path under `dest`, overwriting
/// existing files. Returns the number of files copied.
pub fn copy_tree(source: &Path, dest: &Path) -> Result<usize, BuildError> {
    fs::create_dir_all(dest).map_err(|e| BuildError::io(dest, e))?;

    let mut copied = 0;
    for entry in WalkDir::new(source).follow_links(true).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(source).to_path_buf();
            BuildError::io(path, e.into())
        })?;

        let relative = match entry.path().strip_prefix(source) {
            Ok(relative) if !relative.as_os_str().is_empty() => relative,
            _ => continue,
        };
        let target = dest.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target).map_err(|e| BuildError::io(&target, e))?;
        } else if entry.file_type().is_file() {
            fs::copy(entry.path(), &target).map_err(|e| BuildError::io(entry.path(), e))?;
            copied += 1;
        }
    }

    Ok(copied)
}
