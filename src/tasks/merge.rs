//! merge-groups and merge-catalog task steps

use super::{Task, TaskReport};
use crate::catalog::{self, FragmentSet};
use crate::config::Layout;
use crate::error::BuildError;
use std::time::Instant;
use tracing::{debug, info};

/// Merge the group fragments into the group document
pub fn run_merge_groups(layout: &Layout) -> Result<TaskReport, BuildError> {
    let started = Instant::now();

    let set = FragmentSet::load(&layout.groups_dir)?;
    let count = set.len();
    debug!(order = ?set.keys().collect::<Vec<_>>(), "Merging group fragments");

    let document = catalog::merge_groups(set)?;
    let bytes = catalog::write_document(&layout.group_output, &document)?;

    info!(
        fragments = count,
        bytes,
        output = %layout.display_path(&layout.group_output).display(),
        "Group document written"
    );

    Ok(TaskReport::finish(Task::MergeGroups, started)
        .with_fragments(count)
        .with_written(layout.group_output.clone()))
}

/// Merge the top-level fragments, including the group document, into the catalog.
///
/// Callers are expected to have run [`run_merge_groups`] first.
pub fn run_merge_catalog(layout: &Layout) -> Result<TaskReport, BuildError> {
    let started = Instant::now();

    let set = FragmentSet::load(&layout.datasources_dir)?;
    let count = set.len();
    debug!(order = ?set.keys().collect::<Vec<_>>(), "Merging catalog fragments");

    let document = catalog::merge_catalog(set)?;
    let bytes = catalog::write_document(&layout.catalog_output, &document)?;

    info!(
        fragments = count,
        bytes,
        output = %layout.display_path(&layout.catalog_output).display(),
        "Catalog document written"
    );

    Ok(TaskReport::finish(Task::MergeCatalog, started)
        .with_fragments(count)
        .with_written(layout.catalog_output.clone()))
}
