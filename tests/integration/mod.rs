//! Integration tests for the datasource build tasks

mod build_tasks;
mod merge_catalog;
mod watch_rebuild;
