//! nmbuild: Datasource Catalog Build Tasks
//!
//! Deterministic merging of JSON datasource fragments into the catalog consumed by the
//! map application at runtime, plus the supporting build tasks around it: framework asset
//! preparation, build version stamping and a watch mode for incremental rebuilds.

pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod tasks;
pub mod watch;
