//! Catalog merging: deterministic combination of JSON fragment directories.
//!
//! A directory of fragments is loaded into a [`FragmentSet`] ordered by file key, merged
//! into one document by [`merge_groups`] or [`merge_catalog`], and written compactly with
//! [`write_document`]. Order depends only on file names, never on directory listing order.

pub mod fragment;
pub mod merge;
pub mod output;

pub use fragment::{fragment_key, Fragment, FragmentSet};
pub use merge::{merge_catalog, merge_groups};
pub use output::{to_compact_string, write_document};
