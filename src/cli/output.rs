//! CLI output: error mapping from domain errors to stable CLI surface.

use crate::error::{BuildError, CatalogError};

/// Map task errors to a string for CLI output.
pub fn map_error(e: &BuildError) -> String {
    match e {
        BuildError::Catalog(CatalogError::EmptyFragmentSet(dir)) => format!(
            "Error: {}\nAdd at least one .json fragment to {:?}.",
            e,
            dir
        ),
        _ => format!("Error: {}", e),
    }
}
