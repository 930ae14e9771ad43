//! Error types for the catalog build tasks.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading or merging catalog fragments
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON in {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("No JSON fragments found in {0:?}")]
    EmptyFragmentSet(PathBuf),

    #[error("Fragment '{fragment}' is missing required field `{field}`")]
    MissingField { fragment: String, field: String },

    #[error("Fragment '{0}' is not a JSON object")]
    NotAnObject(String),

    #[error("Failed to serialize merged document: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Task-level errors surfaced to the CLI
#[derive(Debug, Error)]
pub enum BuildError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Directory not found: {0:?}")]
    MissingDirectory(PathBuf),

    #[error("Version control command failed: {0}")]
    VersionControl(String),

    #[error("Watch error: {0}")]
    Watch(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl BuildError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        BuildError::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<config::ConfigError> for BuildError {
    fn from(err: config::ConfigError) -> Self {
        BuildError::ConfigError(err.to_string())
    }
}

impl From<notify::Error> for BuildError {
    fn from(err: notify::Error) -> Self {
        BuildError::Watch(err.to_string())
    }
}
