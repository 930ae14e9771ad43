//! Configuration System
//!
//! Layered configuration for the build tasks: built-in defaults, an optional user file,
//! optional workspace files and `NMBUILD__*` environment overrides.

use crate::error::BuildError;
use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};

mod facade;
mod layout;
mod merge;
mod sources;

pub use facade::ConfigLoader;
pub use layout::{Layout, LayoutConfig};
pub use sources::workspace_file::WORKSPACE_CONFIG_FILE;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NmbuildConfig {
    /// Fragment and output locations
    #[serde(default)]
    pub layout: LayoutConfig,

    /// Watch mode settings
    #[serde(default)]
    pub watch: WatchSettings,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Watch mode settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatchSettings {
    /// Quiet period after the last relevant change before a rebuild runs
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

fn default_debounce_ms() -> u64 {
    100
}

impl Default for WatchSettings {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
        }
    }
}

/// Configuration validation errors
#[derive(Debug, Clone)]
pub enum ValidationError {
    Layout(String),
    Watch(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Layout(msg) => write!(f, "Layout: {}", msg),
            ValidationError::Watch(msg) => write!(f, "Watch: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

impl NmbuildConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if let Err(e) = self.layout.validate() {
            errors.push(ValidationError::Layout(e));
        }

        if self.watch.debounce_ms == 0 {
            errors.push(ValidationError::Watch(
                "debounce_ms must be greater than zero".to_string(),
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Validate and convert failures into a single [`BuildError`]
    pub fn ensure_valid(&self) -> Result<(), BuildError> {
        self.validate().map_err(|errors| {
            let error_msgs: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            BuildError::ConfigError(format!(
                "Configuration validation failed:\n{}",
                error_msgs.join("\n")
            ))
        })
    }

    /// Render the effective configuration as TOML
    pub fn to_toml(&self) -> Result<String, BuildError> {
        toml::to_string_pretty(self).map_err(|e| BuildError::ConfigError(e.to_string()))
    }
}
