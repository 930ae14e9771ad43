//! Config loading facade: the single entry point used by the CLI and tests.

use super::merge::merge_policy;
use super::sources::{environment, global_file, workspace_file};
use super::NmbuildConfig;
use config::{ConfigError, File};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Loads [`NmbuildConfig`] from the layered sources.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration for a workspace.
    ///
    /// Precedence (lowest to highest): built-in defaults, user config file,
    /// workspace `nmbuild.toml`, workspace `nmbuild.{NMBUILD_ENV}.toml`,
    /// `NMBUILD__*` environment variables.
    pub fn load(workspace_root: &Path) -> Result<NmbuildConfig, ConfigError> {
        let builder = merge_policy::builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder)?;
        let builder = workspace_file::add_to_builder(builder, workspace_root)?;
        let builder = environment::add_to_builder(builder);

        let config: NmbuildConfig = builder.build()?.try_deserialize()?;
        debug!(workspace = %workspace_root.display(), "Configuration loaded");
        Ok(config)
    }

    /// Load configuration from an explicit file. User and workspace files are
    /// skipped; defaults and environment overrides still apply.
    pub fn load_from_file(path: &Path) -> Result<NmbuildConfig, ConfigError> {
        if !path.is_file() {
            return Err(ConfigError::NotFound(path.display().to_string()));
        }

        let builder = merge_policy::builder_with_defaults()?
            .add_source(File::from(path).required(true));
        let builder = environment::add_to_builder(builder);

        let config: NmbuildConfig = builder.build()?.try_deserialize()?;
        debug!(config_path = %path.display(), "Configuration loaded from file");
        Ok(config)
    }

    /// Path of the user-level config file, if one can be resolved.
    pub fn user_config_path() -> Option<PathBuf> {
        global_file::global_config_path()
    }
}
