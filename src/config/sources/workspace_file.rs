//! Workspace config file source: nmbuild.toml and nmbuild.{env}.toml at the workspace root

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::File;
use std::path::Path;

pub const WORKSPACE_CONFIG_FILE: &str = "nmbuild.toml";

/// Add workspace config files to builder.
/// Precedence: nmbuild.toml (base) then nmbuild.{NMBUILD_ENV}.toml when NMBUILD_ENV is set.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
    workspace_root: &Path,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let mut builder = builder;

    let base_config_path = workspace_root.join(WORKSPACE_CONFIG_FILE);
    if base_config_path.is_file() {
        builder = builder.add_source(File::from(base_config_path.as_path()).required(false));
    }

    if let Ok(env_name) = std::env::var("NMBUILD_ENV") {
        let env_config_path = workspace_root.join(format!("nmbuild.{}.toml", env_name));
        if env_config_path.is_file() {
            builder = builder.add_source(File::from(env_config_path.as_path()).required(false));
        }
    }

    Ok(builder)
}
