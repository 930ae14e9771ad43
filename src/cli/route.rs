//! CLI route: single route table and run context. Dispatches to tasks and presentation.

use crate::cli::help::{command_format, command_name, command_task};
use crate::cli::parse::Commands;
use crate::cli::presentation::{format_reports_json, format_reports_text, OutputFormat};
use crate::config::{ConfigLoader, NmbuildConfig};
use crate::error::BuildError;
use crate::tasks::TaskRunner;
use crate::watch::{WatchConfig, WatchDaemon};
use std::path::{Path, PathBuf};
use tracing::info_span;

/// Runtime context for CLI execution: workspace, effective config and the task runner.
pub struct RunContext {
    workspace_root: PathBuf,
    config: NmbuildConfig,
}

impl RunContext {
    /// Create run context from workspace root and optional config path. Uses ConfigLoader only.
    pub fn new(workspace_root: PathBuf, config_path: Option<PathBuf>) -> Result<Self, BuildError> {
        if !workspace_root.is_dir() {
            return Err(BuildError::MissingDirectory(workspace_root));
        }

        let config = match config_path {
            Some(ref cfg_path) => ConfigLoader::load_from_file(cfg_path)?,
            None => ConfigLoader::load(&workspace_root)?,
        };
        config.ensure_valid()?;

        Ok(Self {
            workspace_root,
            config,
        })
    }

    /// Build a context from an already loaded configuration
    pub fn with_config(workspace_root: PathBuf, config: NmbuildConfig) -> Result<Self, BuildError> {
        config.ensure_valid()?;
        Ok(Self {
            workspace_root,
            config,
        })
    }

    pub fn workspace_root(&self) -> &Path {
        &self.workspace_root
    }

    pub fn config(&self) -> &NmbuildConfig {
        &self.config
    }

    /// Task runner over this workspace's resolved layout
    pub fn task_runner(&self) -> TaskRunner {
        TaskRunner::new(self.config.layout.resolve(&self.workspace_root))
    }

    /// Execute a command, returning the text to print on stdout
    pub fn execute(&self, command: &Commands) -> Result<String, BuildError> {
        let _span = info_span!("command", name = command_name(command)).entered();

        if let Some(task) = command_task(command) {
            let format = OutputFormat::parse(command_format(command).unwrap_or("text"))?;
            let runner = self.task_runner();
            let reports = runner.run(task)?;
            return match format {
                OutputFormat::Text => Ok(format_reports_text(&reports, runner.layout())),
                OutputFormat::Json => format_reports_json(&reports),
            };
        }

        match command {
            Commands::Watch { debounce_ms } => {
                let debounce_ms = debounce_ms.unwrap_or(self.config.watch.debounce_ms);
                if debounce_ms == 0 {
                    return Err(BuildError::ConfigError(
                        "--debounce-ms must be greater than 0".to_string(),
                    ));
                }
                let config = WatchConfig { debounce_ms };
                let daemon = WatchDaemon::new(self.task_runner(), config);
                daemon.start()?;
                Ok("Watch stopped".to_string())
            }
            Commands::Config => self.config.to_toml(),
            _ => Err(BuildError::ConfigError(format!(
                "Command {} has no route",
                command_name(command)
            ))),
        }
    }
}
