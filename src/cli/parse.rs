//! CLI parse: clap types for nmbuild. No behavior; definitions only.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// nmbuild - data-catalog build tasks for the map application
#[derive(Parser)]
#[command(name = "nmbuild")]
#[command(about = "Merge datasource fragments into the map catalog and prepare build assets")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Workspace root directory
    #[arg(long, global = true, default_value = ".")]
    pub workspace: PathBuf,

    /// Configuration file path (overrides user and workspace config files)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Disable logging entirely
    #[arg(long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long, global = true)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file)
    #[arg(long, global = true)]
    pub log_output: Option<String>,

    /// Log file path (if output is "file")
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Merge the group fragments into the group document
    MergeGroups {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Merge the group fragments, then the top-level fragments into the catalog
    MergeCatalog {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Run both datasource merges
    MergeDatasources {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Mirror the map framework's static assets into the build directory
    PrepareTerriajs {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Write the version module from `git describe`
    StampVersion {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Run every data task: assets, version stamp, datasource merges
    Build {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Watch datasource fragments and rebuild the catalog on change
    Watch {
        /// Debounce window in milliseconds (defaults to the configured value)
        #[arg(long)]
        debounce_ms: Option<u64>,
    },
    /// Print the effective configuration as TOML
    Config,
}
