//! CLI help and command-name contract for logging and routing.

use crate::cli::parse::Commands;
use crate::tasks::Task;

/// Command name string as typed on the command line (e.g. "merge-catalog")
pub fn command_name(command: &Commands) -> &'static str {
    match command {
        Commands::Watch { .. } => "watch",
        Commands::Config => "config",
        _ => command_task(command).map(|task| task.name()).unwrap_or("unknown"),
    }
}

/// Task run by a command, for commands that map onto one
pub fn command_task(command: &Commands) -> Option<Task> {
    match command {
        Commands::MergeGroups { .. } => Some(Task::MergeGroups),
        Commands::MergeCatalog { .. } => Some(Task::MergeCatalog),
        Commands::MergeDatasources { .. } => Some(Task::MergeDatasources),
        Commands::PrepareTerriajs { .. } => Some(Task::PrepareTerriajs),
        Commands::StampVersion { .. } => Some(Task::StampVersion),
        Commands::Build { .. } => Some(Task::Build),
        Commands::Watch { .. } | Commands::Config => None,
    }
}

/// Requested output format of a task command
pub fn command_format(command: &Commands) -> Option<&str> {
    match command {
        Commands::MergeGroups { format }
        | Commands::MergeCatalog { format }
        | Commands::MergeDatasources { format }
        | Commands::PrepareTerriajs { format }
        | Commands::StampVersion { format }
        | Commands::Build { format } => Some(format.as_str()),
        Commands::Watch { .. } | Commands::Config => None,
    }
}
