//! CLI domain: parse, route, help, output, and presentation only.
//! No task logic; the route table dispatches to the task runner and watch daemon.

mod help;
mod output;
mod parse;
mod presentation;
mod route;

pub use help::command_name;
pub use output::map_error;
pub use parse::{Cli, Commands};
pub use presentation::{format_reports_json, format_reports_text, OutputFormat};
pub use route::RunContext;
