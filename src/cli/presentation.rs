//! CLI presentation: render task reports as text or JSON.

use crate::config::Layout;
use crate::error::BuildError;
use crate::tasks::TaskReport;
use serde_json::json;

/// Output format of task commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn parse(value: &str) -> Result<Self, BuildError> {
        match value {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(BuildError::ConfigError(format!(
                "Invalid output format: {} (must be 'text' or 'json')",
                other
            ))),
        }
    }
}

/// One line per executed step, e.g. `merge-groups: 3 fragments -> datasources/x.json (2 ms)`
pub fn format_reports_text(reports: &[TaskReport], layout: &Layout) -> String {
    reports
        .iter()
        .map(|report| {
            let mut line = format!("{}:", report.task);
            if let Some(count) = report.fragments {
                let noun = if count == 1 { "fragment" } else { "fragments" };
                line.push_str(&format!(" {} {}", count, noun));
            }
            if let Some(detail) = &report.detail {
                line.push_str(&format!(" {}", detail));
            }
            for path in &report.written {
                line.push_str(&format!(" -> {}", layout.display_path(path).display()));
            }
            line.push_str(&format!(" ({} ms)", report.elapsed_ms));
            line
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn format_reports_json(reports: &[TaskReport]) -> Result<String, BuildError> {
    serde_json::to_string_pretty(&json!({ "tasks": reports }))
        .map_err(|e| BuildError::ConfigError(format!("Failed to render report: {}", e)))
}
