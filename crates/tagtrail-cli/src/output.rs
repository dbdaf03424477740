//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};
use tagtrail_capture::Evaluation;
use tagtrail_domain::{AttributionRecord, StoredEntry};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Selected output format.
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Format an attribution record.
    pub fn format_record(&self, record: &AttributionRecord) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(record.as_map())?),
            OutputFormat::Table => Ok(self.format_record_table(record)),
            OutputFormat::Quiet => Ok(format_record_quiet(record)),
        }
    }

    /// Format the outcome of a capture trigger, including the path it took.
    pub fn format_evaluation(&self, evaluation: &Evaluation) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let value = serde_json::json!({
                    "path": evaluation.path.as_str(),
                    "attribution": evaluation.record.as_map(),
                });
                Ok(serde_json::to_string_pretty(&value)?)
            }
            OutputFormat::Table => {
                let header = if evaluation.path.is_gated() {
                    self.warning(&format!("Capture bypassed ({})", evaluation.path))
                } else {
                    self.info(&format!("Attribution {}", evaluation.path))
                };
                Ok(format!("{}\n{}", header, self.format_record_table(&evaluation.record)))
            }
            OutputFormat::Quiet => Ok(format_record_quiet(&evaluation.record)),
        }
    }

    /// Format raw stored entries.
    pub fn format_entries(&self, entries: &[StoredEntry]) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let json_entries: Vec<serde_json::Value> = entries
                    .iter()
                    .map(|e| {
                        serde_json::json!({
                            "name": e.name,
                            "value": e.value,
                            "expires_at": e.expires_at.to_rfc3339(),
                        })
                    })
                    .collect();
                Ok(serde_json::to_string_pretty(&json_entries)?)
            }
            OutputFormat::Table => {
                if entries.is_empty() {
                    return Ok(self.colorize("No stored entries.", "yellow"));
                }

                let mut builder = Builder::default();
                builder.push_record(["Name", "Value", "Expires"]);
                for entry in entries {
                    let expires = entry.expires_at.format("%Y-%m-%d %H:%M:%S UTC").to_string();
                    builder.push_record([entry.name.as_str(), entry.value.as_str(), expires.as_str()]);
                }
                Ok(styled(builder))
            }
            OutputFormat::Quiet => Ok(entries
                .iter()
                .map(|e| format!("{}={}", e.name, e.value))
                .collect::<Vec<_>>()
                .join("\n")),
        }
    }

    /// Format `Set-Cookie` header values, one per line.
    pub fn format_set_cookies(&self, headers: &[String]) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(headers)?),
            OutputFormat::Table | OutputFormat::Quiet => Ok(headers
                .iter()
                .map(|h| format!("Set-Cookie: {}", h))
                .collect::<Vec<_>>()
                .join("\n")),
        }
    }

    fn format_record_table(&self, record: &AttributionRecord) -> String {
        if record.is_empty() {
            return self.colorize("No attribution captured.", "yellow");
        }

        let mut builder = Builder::default();
        builder.push_record(["Parameter", "Value"]);
        for (name, value) in record.iter() {
            builder.push_record([name, value]);
        }
        styled(builder)
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}

fn styled(builder: Builder) -> String {
    let mut table = builder.build();
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()));
    table.to_string()
}

fn format_record_quiet(record: &AttributionRecord) -> String {
    record
        .iter()
        .map(|(name, value)| format!("{}={}", name, value))
        .collect::<Vec<_>>()
        .join("\n")
}
