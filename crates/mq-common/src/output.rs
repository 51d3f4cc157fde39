//! `--format` values shared by every subcommand.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Supported output formats for CLI commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Full classification report as JSON
    #[default]
    Json,

    /// Human-readable text report (classes, threshold, per-class table)
    Md,

    /// One-line summary for quick status checks
    Summary,

    /// Model-monitor style metrics document
    Monitor,

    /// Minimal output (exit code only)
    Exitcode,
}

impl OutputFormat {
    /// Name as accepted by `--format`.
    pub fn as_str(self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Md => "md",
            OutputFormat::Summary => "summary",
            OutputFormat::Monitor => "monitor",
            OutputFormat::Exitcode => "exitcode",
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
