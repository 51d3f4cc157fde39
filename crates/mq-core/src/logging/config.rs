//! Logging configuration.
//!
//! Sources, lowest to highest priority:
//! - `RUST_LOG` (only its most verbose level is used here; the filter itself
//!   is still built from it in [`super::init_logging`])
//! - `MQ_LOG`, `MQ_LOG_FORMAT`, `MQ_LOG_TIMESTAMPS`
//! - CLI flags (`-v`/`-vv`, `-q`, `--log-format`)
//!
//! Evaluation runs are usually scripted, so the default is quiet: warnings
//! on stderr, no timestamps.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing_subscriber::filter::LevelFilter;

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Console lines for people
    #[default]
    Human,
    /// One JSON object per line, for pipelines collecting evaluation runs
    Jsonl,
}

impl LogFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            LogFormat::Human => "human",
            LogFormat::Jsonl => "jsonl",
        }
    }
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "human" | "text" | "pretty" => Ok(LogFormat::Human),
            "jsonl" | "json" => Ok(LogFormat::Jsonl),
            other => Err(format!("unknown log format '{other}' (expected human or jsonl)")),
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Log level, ordered from most to least verbose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    #[default]
    Warn,
    Error,
    Off,
}

impl LogLevel {
    const NAMES: [(LogLevel, &'static str); 6] = [
        (LogLevel::Trace, "trace"),
        (LogLevel::Debug, "debug"),
        (LogLevel::Info, "info"),
        (LogLevel::Warn, "warn"),
        (LogLevel::Error, "error"),
        (LogLevel::Off, "off"),
    ];

    pub fn as_str(self) -> &'static str {
        Self::NAMES
            .iter()
            .find(|(level, _)| *level == self)
            .map_or("warn", |(_, name)| name)
    }

    /// Level for `-v` repeated `verbose` times, or `-q`.
    ///
    /// `-v` shows per-stage events (debug), `-vv` everything. `None` leaves
    /// the environment in charge.
    pub fn from_verbosity(verbose: u8, quiet: bool) -> Option<Self> {
        match (quiet, verbose) {
            (true, _) => Some(LogLevel::Error),
            (false, 0) => None,
            (false, 1) => Some(LogLevel::Debug),
            (false, _) => Some(LogLevel::Trace),
        }
    }

    /// Most verbose level named anywhere in a `RUST_LOG` directive string.
    fn most_verbose_in(directives: &str) -> Option<Self> {
        directives
            .split(',')
            .filter_map(|d| d.rsplit('=').next())
            .filter_map(|name| name.parse::<LogLevel>().ok())
            .min()
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_ascii_lowercase();
        let s = match s.as_str() {
            "warning" => "warn",
            "none" | "quiet" => "off",
            other => other,
        };
        Self::NAMES
            .iter()
            .find(|(_, name)| *name == s)
            .map(|(level, _)| *level)
            .ok_or_else(|| format!("unknown log level '{s}'"))
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => LevelFilter::TRACE,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Error => LevelFilter::ERROR,
            LogLevel::Off => LevelFilter::OFF,
        }
    }
}

/// Resolved logging settings.
#[derive(Debug, Clone, Default)]
pub struct LogConfig {
    pub format: LogFormat,
    pub level: LogLevel,
    /// Prefix human lines with a timestamp. JSONL always carries `ts`.
    pub timestamps: bool,
}

impl LogConfig {
    /// Resolve from the process environment plus CLI overrides.
    pub fn from_env(cli_level: Option<LogLevel>, cli_format: Option<LogFormat>) -> Self {
        Self::from_lookup(|key| std::env::var(key).ok(), cli_level, cli_format)
    }

    /// [`LogConfig::from_env`] with an injectable variable lookup.
    ///
    /// Unparseable values are ignored rather than failing the run.
    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
        cli_level: Option<LogLevel>,
        cli_format: Option<LogFormat>,
    ) -> Self {
        let env_level = match lookup("MQ_LOG") {
            Some(val) => val.parse().ok(),
            None => lookup("RUST_LOG").and_then(|val| LogLevel::most_verbose_in(&val)),
        };
        let env_format = lookup("MQ_LOG_FORMAT").and_then(|val| val.parse().ok());
        let timestamps = lookup("MQ_LOG_TIMESTAMPS")
            .is_some_and(|val| matches!(val.trim(), "1" | "true" | "yes"));

        LogConfig {
            format: cli_format.or(env_format).unwrap_or_default(),
            level: cli_level.or(env_level).unwrap_or_default(),
            timestamps,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn format_names() {
        assert_eq!("JSONL".parse::<LogFormat>().unwrap(), LogFormat::Jsonl);
        assert_eq!("text".parse::<LogFormat>().unwrap(), LogFormat::Human);
        assert!("xml".parse::<LogFormat>().is_err());
        assert_eq!(LogFormat::Jsonl.to_string(), "jsonl");
    }

    #[test]
    fn level_names_round_trip() {
        for (level, name) in LogLevel::NAMES {
            assert_eq!(level.to_string(), name);
            assert_eq!(name.parse::<LogLevel>().unwrap(), level);
        }
        assert_eq!("Warning".parse::<LogLevel>().unwrap(), LogLevel::Warn);
        assert_eq!("quiet".parse::<LogLevel>().unwrap(), LogLevel::Off);
    }

    #[test]
    fn verbosity_ladder() {
        assert_eq!(LogLevel::from_verbosity(0, false), None);
        assert_eq!(LogLevel::from_verbosity(1, false), Some(LogLevel::Debug));
        assert_eq!(LogLevel::from_verbosity(3, false), Some(LogLevel::Trace));
        assert_eq!(LogLevel::from_verbosity(2, true), Some(LogLevel::Error));
    }

    #[test]
    fn quiet_by_default() {
        let config = LogConfig::from_lookup(lookup(&[]), None, None);
        assert_eq!(config.level, LogLevel::Warn);
        assert_eq!(config.format, LogFormat::Human);
        assert!(!config.timestamps);
    }

    #[test]
    fn rust_log_directives() {
        let config =
            LogConfig::from_lookup(lookup(&[("RUST_LOG", "warn,evaluate.finished=debug")]), None, None);
        assert_eq!(config.level, LogLevel::Debug);

        // MQ_LOG wins over RUST_LOG
        let config = LogConfig::from_lookup(
            lookup(&[("MQ_LOG", "error"), ("RUST_LOG", "trace")]),
            None,
            None,
        );
        assert_eq!(config.level, LogLevel::Error);
    }

    #[test]
    fn cli_overrides_env() {
        let config = LogConfig::from_lookup(
            lookup(&[("MQ_LOG", "debug"), ("MQ_LOG_FORMAT", "jsonl"), ("MQ_LOG_TIMESTAMPS", "1")]),
            Some(LogLevel::Error),
            Some(LogFormat::Human),
        );
        assert_eq!(config.level, LogLevel::Error);
        assert_eq!(config.format, LogFormat::Human);
        assert!(config.timestamps);
    }
}
