//! Event vocabulary shared by the human and JSONL outputs.
//!
//! The event name doubles as the tracing target, so `RUST_LOG=evaluate=debug`
//! style filters select a whole stage.

use serde::{Deserialize, Serialize};

/// Severity as written in the JSONL `level` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl From<tracing::Level> for Level {
    fn from(level: tracing::Level) -> Self {
        if level == tracing::Level::ERROR {
            Level::Error
        } else if level == tracing::Level::WARN {
            Level::Warn
        } else if level == tracing::Level::INFO {
            Level::Info
        } else if level == tracing::Level::DEBUG {
            Level::Debug
        } else {
            Level::Trace
        }
    }
}

/// Where in an invocation an event was emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Init,
    /// Prediction files or saved reports being read.
    Load,
    Evaluate,
    /// SVG, HTML and ASCII output.
    Render,
    Bundle,
    /// Ranking several reports.
    Compare,
}

impl Stage {
    pub fn as_str(self) -> &'static str {
        match self {
            Stage::Init => "init",
            Stage::Load => "load",
            Stage::Evaluate => "evaluate",
            Stage::Render => "render",
            Stage::Bundle => "bundle",
            Stage::Compare => "compare",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Event names, `<stage>.<what>`.
pub mod event_names {
    pub const RUN_STARTED: &str = "run.started";
    pub const RUN_FINISHED: &str = "run.finished";

    pub const LOAD_STARTED: &str = "load.started";
    pub const LOAD_FINISHED: &str = "load.finished";

    pub const EVALUATE_FINISHED: &str = "evaluate.finished";
    /// Ground truth had a single class; AUCs are undefined.
    pub const EVALUATE_DEGENERATE: &str = "evaluate.degenerate";

    pub const RENDER_WROTE: &str = "render.wrote";

    pub const BUNDLE_WRITTEN: &str = "bundle.written";
    pub const BUNDLE_VERIFIED: &str = "bundle.verified";

    pub const COMPARE_RANKED: &str = "compare.ranked";

    pub const INTERNAL_ERROR: &str = "internal_error";
}

/// Correlation ids stamped onto every event by [`crate::log_event!`].
///
/// `report_id` is unset until an evaluation has produced a report (or a
/// bundle has been opened).
#[derive(Debug, Clone)]
pub struct LogContext {
    pub run_id: String,
    pub report_id: Option<String>,
}

impl LogContext {
    pub fn new(run_id: impl Into<String>) -> Self {
        LogContext {
            run_id: run_id.into(),
            report_id: None,
        }
    }

    pub fn with_report_id(mut self, report_id: impl Into<String>) -> Self {
        self.report_id = Some(report_id.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_serializes_lowercase() {
        let level: Level = tracing::Level::WARN.into();
        assert_eq!(serde_json::to_string(&level).unwrap(), r#""warn""#);
        assert_eq!(Level::from(tracing::Level::TRACE), Level::Trace);
    }

    #[test]
    fn report_id_attached_later() {
        let ctx = LogContext::new("run-abc");
        assert!(ctx.report_id.is_none());
        let ctx = ctx.with_report_id("mq-20260115-143022-b2c3");
        assert_eq!(ctx.run_id, "run-abc");
        assert_eq!(ctx.report_id.as_deref(), Some("mq-20260115-143022-b2c3"));
    }

    #[test]
    fn event_names_start_with_stage() {
        for (name, stage) in [
            (event_names::LOAD_FINISHED, Stage::Load),
            (event_names::EVALUATE_DEGENERATE, Stage::Evaluate),
            (event_names::RENDER_WROTE, Stage::Render),
            (event_names::BUNDLE_VERIFIED, Stage::Bundle),
            (event_names::COMPARE_RANKED, Stage::Compare),
        ] {
            assert!(name.starts_with(stage.as_str()), "{name} vs {stage}");
        }
    }
}
