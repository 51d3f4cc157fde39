//! Structured logging for mq-core.
//!
//! Two output modes share one set of events:
//! - human-readable console lines for interactive use
//! - JSONL for pipelines that collect evaluation runs
//!
//! ```ignore
//! use mq_core::logging::{init_logging, LogConfig, LogContext, Stage, event_names};
//!
//! init_logging(&LogConfig::from_env(None, None));
//! let ctx = LogContext::new(generate_run_id());
//! mq_core::log_event!(ctx, INFO, event_names::RUN_STARTED, Stage::Init, "starting");
//! ```
//!
//! stdout is reserved for command payloads. All logging goes to stderr.

pub mod config;
pub mod events;
pub mod layer;

pub use config::{LogConfig, LogFormat, LogLevel};
pub use events::{event_names, Level, LogContext, Stage};
pub use layer::JsonlLayer;

use std::io::IsTerminal;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Install the global subscriber. Later calls are no-ops.
///
/// A `RUST_LOG` that parses as a filter is used as is; otherwise the
/// resolved level applies to every target.
pub fn init_logging(config: &LogConfig) {
    // Targets are event names, not module paths.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.level.as_str()));
    let ansi = std::io::stderr().is_terminal();
    let registry = tracing_subscriber::registry().with(filter);

    let _ = match (config.format, config.timestamps) {
        (LogFormat::Jsonl, _) => registry.with(JsonlLayer::stderr()).try_init(),
        (LogFormat::Human, true) => registry
            .with(fmt::layer().with_writer(std::io::stderr).with_ansi(ansi))
            .try_init(),
        (LogFormat::Human, false) => registry
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_ansi(ansi)
                    .without_time(),
            )
            .try_init(),
    };
}

/// `run-` plus 12 hex digits, unique per invocation.
pub fn generate_run_id() -> String {
    let hex = uuid::Uuid::new_v4().simple().to_string();
    format!("run-{}", &hex[..12])
}

/// Emit a tracing event targeted at `$event` and stamped with the ids from
/// a [`LogContext`].
///
/// ```ignore
/// log_event!(ctx, INFO, "load.finished", Stage::Load, "loaded predictions",
///     samples = 1000u64);
/// ```
#[macro_export]
macro_rules! log_event {
    ($ctx:expr, $level:ident, $event:expr, $stage:expr, $msg:expr $(, $key:ident = $val:expr)*) => {
        tracing::event!(
            target: $event,
            tracing::Level::$level,
            run_id = %$ctx.run_id,
            report_id = $ctx.report_id.as_deref(),
            stage = %$stage,
            message = $msg,
            $($key = $val,)*
        )
    };
}
