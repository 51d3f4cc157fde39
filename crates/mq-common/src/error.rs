//! Error types for model quality reporting.
//!
//! Two layers:
//! - [`InputError`]: a violated precondition of the prediction record. Each
//!   variant names the invariant, the offending field and the actual vs
//!   expected shape or value, so a learner sees at once which input is bad.
//! - [`Error`]: the workspace error with stable codes, categories and
//!   remediation hints for the CLI and machine output.
//!
//! # Agent-Facing Output
//!
//! Errors serialize to structured JSON:
//! ```json
//! {
//!   "code": 11,
//!   "category": "input",
//!   "message": "invalid input: y_score[3] = 1.2 is outside [0, 1]",
//!   "recoverable": true,
//!   "context": { "invariant": "score_domain", "field": "y_score", "index": 3 }
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

/// Result type alias for model quality operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Input sequence named in an [`InputError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    YTrue,
    YScore,
    YPred,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::YTrue => write!(f, "y_true"),
            Field::YScore => write!(f, "y_score"),
            Field::YPred => write!(f, "y_pred"),
        }
    }
}

/// A violated precondition of the prediction record.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InputError {
    #[error("y_true is empty: expected at least one sample")]
    Empty,

    #[error("{field} has {actual} entries, expected {expected} (the length of y_true)")]
    LengthMismatch {
        field: Field,
        expected: usize,
        actual: usize,
    },

    #[error("{field}[{index}] = {value} is not a binary label, expected 0 or 1")]
    LabelOutOfDomain {
        field: Field,
        index: usize,
        value: f64,
    },

    #[error("y_score[{index}] = {value} is outside [0, 1]")]
    ScoreOutOfDomain { index: usize, value: f64 },

    #[error("decision threshold {value} is outside [0, 1]")]
    ThresholdOutOfDomain { value: f64 },
}

/// Shape vs domain split of [`InputError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputErrorKind {
    Shape,
    Domain,
}

impl InputError {
    /// Stable name of the invariant that failed.
    pub fn invariant(&self) -> &'static str {
        match self {
            InputError::Empty => "non_empty",
            InputError::LengthMismatch { .. } => "equal_lengths",
            InputError::LabelOutOfDomain { .. } => "label_domain",
            InputError::ScoreOutOfDomain { .. } => "score_domain",
            InputError::ThresholdOutOfDomain { .. } => "threshold_domain",
        }
    }

    pub fn kind(&self) -> InputErrorKind {
        match self {
            InputError::Empty | InputError::LengthMismatch { .. } => InputErrorKind::Shape,
            InputError::LabelOutOfDomain { .. }
            | InputError::ScoreOutOfDomain { .. }
            | InputError::ThresholdOutOfDomain { .. } => InputErrorKind::Domain,
        }
    }

    /// The input sequence at fault, if the error is about one sequence.
    pub fn field(&self) -> Option<Field> {
        match self {
            InputError::Empty => Some(Field::YTrue),
            InputError::LengthMismatch { field, .. } => Some(*field),
            InputError::LabelOutOfDomain { field, .. } => Some(*field),
            InputError::ScoreOutOfDomain { .. } => Some(Field::YScore),
            InputError::ThresholdOutOfDomain { .. } => None,
        }
    }
}

/// Error categories for grouping related errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// Malformed prediction records or prediction files.
    Input,
    /// Configuration file errors.
    Config,
    /// Bundle packaging and integrity errors.
    Bundle,
    /// Plot and HTML rendering errors.
    Render,
    /// File I/O and serialization errors.
    Io,
    /// Bugs in mq itself.
    Internal,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorCategory::Input => write!(f, "input"),
            ErrorCategory::Config => write!(f, "config"),
            ErrorCategory::Bundle => write!(f, "bundle"),
            ErrorCategory::Render => write!(f, "render"),
            ErrorCategory::Io => write!(f, "io"),
            ErrorCategory::Internal => write!(f, "internal"),
        }
    }
}

/// Unified error type for model quality tooling.
#[derive(Error, Debug)]
pub enum Error {
    // Input errors (10-19)
    #[error("invalid input: {0}")]
    Input(#[from] InputError),

    #[error("failed to load predictions from {path}: {reason}")]
    Load { path: String, reason: String },

    // Configuration errors (20-29)
    #[error("configuration error: {0}")]
    Config(String),

    // Bundle errors (30-39)
    #[error("bundle error: {0}")]
    Bundle(String),

    #[error("bundle integrity check failed: {0}")]
    BundleIntegrity(String),

    // Render errors (40-49)
    #[error("render error: {0}")]
    Render(String),

    // Internal errors (50-59)
    #[error("internal error: {0}")]
    Internal(String),

    // I/O errors (60-69)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Returns the error code for this error type.
    ///
    /// Error codes are stable and grouped by category:
    /// - 10-19: Input errors
    /// - 20-29: Configuration errors
    /// - 30-39: Bundle errors
    /// - 40-49: Render errors
    /// - 50-59: Internal errors
    /// - 60-69: I/O errors
    pub fn code(&self) -> u32 {
        match self {
            Error::Input(e) => match e.kind() {
                InputErrorKind::Shape => 10,
                InputErrorKind::Domain => 11,
            },
            Error::Load { .. } => 12,
            Error::Config(_) => 20,
            Error::Bundle(_) => 30,
            Error::BundleIntegrity(_) => 31,
            Error::Render(_) => 40,
            Error::Internal(_) => 50,
            Error::Io(_) => 60,
            Error::Json(_) => 61,
        }
    }

    /// Returns the error category for grouping and filtering.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::Input(_) | Error::Load { .. } => ErrorCategory::Input,
            Error::Config(_) => ErrorCategory::Config,
            Error::Bundle(_) | Error::BundleIntegrity(_) => ErrorCategory::Bundle,
            Error::Render(_) => ErrorCategory::Render,
            Error::Internal(_) => ErrorCategory::Internal,
            Error::Io(_) | Error::Json(_) => ErrorCategory::Io,
        }
    }

    /// Returns whether fixing inputs or retrying can resolve the error.
    pub fn is_recoverable(&self) -> bool {
        match self {
            Error::Input(_) => true,
            Error::Load { .. } => true,
            Error::Config(_) => true,
            Error::Bundle(_) => true,
            // A tampered or truncated bundle stays broken.
            Error::BundleIntegrity(_) => false,
            Error::Render(_) | Error::Internal(_) => false,
            Error::Io(_) => true,
            Error::Json(_) => true,
        }
    }

    /// Returns a human-readable remediation hint.
    pub fn remediation(&self) -> &'static str {
        match self {
            Error::Input(e) => match e {
                InputError::Empty => "Provide at least one labelled prediction.",
                InputError::LengthMismatch { .. } => {
                    "y_true, y_score and y_pred must be positionally aligned; check for dropped or duplicated rows."
                }
                InputError::LabelOutOfDomain { .. } => {
                    "Labels must be exactly 0 or 1. Map class names to 0/1 before evaluating."
                }
                InputError::ScoreOutOfDomain { .. } => {
                    "Scores must be positive-class probabilities in [0, 1]. Apply a sigmoid/softmax to raw margins."
                }
                InputError::ThresholdOutOfDomain { .. } => {
                    "Pass a decision threshold between 0 and 1, or omit it to search for the F1-maximizing threshold."
                }
            },
            Error::Load { .. } => {
                "Check the file format (json/csv) and column names with 'mq-core evaluate --help'."
            }
            Error::Config(_) => {
                "Run 'mq-core config validate' and check the TOML syntax of the config file."
            }
            Error::Bundle(_) => "Check the output path is writable and the bundle is a .mqb archive.",
            Error::BundleIntegrity(_) => {
                "The bundle was modified or truncated after writing. Regenerate it from the source predictions."
            }
            Error::Render(_) => "Report this as a bug with the report JSON attached.",
            Error::Internal(_) => "Report this as a bug with the prediction files and the command line used.",
            Error::Io(_) => "Check that paths exist, disk space, and permissions. Retry the operation.",
            Error::Json(_) => "Invalid JSON document. Check syntax with 'jq . <file>'.",
        }
    }

    /// Returns a short headline for human-readable output.
    pub fn headline(&self) -> &'static str {
        match self {
            Error::Input(_) => "Invalid Prediction Input",
            Error::Load { .. } => "Prediction File Error",
            Error::Config(_) => "Configuration Error",
            Error::Bundle(_) => "Bundle Error",
            Error::BundleIntegrity(_) => "Bundle Integrity Failure",
            Error::Render(_) => "Render Error",
            Error::Internal(_) => "Internal Error",
            Error::Io(_) => "I/O Error",
            Error::Json(_) => "JSON Parse Error",
        }
    }
}

/// Structured error response for JSON output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructuredError {
    /// Stable error code.
    pub code: u32,

    /// Error category for grouping.
    pub category: ErrorCategory,

    /// Human-readable error message.
    pub message: String,

    /// Whether the error is potentially recoverable.
    pub recoverable: bool,

    /// Remediation hint.
    pub remediation: String,

    /// Additional structured context (e.g., invariant, field, index).
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub context: HashMap<String, serde_json::Value>,
}

impl From<&Error> for StructuredError {
    fn from(err: &Error) -> Self {
        let mut context = HashMap::new();

        match err {
            Error::Input(input) => {
                context.insert("invariant".to_string(), serde_json::json!(input.invariant()));
                if let Some(field) = input.field() {
                    context.insert("field".to_string(), serde_json::json!(field));
                }
                match input {
                    InputError::LengthMismatch {
                        expected, actual, ..
                    } => {
                        context.insert("expected".to_string(), serde_json::json!(expected));
                        context.insert("actual".to_string(), serde_json::json!(actual));
                    }
                    InputError::LabelOutOfDomain { index, value, .. }
                    | InputError::ScoreOutOfDomain { index, value } => {
                        context.insert("index".to_string(), serde_json::json!(index));
                        context.insert("value".to_string(), serde_json::json!(value));
                    }
                    InputError::ThresholdOutOfDomain { value } => {
                        context.insert("value".to_string(), serde_json::json!(value));
                    }
                    InputError::Empty => {}
                }
            }
            Error::Load { path, .. } => {
                context.insert("path".to_string(), serde_json::json!(path));
            }
            _ => {}
        }

        StructuredError {
            code: err.code(),
            category: err.category(),
            message: err.to_string(),
            recoverable: err.is_recoverable(),
            remediation: err.remediation().to_string(),
            context,
        }
    }
}

impl StructuredError {
    /// Add additional context to the error.
    pub fn with_context(mut self, key: impl Into<String>, value: impl Serialize) -> Self {
        if let Ok(v) = serde_json::to_value(value) {
            self.context.insert(key.into(), v);
        }
        self
    }

    /// Serialize to JSON string.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| {
            format!(r#"{{"code":{},"error":"serialization_failed"}}"#, self.code)
        })
    }

    /// Serialize to pretty JSON string.
    pub fn to_json_pretty(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| self.to_json())
    }

    /// Human-facing rendering: headline, reason and fix.
    pub fn to_human(&self, headline: &str) -> String {
        format!(
            "✗ {}\n  Reason: {}\n  Fix: {}",
            headline, self.message, self.remediation
        )
    }
}
