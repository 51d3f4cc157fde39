//! Exit codes for the mq-core CLI.
//!
//! Exit code ranges:
//! - 0-1: operational outcomes (the run finished)
//! - 10-19: user/environment errors (recoverable by user action)
//! - 20-29: internal errors

use mq_common::{Error, ErrorCategory};

/// Exit codes for mq-core operations.
///
/// These codes are a stable contract for automation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    // ========================================================================
    // Operational Outcomes (0-1)
    // ========================================================================
    /// Report produced with defined AUCs.
    Clean = 0,

    /// Report produced, but ground truth holds a single class.
    Degenerate = 1,

    // ========================================================================
    // User / Environment Errors (10-19)
    // ========================================================================
    /// Invalid arguments
    ArgsError = 10,

    /// Predictions failed validation or could not be parsed
    InputError = 11,

    /// Configuration file missing or invalid
    ConfigError = 12,

    /// Bundle checksum or manifest mismatch
    BundleIntegrity = 13,

    // ========================================================================
    // Internal Errors (20-29)
    // ========================================================================
    /// Internal error (bug - please report)
    InternalError = 20,

    /// I/O error
    IoError = 21,
}

impl ExitCode {
    /// Convert to i32 for process exit.
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// True for codes that describe a finished run.
    pub fn is_operational(self) -> bool {
        (self as i32) < 10
    }

    /// User/environment errors (codes 10-19).
    pub fn is_user_error(self) -> bool {
        (10..20).contains(&(self as i32))
    }

    /// Internal errors (codes 20-29).
    pub fn is_internal_error(self) -> bool {
        (self as i32) >= 20
    }

    /// Get the code name as a string constant (for JSON output).
    pub fn code_name(&self) -> &'static str {
        match self {
            ExitCode::Clean => "OK_CLEAN",
            ExitCode::Degenerate => "OK_DEGENERATE",
            ExitCode::ArgsError => "ERR_ARGS",
            ExitCode::InputError => "ERR_INPUT",
            ExitCode::ConfigError => "ERR_CONFIG",
            ExitCode::BundleIntegrity => "ERR_BUNDLE_INTEGRITY",
            ExitCode::InternalError => "ERR_INTERNAL",
            ExitCode::IoError => "ERR_IO",
        }
    }
}

impl From<&Error> for ExitCode {
    fn from(err: &Error) -> Self {
        match err {
            Error::BundleIntegrity(_) => ExitCode::BundleIntegrity,
            Error::Render(_) | Error::Internal(_) => ExitCode::InternalError,
            _ => match err.category() {
                ErrorCategory::Input => ExitCode::InputError,
                ErrorCategory::Config => ExitCode::ConfigError,
                ErrorCategory::Bundle => ExitCode::InputError,
                ErrorCategory::Render | ErrorCategory::Internal => ExitCode::InternalError,
                ErrorCategory::Io => ExitCode::IoError,
            },
        }
    }
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code as i32
    }
}

impl std::fmt::Display for ExitCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.code_name(), self.as_i32())
    }
}
