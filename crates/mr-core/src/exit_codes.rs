//! Exit codes for the mr-core CLI.
//!
//! Exit code ranges:
//! - 0: success
//! - 10-19: user/environment errors (recoverable by user action)
//! - 20-29: internal and output errors

use crate::config::ConfigError;
use mr_report::ReportError;

/// Exit codes for mr-core operations.
///
/// Stable contract for automation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Command completed.
    Clean = 0,

    /// Invalid arguments or unreadable result payload.
    ArgsError = 10,

    /// No classification result was supplied.
    NoResult = 11,

    /// The visualization region had nothing to capture.
    CaptureUnavailable = 12,

    /// Configuration file missing, malformed or invalid.
    ConfigError = 13,

    /// Internal error (bug - please report).
    InternalError = 20,

    /// I/O error.
    IoError = 21,

    /// The document could not be serialized.
    ExportFailed = 22,
}

impl ExitCode {
    /// Convert to i32 for process exit.
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    pub fn is_success(self) -> bool {
        self == ExitCode::Clean
    }

    /// Codes 10-19.
    pub fn is_user_error(self) -> bool {
        (10..20).contains(&(self as i32))
    }

    /// Codes 20-29.
    pub fn is_internal_error(self) -> bool {
        (self as i32) >= 20
    }

    /// Error code name for JSON output.
    pub fn code_name(&self) -> &'static str {
        match self {
            ExitCode::Clean => "OK_CLEAN",
            ExitCode::ArgsError => "ERR_ARGS",
            ExitCode::NoResult => "ERR_NO_RESULT",
            ExitCode::CaptureUnavailable => "ERR_CAPTURE_UNAVAILABLE",
            ExitCode::ConfigError => "ERR_CONFIG",
            ExitCode::InternalError => "ERR_INTERNAL",
            ExitCode::IoError => "ERR_IO",
            ExitCode::ExportFailed => "ERR_EXPORT_FAILED",
        }
    }
}

impl From<&ReportError> for ExitCode {
    fn from(err: &ReportError) -> Self {
        match err {
            ReportError::NoResultAvailable => ExitCode::NoResult,
            ReportError::CaptureUnavailable { .. } => ExitCode::CaptureUnavailable,
            ReportError::DocumentExportFailed { .. } => ExitCode::ExportFailed,
            ReportError::InvalidConfig(_) => ExitCode::ConfigError,
            ReportError::JsonError(_) => ExitCode::ArgsError,
            ReportError::IoError(_) => ExitCode::IoError,
        }
    }
}

impl From<&ConfigError> for ExitCode {
    fn from(_: &ConfigError) -> Self {
        ExitCode::ConfigError
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
