//! Error types for report generation.

use thiserror::Error;

/// Result type for report operations.
pub type Result<T> = std::result::Result<T, ReportError>;

/// Errors that can occur during report generation.
///
/// Content resolution, wrapping and placement never fail; only snapshot
/// capture and the export step produce the domain conditions below.
#[derive(Error, Debug)]
pub enum ReportError {
    /// Report requested without a classification result.
    #[error("no analysis result available for report generation")]
    NoResultAvailable,

    /// The visualization region has nothing rendered.
    #[error("visualization capture unavailable: {reason}")]
    CaptureUnavailable { reason: String },

    /// Serializing the finished document failed. No partial output exists.
    #[error("document export failed: {reason}")]
    DocumentExportFailed { reason: String },

    /// Invalid configuration.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl ReportError {
    /// Build a `CaptureUnavailable` error.
    pub fn capture_unavailable(reason: impl Into<String>) -> Self {
        ReportError::CaptureUnavailable {
            reason: reason.into(),
        }
    }

    /// Build a `DocumentExportFailed` error.
    pub fn export_failed(reason: impl Into<String>) -> Self {
        ReportError::DocumentExportFailed {
            reason: reason.into(),
        }
    }

    /// Stable snake_case code for machine-readable output.
    pub fn category(&self) -> &'static str {
        match self {
            ReportError::NoResultAvailable => "no_result",
            ReportError::CaptureUnavailable { .. } => "capture_unavailable",
            ReportError::DocumentExportFailed { .. } => "export_failed",
            ReportError::InvalidConfig(_) => "config",
            ReportError::JsonError(_) => "json",
            ReportError::IoError(_) => "io",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = ReportError::capture_unavailable("region is empty");
        assert_eq!(
            err.to_string(),
            "visualization capture unavailable: region is empty"
        );
        assert_eq!(err.category(), "capture_unavailable");

        let err = ReportError::export_failed("bad png");
        assert!(err.to_string().contains("bad png"));
        assert_eq!(err.category(), "export_failed");

        assert_eq!(ReportError::NoResultAvailable.category(), "no_result");

        let err: ReportError = serde_json::from_str::<serde_json::Value>("{").unwrap_err().into();
        assert_eq!(err.category(), "json");
        let err: ReportError = std::io::Error::other("disk full").into();
        assert_eq!(err.category(), "io");
        assert_eq!(ReportError::InvalidConfig("x".into()).category(), "config");
    }
}
