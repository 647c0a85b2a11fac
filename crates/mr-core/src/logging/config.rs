//! Log settings from the environment and command-line flags.
//!
//! Precedence, highest first: `-q`/`-v`, `MR_LOG`, `RUST_LOG` (raw
//! directives), defaults. `MR_LOG_FORMAT` picks the format unless the
//! payload format forces JSONL.

use mr_common::OutputFormat;
use serde::{Deserialize, Serialize};

/// Environment variable holding a single level for the mr crates.
pub const LEVEL_ENV_VAR: &str = "MR_LOG";

/// Environment variable holding the log format.
pub const FORMAT_ENV_VAR: &str = "MR_LOG_FORMAT";

/// Crates whose events pass the level filter.
const LOG_TARGETS: [&str; 2] = ["mr_core", "mr_report"];

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Console lines, coloured on a terminal.
    #[default]
    Human,
    /// One JSON object per event.
    Jsonl,
}

impl LogFormat {
    /// Format forced by the payload format, if any.
    pub fn for_payload(format: OutputFormat) -> Option<Self> {
        format.wants_structured_logs().then_some(LogFormat::Jsonl)
    }

    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "human" | "pretty" => Some(LogFormat::Human),
            "jsonl" | "json" => Some(LogFormat::Jsonl),
            _ => None,
        }
    }
}

/// Minimum level for the mr crates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
    Off,
}

const LEVEL_NAMES: [(LogLevel, &str); 6] = [
    (LogLevel::Trace, "trace"),
    (LogLevel::Debug, "debug"),
    (LogLevel::Info, "info"),
    (LogLevel::Warn, "warn"),
    (LogLevel::Error, "error"),
    (LogLevel::Off, "off"),
];

impl LogLevel {
    /// Level requested by `-q` and repeated `-v`; `None` keeps the default.
    pub fn from_verbosity(quiet: bool, verbose: u8) -> Option<Self> {
        match (quiet, verbose) {
            (true, _) => Some(LogLevel::Error),
            (false, 0) => None,
            (false, 1) => Some(LogLevel::Debug),
            (false, _) => Some(LogLevel::Trace),
        }
    }

    pub fn as_str(self) -> &'static str {
        LEVEL_NAMES
            .iter()
            .find(|(level, _)| *level == self)
            .map_or("info", |(_, name)| name)
    }

    fn parse(value: &str) -> Option<Self> {
        let value = value.trim().to_ascii_lowercase();
        let value = if value == "warning" { "warn" } else { value.as_str() };
        LEVEL_NAMES
            .iter()
            .find(|(_, name)| *name == value)
            .map(|(level, _)| *level)
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolved logging configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct LogConfig {
    pub format: LogFormat,
    pub level: LogLevel,
    /// Timestamps on human output.
    pub timestamps: bool,
    /// Raw `RUST_LOG` directives; set only when no level was given.
    pub env_filter: Option<String>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::Human,
            level: LogLevel::Info,
            timestamps: true,
            env_filter: None,
        }
    }
}

impl LogConfig {
    /// Read the process environment, then apply flag overrides.
    pub fn from_env(cli_level: Option<LogLevel>, cli_format: Option<LogFormat>) -> Self {
        Self::from_vars(
            std::env::var(LEVEL_ENV_VAR).ok(),
            std::env::var("RUST_LOG").ok(),
            std::env::var(FORMAT_ENV_VAR).ok(),
            cli_level,
            cli_format,
        )
    }

    /// Resolution with the environment supplied by the caller.
    pub fn from_vars(
        mr_log: Option<String>,
        rust_log: Option<String>,
        mr_log_format: Option<String>,
        cli_level: Option<LogLevel>,
        cli_format: Option<LogFormat>,
    ) -> Self {
        let env_level = mr_log.as_deref().and_then(LogLevel::parse);
        let level = cli_level.or(env_level);
        let env_filter = match level {
            Some(_) => None,
            None => rust_log.filter(|raw| !raw.trim().is_empty()),
        };
        let format = cli_format
            .or_else(|| mr_log_format.as_deref().and_then(LogFormat::parse))
            .unwrap_or_default();

        Self {
            format,
            level: level.unwrap_or_default(),
            env_filter,
            ..Self::default()
        }
    }

    /// `EnvFilter` directives for the subscriber.
    pub fn directives(&self) -> String {
        if let Some(raw) = &self.env_filter {
            return raw.clone();
        }
        LOG_TARGETS
            .iter()
            .map(|target| format!("{}={}", target, self.level))
            .collect::<Vec<_>>()
            .join(",")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_names() {
        assert_eq!(LogLevel::parse("DEBUG"), Some(LogLevel::Debug));
        assert_eq!(LogLevel::parse("warning"), Some(LogLevel::Warn));
        assert_eq!(LogLevel::parse("loud"), None);
        for (level, name) in LEVEL_NAMES {
            assert_eq!(level.to_string(), name);
        }
    }

    #[test]
    fn test_verbosity_flags() {
        assert_eq!(LogLevel::from_verbosity(false, 0), None);
        assert_eq!(LogLevel::from_verbosity(false, 1), Some(LogLevel::Debug));
        assert_eq!(LogLevel::from_verbosity(false, 3), Some(LogLevel::Trace));
        assert_eq!(LogLevel::from_verbosity(true, 2), Some(LogLevel::Error));
    }

    #[test]
    fn test_mr_log_beats_rust_log() {
        let config =
            LogConfig::from_vars(Some("debug".into()), Some("trace".into()), None, None, None);
        assert_eq!(config.env_filter, None);
        assert_eq!(config.directives(), "mr_core=debug,mr_report=debug");
    }

    #[test]
    fn test_rust_log_passthrough() {
        let config = LogConfig::from_vars(None, Some("mr_report=trace".into()), None, None, None);
        assert_eq!(config.directives(), "mr_report=trace");

        let blank = LogConfig::from_vars(None, Some("  ".into()), None, None, None);
        assert_eq!(blank.directives(), "mr_core=info,mr_report=info");
    }

    #[test]
    fn test_flags_override_env() {
        let config = LogConfig::from_vars(
            Some("trace".into()),
            Some("debug".into()),
            Some("human".into()),
            Some(LogLevel::Error),
            LogFormat::for_payload(OutputFormat::Json),
        );
        assert_eq!(config.level, LogLevel::Error);
        assert_eq!(config.format, LogFormat::Jsonl);
        assert!(config.timestamps);
    }

    #[test]
    fn test_format_env_applies_without_json_payload() {
        let config = LogConfig::from_vars(
            None,
            None,
            Some("json".into()),
            None,
            LogFormat::for_payload(OutputFormat::Summary),
        );
        assert_eq!(config.format, LogFormat::Jsonl);
    }
}
