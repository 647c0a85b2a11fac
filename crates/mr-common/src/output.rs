//! Payload formats for the command-line front end.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// How a command reports what it did on stdout.
///
/// The PDF itself always goes to a file; this only shapes the payload
/// describing it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Machine-readable payload with report path, page count and tier
    #[default]
    Json,

    /// Markdown table for pasting into case notes
    Md,

    /// Single line per report
    Summary,
}

impl OutputFormat {
    /// JSON payloads pair with JSONL logs on stderr.
    pub fn wants_structured_logs(self) -> bool {
        matches!(self, OutputFormat::Json)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Md => "md",
            OutputFormat::Summary => "summary",
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_match_cli_values() {
        for format in OutputFormat::value_variants() {
            let value = format.to_possible_value().unwrap();
            assert_eq!(value.get_name(), format.as_str());
            assert_eq!(
                serde_json::to_value(format).unwrap(),
                serde_json::Value::String(format.to_string())
            );
        }
    }

    #[test]
    fn test_only_json_pairs_with_structured_logs() {
        assert!(OutputFormat::Json.wants_structured_logs());
        assert!(!OutputFormat::Md.wants_structured_logs());
        assert!(!OutputFormat::Summary.wants_structured_logs());
    }
}
