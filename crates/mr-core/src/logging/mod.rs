//! Structured logging for mr-core.
//!
//! stdout carries command payloads only; every log event goes to stderr.

pub mod config;

pub use config::{LogConfig, LogFormat, LogLevel};

use std::io::IsTerminal;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer, Registry};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Install the global subscriber. Later calls keep the first one.
pub fn init_logging(config: &LogConfig) {
    let filter = EnvFilter::try_new(config.directives()).unwrap_or_else(|e| {
        eprintln!("Warning: ignoring invalid log directives: {}", e);
        EnvFilter::new(LogConfig::default().directives())
    });

    let layer: BoxedLayer = match config.format {
        LogFormat::Human => {
            let human = fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_ansi(std::io::stderr().is_terminal());
            if config.timestamps {
                human.boxed()
            } else {
                human.without_time().boxed()
            }
        }
        LogFormat::Jsonl => fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_current_span(false)
            .flatten_event(true)
            .boxed(),
    };

    if let Err(e) = tracing_subscriber::registry()
        .with(layer.with_filter(filter))
        .try_init()
    {
        eprintln!("Warning: logging already initialized: {}", e);
    }
}

/// Identifier tying one invocation's payload to its log lines.
pub fn generate_run_id() -> String {
    let uuid = uuid::Uuid::new_v4().simple().to_string();
    format!("run-{}", &uuid[..12])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_run_id() {
        let id1 = generate_run_id();
        let id2 = generate_run_id();
        assert!(id1.starts_with("run-"));
        assert_eq!(id1.len(), 16);
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_second_init_is_harmless() {
        let config = LogConfig {
            timestamps: false,
            ..LogConfig::default()
        };
        init_logging(&config);
        init_logging(&config);
        tracing::info!("still logging");
    }
}
