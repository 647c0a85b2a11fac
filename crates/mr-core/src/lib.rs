//! MRI report CLI library.
//!
//! Configuration resolution, exit codes and logging setup for the
//! `mr-core` binary. The report engine itself lives in `mr-report`.

pub mod config;
pub mod exit_codes;
pub mod logging;

pub use config::{load_config, ConfigError, ConfigOptions, ConfigSource, ResolvedConfig};
pub use exit_codes::ExitCode;
