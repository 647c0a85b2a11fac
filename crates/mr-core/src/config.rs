//! Report configuration loading for mr-core.
//!
//! Resolution order (highest to lowest priority):
//! 1. `--config <path>`
//! 2. `MR_CONFIG` environment variable
//! 3. `$XDG_CONFIG_HOME/mri_report/report.toml`
//! 4. Built-in defaults
//!
//! Explicit paths (1 and 2) must exist; the XDG file is optional. Files
//! ending in `.json` are parsed as JSON, everything else as TOML.

use mr_report::{ReportConfig, ReportError};
use serde::Serialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Default XDG config directory name.
const CONFIG_DIR_NAME: &str = "mri_report";

/// Config file looked up in the XDG directory.
const CONFIG_FILE_NAME: &str = "report.toml";

/// Environment variable naming a config file.
pub const CONFIG_ENV_VAR: &str = "MR_CONFIG";

/// Errors that can occur during config loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config file not found: {path}")]
    NotFound { path: PathBuf },

    #[error("Invalid TOML in config file {path}: {source}")]
    TomlError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid JSON in config file {path}: {source}")]
    JsonError {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("I/O error reading {path}: {source}")]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Semantic validation failed: {0}")]
    Invalid(#[from] ReportError),
}

/// Where the effective configuration came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "path", rename_all = "lowercase")]
pub enum ConfigSource {
    Cli(PathBuf),
    Env(PathBuf),
    Xdg(PathBuf),
    Defaults,
}

impl ConfigSource {
    pub fn path(&self) -> Option<&Path> {
        match self {
            ConfigSource::Cli(p) | ConfigSource::Env(p) | ConfigSource::Xdg(p) => Some(p),
            ConfigSource::Defaults => None,
        }
    }
}

/// Configuration resolution options.
#[derive(Debug, Default)]
pub struct ConfigOptions {
    /// Explicit config file (highest priority).
    pub config_path: Option<PathBuf>,
}

/// Effective configuration with provenance.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub config: ReportConfig,
    pub source: ConfigSource,
}

/// Load configuration with the standard resolution order.
pub fn load_config(options: &ConfigOptions) -> Result<ResolvedConfig, ConfigError> {
    let env_path = std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from);
    load_config_from(options, env_path, xdg_config_home())
}

/// Resolution with the environment supplied by the caller.
pub fn load_config_from(
    options: &ConfigOptions,
    env_path: Option<PathBuf>,
    config_home: Option<PathBuf>,
) -> Result<ResolvedConfig, ConfigError> {
    let source = if let Some(path) = &options.config_path {
        ConfigSource::Cli(path.clone())
    } else if let Some(path) = env_path {
        ConfigSource::Env(path)
    } else {
        match config_home
            .map(|home| home.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
            .filter(|path| path.exists())
        {
            Some(path) => ConfigSource::Xdg(path),
            None => ConfigSource::Defaults,
        }
    };

    let config = match source.path() {
        Some(path) => parse_config_file(path)?,
        None => ReportConfig::default(),
    };
    config.validate()?;
    debug!(source = ?source, "Resolved report configuration");

    Ok(ResolvedConfig { config, source })
}

fn xdg_config_home() -> Option<PathBuf> {
    std::env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
}

fn parse_config_file(path: &Path) -> Result<ReportConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::NotFound {
            path: path.to_path_buf(),
        });
    }
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::IoError {
        path: path.to_path_buf(),
        source: e,
    })?;

    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if is_json {
        ReportConfig::from_json(&content).map_err(|e| ConfigError::JsonError {
            path: path.to_path_buf(),
            source: e,
        })
    } else {
        ReportConfig::from_toml(&content).map_err(|e| ConfigError::TomlError {
            path: path.to_path_buf(),
            source: e,
        })
    }
}
