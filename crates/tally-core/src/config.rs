use crate::errors::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const SUPPORTED_CONFIG_VERSION: u32 = 1;
pub const DEFAULT_CONFIG_FILE: &str = "tally.yaml";
pub const DEFAULT_DATABASE: &str = ".tally/tally.db";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TallyConfig {
    #[serde(default = "default_version")]
    pub version: u32,
    /// SQLite store used by `ingest`, `summarize` and `seeds`.
    #[serde(default = "default_database")]
    pub database: PathBuf,
    /// Categories used when a query names none.
    #[serde(default)]
    pub default_group_by: Vec<String>,
    #[serde(default)]
    pub output: OutputFormat,
}

fn default_version() -> u32 {
    SUPPORTED_CONFIG_VERSION
}

fn default_database() -> PathBuf {
    PathBuf::from(DEFAULT_DATABASE)
}

impl Default for TallyConfig {
    fn default() -> Self {
        Self {
            version: SUPPORTED_CONFIG_VERSION,
            database: default_database(),
            default_group_by: Vec::new(),
            output: OutputFormat::default(),
        }
    }
}

pub fn load_config(path: &Path) -> Result<TallyConfig, ConfigError> {
    let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    parse_config(&raw, path)
}

/// Loads `path` when it exists. A missing file falls back to defaults unless the caller asked
/// for it explicitly.
pub fn load_config_or_default(path: &Path, explicit: bool) -> Result<TallyConfig, ConfigError> {
    if !explicit && !path.exists() {
        tracing::debug!(path = %path.display(), "no config file, using defaults");
        return Ok(TallyConfig::default());
    }
    load_config(path)
}

fn parse_config(raw: &str, path: &Path) -> Result<TallyConfig, ConfigError> {
    let cfg: TallyConfig = serde_yaml::from_str(raw).map_err(|e| ConfigError::Parse {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    if cfg.version != SUPPORTED_CONFIG_VERSION {
        return Err(ConfigError::UnsupportedVersion {
            found: cfg.version,
            supported: SUPPORTED_CONFIG_VERSION,
        });
    }
    if cfg.default_group_by.iter().any(|c| c.trim().is_empty()) {
        return Err(ConfigError::Invalid {
            message: "default_group_by contains an empty category".into(),
        });
    }
    if cfg.database.as_os_str().is_empty() {
        return Err(ConfigError::Invalid {
            message: "database path is empty".into(),
        });
    }
    Ok(cfg)
}
