//! Library configuration
//!
//! Every field has a default, so an empty JSON object is a valid config.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::observability::{log_event_with_fields, Event, Logger, Severity};

/// Result type for configuration loading
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("failed to read config '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config text is not a valid config object
    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),

    /// A value is outside its allowed range
    #[error("invalid config value for '{field}': {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

/// jsonshape configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ShapeConfig {
    /// Minimum severity written by the logger (default: WARN)
    #[serde(default = "default_log_level")]
    pub log_level: Severity,

    /// Maximum `Type::depth()` accepted by the registry (default: 64)
    #[serde(default = "default_max_schema_depth")]
    pub max_schema_depth: usize,

    /// Directory of `<name>.json` type files for `TypeRegistry::from_config`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_dir: Option<PathBuf>,
}

fn default_log_level() -> Severity {
    Severity::Warn
}

fn default_max_schema_depth() -> usize {
    64
}

impl Default for ShapeConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            max_schema_depth: default_max_schema_depth(),
            schema_dir: None,
        }
    }
}

impl ShapeConfig {
    /// Parses a config from JSON text.
    pub fn from_json_str(text: &str) -> ConfigResult<Self> {
        let config: ShapeConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses a JSON config file.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json_str(&text)?;

        let shown = path.display().to_string();
        log_event_with_fields(Event::ConfigLoaded, &[("path", shown.as_str())]);
        Ok(config)
    }

    /// Checks value ranges.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.max_schema_depth == 0 {
            return Err(ConfigError::InvalidValue {
                field: "max_schema_depth",
                reason: "must be at least 1".into(),
            });
        }
        Ok(())
    }

    /// Installs the process-wide settings (currently the log threshold).
    pub fn apply(&self) {
        Logger::set_min_severity(self.log_level);
    }
}
