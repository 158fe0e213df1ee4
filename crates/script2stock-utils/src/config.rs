//! User settings
//!
//! Settings are read from the user-level file
//! (`~/.config/script2stock/config.json`), then the project-level file
//! (`.script2stock.json`), then `SCRIPT2STOCK_*` environment variables.
//! Later sources win field by field.
//!
//! # Example
//!
//! ```json
//! {
//!   "endpoint": "https://script2stock-backend.onrender.com/generate-keywords",
//!   "timeoutSecs": 90,
//!   "overlayFrequency": "high",
//!   "defaultPlatform": "pexels",
//!   "logFormat": "json"
//! }
//! ```

use crate::logging::LogFormat;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Project-level settings file name
pub const PROJECT_CONFIG_FILE: &str = ".script2stock.json";

/// Settings errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Settings file could not be read
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Settings file is not valid JSON for [`Settings`]
    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// A value is present but unusable
    #[error("Invalid setting {key}: {reason}")]
    Invalid { key: String, reason: String },
}

/// Client settings, every field optional
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Keyword service endpoint
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    /// Request timeout in seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,

    /// Overlay frequency sent with every request (low, medium, high)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overlay_frequency: Option<String>,

    /// Platform initially selected for every result line
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_platform: Option<String>,

    /// Log output format
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_format: Option<LogFormat>,
}

impl Settings {
    /// Load settings from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load a settings file if it exists
    ///
    /// A missing file yields empty settings; an unreadable or malformed one
    /// is an error.
    pub fn from_optional_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if path.exists() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Path of the user-level settings file
    pub fn user_config_path() -> Option<PathBuf> {
        let home = std::env::var_os("HOME").or_else(|| std::env::var_os("USERPROFILE"))?;
        Some(
            PathBuf::from(home)
                .join(".config")
                .join("script2stock")
                .join("config.json"),
        )
    }

    /// Load user settings, project settings and environment overrides
    pub fn load_merged() -> Result<Self, ConfigError> {
        let mut settings = match Self::user_config_path() {
            Some(path) => Self::from_optional_file(path)?,
            None => Self::default(),
        };

        settings.merge(Self::from_optional_file(PROJECT_CONFIG_FILE)?);
        settings.merge(Self::from_env()?);
        Ok(settings)
    }

    /// Settings from `SCRIPT2STOCK_*` environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Settings from an arbitrary variable lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let timeout_secs = lookup("SCRIPT2STOCK_TIMEOUT_SECS")
            .map(|value| {
                value.trim().parse::<u64>().map_err(|e| ConfigError::Invalid {
                    key: "SCRIPT2STOCK_TIMEOUT_SECS".to_string(),
                    reason: e.to_string(),
                })
            })
            .transpose()?;

        let log_format = lookup("SCRIPT2STOCK_LOG_FORMAT")
            .map(|value| {
                value.parse::<LogFormat>().map_err(|reason| ConfigError::Invalid {
                    key: "SCRIPT2STOCK_LOG_FORMAT".to_string(),
                    reason,
                })
            })
            .transpose()?;

        Ok(Self {
            endpoint: lookup("SCRIPT2STOCK_ENDPOINT"),
            timeout_secs,
            overlay_frequency: lookup("SCRIPT2STOCK_OVERLAY_FREQUENCY"),
            default_platform: lookup("SCRIPT2STOCK_PLATFORM"),
            log_format,
        })
    }

    /// Merge another settings value into this one
    ///
    /// Fields set in `other` take precedence.
    pub fn merge(&mut self, other: Settings) {
        if other.endpoint.is_some() {
            self.endpoint = other.endpoint;
        }
        if other.timeout_secs.is_some() {
            self.timeout_secs = other.timeout_secs;
        }
        if other.overlay_frequency.is_some() {
            self.overlay_frequency = other.overlay_frequency;
        }
        if other.default_platform.is_some() {
            self.default_platform = other.default_platform;
        }
        if other.log_format.is_some() {
            self.log_format = other.log_format;
        }
    }
}
