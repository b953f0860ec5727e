//! Configuration for proxyguard.
//!
//! The config is a small YAML document supplied by the embedding service. It
//! carries the logging setup (default level, per-logger overrides) and the
//! optional auth token size used by the lifecycle controller. Unknown fields
//! are ignored for forward compatibility.
//!
//! `auth_token_size` is kept as a plain signed integer on purpose: a
//! non-positive value is a configuration mistake that the controller reports
//! and falls back from at `start()` time, so it must survive parsing instead
//! of failing validation here.

use crate::error::{GuardError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Top-level configuration.
///
/// This struct represents the contents of the proxyguard config file, e.g.:
///
/// ```yaml
/// logger:
///   default_log_level: warning
///   loggers:
///     ProxyController: { log_level: debug }
/// auth_token_size: 20
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Logging setup (levels, per-logger overrides).
    pub logger: LoggerSettings,

    /// Desired length of generated ownership tokens.
    ///
    /// Absent or non-positive values make the controller fall back to
    /// [`crate::token::DEFAULT_AUTH_TOKEN_SIZE`]; the non-positive case is
    /// additionally reported as a misconfiguration.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth_token_size: Option<i64>,
}

/// Logging section of the config.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerSettings {
    /// Level applied to loggers without an explicit override.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_log_level: Option<String>,

    /// Level of the logger factory's own logger (reports bad level names).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logger_factory_level: Option<String>,

    /// Per-logger overrides, keyed by the name passed to
    /// [`crate::logger::LoggerFactory::build`].
    pub loggers: BTreeMap<String, LoggerOverrides>,
}

/// Override entry for a single named logger.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerOverrides {
    /// Name to emit in log records instead of the build name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    /// Level for this logger ("error", "danger", "warning", "info",
    /// "debug" or "none").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,
}

impl Config {
    /// Load config from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|source| GuardError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_yaml(&content)
    }

    /// Parse config from a YAML string.
    ///
    /// Unknown fields are silently ignored for forward compatibility.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Serialize config to a YAML string.
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}
