//! Error types for proxyguard.
//!
//! Only the configuration layer produces typed errors. Every condition in the
//! lock protocol itself (I/O failures on the lock file, ownership rejections,
//! desync) is surfaced to callers as a boolean result from the affected mutex
//! or controller operation, never as an `Err`.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for proxyguard operations.
#[derive(Error, Debug)]
pub enum GuardError {
    /// Config file could not be read.
    #[error("failed to read config file '{path}': {source}")]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Config file content is not valid YAML for the expected schema.
    #[error("failed to parse config YAML: {0}")]
    ConfigParse(#[from] serde_yaml::Error),
}

/// Result type alias for proxyguard operations.
pub type Result<T> = std::result::Result<T, GuardError>;
