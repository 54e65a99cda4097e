//! Fireworks error handling
//!
//! Only configuration loading and validation can fail. The per-frame path
//! (`advance`, `reset`) is infallible and sanitizes its inputs instead.

use std::path::PathBuf;

/// Type alias for fireworks operation results
pub type FireworksResult<T> = Result<T, FireworksError>;

/// Fireworks errors
#[derive(Debug, thiserror::Error)]
pub enum FireworksError {
    #[error("Invalid config field '{field}': {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    #[error("Failed to read config file {path}: {source}")]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),
}

/// Create an invalid config error
pub fn invalid_config(field: &'static str, reason: impl std::fmt::Display) -> FireworksError {
    FireworksError::InvalidConfig {
        field,
        reason: reason.to_string(),
    }
}
