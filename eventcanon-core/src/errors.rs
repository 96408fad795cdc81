use std::io;

use thiserror::Error;

/// Result type used across the EventCanon core crate.
pub type Result<T> = std::result::Result<T, EventCanonError>;

/// Canonical error representation shared by the member crates.
#[derive(Debug, Error)]
pub enum EventCanonError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("deserialization error: {0}")]
    Deserialization(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("rule set error: {0}")]
    Rules(String),

    #[error("logging setup failed: {0}")]
    Logging(String),
}

impl From<serde_json::Error> for EventCanonError {
    fn from(err: serde_json::Error) -> Self {
        EventCanonError::Deserialization(err.to_string())
    }
}

/// Dedicated configuration error used by the configuration module.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid rule toggle `{0}` (expected domain/rule_id)")]
    InvalidToggle(String),

    #[error("invalid value for environment variable {key}: {message}")]
    InvalidEnvVar { key: String, message: String },
}

impl From<ConfigError> for EventCanonError {
    fn from(value: ConfigError) -> Self {
        EventCanonError::Config(value.to_string())
    }
}
