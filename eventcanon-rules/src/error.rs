use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading, assembling or toggling rule sets.
///
/// Evaluating an event never fails; these only surface at startup.
#[derive(Debug, Error)]
pub enum RuleError {
    #[error("rules path does not exist: {0}")]
    MissingPath(String),
    #[error("failed to read rules from {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse rules from {path}: {message}")]
    Parse { path: String, message: String },
    #[error("duplicate rule identifier detected in {domain}: {id}")]
    DuplicateRule { domain: String, id: String },
    #[error("unknown rule {id} in domain {domain}")]
    UnknownRule { domain: String, id: String },
    #[error("unknown domain: {0}")]
    UnknownDomain(String),
}

impl RuleError {
    pub fn from_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        RuleError::Io {
            path: path.into().display().to_string(),
            source,
        }
    }

    pub fn parse_error(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        RuleError::Parse {
            path: path.into().display().to_string(),
            message: message.into(),
        }
    }
}

impl From<RuleError> for eventcanon_core::EventCanonError {
    fn from(err: RuleError) -> Self {
        eventcanon_core::EventCanonError::Rules(err.to_string())
    }
}
