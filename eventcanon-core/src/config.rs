use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use tracing::debug;

use crate::errors::{ConfigError, EventCanonError};

/// Prefix applied to every environment variable read by [`CanonConfig::from_env`].
pub const DEFAULT_ENV_PREFIX: &str = "EVENTCANON_";

/// Runtime environment used by the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    fn from_str(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "production" | "prod" => Environment::Production,
            "staging" | "stage" => Environment::Staging,
            _ => Environment::Development,
        }
    }
}

/// Enables or disables a single rule in a named domain, written `domain/rule_id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleToggle {
    pub domain: String,
    pub rule_id: String,
}

impl FromStr for RuleToggle {
    type Err = ConfigError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let (domain, rule_id) = raw
            .trim()
            .split_once('/')
            .ok_or_else(|| ConfigError::InvalidToggle(raw.to_string()))?;
        let (domain, rule_id) = (domain.trim(), rule_id.trim());
        if domain.is_empty() || rule_id.is_empty() {
            return Err(ConfigError::InvalidToggle(raw.to_string()));
        }
        Ok(Self {
            domain: domain.to_string(),
            rule_id: rule_id.to_string(),
        })
    }
}

impl fmt::Display for RuleToggle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.domain, self.rule_id)
    }
}

/// Parses a comma separated toggle list, ignoring blank entries.
pub fn parse_toggles(raw: &str) -> Result<Vec<RuleToggle>, ConfigError> {
    raw.split(',')
        .filter(|entry| !entry.trim().is_empty())
        .map(RuleToggle::from_str)
        .collect()
}

/// Process-level configuration for the event filter.
#[derive(Debug, Clone, Default)]
pub struct CanonConfig {
    pub environment: Environment,
    /// Rule file or directory layered over the built-in tables.
    pub rules_path: Option<PathBuf>,
    pub enable_rules: Vec<RuleToggle>,
    pub disable_rules: Vec<RuleToggle>,
    pub log_level: Option<String>,
}

impl CanonConfig {
    /// Loads configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_with_prefix(DEFAULT_ENV_PREFIX)
    }

    /// Loads configuration from env vars prefixed with the provided value (e.g. `EVENTCANON_`).
    pub fn from_env_with_prefix(prefix: &str) -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(prefix, |key| env::var(key).ok())
    }

    /// Builds configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(prefix: &str, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let key = |suffix: &str| format!("{}{}", prefix, suffix);

        let environment = lookup(&key("ENV"))
            .map(|raw| Environment::from_str(&raw))
            .unwrap_or_default();

        let rules_path = lookup(&key("RULES_PATH"))
            .filter(|raw| !raw.trim().is_empty())
            .map(PathBuf::from);

        let enable_rules = toggles_from(&lookup, key("ENABLE_RULES"))?;
        let disable_rules = toggles_from(&lookup, key("DISABLE_RULES"))?;
        let log_level = lookup(&key("LOG")).filter(|raw| !raw.trim().is_empty());

        debug!(
            ?environment,
            rules_path = ?rules_path,
            enabled = enable_rules.len(),
            disabled = disable_rules.len(),
            "loaded configuration"
        );

        Ok(Self {
            environment,
            rules_path,
            enable_rules,
            disable_rules,
            log_level,
        })
    }

    /// Whether the service is running in production.
    pub fn is_production(&self) -> bool {
        matches!(self.environment, Environment::Production)
    }
}

fn toggles_from<F>(lookup: &F, key: String) -> Result<Vec<RuleToggle>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(&key) {
        Some(raw) => parse_toggles(&raw).map_err(|err| ConfigError::InvalidEnvVar {
            key,
            message: err.to_string(),
        }),
        None => Ok(Vec::new()),
    }
}

/// Helper that loads config and converts to the canonical error type.
pub fn load_config() -> Result<CanonConfig, EventCanonError> {
    Ok(CanonConfig::from_env()?)
}
