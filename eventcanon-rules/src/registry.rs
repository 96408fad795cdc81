use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use eventcanon_core::CanonConfig;
use eventcanon_protocol::{Event, Metadata};
use tracing::{debug, info};

use crate::engine::RuleEngine;
use crate::error::RuleError;
use crate::loader::{load_rule_files, RuleFile};
use crate::outcome::Verdict;
use crate::rule_set::{ensure_unique_ids, Allowlist, RuleSet};
use crate::tables::Domain;

/// Domain name -> engine map handed to whatever drives evaluation.
///
/// Mutation happens while assembling at startup; afterwards the engines are
/// shared read-only and the registry can be cloned cheaply across threads.
#[derive(Debug, Clone, Default)]
pub struct RuleRegistry {
    engines: BTreeMap<String, Arc<RuleEngine>>,
}

impl RuleRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every built-in domain table.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        for domain in Domain::ALL {
            registry.insert(domain.rule_set());
        }
        registry
    }

    /// Built-ins, layered with rule files and toggles from the configuration.
    pub fn from_config(config: &CanonConfig) -> Result<Self, RuleError> {
        let mut registry = Self::builtin();

        if let Some(path) = &config.rules_path {
            registry.layer_path(path)?;
        }
        for toggle in &config.enable_rules {
            registry.set_enabled(&toggle.domain, &toggle.rule_id, true)?;
        }
        for toggle in &config.disable_rules {
            registry.set_enabled(&toggle.domain, &toggle.rule_id, false)?;
        }

        info!(domains = registry.engines.len(), "rule registry ready");
        Ok(registry)
    }

    /// Add or replace a domain's rule set.
    pub fn insert(&mut self, rule_set: RuleSet) {
        let name = canonical_name(&rule_set.domain);
        debug!(domain = %name, rules = rule_set.rules.len(), "registering rule set");
        self.engines.insert(name, Arc::new(RuleEngine::new(rule_set)));
    }

    /// Layer every rule file found under `path`.
    pub fn layer_path(&mut self, path: impl AsRef<Path>) -> Result<(), RuleError> {
        for file in load_rule_files(path)? {
            self.layer(file)?;
        }
        Ok(())
    }

    /// Merge one rule file: allowlist entries extend the domain's allowlist,
    /// rules replace same-id rules or are appended. Unknown domains are
    /// created from the file alone.
    pub fn layer(&mut self, file: RuleFile) -> Result<(), RuleError> {
        let name = canonical_name(&file.domain);
        debug!(domain = %name, path = %file.path.display(), "layering rule file");
        ensure_unique_ids(&name, &file.rules)?;

        match self.engines.get_mut(&name) {
            Some(engine) => {
                let set = Arc::make_mut(engine).rule_set_mut();
                for allowed in file.allowlist {
                    set.allow(allowed);
                }
                set.merge_rules(file.rules)
            }
            None => {
                let set = RuleSet::new(name, Allowlist::new(file.allowlist), file.rules)?;
                self.insert(set);
                Ok(())
            }
        }
    }

    pub fn set_enabled(
        &mut self,
        domain: &str,
        rule_id: &str,
        enabled: bool,
    ) -> Result<(), RuleError> {
        let name = canonical_name(domain);
        let engine = self
            .engines
            .get_mut(&name)
            .ok_or_else(|| RuleError::UnknownDomain(domain.to_string()))?;
        Arc::make_mut(engine).rule_set_mut().set_enabled(rule_id, enabled)?;
        debug!(domain = %name, rule_id, enabled, "toggled rule");
        Ok(())
    }

    pub fn engine(&self, domain: &str) -> Result<Arc<RuleEngine>, RuleError> {
        self.engines
            .get(&canonical_name(domain))
            .cloned()
            .ok_or_else(|| RuleError::UnknownDomain(domain.to_string()))
    }

    pub fn domains(&self) -> impl Iterator<Item = &str> {
        self.engines.keys().map(String::as_str)
    }

    /// Evaluate an event against the named domain.
    pub fn evaluate(
        &self,
        domain: &str,
        event: Event,
        metadata: &Metadata,
    ) -> Result<Verdict, RuleError> {
        Ok(self.engine(domain)?.evaluate(event, metadata))
    }
}

fn canonical_name(raw: &str) -> String {
    raw.parse::<Domain>()
        .map(|domain| domain.as_str().to_string())
        .unwrap_or_else(|_| raw.trim().to_string())
}
