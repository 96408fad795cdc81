use std::collections::{BTreeSet, HashSet};

use serde::{Deserialize, Serialize};

use crate::error::RuleError;
use crate::rule::Rule;

/// Event names eligible for transformation in one domain.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct Allowlist(HashSet<String>);

impl Allowlist {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(names.into_iter().map(Into::into).collect())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains(name)
    }

    pub fn insert(&mut self, name: impl Into<String>) -> bool {
        self.0.insert(name.into())
    }

    /// Names in lexical order, for display.
    pub fn sorted(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.0.iter().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// One domain's rule table: an allowlist plus rules in evaluation order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RuleSet {
    pub domain: String,
    #[serde(default)]
    pub allowlist: Allowlist,
    #[serde(default)]
    pub rules: Vec<Rule>,
}

impl RuleSet {
    /// Assemble a rule set, rejecting duplicate rule ids.
    pub fn new(
        domain: impl Into<String>,
        allowlist: Allowlist,
        rules: Vec<Rule>,
    ) -> Result<Self, RuleError> {
        let set = Self {
            domain: domain.into(),
            allowlist,
            rules,
        };
        set.validate()?;
        Ok(set)
    }

    pub fn validate(&self) -> Result<(), RuleError> {
        ensure_unique_ids(&self.domain, &self.rules)
    }

    pub fn rule(&self, id: &str) -> Option<&Rule> {
        self.rules.iter().find(|rule| rule.id == id)
    }

    /// Turn a rule on or off in place.
    pub fn set_enabled(&mut self, id: &str, enabled: bool) -> Result<(), RuleError> {
        let domain = &self.domain;
        let rule = self
            .rules
            .iter_mut()
            .find(|rule| rule.id == id)
            .ok_or_else(|| RuleError::UnknownRule {
                domain: domain.clone(),
                id: id.to_string(),
            })?;
        rule.enabled = enabled;
        Ok(())
    }

    /// Builder-style [`RuleSet::set_enabled`].
    pub fn with_enabled(mut self, id: &str, enabled: bool) -> Result<Self, RuleError> {
        self.set_enabled(id, enabled)?;
        Ok(self)
    }

    /// Extend the allowlist.
    pub fn allow(&mut self, name: impl Into<String>) {
        self.allowlist.insert(name);
    }

    /// Replace rules sharing an id with `overrides`, appending new ones.
    ///
    /// `overrides` must not repeat an id itself.
    pub fn merge_rules(&mut self, overrides: Vec<Rule>) -> Result<(), RuleError> {
        ensure_unique_ids(&self.domain, &overrides)?;
        for rule in overrides {
            match self.rules.iter_mut().find(|existing| existing.id == rule.id) {
                Some(existing) => *existing = rule,
                None => self.rules.push(rule),
            }
        }
        self.validate()
    }

    /// Every output name reachable through an enabled rule.
    pub fn output_vocabulary(&self) -> BTreeSet<&str> {
        self.rules
            .iter()
            .filter(|rule| rule.is_enabled())
            .flat_map(|rule| rule.action.outputs())
            .collect()
    }
}

/// Rejects the first rule id that appears twice in `rules`.
pub(crate) fn ensure_unique_ids(domain: &str, rules: &[Rule]) -> Result<(), RuleError> {
    let mut seen = HashSet::new();
    for rule in rules {
        if !seen.insert(rule.id.as_str()) {
            return Err(RuleError::DuplicateRule {
                domain: domain.to_string(),
                id: rule.id.clone(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::RuleAction;
    use crate::condition::RuleCondition;

    fn rule(id: &str) -> Rule {
        Rule::new(id, "service_ended", RuleCondition::Always, RuleAction::rename(id))
    }

    #[test]
    fn rejects_duplicate_ids() {
        let err = RuleSet::new("demo", Allowlist::default(), vec![rule("a"), rule("a")])
            .unwrap_err();
        assert!(matches!(err, RuleError::DuplicateRule { id, .. } if id == "a"));
    }

    #[test]
    fn toggling_unknown_rule_fails() {
        let mut set = RuleSet::new("demo", Allowlist::default(), vec![rule("a")]).expect("valid");
        set.set_enabled("a", false).expect("known rule");
        assert!(!set.rules[0].enabled);

        let err = set.set_enabled("b", true).unwrap_err();
        assert!(matches!(err, RuleError::UnknownRule { id, .. } if id == "b"));
    }

    #[test]
    fn merge_replaces_in_place_and_appends() {
        let mut set =
            RuleSet::new("demo", Allowlist::default(), vec![rule("a"), rule("b")]).expect("valid");
        let replacement = Rule::new(
            "a",
            "service_ended",
            RuleCondition::Always,
            RuleAction::rename("replaced"),
        );
        set.merge_rules(vec![replacement, rule("c")]).expect("merge");

        let ids: Vec<_> = set.rules.iter().map(|rule| rule.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
        assert_eq!(set.rules[0].action, RuleAction::rename("replaced"));
    }

    #[test]
    fn merge_rejects_repeated_override_ids() {
        let mut set = RuleSet::new("demo", Allowlist::default(), vec![rule("a")]).expect("valid");
        let err = set.merge_rules(vec![rule("b"), rule("b")]).unwrap_err();

        assert!(matches!(err, RuleError::DuplicateRule { id, .. } if id == "b"));
        assert_eq!(set.rules.len(), 1);
    }
}
