use serde::{Deserialize, Serialize};

use crate::action::RuleAction;
use crate::condition::RuleCondition;

/// Declarative rewrite rule applied to events carrying `trigger` as their name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Rule {
    /// Unique identifier within its rule set. Used for reporting and toggling.
    pub id: String,
    /// Optional human readable description.
    #[serde(default)]
    pub description: Option<String>,
    /// Whether the rule is active.
    #[serde(default = "Rule::default_enabled")]
    pub enabled: bool,
    /// Event name the rule reacts to.
    pub trigger: String,
    /// Guard over the event properties.
    #[serde(default = "RuleCondition::always")]
    pub condition: RuleCondition,
    /// Rewrite run when the guard holds.
    pub action: RuleAction,
}

impl Rule {
    pub fn new(
        id: impl Into<String>,
        trigger: impl Into<String>,
        condition: RuleCondition,
        action: RuleAction,
    ) -> Self {
        Self {
            id: id.into(),
            description: None,
            enabled: true,
            trigger: trigger.into(),
            condition,
            action,
        }
    }

    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    pub fn default_enabled() -> bool {
        true
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}
