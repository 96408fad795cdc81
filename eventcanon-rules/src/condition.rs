use serde::{Deserialize, Serialize};

use crate::property::{ExtractedProperties, Property};

/// Guard deciding whether a rule's action runs for an event.
///
/// Every variant treats a missing property as a failed check.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RuleCondition {
    /// Matches every event carrying the trigger name.
    Always,
    /// All nested conditions must return true.
    All { conditions: Vec<RuleCondition> },
    /// Any of the nested conditions must return true.
    Any { conditions: Vec<RuleCondition> },
    /// Negate the outcome of the nested condition.
    Not { condition: Box<RuleCondition> },
    /// The property is truthy and its text equals `value` exactly.
    Equals { field: Property, value: String },
    /// The property is truthy.
    Truthy { field: Property },
    /// The property is unset or falsy.
    Falsy { field: Property },
}

impl RuleCondition {
    pub fn always() -> Self {
        RuleCondition::Always
    }

    pub fn equals(field: Property, value: impl Into<String>) -> Self {
        RuleCondition::Equals {
            field,
            value: value.into(),
        }
    }

    pub fn evaluate(&self, props: &ExtractedProperties<'_>) -> bool {
        match self {
            RuleCondition::Always => true,
            RuleCondition::All { conditions } => {
                conditions.iter().all(|condition| condition.evaluate(props))
            }
            RuleCondition::Any { conditions } => {
                conditions.iter().any(|condition| condition.evaluate(props))
            }
            RuleCondition::Not { condition } => !condition.evaluate(props),
            RuleCondition::Equals { field, value } => props
                .text(*field)
                .filter(|text| !text.is_empty())
                .map(|text| text == value.as_str())
                .unwrap_or(false),
            RuleCondition::Truthy { field } => props.is_truthy(*field),
            RuleCondition::Falsy { field } => !props.is_truthy(*field),
        }
    }
}
