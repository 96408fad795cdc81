//! Event filter rewriting raw tracking events into a canonical taxonomy.
//!
//! Each product domain owns an allowlist of event names and an ordered table
//! of rules. A rule names the event it reacts to, a guard over the event's
//! properties, and an action computing the replacement name. Rule tables ship
//! built in (see [`Domain`]) and can be layered with YAML/JSON rule files.

mod action;
mod condition;
mod engine;
mod error;
mod loader;
mod outcome;
mod property;
mod registry;
mod rule;
mod rule_set;
mod tables;

pub use action::{RuleAction, WEB_CHANNEL};
pub use condition::RuleCondition;
pub use engine::RuleEngine;
pub use error::RuleError;
pub use loader::{load_rule_files, load_rule_set, RuleFile};
pub use outcome::{Decision, DropReason, TransformOutcome, Verdict};
pub use property::{ExtractedProperties, Property, PropertyValue};
pub use registry::RuleRegistry;
pub use rule::Rule;
pub use rule_set::{Allowlist, RuleSet};
pub use tables::Domain;

#[cfg(test)]
mod tests {
    use super::*;
    use eventcanon_protocol::{EventBuilder, Metadata};

    #[test]
    fn evaluates_builtin_wallet_rule() {
        let engine = RuleEngine::new(Domain::Wallet.rule_set());
        let event = EventBuilder::new("payment_completed")
            .property("service", "recharge")
            .property("user_channel", "web")
            .build();

        let verdict = engine.evaluate(event, &Metadata::empty());
        assert_eq!(verdict.event_name(), Some("total_wallet_recharge_web"));
    }
}
