use eventcanon_protocol::{Event, Metadata};
use tracing::debug;

use crate::error::RuleError;
use crate::loader::load_rule_set;
use crate::outcome::{DropReason, TransformOutcome, Verdict};
use crate::property::ExtractedProperties;
use crate::rule::Rule;
use crate::rule_set::RuleSet;

/// Stateless executor evaluating events against one domain's rule set.
///
/// The rule set is read-only once the engine is built, so a single engine can
/// be shared across threads and called concurrently.
#[derive(Debug, Clone)]
pub struct RuleEngine {
    rule_set: RuleSet,
}

impl RuleEngine {
    pub fn new(rule_set: RuleSet) -> Self {
        Self { rule_set }
    }

    /// Loads a complete rule set document from a file.
    pub fn from_path(path: impl AsRef<std::path::Path>) -> Result<Self, RuleError> {
        Ok(Self::new(load_rule_set(path)?))
    }

    pub fn domain(&self) -> &str {
        &self.rule_set.domain
    }

    pub fn rule_set(&self) -> &RuleSet {
        &self.rule_set
    }

    pub(crate) fn rule_set_mut(&mut self) -> &mut RuleSet {
        &mut self.rule_set
    }

    /// Borrow the underlying rules in scan order.
    pub fn rules(&self) -> &[Rule] {
        &self.rule_set.rules
    }

    pub fn is_allowed(&self, name: &str) -> bool {
        self.rule_set.allowlist.contains(name)
    }

    /// Rewrite the event name in place according to the rule table.
    ///
    /// Every enabled rule whose trigger equals the incoming name and whose
    /// guard holds is run in table order; the scan never stops early, so the
    /// last rule to produce a name decides it. Triggers are compared against
    /// the name the event arrived with. Dropped events are left untouched.
    pub fn apply(&self, event: &mut Event) -> TransformOutcome {
        let Some(trigger_name) = event.name().map(str::to_owned) else {
            debug!(domain = %self.domain(), "dropping event without a name");
            return TransformOutcome::dropped(DropReason::MissingName);
        };

        if !self.is_allowed(&trigger_name) {
            debug!(domain = %self.domain(), event = %trigger_name, "event not allowlisted");
            return TransformOutcome::dropped(DropReason::NotAllowlisted);
        }

        let mut outcome = TransformOutcome::new();
        let mut new_name = None;
        {
            let props = ExtractedProperties::extract(event);
            for rule in &self.rule_set.rules {
                if !rule.is_enabled() || rule.trigger != trigger_name {
                    continue;
                }
                if !rule.condition.evaluate(&props) {
                    continue;
                }

                match rule.action.resolve(&props) {
                    Some(name) => {
                        debug!(
                            rule_id = %rule.id,
                            event = %trigger_name,
                            to = %name,
                            "rule matched event"
                        );
                        new_name = Some(name);
                        outcome.record_rule(rule.id.clone());
                    }
                    None => {
                        debug!(
                            rule_id = %rule.id,
                            event = %trigger_name,
                            "rule matched but produced no name"
                        );
                        outcome.record_unresolved(rule.id.clone());
                    }
                }
            }
        }

        match new_name {
            Some(name) => event.rename(name),
            None => {
                debug!(domain = %self.domain(), event = %trigger_name, "no rule matched event");
            }
        }

        outcome
    }

    /// Pipeline entry point: transformed event, or the drop signal.
    ///
    /// `metadata` is accepted for every call and currently read by no rule.
    pub fn evaluate(&self, mut event: Event, _metadata: &Metadata) -> Verdict {
        let outcome = self.apply(&mut event);
        match outcome.drop_reason() {
            None => Verdict::Transformed(event),
            Some(reason) => Verdict::Dropped(reason),
        }
    }
}
