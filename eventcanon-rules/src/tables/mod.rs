//! Built-in rule tables, one per product domain.
//!
//! Both domains run through the same [`RuleEngine`](crate::RuleEngine); they
//! differ only in allowlist, output vocabulary and which entries are switched
//! on. Entries that are known-inert (a guard that can never hold, a rule kept
//! off for one product) stay in the table as data so behaviour matches what
//! downstream destinations already receive.

use std::fmt;
use std::str::FromStr;

use crate::action::RuleAction;
use crate::condition::RuleCondition;
use crate::error::RuleError;
use crate::property::Property;
use crate::rule::Rule;
use crate::rule_set::RuleSet;

mod puja;
mod wallet;

/// Product domains shipped with the filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Domain {
    /// Astrology consultations and wallet recharges.
    Wallet,
    /// Puja bookings.
    Puja,
}

impl Domain {
    pub const ALL: [Domain; 2] = [Domain::Wallet, Domain::Puja];

    pub fn as_str(self) -> &'static str {
        match self {
            Domain::Wallet => "wallet",
            Domain::Puja => "puja",
        }
    }

    /// The domain's built-in rule table.
    pub fn rule_set(self) -> RuleSet {
        match self {
            Domain::Wallet => wallet::rule_set(),
            Domain::Puja => puja::rule_set(),
        }
    }
}

impl FromStr for Domain {
    type Err = RuleError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "wallet" | "astro" => Ok(Domain::Wallet),
            "puja" => Ok(Domain::Puja),
            _ => Err(RuleError::UnknownDomain(raw.to_string())),
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Rule shapes shared by both tables.

fn channel_rule(
    id: &str,
    trigger: &str,
    guard: RuleCondition,
    web: &str,
    app: &str,
) -> Rule {
    Rule::new(id, trigger, guard, RuleAction::by_channel(web, app))
}

fn flag_rule(id: &str, trigger: &str, guard: RuleCondition, to: &str) -> Rule {
    Rule::new(id, trigger, guard, RuleAction::rename(to))
}

fn equals(field: Property, value: &str) -> RuleCondition {
    RuleCondition::equals(field, value)
}

fn truthy(field: Property) -> RuleCondition {
    RuleCondition::Truthy { field }
}

fn falsy(field: Property) -> RuleCondition {
    RuleCondition::Falsy { field }
}

fn all(conditions: Vec<RuleCondition>) -> RuleCondition {
    RuleCondition::All { conditions }
}

fn any(conditions: Vec<RuleCondition>) -> RuleCondition {
    RuleCondition::Any { conditions }
}

/// `payment_failure` keyed on `service`. Both tables require the service to
/// equal two different values at once, so the guard never holds.
fn payment_failure_rule(puja_service: &str) -> Rule {
    Rule::new(
        "payment_failure",
        "payment_failure",
        all(vec![
            equals(Property::Service, puja_service),
            equals(Property::Service, "recharge"),
        ]),
        RuleAction::by_value(
            Property::Service,
            [
                ("recharge", "wallet_recharge_failure"),
                (puja_service, "puja_booking_failure"),
            ],
        ),
    )
    .describe("payment abandoned on the backend, keyed by service")
}

/// Back navigation out of a payment screen, keyed on the screen `name`.
fn back_arrow_failure_rule(puja_screen: &str) -> Rule {
    Rule::new(
        "back_arrow_payment_failure",
        "back_arrow_clicked",
        any(vec![
            equals(Property::Name, puja_screen),
            equals(Property::Name, "wallet"),
        ]),
        RuleAction::by_value(
            Property::Name,
            [
                ("wallet", "wallet_recharge_failure"),
                (puja_screen, "puja_booking_failure"),
            ],
        ),
    )
    .describe("user backed out of the wallet or puja checkout")
}

fn login_rules(signup_app: &str, login_app: &str) -> [Rule; 2] {
    [
        channel_rule(
            "user_signup",
            "login_success",
            equals(Property::LoginType, "signup"),
            "registration_web",
            signup_app,
        )
        .describe("new user registered"),
        channel_rule(
            "user_login",
            "login_success",
            equals(Property::LoginType, "login"),
            "login_success_web",
            login_app,
        )
        .describe("returning user logged in"),
    ]
}

fn puja_funnel_rules() -> [Rule; 3] {
    [
        channel_rule(
            "sankalp_form_submitted",
            "cta_clicked",
            equals(Property::CtaText, "Submit Sankalp Form"),
            "purchase_started",
            "purchase_started_app",
        ),
        channel_rule(
            "puja_package_selected",
            "puja_step_completed",
            equals(Property::StepName, "select package"),
            "puja_package_selected",
            "puja_package_selected_app",
        ),
        channel_rule(
            "sankalp_filled",
            "puja_step_completed",
            equals(Property::StepName, "Sankalp & Checkout"),
            "sankalp_filled",
            "sankalp_filled_app",
        ),
    ]
}

fn call_rules() -> [Rule; 3] {
    [
        flag_rule(
            "first_call_completed",
            "service_ended",
            truthy(Property::IsPromotionalAction),
            "first_call_completed",
        ),
        flag_rule(
            "paid_call_completed",
            "service_ended",
            falsy(Property::IsPromotionalAction),
            "paid_call_completed",
        ),
        flag_rule(
            "free_call_triggered",
            "service_triggered",
            truthy(Property::IsPromotionalAction),
            "free_call_triggered",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_tables_are_valid() {
        for domain in Domain::ALL {
            let set = domain.rule_set();
            set.validate().expect("unique rule ids");
            assert_eq!(set.domain, domain.as_str());
            for rule in &set.rules {
                assert!(!rule.trigger.is_empty(), "{} has no trigger", rule.id);
            }
        }
    }

    #[test]
    fn parses_domain_names() {
        assert_eq!("astro".parse::<Domain>().ok(), Some(Domain::Wallet));
        assert_eq!("PUJA".parse::<Domain>().ok(), Some(Domain::Puja));
        assert!(matches!(
            "chat".parse::<Domain>(),
            Err(RuleError::UnknownDomain(_))
        ));
    }

    #[test]
    fn emitted_names_never_repeat_the_trigger_outside_login() {
        for domain in Domain::ALL {
            let set = domain.rule_set();
            for rule in set.rules.iter().filter(|rule| rule.id != "user_login") {
                assert!(
                    !rule.action.outputs().contains(&rule.trigger.as_str()),
                    "{}/{} re-emits its trigger",
                    domain,
                    rule.id
                );
            }
        }
    }
}
