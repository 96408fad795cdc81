use super::*;
use crate::rule_set::Allowlist;

const ALLOWLIST: [&str; 8] = [
    "cta_clicked",
    "back_arrow_clicked",
    "puja_step_completed",
    "payment_completed",
    "login_success",
    "payment_failure",
    "service_triggered",
    "service_ended",
];

/// Puja domain: booking funnel, logins and consultation calls.
pub(super) fn rule_set() -> RuleSet {
    let [sankalp_form, package_selected, sankalp_filled] = puja_funnel_rules();
    let [signup, login] = login_rules("registration_app", "login_success_app");
    let [first_call, paid_call, free_call] = call_rules();

    let rules = vec![
        channel_rule(
            "puja_payment_completed",
            "payment_completed",
            equals(Property::FeatureType, "puja"),
            "purchase_completed",
            "puja_booking_app",
        )
        .describe("puja booking paid, split by platform"),
        payment_failure_rule("puja"),
        sankalp_form,
        signup,
        login,
        back_arrow_failure_rule("puja_detail"),
        package_selected,
        sankalp_filled,
        first_call,
        paid_call,
        free_call,
    ];

    RuleSet {
        domain: Domain::Puja.as_str().to_string(),
        allowlist: Allowlist::new(ALLOWLIST),
        rules,
    }
}
