use super::*;
use crate::rule_set::Allowlist;

const ALLOWLIST: [&str; 6] = [
    "back_arrow_clicked",
    "payment_completed",
    "login_success",
    "payment_failure",
    "service_triggered",
    "service_ended",
];

/// Wallet domain: recharges, logins and consultation calls.
///
/// The puja funnel entries are kept but off. The two recharge-order rules read
/// `is_first_wallet`, which wallet clients do not send yet; they stay off until
/// it is populated, since enabling them overrides the channel-keyed recharge
/// name on every recharge.
pub(super) fn rule_set() -> RuleSet {
    let [sankalp_form, package_selected, sankalp_filled] = puja_funnel_rules();
    let [signup, login] = login_rules("registration_completed", "login_success");
    let [first_call, paid_call, free_call] = call_rules();

    let rules = vec![
        channel_rule(
            "wallet_recharge_completed",
            "payment_completed",
            equals(Property::Service, "recharge"),
            "total_wallet_recharge_web",
            "total_wallet_recharge",
        )
        .describe("wallet recharge paid, split by platform"),
        payment_failure_rule("#puja"),
        sankalp_form.disabled(),
        signup,
        login,
        back_arrow_failure_rule("#puja_detail"),
        package_selected.disabled(),
        sankalp_filled.disabled(),
        first_call,
        paid_call,
        free_call,
        flag_rule(
            "repeat_wallet_recharge",
            "payment_completed",
            all(vec![
                falsy(Property::IsFirstWallet),
                equals(Property::Service, "recharge"),
            ]),
            "wallet_recharge_success",
        )
        .describe("second and later recharges")
        .disabled(),
        flag_rule(
            "first_wallet_recharge",
            "payment_completed",
            all(vec![
                truthy(Property::IsFirstWallet),
                equals(Property::Service, "recharge"),
            ]),
            "astro_first_recharge",
        )
        .describe("first recharge of a wallet")
        .disabled(),
    ];

    RuleSet {
        domain: Domain::Wallet.as_str().to_string(),
        allowlist: Allowlist::new(ALLOWLIST),
        rules,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{RuleEngine, Verdict};
    use crate::outcome::DropReason;
    use eventcanon_protocol::{Event, EventBuilder, Metadata};
    use test_case::test_case;

    fn run(event: Event) -> Verdict {
        RuleEngine::new(rule_set()).evaluate(event, &Metadata::empty())
    }

    #[test_case("web", "total_wallet_recharge_web" ; "web")]
    #[test_case("WEB", "total_wallet_recharge_web" ; "upper web")]
    #[test_case("ios", "total_wallet_recharge" ; "ios")]
    #[test_case("android", "total_wallet_recharge" ; "android")]
    #[test_case("weird-value", "total_wallet_recharge" ; "unknown channel")]
    fn recharge_split_by_channel(channel: &str, expected: &str) {
        let event = EventBuilder::new("payment_completed")
            .property("service", "recharge")
            .property("user_channel", channel)
            .build();
        assert_eq!(run(event).event_name(), Some(expected));
    }

    #[test]
    fn recharge_without_channel_takes_app_name() {
        let event = EventBuilder::new("payment_completed")
            .property("service", "recharge")
            .build();
        assert_eq!(run(event).event_name(), Some("total_wallet_recharge"));
    }

    #[test]
    fn payment_of_other_service_is_dropped() {
        let event = EventBuilder::new("payment_completed")
            .property("service", "puja")
            .build();
        assert_eq!(run(event), Verdict::Dropped(DropReason::NoRuleMatched));
    }

    #[test_case("android", "registration_completed" ; "app")]
    #[test_case("web", "registration_web" ; "web")]
    fn signup(channel: &str, expected: &str) {
        let event = EventBuilder::new("login_success")
            .property("login_type", "signup")
            .property("user_channel", channel)
            .build();
        assert_eq!(run(event).event_name(), Some(expected));
    }

    #[test]
    fn app_login_keeps_its_name() {
        let event = EventBuilder::new("login_success")
            .property("login_type", "login")
            .property("user_channel", "ios")
            .build();
        assert_eq!(run(event).event_name(), Some("login_success"));
    }

    #[test]
    fn payment_failure_guard_never_holds() {
        for service in ["recharge", "#puja"] {
            let event = EventBuilder::new("payment_failure")
                .property("service", service)
                .build();
            assert!(run(event).is_dropped());
        }
    }

    #[test_case("wallet", "wallet_recharge_failure" ; "wallet screen")]
    #[test_case("#puja_detail", "puja_booking_failure" ; "puja screen")]
    fn back_arrow_failure(screen: &str, expected: &str) {
        let event = EventBuilder::new("back_arrow_clicked")
            .property("name", screen)
            .build();
        assert_eq!(run(event).event_name(), Some(expected));
    }

    #[test]
    fn back_arrow_on_plain_puja_screen_is_dropped() {
        let event = EventBuilder::new("back_arrow_clicked")
            .property("name", "puja_detail")
            .build();
        assert!(run(event).is_dropped());
    }

    #[test]
    fn puja_funnel_is_not_forwarded() {
        let event = EventBuilder::new("puja_step_completed")
            .property("step_name", "select package")
            .build();
        assert_eq!(run(event), Verdict::Dropped(DropReason::NotAllowlisted));
    }

    #[test]
    fn promotional_flag_splits_completed_calls() {
        let free = EventBuilder::new("service_ended")
            .property("is_promotional_action", true)
            .build();
        let paid = EventBuilder::new("service_ended")
            .property("is_promotional_action", false)
            .build();
        let unflagged = Event::new("service_ended");

        assert_eq!(run(free).event_name(), Some("first_call_completed"));
        assert_eq!(run(paid).event_name(), Some("paid_call_completed"));
        assert_eq!(run(unflagged).event_name(), Some("paid_call_completed"));
    }

    #[test]
    fn only_promotional_calls_report_trigger() {
        let free = EventBuilder::new("service_triggered")
            .property("is_promotional_action", true)
            .build();
        assert_eq!(run(free).event_name(), Some("free_call_triggered"));
        assert!(run(Event::new("service_triggered")).is_dropped());
    }

    #[test]
    fn enabled_recharge_order_rules_overwrite_channel_name() {
        let set = rule_set()
            .with_enabled("repeat_wallet_recharge", true)
            .and_then(|set| set.with_enabled("first_wallet_recharge", true))
            .expect("known rules");
        let engine = RuleEngine::new(set);

        let first = EventBuilder::new("payment_completed")
            .property("service", "recharge")
            .property("user_channel", "web")
            .property("is_first_wallet", true)
            .build();
        let mut renamed = first.clone();
        let outcome = engine.apply(&mut renamed);
        assert_eq!(
            outcome.applied_rules,
            vec!["wallet_recharge_completed", "first_wallet_recharge"]
        );
        assert_eq!(renamed.name(), Some("astro_first_recharge"));

        let repeat = EventBuilder::new("payment_completed")
            .property("service", "recharge")
            .property("user_channel", "web")
            .build();
        assert_eq!(
            engine.evaluate(repeat, &Metadata::empty()).event_name(),
            Some("wallet_recharge_success")
        );
    }
}
