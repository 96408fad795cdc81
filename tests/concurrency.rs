// Tests covering concurrent evaluation against one shared registry.
use std::sync::Arc;
use std::thread;

use eventcanon::{EventBuilder, Metadata, RuleRegistry};

#[test]
fn shared_registry_evaluates_in_parallel() {
    let registry = Arc::new(RuleRegistry::builtin());
    let channels = ["web", "ios", "android", "WEB"];

    let handles: Vec<_> = (0..8)
        .map(|worker| {
            let registry = Arc::clone(&registry);
            thread::spawn(move || {
                let mut names = Vec::new();
                for round in 0..200 {
                    let channel = channels[(worker + round) % channels.len()];
                    let event = EventBuilder::new("login_success")
                        .property("login_type", "login")
                        .property("user_channel", channel)
                        .build();
                    let verdict = registry
                        .evaluate("puja", event, &Metadata::empty())
                        .expect("puja registered");
                    names.push((channel, verdict.event_name().map(str::to_owned)));
                }
                names
            })
        })
        .collect();

    for handle in handles {
        for (channel, name) in handle.join().expect("worker finished") {
            let expected = if channel.eq_ignore_ascii_case("web") {
                "login_success_web"
            } else {
                "login_success_app"
            };
            assert_eq!(name.as_deref(), Some(expected));
        }
    }
}
