// Fuzz target feeding arbitrary input through event parsing and both domain tables.
#![no_main]

use eventcanon_protocol::{Event, Metadata};
use eventcanon_rules::{Domain, RuleEngine};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(event) = serde_json::from_slice::<Event>(data) else {
        return;
    };

    for domain in Domain::ALL {
        let engine = RuleEngine::new(domain.rule_set());
        let before = event.properties.clone();
        let mut candidate = event.clone();
        let outcome = engine.apply(&mut candidate);

        assert_eq!(candidate.properties, before);
        if !outcome.should_emit() {
            assert_eq!(candidate.name, event.name);
        }
        let _ = engine.evaluate(event.clone(), &Metadata::empty());
    }
});
