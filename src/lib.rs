//! EventCanon: rule-driven filter for analytics tracking events.
//!
//! Raw client events arrive with a wide vocabulary of names. For each product
//! domain an allowlist decides what is eligible and an ordered rule table
//! renames eligible events into the small, stable vocabulary analytics
//! destinations expect. Anything else is dropped.
//!
//! # Crates
//!
//! * `core`: configuration, logging bootstrap and the shared error type
//! * `protocol`: event and metadata wire shapes
//! * `rules`: property extraction, guards, actions, engine and domain tables

use std::sync::OnceLock;

pub mod core {
    pub use eventcanon_core::*;
}

pub mod protocol {
    pub use eventcanon_protocol::*;
}

pub mod rules {
    pub use eventcanon_rules::*;
}

pub use eventcanon_protocol::{Event, EventBuilder, Metadata};
pub use eventcanon_rules::{Domain, DropReason, RuleEngine, RuleRegistry, Verdict};

fn builtin_registry() -> &'static RuleRegistry {
    static REGISTRY: OnceLock<RuleRegistry> = OnceLock::new();
    REGISTRY.get_or_init(RuleRegistry::builtin)
}

/// Per-event entry point for a pipeline using the built-in tables.
///
/// Returns the renamed event, or `None` when it must not be forwarded.
pub fn transform_event(domain: Domain, event: Event, metadata: &Metadata) -> Option<Event> {
    match builtin_registry().evaluate(domain.as_str(), event, metadata) {
        Ok(verdict) => verdict.into_event(),
        Err(err) => {
            tracing::error!(error = %err, "built-in domain missing from registry");
            None
        }
    }
}
