use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::property::{ExtractedProperties, Property};

/// Channel value selecting the web-specific output name.
pub const WEB_CHANNEL: &str = "web";

/// Rewrite computing the replacement event name once a guard holds.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RuleAction {
    /// Fixed output name.
    Rename { to: String },
    /// `web` channel (any case) takes `web`; every other channel, including
    /// missing or non-text ones, shares `app`.
    ByChannel { web: String, app: String },
    /// Looks the property's text up in `cases`; no entry means no name.
    ByValue {
        field: Property,
        cases: BTreeMap<String, String>,
    },
}

impl RuleAction {
    pub fn rename(to: impl Into<String>) -> Self {
        RuleAction::Rename { to: to.into() }
    }

    pub fn by_channel(web: impl Into<String>, app: impl Into<String>) -> Self {
        RuleAction::ByChannel {
            web: web.into(),
            app: app.into(),
        }
    }

    pub fn by_value<I, K, V>(field: Property, cases: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        RuleAction::ByValue {
            field,
            cases: cases
                .into_iter()
                .map(|(value, to)| (value.into(), to.into()))
                .collect(),
        }
    }

    /// Compute the new name, if this action can produce one for `props`.
    pub fn resolve(&self, props: &ExtractedProperties<'_>) -> Option<String> {
        match self {
            RuleAction::Rename { to } => Some(to.clone()),
            RuleAction::ByChannel { web, app } => {
                let is_web = props
                    .text(Property::UserChannel)
                    .map(|channel| channel.eq_ignore_ascii_case(WEB_CHANNEL))
                    .unwrap_or(false);
                Some(if is_web { web.clone() } else { app.clone() })
            }
            RuleAction::ByValue { field, cases } => props
                .text(*field)
                .and_then(|value| cases.get(value))
                .cloned(),
        }
    }

    /// Every name this action can emit.
    pub fn outputs(&self) -> Vec<&str> {
        match self {
            RuleAction::Rename { to } => vec![to.as_str()],
            RuleAction::ByChannel { web, app } => vec![web.as_str(), app.as_str()],
            RuleAction::ByValue { cases, .. } => cases.values().map(String::as_str).collect(),
        }
    }
}
