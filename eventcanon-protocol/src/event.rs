use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Property bag attached to an event.
pub type Properties = Map<String, Value>;

/// A raw tracking event as emitted by client apps.
///
/// The name travels under the `event` key only. Every other top-level key,
/// including a page or screen `name`, is kept as-is so the forwarded event
/// has the same shape it arrived with.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Event {
    #[serde(rename = "event", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_properties",
        skip_serializing_if = "Option::is_none"
    )]
    pub properties: Option<Properties>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Event {
    /// Create an event with the given name and no properties.
    pub fn new(name: impl Into<String>) -> Self {
        EventBuilder::new(name).build()
    }

    /// Event name, if present and non-empty.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref().filter(|name| !name.is_empty())
    }

    /// Look up a single property.
    pub fn property(&self, key: &str) -> Option<&Value> {
        self.properties.as_ref().and_then(|props| props.get(key))
    }

    /// Replace the event name.
    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
    }

    /// Builder-style property insert.
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties
            .get_or_insert_with(Map::new)
            .insert(key.into(), value.into());
        self
    }
}

/// Builder helper for events carrying several properties.
pub struct EventBuilder {
    event: Event,
}

impl EventBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            event: Event {
                name: Some(name.into()),
                properties: None,
                extra: Map::new(),
            },
        }
    }

    pub fn property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.event = self.event.with_property(key, value);
        self
    }

    pub fn extra(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.event.extra.insert(key.into(), value.into());
        self
    }

    pub fn build(self) -> Event {
        self.event
    }
}

// A non-object `properties` value carries nothing a rule can read.
fn lenient_properties<'de, D>(deserializer: D) -> Result<Option<Properties>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Object(map) => Ok(Some(map)),
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reads_event_key_and_keeps_extra_fields() {
        let event: Event = serde_json::from_value(json!({
            "event": "payment_completed",
            "userId": "u-1",
            "properties": {"service": "recharge"}
        }))
        .expect("valid event");

        assert_eq!(event.name(), Some("payment_completed"));
        assert_eq!(event.property("service"), Some(&json!("recharge")));
        assert_eq!(event.extra.get("userId"), Some(&json!("u-1")));

        let out = serde_json::to_value(&event).expect("serializable");
        assert_eq!(out["event"], json!("payment_completed"));
        assert_eq!(out["userId"], json!("u-1"));
    }

    #[test]
    fn top_level_name_is_passed_through() {
        let event: Event = serde_json::from_value(json!({
            "event": "payment_completed",
            "name": "Checkout",
            "properties": {"service": "recharge"}
        }))
        .expect("event and name keys together");

        assert_eq!(event.name(), Some("payment_completed"));
        assert_eq!(event.extra.get("name"), Some(&json!("Checkout")));

        let out = serde_json::to_value(&event).expect("serializable");
        assert_eq!(out["event"], json!("payment_completed"));
        assert_eq!(out["name"], json!("Checkout"));
    }

    #[test]
    fn name_key_alone_is_not_the_event_name() {
        let event: Event =
            serde_json::from_value(json!({"name": "Home"})).expect("valid event");
        assert_eq!(event.name(), None);
        assert_eq!(event.extra.get("name"), Some(&json!("Home")));
    }

    #[test]
    fn tolerates_missing_or_odd_properties() {
        let event: Event = serde_json::from_value(json!({"event": "x", "properties": null}))
            .expect("null properties");
        assert!(event.properties.is_none());

        let event: Event = serde_json::from_value(json!({"event": "x", "properties": [1, 2]}))
            .expect("array properties");
        assert!(event.properties.is_none());
        assert_eq!(event.property("service"), None);
    }

    #[test]
    fn empty_name_reads_as_absent() {
        let event = Event::new("");
        assert_eq!(event.name(), None);
    }
}
