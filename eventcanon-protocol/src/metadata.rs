use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Per-call context handed over by the pipeline alongside each event.
///
/// No rule reads it today; it is carried so callers can pass whatever their
/// runtime provides without the filter rejecting it.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct Metadata(Value);

impl Metadata {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn empty() -> Self {
        Self(Value::Null)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }
}

impl From<Value> for Metadata {
    fn from(value: Value) -> Self {
        Self(value)
    }
}
