use eventcanon_protocol::Event;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Event properties the rule tables know how to read.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Property {
    UserChannel,
    Service,
    CtaText,
    LoginType,
    Name,
    StepName,
    FeatureType,
    IsFirstUser,
    IsFirstWallet,
    IsPromotionalAction,
}

impl Property {
    pub const COUNT: usize = 10;

    pub const ALL: [Property; Property::COUNT] = [
        Property::UserChannel,
        Property::Service,
        Property::CtaText,
        Property::LoginType,
        Property::Name,
        Property::StepName,
        Property::FeatureType,
        Property::IsFirstUser,
        Property::IsFirstWallet,
        Property::IsPromotionalAction,
    ];

    /// Key under which the property appears in the event's property bag.
    pub fn key(self) -> &'static str {
        match self {
            Property::UserChannel => "user_channel",
            Property::Service => "service",
            Property::CtaText => "cta_text",
            Property::LoginType => "login_type",
            Property::Name => "name",
            Property::StepName => "step_name",
            Property::FeatureType => "feature_type",
            Property::IsFirstUser => "is_first_user",
            Property::IsFirstWallet => "is_first_wallet",
            Property::IsPromotionalAction => "is_promotional_action",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// A single extracted property value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PropertyValue<'a> {
    /// Key absent from the bag (or no bag at all).
    Unset,
    Bool(bool),
    Text(&'a str),
    /// Numbers, arrays, objects and explicit `null`.
    Other(&'a Value),
}

impl<'a> PropertyValue<'a> {
    fn from_json(value: Option<&'a Value>) -> Self {
        match value {
            None => PropertyValue::Unset,
            Some(Value::Bool(flag)) => PropertyValue::Bool(*flag),
            Some(Value::String(text)) => PropertyValue::Text(text),
            Some(other) => PropertyValue::Other(other),
        }
    }

    /// Loose truthiness as tracking clients understand it: unset, `false`,
    /// empty text, `null` and zero are falsy.
    pub fn is_truthy(&self) -> bool {
        match self {
            PropertyValue::Unset => false,
            PropertyValue::Bool(flag) => *flag,
            PropertyValue::Text(text) => !text.is_empty(),
            PropertyValue::Other(Value::Null) => false,
            PropertyValue::Other(Value::Number(number)) => {
                number.as_f64().map(|n| n != 0.0 && !n.is_nan()).unwrap_or(true)
            }
            PropertyValue::Other(_) => true,
        }
    }

    pub fn as_text(&self) -> Option<&'a str> {
        match *self {
            PropertyValue::Text(text) => Some(text),
            _ => None,
        }
    }
}

/// Snapshot of every recognised property, taken once per evaluation.
#[derive(Debug, Clone)]
pub struct ExtractedProperties<'a> {
    values: [PropertyValue<'a>; Property::COUNT],
}

impl<'a> ExtractedProperties<'a> {
    pub fn extract(event: &'a Event) -> Self {
        let mut values = [PropertyValue::Unset; Property::COUNT];
        if let Some(props) = &event.properties {
            for property in Property::ALL {
                values[property.index()] = PropertyValue::from_json(props.get(property.key()));
            }
        }
        Self { values }
    }

    pub fn get(&self, property: Property) -> PropertyValue<'a> {
        self.values[property.index()]
    }

    pub fn text(&self, property: Property) -> Option<&'a str> {
        self.get(property).as_text()
    }

    pub fn is_truthy(&self, property: Property) -> bool {
        self.get(property).is_truthy()
    }
}
