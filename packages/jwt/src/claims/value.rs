//! Claim values
//!
//! A claim value is a closed variant instead of an open dynamic map. Registered
//! claims only ever use the first three shapes; anything else a custom claim
//! carries is kept as raw JSON.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// A single claim value
#[derive(Debug, Clone)]
pub enum ClaimValue {
    /// JSON string
    String(String),
    /// JSON integer that fits in `i64` (epoch seconds for time claims)
    Integer(i64),
    /// JSON array made only of strings
    StringList(Vec<String>),
    /// Any other JSON value: booleans, floats, null, objects, mixed arrays
    Json(Value),
}

impl ClaimValue {
    /// Normalize a JSON value into the narrowest matching variant
    #[must_use]
    pub fn from_json(value: Value) -> Self {
        match value {
            Value::String(s) => ClaimValue::String(s),
            Value::Number(n) if n.is_i64() => match n.as_i64() {
                Some(i) => ClaimValue::Integer(i),
                None => ClaimValue::Json(Value::Number(n)),
            },
            Value::Array(items) if items.iter().all(Value::is_string) => ClaimValue::StringList(
                items
                    .into_iter()
                    .filter_map(|item| match item {
                        Value::String(s) => Some(s),
                        _ => None,
                    })
                    .collect(),
            ),
            other => ClaimValue::Json(other),
        }
    }

    /// JSON representation of this value
    #[must_use]
    pub fn to_json(&self) -> Value {
        match self {
            ClaimValue::String(s) => Value::String(s.clone()),
            ClaimValue::Integer(i) => Value::from(*i),
            ClaimValue::StringList(items) => {
                Value::Array(items.iter().cloned().map(Value::String).collect())
            }
            ClaimValue::Json(v) => v.clone(),
        }
    }

    /// Borrow as a string, if this is a string claim
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ClaimValue::String(s) => Some(s),
            ClaimValue::Json(Value::String(s)) => Some(s),
            _ => None,
        }
    }

    /// Read as an integer, if this is an integer claim
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ClaimValue::Integer(i) => Some(*i),
            ClaimValue::Json(v) => v.as_i64(),
            _ => None,
        }
    }

    /// Read as a list of strings, if this is a string-list claim or a JSON
    /// array holding only strings
    #[must_use]
    pub fn as_string_list(&self) -> Option<Vec<String>> {
        match self {
            ClaimValue::StringList(items) => Some(items.clone()),
            ClaimValue::Json(Value::Array(items)) => items
                .iter()
                .map(|item| item.as_str().map(str::to_string))
                .collect(),
            _ => None,
        }
    }

    /// Read as a boolean, if this is a boolean claim
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ClaimValue::Json(v) => v.as_bool(),
            _ => None,
        }
    }
}

// Equality is over the JSON representation so that `Json(Value::String(..))`
// and `String(..)` compare equal.
impl PartialEq for ClaimValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (ClaimValue::String(a), ClaimValue::String(b)) => a == b,
            (ClaimValue::Integer(a), ClaimValue::Integer(b)) => a == b,
            (ClaimValue::StringList(a), ClaimValue::StringList(b)) => a == b,
            _ => self.to_json() == other.to_json(),
        }
    }
}

impl Serialize for ClaimValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ClaimValue::String(s) => serializer.serialize_str(s),
            ClaimValue::Integer(i) => serializer.serialize_i64(*i),
            ClaimValue::StringList(items) => items.serialize(serializer),
            ClaimValue::Json(v) => v.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for ClaimValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(ClaimValue::from_json)
    }
}

impl From<String> for ClaimValue {
    fn from(value: String) -> Self {
        ClaimValue::String(value)
    }
}

impl From<&str> for ClaimValue {
    fn from(value: &str) -> Self {
        ClaimValue::String(value.to_string())
    }
}

impl From<i64> for ClaimValue {
    fn from(value: i64) -> Self {
        ClaimValue::Integer(value)
    }
}

impl From<Vec<String>> for ClaimValue {
    fn from(value: Vec<String>) -> Self {
        ClaimValue::StringList(value)
    }
}

impl From<bool> for ClaimValue {
    fn from(value: bool) -> Self {
        ClaimValue::Json(Value::Bool(value))
    }
}

impl From<Value> for ClaimValue {
    fn from(value: Value) -> Self {
        ClaimValue::from_json(value)
    }
}
