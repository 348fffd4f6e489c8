//! Claim values
//!
//! Both the constraints carried by a claims request and the live values a
//! subject holds are represented by [`ClaimValue`]. Values decoded from JSON
//! never produce [`ClaimValue::Integer`] or [`ClaimValue::Strings`]: every JSON
//! number becomes a [`ClaimValue::Number`] and every JSON array an opaque
//! [`ClaimValue::Other`]. The integral and string-list variants only come from
//! natively produced values such as a user's group list.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A constraint or candidate value for a single claim
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value", into = "Value")]
pub enum ClaimValue {
    /// JSON boolean
    Bool(bool),

    /// Natively produced integral value
    Integer(i64),

    /// Floating point number, the only numeric form JSON decodes to
    Number(f64),

    /// String value
    String(String),

    /// Collection of strings, e.g. group memberships
    Strings(Vec<String>),

    /// Any other JSON shape
    Other(Value),
}

impl ClaimValue {
    /// Borrow the string payload, if this is a string
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ClaimValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Convert into a JSON value for embedding in a token response
    pub fn to_json(&self) -> Value {
        Value::from(self.clone())
    }
}

impl From<Value> for ClaimValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Bool(b) => ClaimValue::Bool(b),
            Value::Number(n) => match n.as_f64() {
                Some(f) => ClaimValue::Number(f),
                None => ClaimValue::Other(Value::Number(n)),
            },
            Value::String(s) => ClaimValue::String(s),
            other => ClaimValue::Other(other),
        }
    }
}

impl From<ClaimValue> for Value {
    fn from(value: ClaimValue) -> Self {
        match value {
            ClaimValue::Bool(b) => Value::Bool(b),
            ClaimValue::Integer(i) => Value::from(i),
            ClaimValue::Number(f) => serde_json::Number::from_f64(f)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            ClaimValue::String(s) => Value::String(s),
            ClaimValue::Strings(list) => Value::Array(list.into_iter().map(Value::String).collect()),
            ClaimValue::Other(v) => v,
        }
    }
}

impl From<bool> for ClaimValue {
    fn from(value: bool) -> Self {
        ClaimValue::Bool(value)
    }
}

impl From<i32> for ClaimValue {
    fn from(value: i32) -> Self {
        ClaimValue::Integer(i64::from(value))
    }
}

impl From<i64> for ClaimValue {
    fn from(value: i64) -> Self {
        ClaimValue::Integer(value)
    }
}

impl From<f64> for ClaimValue {
    fn from(value: f64) -> Self {
        ClaimValue::Number(value)
    }
}

impl From<&str> for ClaimValue {
    fn from(value: &str) -> Self {
        ClaimValue::String(value.to_string())
    }
}

impl From<String> for ClaimValue {
    fn from(value: String) -> Self {
        ClaimValue::String(value)
    }
}

impl From<Vec<String>> for ClaimValue {
    fn from(value: Vec<String>) -> Self {
        ClaimValue::Strings(value)
    }
}

impl From<&[String]> for ClaimValue {
    fn from(value: &[String]) -> Self {
        ClaimValue::Strings(value.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_numbers_decode_as_floating_point() {
        let value: ClaimValue = serde_json::from_value(json!(5)).unwrap();
        assert_eq!(value, ClaimValue::Number(5.0));

        let value: ClaimValue = serde_json::from_value(json!(2.5)).unwrap();
        assert_eq!(value, ClaimValue::Number(2.5));
    }

    #[test]
    fn test_json_arrays_stay_opaque() {
        let value: ClaimValue = serde_json::from_value(json!(["a", "b"])).unwrap();
        assert_eq!(value, ClaimValue::Other(json!(["a", "b"])));
    }

    #[test]
    fn test_integer_and_number_are_distinct_variants() {
        assert_ne!(ClaimValue::from(5i64), ClaimValue::from(5.0));
    }

    #[test]
    fn test_serialize_string_list() {
        let value = ClaimValue::from(vec!["admins".to_string(), "dev".to_string()]);
        assert_eq!(serde_json::to_value(&value).unwrap(), json!(["admins", "dev"]));
        assert_eq!(ClaimValue::from(7i64).to_json(), json!(7));
    }
}
