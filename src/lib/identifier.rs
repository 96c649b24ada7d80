use super::codec::JsonCodec;
use super::error::{json_type_name, Error, Result};
use serde_json::Value;
use std::fmt;

/// The identifier of a feature, either a string or an integer.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum FeatureIdentifier {
    String(String),
    Int(i64),
}

impl JsonCodec for FeatureIdentifier {
    /// Tries a string first, then an integer. Quoted numbers such as `"2"`
    /// stay strings.
    fn from_json(value: &Value) -> Result<Self> {
        if let Some(id) = value.as_str() {
            Ok(FeatureIdentifier::String(id.to_string()))
        } else if let Some(id) = value.as_i64() {
            Ok(FeatureIdentifier::Int(id))
        } else {
            Err(Error::UnrecognizedIdentifierType(describe(value)))
        }
    }

    fn to_json(&self) -> Result<Value> {
        let value = match self {
            FeatureIdentifier::String(id) => Value::String(id.clone()),
            FeatureIdentifier::Int(id) => Value::Number((*id).into()),
        };
        Ok(value)
    }
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Number(n) if n.is_f64() => "a fractional number",
        Value::Number(_) => "an integer out of range",
        other => json_type_name(other),
    }
}

serde_via_codec!(FeatureIdentifier);

impl fmt::Display for FeatureIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeatureIdentifier::String(id) => f.write_str(id),
            FeatureIdentifier::Int(id) => write!(f, "{}", id),
        }
    }
}

impl From<&str> for FeatureIdentifier {
    fn from(id: &str) -> Self {
        FeatureIdentifier::String(id.to_string())
    }
}

impl From<String> for FeatureIdentifier {
    fn from(id: String) -> Self {
        FeatureIdentifier::String(id)
    }
}

impl From<i64> for FeatureIdentifier {
    fn from(id: i64) -> Self {
        FeatureIdentifier::Int(id)
    }
}
