use super::codec::JsonCodec;
use super::error::{Error, Result};
use serde_json::{Number, Value};
use std::collections::BTreeMap;
use std::fmt;
use std::ops::Index;

/// An untyped JSON value, used as the default feature properties payload.
///
/// Integers and doubles are kept apart: `Int(1)` and `Double(1.0)` are not
/// equal, although both answer `as_i64() == Some(1)`.
#[derive(Clone, Debug, PartialEq)]
pub enum JsonValue {
    Null,
    Bool(bool),
    Int(i64),
    Double(f64),
    String(String),
    Array(Vec<JsonValue>),
    Object(BTreeMap<String, JsonValue>),
}

static NULL: JsonValue = JsonValue::Null;

impl Default for JsonValue {
    fn default() -> Self {
        JsonValue::Null
    }
}

impl JsonValue {
    pub fn is_null(&self) -> bool {
        matches!(self, JsonValue::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            JsonValue::Bool(value) => Some(*value),
            _ => None,
        }
    }

    /// Integer value; doubles qualify when they have no fractional part and
    /// fit an `i64`.
    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            JsonValue::Int(value) => Some(value),
            JsonValue::Double(value)
                if value.fract() == 0.0 && value >= i64::MIN as f64 && value < i64::MAX as f64 =>
            {
                Some(value as i64)
            }
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            JsonValue::Int(value) => Some(value as f64),
            JsonValue::Double(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            JsonValue::String(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[JsonValue]> {
        match self {
            JsonValue::Array(values) => Some(values),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&BTreeMap<String, JsonValue>> {
        match self {
            JsonValue::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Number of elements of an array or entries of an object.
    pub fn len(&self) -> Option<usize> {
        match self {
            JsonValue::Array(values) => Some(values.len()),
            JsonValue::Object(map) => Some(map.len()),
            _ => None,
        }
    }

    pub fn get(&self, key: &str) -> Option<&JsonValue> {
        self.as_object()?.get(key)
    }

    pub fn get_index(&self, index: usize) -> Option<&JsonValue> {
        self.as_array()?.get(index)
    }
}

fn decode_leaf(value: &Value) -> Result<JsonValue> {
    match value {
        Value::Null => Ok(JsonValue::Null),
        Value::String(s) => Ok(JsonValue::String(s.clone())),
        Value::Number(n) => {
            if let Some(int) = n.as_i64() {
                Ok(JsonValue::Int(int))
            } else if let Some(double) = n.as_f64() {
                Ok(JsonValue::Double(double))
            } else {
                Err(Error::UnrecognizedLeaf)
            }
        }
        Value::Bool(b) => Ok(JsonValue::Bool(*b)),
        Value::Array(_) | Value::Object(_) => Err(Error::UnrecognizedLeaf),
    }
}

impl JsonCodec for JsonValue {
    fn from_json(value: &Value) -> Result<Self> {
        match value {
            Value::Object(map) => {
                let object = map
                    .iter()
                    .map(|(key, value)| Ok((key.clone(), JsonValue::from_json(value)?)))
                    .collect::<Result<_>>()?;
                Ok(JsonValue::Object(object))
            }
            Value::Array(items) => {
                let array = items
                    .iter()
                    .map(JsonValue::from_json)
                    .collect::<Result<_>>()?;
                Ok(JsonValue::Array(array))
            }
            leaf => decode_leaf(leaf),
        }
    }

    fn to_json(&self) -> Result<Value> {
        Ok(self.into())
    }
}

impl From<&JsonValue> for Value {
    fn from(value: &JsonValue) -> Self {
        match value {
            JsonValue::Null => Value::Null,
            JsonValue::Bool(value) => Value::Bool(*value),
            JsonValue::Int(value) => Value::Number((*value).into()),
            // non-finite doubles have no JSON representation
            JsonValue::Double(value) => Number::from_f64(*value).map_or(Value::Null, Value::Number),
            JsonValue::String(value) => Value::String(value.clone()),
            JsonValue::Array(values) => Value::Array(values.iter().map(Value::from).collect()),
            JsonValue::Object(map) => Value::Object(
                map.iter()
                    .map(|(key, value)| (key.clone(), Value::from(value)))
                    .collect(),
            ),
        }
    }
}

serde_via_codec!(JsonValue);

impl fmt::Display for JsonValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&Value::from(self), f)
    }
}

impl Index<&str> for JsonValue {
    type Output = JsonValue;

    /// Yields `Null` for missing keys and non-objects.
    fn index(&self, key: &str) -> &JsonValue {
        self.get(key).unwrap_or(&NULL)
    }
}

impl Index<usize> for JsonValue {
    type Output = JsonValue;

    fn index(&self, index: usize) -> &JsonValue {
        self.get_index(index).unwrap_or(&NULL)
    }
}

impl From<()> for JsonValue {
    fn from(_: ()) -> Self {
        JsonValue::Null
    }
}

impl From<bool> for JsonValue {
    fn from(value: bool) -> Self {
        JsonValue::Bool(value)
    }
}

macro_rules! from_integer {
    ($($ty:ty),*) => {$(
        impl From<$ty> for JsonValue {
            fn from(value: $ty) -> Self {
                JsonValue::Int(value.into())
            }
        }
    )*};
}

from_integer!(i8, i16, i32, i64, u8, u16, u32);

impl From<f32> for JsonValue {
    fn from(value: f32) -> Self {
        JsonValue::Double(value.into())
    }
}

impl From<f64> for JsonValue {
    fn from(value: f64) -> Self {
        JsonValue::Double(value)
    }
}

impl From<&str> for JsonValue {
    fn from(value: &str) -> Self {
        JsonValue::String(value.to_string())
    }
}

impl From<String> for JsonValue {
    fn from(value: String) -> Self {
        JsonValue::String(value)
    }
}

impl<T: Into<JsonValue>> From<Vec<T>> for JsonValue {
    fn from(values: Vec<T>) -> Self {
        JsonValue::Array(values.into_iter().map(Into::into).collect())
    }
}

impl From<BTreeMap<String, JsonValue>> for JsonValue {
    fn from(map: BTreeMap<String, JsonValue>) -> Self {
        JsonValue::Object(map)
    }
}

impl<T: Into<JsonValue>> From<Option<T>> for JsonValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(JsonValue::Null, Into::into)
    }
}

impl std::iter::FromIterator<JsonValue> for JsonValue {
    fn from_iter<I: IntoIterator<Item = JsonValue>>(iter: I) -> Self {
        JsonValue::Array(iter.into_iter().collect())
    }
}

impl std::iter::FromIterator<(String, JsonValue)> for JsonValue {
    fn from_iter<I: IntoIterator<Item = (String, JsonValue)>>(iter: I) -> Self {
        JsonValue::Object(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::from_str;
    use crate::error::ErrorKind;
    use crate::test_helpers::json_object;
    use serde_json::json;

    #[test]
    fn numbers_without_fraction_are_integers() {
        let value: JsonValue = from_str("[1, -7, 1.0, 2.5, 1e3]").unwrap();
        assert_eq!(
            value,
            JsonValue::Array(vec![
                JsonValue::Int(1),
                JsonValue::Int(-7),
                JsonValue::Double(1.0),
                JsonValue::Double(2.5),
                JsonValue::Double(1000.0),
            ])
        );
    }

    #[test]
    fn quoted_numbers_stay_strings() {
        let value: JsonValue = from_str(r#""42""#).unwrap();
        assert_eq!(value, JsonValue::String("42".into()));
    }

    #[test]
    fn integers_beyond_i64_become_doubles() {
        let value: JsonValue = from_str("18446744073709551615").unwrap();
        assert_eq!(value, JsonValue::Double(18_446_744_073_709_551_615.0));
    }

    #[test]
    fn int_and_double_are_distinct() {
        assert_ne!(JsonValue::Int(1), JsonValue::Double(1.0));
        assert_eq!(JsonValue::Double(1.0).as_i64(), Some(1));
        assert_eq!(JsonValue::Double(1.5).as_i64(), None);
        assert_eq!(JsonValue::Int(3).as_f64(), Some(3.0));
    }

    #[test]
    fn nested_objects_are_preserved() {
        let value: JsonValue =
            from_str(r#"{"prop0": "value0", "prop1": {"this": "that"}, "extra": [null, true]}"#)
                .unwrap();
        let expected = json_object(vec![
            ("prop0", "value0".into()),
            ("prop1", json_object(vec![("this", "that".into())])),
            ("extra", vec![JsonValue::Null, JsonValue::Bool(true)].into()),
        ]);
        assert_eq!(value, expected);
        assert_eq!(value["prop1"]["this"].as_str(), Some("that"));
        assert_eq!(value.len(), Some(3));
    }

    #[test]
    fn index_yields_null_when_absent() {
        let value = json_object(vec![("a", JsonValue::Int(1))]);
        assert!(value["missing"].is_null());
        assert!(value[0].is_null());
        assert!(JsonValue::Int(1)["a"].is_null());
    }

    #[test]
    fn leaves_in_container_position_are_rejected() {
        let err = decode_leaf(&json!([])).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnrecognizedLeaf);
    }

    #[test]
    fn encodes_every_variant() {
        let value = json_object(vec![
            ("null", JsonValue::Null),
            ("bool", false.into()),
            ("int", 7.into()),
            ("double", 0.5.into()),
            ("string", "s".into()),
            ("array", vec![1, 2].into()),
        ]);
        let expected = json!({
            "null": null,
            "bool": false,
            "int": 7,
            "double": 0.5,
            "string": "s",
            "array": [1, 2]
        });
        assert_eq!(value.to_json().unwrap(), expected);
        assert_eq!(Value::from(&value), expected);
        assert_eq!(
            value.to_string(),
            r#"{"array":[1,2],"bool":false,"double":0.5,"int":7,"null":null,"string":"s"}"#
        );
    }

    #[test]
    fn non_finite_doubles_encode_as_null() {
        assert_eq!(JsonValue::Double(f64::NAN).to_json().unwrap(), Value::Null);
        let value = JsonValue::Array(vec![f64::INFINITY.into(), 1.5.into()]);
        assert_eq!(Value::from(&value), json!([null, 1.5]));
        assert_eq!(value.to_string(), "[null,1.5]");
    }

    #[test]
    fn round_trips_through_text() {
        let value = json_object(vec![
            ("a", vec![JsonValue::Double(1.0), JsonValue::Int(1)].into()),
            ("b", json_object(vec![("c", JsonValue::Null)])),
            ("d", Some("x").into()),
        ]);
        let text = value.to_string();
        let decoded: JsonValue = from_str(&text).unwrap();
        assert_eq!(decoded, value);
        assert_eq!(from_str::<JsonValue>(&text).unwrap(), decoded);
    }

    #[test]
    fn serde_integration() {
        let value: JsonValue = serde_json::from_str(r#"{"k": [1, "two"]}"#).unwrap();
        assert_eq!(value["k"][1].as_str(), Some("two"));
        assert_eq!(serde_json::to_value(&value).unwrap(), json!({"k": [1, "two"]}));
    }
}
