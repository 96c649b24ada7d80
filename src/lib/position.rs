use super::codec::JsonCodec;
use super::error::{json_type_name, Error, Result};
use serde_json::{Number, Value};

/// The fundamental geometry construct, written on the wire as
/// `[longitude, latitude]` or `[longitude, latitude, elevation]`.
///
/// JSON has no NaN or infinity: a non-finite coordinate encodes as `null`,
/// and decoding that output fails with `MalformedPosition`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Position {
    pub longitude: f64,
    pub latitude: f64,
    pub elevation: Option<f64>,
}

impl Position {
    pub fn new(longitude: f64, latitude: f64) -> Self {
        Position {
            longitude,
            latitude,
            elevation: None,
        }
    }

    pub fn with_elevation(longitude: f64, latitude: f64, elevation: f64) -> Self {
        Position {
            longitude,
            latitude,
            elevation: Some(elevation),
        }
    }
}

impl From<[f64; 2]> for Position {
    fn from(coordinates: [f64; 2]) -> Self {
        Position::new(coordinates[0], coordinates[1])
    }
}

impl From<[f64; 3]> for Position {
    fn from(coordinates: [f64; 3]) -> Self {
        Position::with_elevation(coordinates[0], coordinates[1], coordinates[2])
    }
}

impl From<(f64, f64)> for Position {
    fn from((longitude, latitude): (f64, f64)) -> Self {
        Position::new(longitude, latitude)
    }
}

fn number(value: &Value, index: usize) -> Result<f64> {
    value.as_f64().ok_or_else(|| {
        Error::MalformedPosition(format!(
            "element {} is {}, expected a number",
            index,
            json_type_name(value)
        ))
    })
}

fn encode_number(value: f64) -> Value {
    Number::from_f64(value).map_or(Value::Null, Value::Number)
}

impl JsonCodec for Position {
    fn from_json(value: &Value) -> Result<Self> {
        let elements = value.as_array().ok_or_else(|| {
            Error::MalformedPosition(format!("expected an array, found {}", json_type_name(value)))
        })?;
        match elements.as_slice() {
            [longitude, latitude] => Ok(Position::new(number(longitude, 0)?, number(latitude, 1)?)),
            [longitude, latitude, elevation] => Ok(Position::with_elevation(
                number(longitude, 0)?,
                number(latitude, 1)?,
                number(elevation, 2)?,
            )),
            _ => Err(Error::MalformedPosition(format!(
                "expected 2 or 3 numbers, found {}",
                elements.len()
            ))),
        }
    }

    fn to_json(&self) -> Result<Value> {
        Ok(self.to_array())
    }
}

impl Position {
    pub(crate) fn to_array(&self) -> Value {
        let mut coordinates = vec![encode_number(self.longitude), encode_number(self.latitude)];
        if let Some(elevation) = self.elevation {
            coordinates.push(encode_number(elevation));
        }
        Value::Array(coordinates)
    }
}

serde_via_codec!(Position);
