use super::error::{Error, Result};
use serde_json::error::Category;
use serde_json::Value;
use std::io::Read;

/// Recursion limit of the underlying JSON parser.
pub const PARSER_DEPTH_LIMIT: usize = 128;

/// Default maximum number of nested arrays/objects accepted by a decode.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// A type with a fixed JSON wire shape.
///
/// Decoding reads from an already parsed JSON tree and reports typed errors.
/// Encoding builds a new tree; it only fails when a user supplied payload,
/// such as feature properties, refuses to serialize.
pub trait JsonCodec: Sized {
    fn from_json(value: &Value) -> Result<Self>;
    fn to_json(&self) -> Result<Value>;
}

/// Implements `Serialize`/`Deserialize` for codec types by going through
/// their JSON tree representation.
macro_rules! serde_via_codec {
    (impl<$($param:ident: $bound:path),*> $ty:ty) => {
        impl<$($param: $bound),*> serde::Serialize for $ty {
            fn serialize<S: serde::Serializer>(
                &self,
                serializer: S,
            ) -> std::result::Result<S::Ok, S::Error> {
                let value = crate::codec::JsonCodec::to_json(self)
                    .map_err(<S::Error as serde::ser::Error>::custom)?;
                serde::Serialize::serialize(&value, serializer)
            }
        }

        impl<'de, $($param: $bound),*> serde::Deserialize<'de> for $ty {
            fn deserialize<D: serde::Deserializer<'de>>(
                deserializer: D,
            ) -> std::result::Result<Self, D::Error> {
                let value = <serde_json::Value as serde::Deserialize>::deserialize(deserializer)?;
                <$ty as crate::codec::JsonCodec>::from_json(&value)
                    .map_err(serde::de::Error::custom)
            }
        }
    };
    ($($ty:ty),* $(,)?) => {$(
        impl serde::Serialize for $ty {
            fn serialize<S: serde::Serializer>(
                &self,
                serializer: S,
            ) -> std::result::Result<S::Ok, S::Error> {
                let value = crate::codec::JsonCodec::to_json(self)
                    .map_err(<S::Error as serde::ser::Error>::custom)?;
                serde::Serialize::serialize(&value, serializer)
            }
        }

        impl<'de> serde::Deserialize<'de> for $ty {
            fn deserialize<D: serde::Deserializer<'de>>(
                deserializer: D,
            ) -> std::result::Result<Self, D::Error> {
                let value = <serde_json::Value as serde::Deserialize>::deserialize(deserializer)?;
                <$ty as crate::codec::JsonCodec>::from_json(&value)
                    .map_err(serde::de::Error::custom)
            }
        }
    )*};
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodeOptions {
    pub max_depth: usize,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        DecodeOptions {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl DecodeOptions {
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Decode a parsed JSON tree after checking its nesting depth.
    pub fn decode<T: JsonCodec>(&self, value: &Value) -> Result<T> {
        check_depth(value, self.max_depth)?;
        T::from_json(value)
    }

    pub fn from_str<T: JsonCodec>(&self, input: &str) -> Result<T> {
        let value = serde_json::from_str(input).map_err(parse_error)?;
        self.decode(&value)
    }

    pub fn from_slice<T: JsonCodec>(&self, input: &[u8]) -> Result<T> {
        let value = serde_json::from_slice(input).map_err(parse_error)?;
        self.decode(&value)
    }

    pub fn from_reader<T: JsonCodec>(&self, reader: impl Read) -> Result<T> {
        let value = serde_json::from_reader(reader).map_err(parse_error)?;
        self.decode(&value)
    }
}

/// Decode a document with the default options.
///
/// # Example
///
/// ```
/// use geojson_codec::{from_str, Geometry, Position};
///
/// let point: Geometry = from_str(r#"{"type":"Point","coordinates":[102.0,0.5]}"#).unwrap();
/// assert_eq!(point, Geometry::Point(Position::new(102.0, 0.5)));
/// ```
pub fn from_str<T: JsonCodec>(input: &str) -> Result<T> {
    DecodeOptions::default().from_str(input)
}

pub fn from_slice<T: JsonCodec>(input: &[u8]) -> Result<T> {
    DecodeOptions::default().from_slice(input)
}

pub fn from_reader<T: JsonCodec>(reader: impl Read) -> Result<T> {
    DecodeOptions::default().from_reader(reader)
}

pub fn from_value<T: JsonCodec>(value: &Value) -> Result<T> {
    DecodeOptions::default().decode(value)
}

pub fn to_value<T: JsonCodec>(value: &T) -> Result<Value> {
    value.to_json()
}

fn parse_error(err: serde_json::Error) -> Error {
    match err.classify() {
        Category::Io => Error::Io(err.into()),
        // serde_json has no dedicated category for its recursion limit
        Category::Syntax if err.to_string().starts_with("recursion limit exceeded") => {
            Error::NestingTooDeep(PARSER_DEPTH_LIMIT)
        }
        _ => Error::Json(err),
    }
}

/// Nesting depth of arrays and objects; scalars have depth 0.
pub fn depth(value: &Value) -> usize {
    let mut max = 0;
    let mut stack = vec![(value, 0)];
    while let Some((value, level)) = stack.pop() {
        let level = level + 1;
        match value {
            Value::Array(items) => stack.extend(items.iter().map(|child| (child, level))),
            Value::Object(map) => stack.extend(map.values().map(|child| (child, level))),
            _ => continue,
        }
        max = max.max(level);
    }
    max
}

fn check_depth(value: &Value, max_depth: usize) -> Result<()> {
    if depth(value) > max_depth {
        return Err(Error::NestingTooDeep(max_depth));
    }
    Ok(())
}
