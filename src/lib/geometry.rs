use super::codec::JsonCodec;
use super::error::{json_type_name, Error, Result};
use super::position::Position;
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;
use tracing::trace;

/// A closed line string; closure and winding order are not validated.
pub type LinearRing = Vec<Position>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GeometryType {
    Point,
    MultiPoint,
    LineString,
    MultiLineString,
    Polygon,
    MultiPolygon,
    GeometryCollection,
}

impl GeometryType {
    pub const ALL: [GeometryType; 7] = [
        GeometryType::Point,
        GeometryType::MultiPoint,
        GeometryType::LineString,
        GeometryType::MultiLineString,
        GeometryType::Polygon,
        GeometryType::MultiPolygon,
        GeometryType::GeometryCollection,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            GeometryType::Point => "Point",
            GeometryType::MultiPoint => "MultiPoint",
            GeometryType::LineString => "LineString",
            GeometryType::MultiLineString => "MultiLineString",
            GeometryType::Polygon => "Polygon",
            GeometryType::MultiPolygon => "MultiPolygon",
            GeometryType::GeometryCollection => "GeometryCollection",
        }
    }
}

impl fmt::Display for GeometryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GeometryType {
    type Err = Error;

    /// Tags are matched exactly, including case.
    fn from_str(tag: &str) -> Result<Self> {
        GeometryType::ALL
            .iter()
            .copied()
            .find(|geometry_type| geometry_type.as_str() == tag)
            .ok_or_else(|| Error::UnrecognizedGeometryType(format!("`{}`", tag)))
    }
}

/// A region of space.
#[derive(Clone, Debug, PartialEq)]
pub enum Geometry {
    Point(Position),
    MultiPoint(Vec<Position>),
    /// Two or more positions.
    LineString(Vec<Position>),
    MultiLineString(Vec<Vec<Position>>),
    /// The first ring is the exterior ring, any further rings are holes.
    Polygon(Vec<LinearRing>),
    MultiPolygon(Vec<Vec<LinearRing>>),
    GeometryCollection(Vec<Geometry>),
}

/// A geometry type usable inside features: it has a fixed wire shape and
/// knows its own type tag.
pub trait GeometryObject: JsonCodec {
    fn geometry_type(&self) -> GeometryType;
}

impl Geometry {
    pub fn geometry_type(&self) -> GeometryType {
        match self {
            Geometry::Point(_) => GeometryType::Point,
            Geometry::MultiPoint(_) => GeometryType::MultiPoint,
            Geometry::LineString(_) => GeometryType::LineString,
            Geometry::MultiLineString(_) => GeometryType::MultiLineString,
            Geometry::Polygon(_) => GeometryType::Polygon,
            Geometry::MultiPolygon(_) => GeometryType::MultiPolygon,
            Geometry::GeometryCollection(_) => GeometryType::GeometryCollection,
        }
    }

    /// The exterior ring of a polygon.
    pub fn exterior_ring(&self) -> Option<&LinearRing> {
        match self {
            Geometry::Polygon(rings) => rings.first(),
            _ => None,
        }
    }

    /// The holes of a polygon; empty for every other geometry.
    pub fn interior_rings(&self) -> &[LinearRing] {
        match self {
            Geometry::Polygon(rings) if !rings.is_empty() => &rings[1..],
            _ => &[],
        }
    }
}

impl GeometryObject for Geometry {
    fn geometry_type(&self) -> GeometryType {
        Geometry::geometry_type(self)
    }
}

/// Read the `type` discriminator of a JSON object.
pub(crate) fn type_tag(object: &Map<String, Value>) -> Result<&str> {
    match object.get("type") {
        Some(Value::String(tag)) => Ok(tag.as_str()),
        Some(other) => Err(Error::UnrecognizedGeometryType(format!(
            "`type` is {}, expected a string",
            json_type_name(other)
        ))),
        None => Err(Error::UnrecognizedGeometryType(
            "missing `type` field".to_string(),
        )),
    }
}

pub(crate) fn geometry_object<'a>(value: &'a Value) -> Result<&'a Map<String, Value>> {
    value
        .as_object()
        .ok_or_else(|| Error::expected_object("geometry", value))
}

fn malformed(geometry_type: GeometryType, reason: String) -> Error {
    Error::MalformedCoordinates {
        geometry_type: geometry_type.as_str(),
        reason,
    }
}

/// Nested coordinate arrays; each level checks its own shape.
pub(crate) trait Coordinates: Sized {
    fn decode(value: &Value, geometry_type: GeometryType) -> Result<Self>;
    fn encode(&self) -> Value;
}

impl Coordinates for Position {
    fn decode(value: &Value, geometry_type: GeometryType) -> Result<Self> {
        match value {
            // an array of scalars has the right depth, the position codec
            // reports what is wrong with its elements
            Value::Array(elements) if !elements.iter().any(|e| e.is_array() || e.is_object()) => {
                Position::from_json(value)
            }
            other => Err(malformed(
                geometry_type,
                format!("expected a position, found {}", describe(other)),
            )),
        }
    }

    fn encode(&self) -> Value {
        self.to_array()
    }
}

impl<T: Coordinates> Coordinates for Vec<T> {
    fn decode(value: &Value, geometry_type: GeometryType) -> Result<Self> {
        let items = value.as_array().ok_or_else(|| {
            malformed(
                geometry_type,
                format!("expected an array, found {}", json_type_name(value)),
            )
        })?;
        items
            .iter()
            .map(|item| T::decode(item, geometry_type))
            .collect()
    }

    fn encode(&self) -> Value {
        Value::Array(self.iter().map(Coordinates::encode).collect())
    }
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Array(_) => "a nested array",
        other => json_type_name(other),
    }
}

pub(crate) fn decode_coordinates<T: Coordinates>(
    object: &Map<String, Value>,
    geometry_type: GeometryType,
) -> Result<T> {
    let coordinates = object
        .get("coordinates")
        .ok_or_else(|| malformed(geometry_type, "missing `coordinates` field".to_string()))?;
    T::decode(coordinates, geometry_type)
}

pub(crate) fn decode_geometries(object: &Map<String, Value>) -> Result<Vec<Geometry>> {
    let geometries = match object.get("geometries") {
        Some(Value::Array(geometries)) => geometries,
        Some(other) => {
            return Err(malformed(
                GeometryType::GeometryCollection,
                format!("`geometries` is {}, expected an array", json_type_name(other)),
            ))
        }
        None => {
            return Err(malformed(
                GeometryType::GeometryCollection,
                "missing `geometries` field".to_string(),
            ))
        }
    };
    geometries.iter().map(Geometry::from_json).collect()
}

/// Check that a geometry object carries exactly the expected tag.
pub(crate) fn expect_type(object: &Map<String, Value>, expected: GeometryType) -> Result<()> {
    let found: GeometryType = type_tag(object)?.parse()?;
    if found != expected {
        return Err(Error::UnrecognizedGeometryType(format!(
            "`{}`, expected `{}`",
            found, expected
        )));
    }
    Ok(())
}

pub(crate) fn encode_coordinates<T: Coordinates>(
    geometry_type: GeometryType,
    coordinates: &T,
) -> Value {
    tagged(geometry_type, "coordinates", coordinates.encode())
}

pub(crate) fn encode_geometries(geometries: &[Geometry]) -> Result<Value> {
    let geometries = geometries
        .iter()
        .map(JsonCodec::to_json)
        .collect::<Result<_>>()?;
    Ok(tagged(
        GeometryType::GeometryCollection,
        "geometries",
        Value::Array(geometries),
    ))
}

fn tagged(geometry_type: GeometryType, key: &str, value: Value) -> Value {
    let mut object = Map::new();
    object.insert("type".to_string(), geometry_type.as_str().into());
    object.insert(key.to_string(), value);
    Value::Object(object)
}

impl JsonCodec for Geometry {
    fn from_json(value: &Value) -> Result<Self> {
        let object = geometry_object(value)?;
        let geometry_type: GeometryType = type_tag(object)?.parse()?;
        trace!(%geometry_type, "decoding geometry");
        let geometry = match geometry_type {
            GeometryType::Point => Geometry::Point(decode_coordinates(object, geometry_type)?),
            GeometryType::MultiPoint => {
                Geometry::MultiPoint(decode_coordinates(object, geometry_type)?)
            }
            GeometryType::LineString => {
                Geometry::LineString(decode_coordinates(object, geometry_type)?)
            }
            GeometryType::MultiLineString => {
                Geometry::MultiLineString(decode_coordinates(object, geometry_type)?)
            }
            GeometryType::Polygon => Geometry::Polygon(decode_coordinates(object, geometry_type)?),
            GeometryType::MultiPolygon => {
                Geometry::MultiPolygon(decode_coordinates(object, geometry_type)?)
            }
            GeometryType::GeometryCollection => {
                Geometry::GeometryCollection(decode_geometries(object)?)
            }
        };
        Ok(geometry)
    }

    fn to_json(&self) -> Result<Value> {
        let geometry_type = self.geometry_type();
        let value = match self {
            Geometry::Point(position) => encode_coordinates(geometry_type, position),
            Geometry::MultiPoint(positions) | Geometry::LineString(positions) => {
                encode_coordinates(geometry_type, positions)
            }
            Geometry::MultiLineString(lines) | Geometry::Polygon(lines) => {
                encode_coordinates(geometry_type, lines)
            }
            Geometry::MultiPolygon(polygons) => encode_coordinates(geometry_type, polygons),
            Geometry::GeometryCollection(geometries) => encode_geometries(geometries)?,
        };
        Ok(value)
    }
}

serde_via_codec!(Geometry);
