//! A strictly typed GeoJSON codec.
//!
//! Documents are parsed into a JSON tree first and then walked by typed
//! decoders, which report what is wrong with a document instead of skipping
//! it. Feature properties are either schema-less (`JsonValue`) or any serde
//! type, and geometries either the dynamic `Geometry` union or one of the
//! single-kind geometry structs:
//!
//! ```
//! use geojson_codec::{from_str, Feature, PointGeometry, Position};
//! use serde::Deserialize;
//!
//! #[derive(Deserialize, serde::Serialize)]
//! struct Location {
//!     name: String,
//! }
//!
//! let feature: Feature<PointGeometry, Location> = from_str(
//!     r#"{"type":"Feature","geometry":{"type":"Point","coordinates":[-0.45,51.47]},
//!         "properties":{"name":"Heathrow Airport"}}"#,
//! )
//! .unwrap();
//! assert_eq!(feature.geometry.unwrap().coordinates, Position::new(-0.45, 51.47));
//! assert_eq!(feature.properties.unwrap().name, "Heathrow Airport");
//! ```

#[macro_use]
mod codec;

pub mod error;
mod feature;
mod geo;
mod geojson;
mod geometry;
mod identifier;
mod json;
pub mod output;
mod position;
mod shapes;

#[cfg(test)]
mod test_helpers;

pub use self::codec::{
    depth, from_reader, from_slice, from_str, from_value, to_value, DecodeOptions, JsonCodec,
    DEFAULT_MAX_DEPTH, PARSER_DEPTH_LIMIT,
};
pub use self::error::{Error, ErrorKind, Result};
pub use self::feature::{Feature, FeatureCollection, Properties};
pub use self::geojson::{BoundingBox, GeoJson};
pub use self::geometry::{Geometry, GeometryObject, GeometryType, LinearRing};
pub use self::identifier::FeatureIdentifier;
pub use self::json::JsonValue;
pub use self::output::{to_string, to_string_pretty, to_writer};
pub use self::position::Position;
pub use self::shapes::{
    GeometryCollectionGeometry, LineStringGeometry, MultiLineStringGeometry, MultiPointGeometry,
    MultiPolygonGeometry, PointGeometry, PolygonGeometry,
};
