//! Single-kind geometries.
//!
//! Each struct decodes only documents carrying its own type tag, which makes
//! it a drop-in geometry parameter for features with a fixed schema, e.g.
//! `Feature<PointGeometry, Location>`.

use super::codec::JsonCodec;
use super::error::Result;
use super::geometry::{
    decode_coordinates, decode_geometries, encode_coordinates, encode_geometries, expect_type,
    geometry_object, Geometry, GeometryObject, GeometryType, LinearRing,
};
use super::position::Position;
use std::convert::TryFrom;

macro_rules! coordinate_geometry {
    ($(#[$meta:meta])* $name:ident, $variant:ident, $coordinates:ty) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq)]
        pub struct $name {
            pub coordinates: $coordinates,
        }

        impl $name {
            pub fn new(coordinates: $coordinates) -> Self {
                $name { coordinates }
            }
        }

        impl JsonCodec for $name {
            fn from_json(value: &serde_json::Value) -> Result<Self> {
                let object = geometry_object(value)?;
                expect_type(object, GeometryType::$variant)?;
                let coordinates = decode_coordinates(object, GeometryType::$variant)?;
                Ok($name { coordinates })
            }

            fn to_json(&self) -> Result<serde_json::Value> {
                Ok(encode_coordinates(GeometryType::$variant, &self.coordinates))
            }
        }

        impl GeometryObject for $name {
            fn geometry_type(&self) -> GeometryType {
                GeometryType::$variant
            }
        }

        impl From<$name> for Geometry {
            fn from(geometry: $name) -> Self {
                Geometry::$variant(geometry.coordinates)
            }
        }

        impl TryFrom<Geometry> for $name {
            type Error = Geometry;

            /// Hands the geometry back when it is of another kind.
            fn try_from(geometry: Geometry) -> std::result::Result<Self, Geometry> {
                match geometry {
                    Geometry::$variant(coordinates) => Ok($name { coordinates }),
                    other => Err(other),
                }
            }
        }

        impl PartialEq<$name> for Geometry {
            fn eq(&self, other: &$name) -> bool {
                match self {
                    Geometry::$variant(coordinates) => *coordinates == other.coordinates,
                    _ => false,
                }
            }
        }

        impl PartialEq<Geometry> for $name {
            fn eq(&self, other: &Geometry) -> bool {
                other == self
            }
        }

        serde_via_codec!($name);
    };
}

coordinate_geometry!(
    /// A single position.
    PointGeometry,
    Point,
    Position
);

coordinate_geometry!(
    /// An array of positions.
    MultiPointGeometry,
    MultiPoint,
    Vec<Position>
);

coordinate_geometry!(
    /// An array of two or more positions.
    LineStringGeometry,
    LineString,
    Vec<Position>
);

coordinate_geometry!(MultiLineStringGeometry, MultiLineString, Vec<Vec<Position>>);

coordinate_geometry!(
    /// An array of linear rings.
    PolygonGeometry,
    Polygon,
    Vec<LinearRing>
);

coordinate_geometry!(MultiPolygonGeometry, MultiPolygon, Vec<Vec<LinearRing>>);

impl PolygonGeometry {
    pub fn exterior_ring(&self) -> Option<&LinearRing> {
        self.coordinates.first()
    }

    /// The holes of the polygon. May be empty.
    pub fn interior_rings(&self) -> &[LinearRing] {
        self.coordinates.get(1..).unwrap_or(&[])
    }
}

/// An array of geometries.
#[derive(Clone, Debug, PartialEq)]
pub struct GeometryCollectionGeometry {
    pub geometries: Vec<Geometry>,
}

impl GeometryCollectionGeometry {
    pub fn new(geometries: Vec<Geometry>) -> Self {
        GeometryCollectionGeometry { geometries }
    }
}

impl JsonCodec for GeometryCollectionGeometry {
    fn from_json(value: &serde_json::Value) -> Result<Self> {
        let object = geometry_object(value)?;
        expect_type(object, GeometryType::GeometryCollection)?;
        let geometries = decode_geometries(object)?;
        Ok(GeometryCollectionGeometry { geometries })
    }

    fn to_json(&self) -> Result<serde_json::Value> {
        encode_geometries(&self.geometries)
    }
}

impl GeometryObject for GeometryCollectionGeometry {
    fn geometry_type(&self) -> GeometryType {
        GeometryType::GeometryCollection
    }
}

impl From<GeometryCollectionGeometry> for Geometry {
    fn from(collection: GeometryCollectionGeometry) -> Self {
        Geometry::GeometryCollection(collection.geometries)
    }
}

impl TryFrom<Geometry> for GeometryCollectionGeometry {
    type Error = Geometry;

    fn try_from(geometry: Geometry) -> std::result::Result<Self, Geometry> {
        match geometry {
            Geometry::GeometryCollection(geometries) => {
                Ok(GeometryCollectionGeometry { geometries })
            }
            other => Err(other),
        }
    }
}

impl PartialEq<GeometryCollectionGeometry> for Geometry {
    fn eq(&self, other: &GeometryCollectionGeometry) -> bool {
        match self {
            Geometry::GeometryCollection(geometries) => *geometries == other.geometries,
            _ => false,
        }
    }
}

impl PartialEq<Geometry> for GeometryCollectionGeometry {
    fn eq(&self, other: &Geometry) -> bool {
        other == self
    }
}

serde_via_codec!(GeometryCollectionGeometry);
