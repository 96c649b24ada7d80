//! Conversions to and from `geo-types`, and bounding boxes computed with `geo`.
//!
//! `geo-types` is strictly 2-D: elevations are dropped on the way out, and
//! polygon rings come back closed.

use super::feature::{Feature, FeatureCollection};
use super::geojson::{BoundingBox, GeoJson};
use super::geometry::{Geometry, LinearRing};
use super::position::Position;
use geo::BoundingRect;
use geo_types::{
    Coord, GeometryCollection, LineString, MultiLineString, MultiPoint, MultiPolygon, Point,
    Polygon, Rect,
};

impl From<Position> for Coord<f64> {
    fn from(position: Position) -> Self {
        Coord {
            x: position.longitude,
            y: position.latitude,
        }
    }
}

impl From<Coord<f64>> for Position {
    fn from(coord: Coord<f64>) -> Self {
        Position::new(coord.x, coord.y)
    }
}

fn line_string(positions: &[Position]) -> LineString<f64> {
    positions.iter().copied().map(Coord::from).collect()
}

fn polygon(rings: &[LinearRing]) -> Polygon<f64> {
    let exterior = rings.first().map_or_else(|| LineString::new(vec![]), |ring| line_string(ring));
    let interiors = rings.iter().skip(1).map(|ring| line_string(ring)).collect();
    Polygon::new(exterior, interiors)
}

fn positions(line_string: LineString<f64>) -> Vec<Position> {
    line_string.into_iter().map(Position::from).collect()
}

fn rings(polygon: Polygon<f64>) -> Vec<LinearRing> {
    let (exterior, interiors) = polygon.into_inner();
    std::iter::once(exterior)
        .chain(interiors)
        .map(positions)
        .collect()
}

impl From<&Geometry> for geo_types::Geometry<f64> {
    fn from(geometry: &Geometry) -> Self {
        match geometry {
            Geometry::Point(position) => Point::from(Coord::from(*position)).into(),
            Geometry::MultiPoint(points) => points
                .iter()
                .map(|&position| Point::from(Coord::from(position)))
                .collect::<MultiPoint<f64>>()
                .into(),
            Geometry::LineString(points) => line_string(points).into(),
            Geometry::MultiLineString(lines) => {
                MultiLineString::new(lines.iter().map(|line| line_string(line)).collect()).into()
            }
            Geometry::Polygon(rings) => polygon(rings).into(),
            Geometry::MultiPolygon(polygons) => {
                MultiPolygon::new(polygons.iter().map(|rings| polygon(rings)).collect()).into()
            }
            Geometry::GeometryCollection(geometries) => geo_types::Geometry::GeometryCollection(
                geometries.iter().map(geo_types::Geometry::from).collect(),
            ),
        }
    }
}

impl From<Geometry> for geo_types::Geometry<f64> {
    fn from(geometry: Geometry) -> Self {
        (&geometry).into()
    }
}

impl From<geo_types::Geometry<f64>> for Geometry {
    /// `Line` becomes a two-position `LineString`; `Rect` and `Triangle`
    /// become closed polygons.
    fn from(geometry: geo_types::Geometry<f64>) -> Self {
        use geo_types::Geometry as G;
        match geometry {
            G::Point(point) => Geometry::Point(point.0.into()),
            G::Line(line) => Geometry::LineString(vec![line.start.into(), line.end.into()]),
            G::LineString(line_string) => Geometry::LineString(positions(line_string)),
            G::Polygon(polygon) => Geometry::Polygon(rings(polygon)),
            G::MultiPoint(points) => {
                Geometry::MultiPoint(points.into_iter().map(|point| point.0.into()).collect())
            }
            G::MultiLineString(lines) => {
                Geometry::MultiLineString(lines.into_iter().map(positions).collect())
            }
            G::MultiPolygon(polygons) => {
                Geometry::MultiPolygon(polygons.into_iter().map(rings).collect())
            }
            G::GeometryCollection(geometries) => {
                Geometry::GeometryCollection(geometries.into_iter().map(Geometry::from).collect())
            }
            G::Rect(rect) => Geometry::Polygon(rings(rect.to_polygon())),
            G::Triangle(triangle) => Geometry::Polygon(rings(triangle.to_polygon())),
        }
    }
}

fn to_bbox(rect: Rect<f64>) -> BoundingBox {
    vec![rect.min().x, rect.min().y, rect.max().x, rect.max().y]
}

impl Geometry {
    /// The 2-D extent `[min_lon, min_lat, max_lon, max_lat]`, or `None` for
    /// geometries without positions.
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        geo_types::Geometry::from(self).bounding_rect().map(to_bbox)
    }
}

impl<P> Feature<Geometry, P> {
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        self.geometry.as_ref()?.bounding_box()
    }
}

impl<P> FeatureCollection<Geometry, P> {
    /// The extent of all feature geometries together.
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        self.iter()
            .filter_map(|feature| feature.geometry.as_ref())
            .map(geo_types::Geometry::from)
            .collect::<GeometryCollection<f64>>()
            .bounding_rect()
            .map(to_bbox)
    }
}

impl GeoJson {
    /// Fills in a missing bbox from the document's geometries. An existing
    /// bbox is kept as is.
    pub fn with_computed_bbox(mut self) -> Self {
        if self.bbox().is_none() {
            let computed = match &self {
                GeoJson::Feature(feature, _) => feature.bounding_box(),
                GeoJson::FeatureCollection(collection, _) => collection.bounding_box(),
                GeoJson::Geometry(geometry, _) => geometry.bounding_box(),
            };
            *self.bbox_mut() = computed;
        }
        self
    }
}
