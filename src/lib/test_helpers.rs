use super::geometry::LinearRing;
use super::json::JsonValue;
use super::position::Position;

pub const FEATURE_COLLECTION_DOCUMENT: &str = r#"{
    "type": "FeatureCollection",
    "features": [
        {
            "type": "Feature",
            "geometry": {"type": "Point", "coordinates": [102.0, 0.5]},
            "properties": {"prop0": "value0"}
        },
        {
            "type": "Feature",
            "id": 2,
            "geometry": {
                "type": "LineString",
                "coordinates": [[102.0, 0.0], [103.0, 1.0], [104.0, 0.0], [105.0, 1.0]]
            },
            "properties": {"prop0": "value0", "prop1": 0.0}
        },
        {
            "type": "Feature",
            "id": "poly",
            "geometry": {
                "type": "Polygon",
                "coordinates": [
                    [[100.0, 0.0], [101.0, 0.0], [101.0, 1.0], [100.0, 1.0], [100.0, 0.0]]
                ]
            },
            "properties": {"prop0": "value0", "prop1": {"this": "that"}}
        }
    ]
}"#;

pub fn positions(coordinates: &[[f64; 2]]) -> Vec<Position> {
    coordinates.iter().copied().map(Position::from).collect()
}

/// Closed, counter-clockwise square with its south-west corner at `(x, y)`.
pub fn square_ring(x: f64, y: f64, size: f64) -> LinearRing {
    positions(&[
        [x, y],
        [x + size, y],
        [x + size, y + size],
        [x, y + size],
        [x, y],
    ])
}

pub fn json_object(entries: Vec<(&str, JsonValue)>) -> JsonValue {
    entries
        .into_iter()
        .map(|(key, value)| (key.to_string(), value))
        .collect()
}
