use super::codec::JsonCodec;
use super::error::{json_type_name, Error, Result};
use super::geometry::{Geometry, GeometryObject};
use super::identifier::FeatureIdentifier;
use super::json::JsonValue;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::trace;

pub const FEATURE: &str = "Feature";
pub const FEATURE_COLLECTION: &str = "FeatureCollection";

/// Payload types accepted as feature properties.
pub trait Properties: Serialize + DeserializeOwned {}

impl<T: Serialize + DeserializeOwned> Properties for T {}

/// A spatially bounded entity.
///
/// `G` is the geometry (the dynamic `Geometry` union or one of the
/// single-kind geometries), `P` the properties payload.
#[derive(Clone, Debug)]
pub struct Feature<G = Geometry, P = JsonValue> {
    pub id: Option<FeatureIdentifier>,
    pub geometry: Option<G>,
    pub properties: Option<P>,
    null_geometry: bool,
}

impl<G: PartialEq, P: PartialEq> PartialEq for Feature<G, P> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.geometry == other.geometry
            && self.properties == other.properties
            && self.has_null_geometry() == other.has_null_geometry()
    }
}

impl<G, P> Default for Feature<G, P> {
    fn default() -> Self {
        Feature {
            id: None,
            geometry: None,
            properties: None,
            null_geometry: false,
        }
    }
}

impl<G, P> Feature<G, P> {
    pub fn new(geometry: G) -> Self {
        Feature {
            geometry: Some(geometry),
            ..Default::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<FeatureIdentifier>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_properties(mut self, properties: P) -> Self {
        self.properties = Some(properties);
        self
    }

    /// Drops the geometry and encodes `"geometry": null` in its place.
    pub fn with_null_geometry(mut self) -> Self {
        self.geometry = None;
        self.null_geometry = true;
        self
    }

    /// Whether the geometry member is an explicit null rather than absent.
    /// A present geometry always wins.
    pub fn has_null_geometry(&self) -> bool {
        self.null_geometry && self.geometry.is_none()
    }
}

impl<G: GeometryObject, P: Properties> Feature<G, P> {
    /// Decode the members of a feature object. The `type` member is not
    /// checked here; callers dispatch on it.
    pub(crate) fn decode_members(object: &Map<String, Value>) -> Result<Self> {
        let id = match object.get("id") {
            None | Some(Value::Null) => None,
            Some(id) => Some(FeatureIdentifier::from_json(id)?),
        };
        let (geometry, null_geometry) = match object.get("geometry") {
            None => (None, false),
            Some(Value::Null) => (None, true),
            Some(geometry) => (Some(G::from_json(geometry)?), false),
        };
        let properties = match object.get("properties") {
            None => None,
            // a payload type that accepts null keeps it, e.g. `JsonValue::Null`
            Some(Value::Null) => P::deserialize(&Value::Null).ok(),
            Some(properties) => {
                Some(P::deserialize(properties).map_err(Error::InvalidProperties)?)
            }
        };
        trace!(
            has_id = id.is_some(),
            has_geometry = geometry.is_some(),
            has_properties = properties.is_some(),
            "decoded feature"
        );
        Ok(Feature {
            id,
            geometry,
            properties,
            null_geometry,
        })
    }

    pub(crate) fn encode_members(&self, object: &mut Map<String, Value>) -> Result<()> {
        if let Some(id) = &self.id {
            object.insert("id".to_string(), id.to_json()?);
        }
        match &self.geometry {
            Some(geometry) => {
                object.insert("geometry".to_string(), geometry.to_json()?);
            }
            None if self.has_null_geometry() => {
                object.insert("geometry".to_string(), Value::Null);
            }
            None => {}
        }
        if let Some(properties) = &self.properties {
            let properties = serde_json::to_value(properties).map_err(Error::InvalidProperties)?;
            object.insert("properties".to_string(), properties);
        }
        Ok(())
    }
}

impl<G: GeometryObject, P: Properties> JsonCodec for Feature<G, P> {
    fn from_json(value: &Value) -> Result<Self> {
        let object = value
            .as_object()
            .ok_or_else(|| Error::expected_object("feature", value))?;
        Feature::decode_members(object)
    }

    fn to_json(&self) -> Result<Value> {
        let mut object = Map::new();
        object.insert("type".to_string(), FEATURE.into());
        self.encode_members(&mut object)?;
        Ok(Value::Object(object))
    }
}

serde_via_codec!(impl<G: GeometryObject, P: Properties> Feature<G, P>);

/// A list of features.
#[derive(Clone, Debug, PartialEq)]
pub struct FeatureCollection<G = Geometry, P = JsonValue> {
    pub features: Vec<Feature<G, P>>,
}

impl<G, P> Default for FeatureCollection<G, P> {
    fn default() -> Self {
        FeatureCollection { features: vec![] }
    }
}

impl<G, P> FeatureCollection<G, P> {
    pub fn new(features: Vec<Feature<G, P>>) -> Self {
        FeatureCollection { features }
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Feature<G, P>> {
        self.features.iter()
    }
}

impl<G, P> std::iter::FromIterator<Feature<G, P>> for FeatureCollection<G, P> {
    fn from_iter<I: IntoIterator<Item = Feature<G, P>>>(iter: I) -> Self {
        FeatureCollection::new(iter.into_iter().collect())
    }
}

impl<G, P> IntoIterator for FeatureCollection<G, P> {
    type Item = Feature<G, P>;
    type IntoIter = std::vec::IntoIter<Feature<G, P>>;

    fn into_iter(self) -> Self::IntoIter {
        self.features.into_iter()
    }
}

impl<'a, G, P> IntoIterator for &'a FeatureCollection<G, P> {
    type Item = &'a Feature<G, P>;
    type IntoIter = std::slice::Iter<'a, Feature<G, P>>;

    fn into_iter(self) -> Self::IntoIter {
        self.features.iter()
    }
}

impl<G: GeometryObject, P: Properties> FeatureCollection<G, P> {
    pub(crate) fn decode_members(object: &Map<String, Value>) -> Result<Self> {
        let features = match object.get("features") {
            Some(Value::Array(features)) => features,
            Some(other) => return Err(Error::MalformedFeatures(json_type_name(other))),
            None => return Err(Error::MissingFeaturesField),
        };
        let features = features
            .iter()
            .map(Feature::from_json)
            .collect::<Result<Vec<_>>>()?;
        trace!(features = features.len(), "decoded feature collection");
        Ok(FeatureCollection { features })
    }

    pub(crate) fn encode_members(&self, object: &mut Map<String, Value>) -> Result<()> {
        let features = self
            .features
            .iter()
            .map(JsonCodec::to_json)
            .collect::<Result<_>>()?;
        object.insert("features".to_string(), Value::Array(features));
        Ok(())
    }
}

impl<G: GeometryObject, P: Properties> JsonCodec for FeatureCollection<G, P> {
    fn from_json(value: &Value) -> Result<Self> {
        let object = value
            .as_object()
            .ok_or_else(|| Error::expected_object("feature collection", value))?;
        FeatureCollection::decode_members(object)
    }

    fn to_json(&self) -> Result<Value> {
        let mut object = Map::new();
        object.insert("type".to_string(), FEATURE_COLLECTION.into());
        self.encode_members(&mut object)?;
        Ok(Value::Object(object))
    }
}

serde_via_codec!(impl<G: GeometryObject, P: Properties> FeatureCollection<G, P>);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::from_str;
    use crate::error::ErrorKind;
    use crate::position::Position;
    use crate::shapes::PointGeometry;
    use crate::test_helpers::{json_object, FEATURE_COLLECTION_DOCUMENT};
    use serde_json::json;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Location {
        address: String,
        name: String,
    }

    const HEATHROW: &str = r#"{
        "geometry": {"coordinates": [-0.452207, 51.471403], "type": "Point"},
        "properties": {"address": "Longford, Hounslow TW6 1DB, UK", "name": "Heathrow Airport"},
        "type": "Feature"
    }"#;

    #[test]
    fn feature_with_nested_properties() {
        let feature: Feature = from_str(
            r#"{"type":"Feature","geometry":{"type":"Point","coordinates":[102.0,0.5]},
                "properties":{"prop0":"value0","prop1":{"this":"that"}}}"#,
        )
        .unwrap();
        assert_eq!(feature.id, None);
        assert_eq!(
            feature.geometry,
            Some(Geometry::Point(Position::new(102.0, 0.5)))
        );
        let properties = feature.properties.unwrap();
        assert_eq!(properties["prop0"].as_str(), Some("value0"));
        assert_eq!(
            properties["prop1"],
            json_object(vec![("this", "that".into())])
        );
    }

    #[test]
    fn null_geometry() {
        let feature: Feature = from_str(r#"{"type":"Feature","geometry":null}"#).unwrap();
        assert_eq!(feature.id, None);
        assert_eq!(feature.geometry, None);
        assert_eq!(feature.properties, None);
        assert!(feature.has_null_geometry());
    }

    #[test]
    fn explicit_null_geometry_round_trips() {
        let feature: Feature = from_str(r#"{"type":"Feature","geometry":null}"#).unwrap();
        assert_eq!(
            feature.to_json().unwrap(),
            json!({"type": "Feature", "geometry": null})
        );
    }

    #[test]
    fn built_null_geometry_round_trips() {
        let feature: Feature = Feature::new(Geometry::Point(Position::new(1.0, 2.0)))
            .with_id("a")
            .with_null_geometry();
        assert_eq!(feature.geometry, None);
        let text = feature.to_json().unwrap().to_string();
        assert_eq!(text, r#"{"type":"Feature","id":"a","geometry":null}"#);
        assert_eq!(from_str::<Feature>(&text).unwrap(), feature);
    }

    #[test]
    fn present_geometry_overrides_null_marker() {
        let mut feature: Feature = Feature::default().with_null_geometry();
        feature.geometry = Some(Geometry::Point(Position::new(1.0, 2.0)));
        assert!(!feature.has_null_geometry());
        let decoded: Feature = from_str(&feature.to_json().unwrap().to_string()).unwrap();
        assert_eq!(decoded, feature);
    }

    #[test]
    fn null_properties_round_trip() {
        let feature: Feature = Feature::default().with_properties(JsonValue::Null);
        let text = feature.to_json().unwrap().to_string();
        assert_eq!(text, r#"{"type":"Feature","properties":null}"#);
        assert_eq!(from_str::<Feature>(&text).unwrap(), feature);
    }

    #[test]
    fn null_properties_are_absent_for_typed_payloads() {
        let feature: Feature<PointGeometry, Location> =
            from_str(r#"{"type":"Feature","properties":null}"#).unwrap();
        assert_eq!(feature.properties, None);
    }

    #[test]
    fn absent_members_are_omitted() {
        let feature: Feature = Feature::default();
        assert_eq!(feature.to_json().unwrap(), json!({"type": "Feature"}));

        let decoded: Feature = from_str(r#"{"type":"Feature"}"#).unwrap();
        assert_eq!(decoded, feature);
        assert!(!decoded.has_null_geometry());
    }

    #[test]
    fn identifiers() {
        let feature: Feature =
            from_str(r#"{"type":"Feature","id":"foo","geometry":null}"#).unwrap();
        assert_eq!(feature.id, Some(FeatureIdentifier::String("foo".into())));

        let feature: Feature = from_str(r#"{"type":"Feature","id":2,"geometry":null}"#).unwrap();
        assert_eq!(feature.id, Some(FeatureIdentifier::Int(2)));

        let feature: Feature = from_str(r#"{"type":"Feature","id":"2"}"#).unwrap();
        assert_eq!(feature.id, Some(FeatureIdentifier::String("2".into())));

        let err = from_str::<Feature>(r#"{"type":"Feature","id":2.5}"#).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnrecognizedIdentifierType);
    }

    #[test]
    fn geometry_errors_abort_the_decode() {
        let err = from_str::<Feature>(r#"{"type":"Feature","geometry":{"type":"Circle"}}"#)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnrecognizedGeometryType);
    }

    #[test]
    fn static_feature() {
        let feature: Feature<PointGeometry, Location> = from_str(HEATHROW).unwrap();
        assert_eq!(feature.id, None);
        assert_eq!(
            feature.geometry,
            Some(PointGeometry::new(Position::new(-0.452207, 51.471403)))
        );
        assert_eq!(
            feature.properties,
            Some(Location {
                address: "Longford, Hounslow TW6 1DB, UK".into(),
                name: "Heathrow Airport".into(),
            })
        );
    }

    #[test]
    fn static_properties_must_match_their_schema() {
        let err = from_str::<Feature<PointGeometry, Location>>(
            r#"{"type":"Feature","properties":{"name":"no address"}}"#,
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidProperties);
    }

    #[test]
    fn static_feature_collection() {
        let input = format!(r#"{{"features": [{}], "type": "FeatureCollection"}}"#, HEATHROW);
        let collection: FeatureCollection<PointGeometry, Location> = from_str(&input).unwrap();
        let first = collection.iter().next().unwrap();
        assert_eq!(first.id, None);
        assert_eq!(
            first.properties.as_ref().map(|p| p.name.as_str()),
            Some("Heathrow Airport")
        );
        let decoded: FeatureCollection<PointGeometry, Location> =
            from_str(&collection.to_json().unwrap().to_string()).unwrap();
        assert_eq!(decoded, collection);
    }

    #[test]
    fn heterogeneous_feature_collection() {
        let collection: FeatureCollection = from_str(FEATURE_COLLECTION_DOCUMENT).unwrap();
        assert_eq!(collection.len(), 3);
        let types: Vec<_> = collection
            .iter()
            .filter_map(|feature| feature.geometry.as_ref())
            .map(|geometry| geometry.geometry_type().as_str())
            .collect();
        assert_eq!(types, vec!["Point", "LineString", "Polygon"]);
        let properties = collection.features[2].properties.as_ref().unwrap();
        assert_eq!(
            properties["prop1"],
            json_object(vec![("this", "that".into())])
        );
        assert_eq!(
            collection.features[1].properties.as_ref().unwrap()["prop1"],
            JsonValue::Double(0.0)
        );
    }

    #[test]
    fn features_member_is_required() {
        let err = from_str::<FeatureCollection>(r#"{"type":"FeatureCollection"}"#).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingFeaturesField);

        let err = from_str::<FeatureCollection>(r#"{"type":"FeatureCollection","features":{}}"#)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedFeatures);

        let err = from_str::<FeatureCollection>(r#"{"type":"FeatureCollection","features":[1]}"#)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ExpectedObject);
    }

    #[test]
    fn builders() {
        let feature: Feature = Feature::new(Geometry::Point(Position::new(1.0, 2.0)))
            .with_id("a")
            .with_properties(json_object(vec![("k", 1.into())]));
        assert_eq!(
            feature.to_json().unwrap(),
            json!({
                "type": "Feature",
                "id": "a",
                "geometry": {"type": "Point", "coordinates": [1.0, 2.0]},
                "properties": {"k": 1}
            })
        );
        let collection: FeatureCollection = vec![feature.clone(), feature].into_iter().collect();
        assert_eq!(collection.len(), 2);
    }

    #[test]
    fn serde_integration() {
        #[derive(Deserialize)]
        struct Envelope {
            payload: FeatureCollection,
        }
        let envelope: Envelope = serde_json::from_str(&format!(
            r#"{{"payload": {}}}"#,
            FEATURE_COLLECTION_DOCUMENT
        ))
        .unwrap();
        assert_eq!(envelope.payload.len(), 3);
        let text = serde_json::to_string(&envelope.payload).unwrap();
        let decoded: FeatureCollection = from_str(&text).unwrap();
        assert_eq!(decoded, envelope.payload);
    }
}
