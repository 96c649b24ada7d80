use super::codec::JsonCodec;
use super::error::{json_type_name, Error, Result};
use super::feature::{Feature, FeatureCollection, FEATURE, FEATURE_COLLECTION};
use super::geometry::{type_tag, Geometry};
use serde_json::{Map, Number, Value};
use tracing::debug;

/// `[min_lon, min_lat, max_lon, max_lat]` or its 3-D variant; kept as given.
pub type BoundingBox = Vec<f64>;

/// A GeoJSON document.
#[derive(Clone, Debug, PartialEq)]
pub enum GeoJson {
    Feature(Feature, Option<BoundingBox>),
    FeatureCollection(FeatureCollection, Option<BoundingBox>),
    Geometry(Geometry, Option<BoundingBox>),
}

impl GeoJson {
    pub fn bbox(&self) -> Option<&BoundingBox> {
        match self {
            GeoJson::Feature(_, bbox)
            | GeoJson::FeatureCollection(_, bbox)
            | GeoJson::Geometry(_, bbox) => bbox.as_ref(),
        }
    }

    pub fn bbox_mut(&mut self) -> &mut Option<BoundingBox> {
        match self {
            GeoJson::Feature(_, bbox)
            | GeoJson::FeatureCollection(_, bbox)
            | GeoJson::Geometry(_, bbox) => bbox,
        }
    }

    /// The `type` tag written for this document.
    pub fn type_name(&self) -> &'static str {
        match self {
            GeoJson::Feature(..) => FEATURE,
            GeoJson::FeatureCollection(..) => FEATURE_COLLECTION,
            GeoJson::Geometry(geometry, _) => geometry.geometry_type().as_str(),
        }
    }
}

fn decode_bbox(object: &Map<String, Value>) -> Result<Option<BoundingBox>> {
    let items = match object.get("bbox") {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::Array(items)) => items,
        Some(other) => {
            return Err(Error::MalformedBoundingBox(format!(
                "expected an array, found {}",
                json_type_name(other)
            )))
        }
    };
    items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            item.as_f64().ok_or_else(|| {
                Error::MalformedBoundingBox(format!(
                    "element {} is {}, expected a number",
                    i,
                    json_type_name(item)
                ))
            })
        })
        .collect::<Result<Vec<f64>>>()
        .map(Some)
}

fn encode_bbox(bbox: &[f64]) -> Value {
    bbox.iter()
        .map(|&value| Number::from_f64(value).map_or(Value::Null, Value::Number))
        .collect()
}

impl JsonCodec for GeoJson {
    fn from_json(value: &Value) -> Result<Self> {
        let object = value
            .as_object()
            .ok_or_else(|| Error::expected_object("GeoJSON document", value))?;
        let tag = type_tag(object)?;
        let bbox = decode_bbox(object)?;
        debug!(document_type = tag, has_bbox = bbox.is_some(), "decoding document");
        let document = match tag {
            FEATURE => GeoJson::Feature(Feature::decode_members(object)?, bbox),
            FEATURE_COLLECTION => {
                GeoJson::FeatureCollection(FeatureCollection::decode_members(object)?, bbox)
            }
            _ => GeoJson::Geometry(Geometry::from_json(value)?, bbox),
        };
        Ok(document)
    }

    fn to_json(&self) -> Result<Value> {
        let mut object = Map::new();
        object.insert("type".to_string(), self.type_name().into());
        if let Some(bbox) = self.bbox() {
            object.insert("bbox".to_string(), encode_bbox(bbox));
        }
        match self {
            GeoJson::Feature(feature, _) => feature.encode_members(&mut object)?,
            GeoJson::FeatureCollection(collection, _) => collection.encode_members(&mut object)?,
            GeoJson::Geometry(geometry, _) => {
                if let Value::Object(members) = geometry.to_json()? {
                    object.extend(members.into_iter().filter(|(key, _)| key != "type"));
                }
            }
        }
        Ok(Value::Object(object))
    }
}

serde_via_codec!(GeoJson);

impl From<Feature> for GeoJson {
    fn from(feature: Feature) -> Self {
        GeoJson::Feature(feature, None)
    }
}

impl From<FeatureCollection> for GeoJson {
    fn from(collection: FeatureCollection) -> Self {
        GeoJson::FeatureCollection(collection, None)
    }
}

impl From<Geometry> for GeoJson {
    fn from(geometry: Geometry) -> Self {
        GeoJson::Geometry(geometry, None)
    }
}
