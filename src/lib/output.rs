use super::codec::JsonCodec;
use super::error::Result;
use super::feature::{FeatureCollection, Properties};
use super::geojson::GeoJson;
use super::geometry::GeometryObject;
use std::io::Write;

/// Encode to compact JSON text.
pub fn to_string<T: JsonCodec>(value: &T) -> Result<String> {
    Ok(serde_json::to_string(&value.to_json()?)?)
}

pub fn to_string_pretty<T: JsonCodec>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(&value.to_json()?)?)
}

pub fn to_writer<T: JsonCodec>(writer: impl Write, value: &T) -> Result<()> {
    serde_json::to_writer(writer, &value.to_json()?)?;
    Ok(())
}

pub trait Output {
    /// The whole document on a single line.
    fn write_geojson(&self, writer: &mut dyn Write) -> Result<()>;
    /// One line per feature, or per top-level value when there is no list.
    fn write_json_lines(&self, writer: &mut dyn Write) -> Result<()>;
}

impl<G: GeometryObject, P: Properties> Output for FeatureCollection<G, P> {
    fn write_geojson(&self, writer: &mut dyn Write) -> Result<()> {
        let string = to_string(self)?;
        writeln!(writer, "{}", string)?;
        Ok(())
    }

    fn write_json_lines(&self, writer: &mut dyn Write) -> Result<()> {
        for feature in self.iter() {
            let json = to_string(feature)?;
            writeln!(writer, "{}", json)?;
        }
        Ok(())
    }
}

impl Output for GeoJson {
    fn write_geojson(&self, writer: &mut dyn Write) -> Result<()> {
        let string = to_string(self)?;
        writeln!(writer, "{}", string)?;
        Ok(())
    }

    fn write_json_lines(&self, writer: &mut dyn Write) -> Result<()> {
        match self {
            GeoJson::FeatureCollection(collection, _) => collection.write_json_lines(writer),
            document => document.write_geojson(writer),
        }
    }
}
