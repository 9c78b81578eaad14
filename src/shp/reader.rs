//! Decodes county polygon features and their attribute records.

use std::io::Cursor;
use std::path::Path;

use anyhow::{Context, Result};
use geo::{Contains, Coord, LineString, MultiPolygon, Point, Polygon};
use geojson::{JsonObject, JsonValue};
use shapefile::dbase::FieldValue;
use shapefile::{PolygonRing, Shape};
use tracing::{debug, info};

use super::archive::ShapefileArchive;
use crate::models::CountyFeature;

/// Load every polygon feature from the zip-packaged county shapefile.
///
/// No filtering is applied; all polygon records in the source are loaded.
pub fn load_counties<P: AsRef<Path>>(path: P) -> Result<Vec<CountyFeature>> {
    let path = path.as_ref();
    info!("Loading county boundaries from {}", path.display());

    let archive = ShapefileArchive::open(path)?;
    let shape_reader = shapefile::ShapeReader::new(Cursor::new(archive.shp))
        .with_context(|| format!("Failed to read .shp member of {}", path.display()))?;
    let dbase_reader = shapefile::dbase::Reader::new(Cursor::new(archive.dbf))
        .with_context(|| format!("Failed to read .dbf member of {}", path.display()))?;
    let mut reader = shapefile::Reader::new(shape_reader, dbase_reader);

    let mut features = Vec::new();
    for pair in reader.iter_shapes_and_records() {
        let (shape, record) = pair.context("Failed to decode shapefile record")?;

        let geometry = match shape {
            Shape::Polygon(polygon) => polygon_to_multi(&polygon),
            Shape::NullShape => continue,
            _ => {
                debug!("Skipping non-polygon shape");
                continue;
            }
        };

        let mut properties = JsonObject::new();
        for (field, value) in record {
            properties.insert(field, field_to_json(value));
        }

        features.push(CountyFeature::new(geometry, properties));
    }

    info!("Loaded {} county features", features.len());
    Ok(features)
}

/// Convert shapefile rings into a MultiPolygon, attaching each inner ring
/// to the outer ring that contains it.
fn polygon_to_multi(polygon: &shapefile::Polygon) -> MultiPolygon<f64> {
    let mut outers: Vec<Polygon<f64>> = Vec::new();
    let mut inners: Vec<LineString<f64>> = Vec::new();

    for ring in polygon.rings() {
        let coords: Vec<Coord<f64>> = ring
            .points()
            .iter()
            .map(|p| Coord { x: p.x, y: p.y })
            .collect();

        match ring {
            PolygonRing::Outer(_) => outers.push(Polygon::new(LineString::new(coords), vec![])),
            PolygonRing::Inner(_) => inners.push(LineString::new(coords)),
        }
    }

    for hole in inners {
        let probe = match hole.0.first() {
            Some(coord) => Point::from(*coord),
            None => continue,
        };
        if let Some(outer) = outers.iter_mut().find(|p| p.contains(&probe)) {
            outer.interiors_push(hole);
        }
    }

    MultiPolygon::new(outers)
}

/// Convert a dBase field value into its JSON attribute form.
fn field_to_json(value: FieldValue) -> JsonValue {
    match value {
        FieldValue::Character(Some(s)) => JsonValue::String(s.trim().to_string()),
        FieldValue::Character(None) => JsonValue::Null,
        FieldValue::Numeric(Some(n)) => float_to_json(n),
        FieldValue::Numeric(None) => JsonValue::Null,
        FieldValue::Float(Some(f)) => float_to_json(f64::from(f)),
        FieldValue::Float(None) => JsonValue::Null,
        FieldValue::Integer(i) => JsonValue::from(i),
        FieldValue::Double(d) => float_to_json(d),
        FieldValue::Currency(c) => float_to_json(c),
        FieldValue::Logical(Some(b)) => JsonValue::Bool(b),
        FieldValue::Logical(None) => JsonValue::Null,
        FieldValue::Date(Some(d)) => JsonValue::String(format!(
            "{:04}-{:02}-{:02}",
            d.year(),
            d.month(),
            d.day()
        )),
        FieldValue::Date(None) => JsonValue::Null,
        FieldValue::Memo(s) => JsonValue::String(s),
        _ => JsonValue::Null,
    }
}

fn float_to_json(n: f64) -> JsonValue {
    serde_json::Number::from_f64(n)
        .map(JsonValue::Number)
        .unwrap_or(JsonValue::Null)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shapefile::Point as ShpPoint;

    #[test]
    fn test_character_fields_are_trimmed() {
        let value = field_to_json(FieldValue::Character(Some("King      ".to_string())));
        assert_eq!(value, JsonValue::String("King".to_string()));
    }

    #[test]
    fn test_empty_fields_are_null() {
        assert_eq!(field_to_json(FieldValue::Character(None)), JsonValue::Null);
        assert_eq!(field_to_json(FieldValue::Numeric(None)), JsonValue::Null);
    }

    #[test]
    fn test_numeric_field() {
        let value = field_to_json(FieldValue::Numeric(Some(42.5)));
        assert_eq!(value, JsonValue::from(42.5));
    }

    #[test]
    fn test_date_field_formatting() {
        let date = shapefile::dbase::Date::new(7, 4, 2019);
        let value = field_to_json(FieldValue::Date(Some(date)));
        assert_eq!(value, JsonValue::String("2019-04-07".to_string()));
    }

    fn closed_ring(coords: &[(f64, f64)]) -> Vec<ShpPoint> {
        coords.iter().map(|(x, y)| ShpPoint::new(*x, *y)).collect()
    }

    #[test]
    fn test_polygon_with_hole() {
        let polygon = shapefile::Polygon::with_rings(vec![
            PolygonRing::Outer(closed_ring(&[
                (0.0, 0.0),
                (0.0, 10.0),
                (10.0, 10.0),
                (10.0, 0.0),
                (0.0, 0.0),
            ])),
            PolygonRing::Inner(closed_ring(&[
                (4.0, 4.0),
                (6.0, 4.0),
                (6.0, 6.0),
                (4.0, 6.0),
                (4.0, 4.0),
            ])),
        ]);

        let multi = polygon_to_multi(&polygon);
        assert_eq!(multi.0.len(), 1);
        assert_eq!(multi.0[0].interiors().len(), 1);
    }

    #[test]
    fn test_disjoint_outer_rings() {
        let polygon = shapefile::Polygon::with_rings(vec![
            PolygonRing::Outer(closed_ring(&[
                (0.0, 0.0),
                (0.0, 1.0),
                (1.0, 1.0),
                (1.0, 0.0),
                (0.0, 0.0),
            ])),
            PolygonRing::Outer(closed_ring(&[
                (5.0, 5.0),
                (5.0, 6.0),
                (6.0, 6.0),
                (6.0, 5.0),
                (5.0, 5.0),
            ])),
        ]);

        let multi = polygon_to_multi(&polygon);
        assert_eq!(multi.0.len(), 2);
    }
}
