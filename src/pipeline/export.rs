//! GeoJSON serialization of dissolved region features.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use geojson::{Feature, FeatureCollection, Geometry, JsonValue, Value};
use tracing::info;

use crate::models::{RegionFeature, COUNTIES_FIELD, REGION_FIELD};

/// Serialize the dissolved collection to a GeoJSON FeatureCollection file,
/// overwriting any existing file at `path`.
pub fn export_geojson<P: AsRef<Path>>(features: &[RegionFeature], path: P) -> Result<()> {
    let path = path.as_ref();

    let collection = FeatureCollection {
        bbox: None,
        features: features.iter().map(to_feature).collect(),
        foreign_members: None,
    };

    let json = serde_json::to_string(&collection).context("Failed to serialize GeoJSON")?;
    fs::write(path, json)
        .with_context(|| format!("Failed to write GeoJSON to {}", path.display()))?;

    info!(
        "Wrote {} region features to {}",
        features.len(),
        path.display()
    );
    Ok(())
}

fn to_feature(region: &RegionFeature) -> Feature {
    let mut properties = region.properties.clone();
    properties.insert(
        REGION_FIELD.to_string(),
        JsonValue::String(region.region.clone()),
    );
    properties.insert(
        COUNTIES_FIELD.to_string(),
        JsonValue::String(region.counties.clone()),
    );

    Feature {
        bbox: None,
        geometry: Some(Geometry::new(Value::from(&region.geometry))),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    }
}
