//! County boundary features decoded from the source shapefile.

use geo::MultiPolygon;
use geojson::JsonObject;

/// Attribute field holding the county name in the source shapefile.
pub const COUNTY_NAME_FIELD: &str = "JURISDIC_2";

/// Attribute field added by the tagging stage.
pub const REGION_FIELD: &str = "region";

/// Administrative/editorial fields from the source shapefile that have no
/// meaning after dissolve and are dropped from the output.
pub const LEGACY_FIELDS: &[&str] = &[
    "OBJECTID",
    "JURISDICT_",
    "JURISDIC_1",
    "JURISDIC_2",
    "JURISDIC_3",
    "JURISDIC_4",
    "JURISDIC_5",
    "JURISDIC_6",
    "EDIT_STATU",
    "EDIT_WHO",
];

/// A single county boundary with its source attribute record.
#[derive(Debug, Clone)]
pub struct CountyFeature {
    pub geometry: MultiPolygon<f64>,
    pub properties: JsonObject,
}

impl CountyFeature {
    pub fn new(geometry: MultiPolygon<f64>, properties: JsonObject) -> Self {
        Self {
            geometry,
            properties,
        }
    }

    /// County name from the source attribute record.
    pub fn county_name(&self) -> Option<&str> {
        self.properties
            .get(COUNTY_NAME_FIELD)
            .and_then(|v| v.as_str())
    }

    /// Region assigned by the tagging stage, if any.
    pub fn region(&self) -> Option<&str> {
        self.properties.get(REGION_FIELD).and_then(|v| v.as_str())
    }
}
