//! Dissolved region features produced by the pipeline.

use geo::{BoundingRect, MultiPolygon};
use geojson::JsonObject;

/// Attribute field holding the comma-joined county list in the output.
pub const COUNTIES_FIELD: &str = "counties";

/// One ACH region: the union of its member county polygons.
#[derive(Debug, Clone)]
pub struct RegionFeature {
    pub region: String,
    /// Comma-joined member county names, no surrounding whitespace.
    pub counties: String,
    pub geometry: MultiPolygon<f64>,
    /// Attributes surviving the dissolve (legacy fields removed).
    pub properties: JsonObject,
}

impl RegionFeature {
    /// Get the bounding box of this region's geometry.
    pub fn bbox(&self) -> Option<(f64, f64, f64, f64)> {
        self.geometry
            .bounding_rect()
            .map(|rect| (rect.min().x, rect.min().y, rect.max().x, rect.max().y))
    }
}
