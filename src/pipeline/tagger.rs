//! Tags county features with their ACH region.

use anyhow::{Context, Result};
use geojson::JsonValue;
use tracing::{debug, info};

use crate::lookup::RegionLookup;
use crate::models::{CountyFeature, COUNTY_NAME_FIELD, REGION_FIELD};

/// Add a `region` attribute to every county feature.
///
/// A county missing from the lookup table aborts the run; there is no
/// skip-and-continue policy and no partial output.
pub fn add_regions(
    mut features: Vec<CountyFeature>,
    lookup: &mut RegionLookup,
) -> Result<Vec<CountyFeature>> {
    for feature in &mut features {
        let county = feature
            .county_name()
            .map(str::to_owned)
            .with_context(|| format!("county feature has no {} attribute", COUNTY_NAME_FIELD))?;

        let region = lookup.get_region(&county)?.to_owned();
        debug!("{} -> {}", county, region);

        feature
            .properties
            .insert(REGION_FIELD.to_string(), JsonValue::String(region));
    }

    info!("Tagged {} county features with regions", features.len());
    Ok(features)
}
