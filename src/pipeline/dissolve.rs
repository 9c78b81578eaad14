//! Groups tagged county features by region and unions their geometries.

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use geo::BooleanOps;
use tracing::{debug, info};

use crate::lookup::RegionLookup;
use crate::models::{CountyFeature, RegionFeature, LEGACY_FIELDS, REGION_FIELD};

/// Dissolve county features into one feature per region.
///
/// Each group's geometry is unioned, the comma-joined county list is
/// attached, and the legacy administrative fields are dropped. The first
/// feature's remaining attributes survive the merge. Output is ordered by
/// region name; regions with no member features do not appear.
pub fn dissolve(
    features: Vec<CountyFeature>,
    lookup: &mut RegionLookup,
) -> Result<Vec<RegionFeature>> {
    dissolve_by(features, lookup, REGION_FIELD)
}

/// Dissolve grouped on an arbitrary attribute field.
pub fn dissolve_by(
    features: Vec<CountyFeature>,
    lookup: &mut RegionLookup,
    by: &str,
) -> Result<Vec<RegionFeature>> {
    let mut groups: BTreeMap<String, Vec<CountyFeature>> = BTreeMap::new();
    for feature in features {
        let region = feature
            .properties
            .get(by)
            .and_then(|v| v.as_str())
            .map(str::to_owned)
            .with_context(|| format!("county feature has no {} attribute", by))?;
        groups.entry(region).or_default().push(feature);
    }

    let mut dissolved = Vec::with_capacity(groups.len());
    for (region, members) in groups {
        let geometry = match members.split_first() {
            Some((first, rest)) => rest
                .iter()
                .fold(first.geometry.clone(), |acc, f| acc.union(&f.geometry)),
            None => continue,
        };

        let counties = lookup.get_county(&region)?.to_owned();
        debug!("Dissolved {} features into {}", members.len(), region);

        // First row's attributes survive the merge, minus the legacy
        // columns and the grouping field itself.
        let mut properties = members
            .into_iter()
            .next()
            .map(|f| f.properties)
            .unwrap_or_default();
        for field in LEGACY_FIELDS {
            properties.remove(*field);
        }
        properties.remove(by);

        dissolved.push(RegionFeature {
            region,
            counties,
            geometry,
            properties,
        });
    }

    info!("Dissolved into {} region features", dissolved.len());
    Ok(dissolved)
}
