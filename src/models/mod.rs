//! Feature types flowing through the dissolve pipeline.

pub mod county;
pub mod region;

pub use county::{CountyFeature, COUNTY_NAME_FIELD, LEGACY_FIELDS, REGION_FIELD};
pub use region::{RegionFeature, COUNTIES_FIELD};
