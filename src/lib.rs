//! ACH Regions - dissolves Washington State county boundaries into
//! Accountable Community of Health region polygons.
//!
//! This library provides the lookup table, shapefile loading, and dissolve
//! pipeline used by the `dissolve` binary.

pub mod lookup;
pub mod models;
pub mod pipeline;
pub mod shp;

pub use lookup::{LookupError, RegionLookup};
pub use models::{CountyFeature, RegionFeature};
