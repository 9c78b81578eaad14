//! The tag -> dissolve -> export pipeline stages.

pub mod dissolve;
pub mod export;
pub mod tagger;

pub use dissolve::{dissolve, dissolve_by};
pub use export::export_geojson;
pub use tagger::add_regions;
