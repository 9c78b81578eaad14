//! Reading county boundary features from a zip-packaged shapefile.

pub mod archive;
pub mod reader;

pub use archive::ShapefileArchive;
pub use reader::load_counties;
