//! Zip archive access for packaged shapefiles.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{bail, Context, Result};
use tracing::debug;
use zip::ZipArchive;

/// The `.shp` and `.dbf` members of a zip-packaged shapefile, read into
/// memory.
#[derive(Debug)]
pub struct ShapefileArchive {
    pub shp: Vec<u8>,
    pub dbf: Vec<u8>,
}

impl ShapefileArchive {
    /// Read the shape and attribute members from the archive at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open boundary archive: {}", path.display()))?;
        let mut archive = ZipArchive::new(file)
            .with_context(|| format!("Failed to read zip archive: {}", path.display()))?;

        let shp = read_member(&mut archive, ".shp")?;
        let dbf = read_member(&mut archive, ".dbf")?;

        Ok(Self { shp, dbf })
    }
}

/// Read the first archive member whose name ends with `extension`.
fn read_member(archive: &mut ZipArchive<File>, extension: &str) -> Result<Vec<u8>> {
    let name = archive
        .file_names()
        .find(|n| n.to_ascii_lowercase().ends_with(extension))
        .map(str::to_owned);

    let name = match name {
        Some(name) => name,
        None => bail!("archive has no {} member", extension),
    };

    debug!("Reading archive member {}", name);

    let mut member = archive
        .by_name(&name)
        .with_context(|| format!("Failed to open archive member {}", name))?;
    let mut bytes = Vec::with_capacity(member.size() as usize);
    member
        .read_to_end(&mut bytes)
        .with_context(|| format!("Failed to read archive member {}", name))?;

    Ok(bytes)
}
