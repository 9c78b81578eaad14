//! County -> ACH region lookup table.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("no region mapping for county {0:?}")]
    UnknownCounty(String),

    #[error("no counties mapped to region {0:?}")]
    UnknownRegion(String),

    #[error("failed to read region table {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("region table {} is not a county -> region JSON object", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Maps county names (title case) to ACH region names.
///
/// The forward table is read from a JSON object file on first use. The
/// reverse index (region -> comma-joined county list) is derived from the
/// forward table on demand and rebuilt in full whenever the table changes.
pub struct RegionLookup {
    path: PathBuf,
    /// County -> region, lazily loaded from `path`.
    regions: Option<HashMap<String, String>>,
    /// Region -> "CountyA,CountyB", derived from `regions`.
    counties: Option<HashMap<String, String>>,
}

impl RegionLookup {
    /// Create a lookup backed by a JSON table file. Nothing is read until
    /// the first query.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            regions: None,
            counties: None,
        }
    }

    /// Create a lookup from an in-memory table. [`RegionLookup::refresh`]
    /// is not meaningful on instances built this way.
    pub fn from_table(table: HashMap<String, String>) -> Self {
        Self {
            path: PathBuf::new(),
            regions: Some(table),
            counties: None,
        }
    }

    /// Look up the ACH region for a county name.
    pub fn get_region(&mut self, county: &str) -> Result<&str, LookupError> {
        self.table()?
            .get(county)
            .map(String::as_str)
            .ok_or_else(|| LookupError::UnknownCounty(county.to_string()))
    }

    /// Look up the comma-joined county list for a region name.
    pub fn get_county(&mut self, region: &str) -> Result<&str, LookupError> {
        if self.counties.is_none() {
            let index = build_county_index(self.table()?);
            self.counties = Some(index);
        }
        self.counties
            .as_ref()
            .unwrap()
            .get(region)
            .map(String::as_str)
            .ok_or_else(|| LookupError::UnknownRegion(region.to_string()))
    }

    /// Re-read the table from the backing file, replacing it in full.
    ///
    /// The derived county index is invalidated so the next
    /// [`RegionLookup::get_county`] rebuilds it from the fresh table.
    pub fn refresh(&mut self) -> Result<(), LookupError> {
        self.regions = Some(read_table(&self.path)?);
        self.counties = None;
        Ok(())
    }

    fn table(&mut self) -> Result<&HashMap<String, String>, LookupError> {
        if self.regions.is_none() {
            self.regions = Some(read_table(&self.path)?);
        }
        Ok(self.regions.as_ref().unwrap())
    }
}

fn read_table(path: &Path) -> Result<HashMap<String, String>, LookupError> {
    let content = fs::read_to_string(path).map_err(|source| LookupError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let table: HashMap<String, String> =
        serde_json::from_str(&content).map_err(|source| LookupError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

    info!(
        "Loaded region table with {} counties from {}",
        table.len(),
        path.display()
    );
    Ok(table)
}

/// Invert the county -> region table into region -> county lists.
///
/// Counties are appended in alphabetical order so the derived lists are
/// stable across runs.
fn build_county_index(table: &HashMap<String, String>) -> HashMap<String, String> {
    let mut entries: Vec<(&String, &String)> = table.iter().collect();
    entries.sort();

    let mut index: HashMap<String, String> = HashMap::new();
    for (county, region) in entries {
        match index.get_mut(region) {
            Some(list) => {
                list.push(',');
                list.push_str(county);
            }
            None => {
                index.insert(region.clone(), county.clone());
            }
        }
    }
    index
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn sample_table() -> HashMap<String, String> {
        [
            ("King", "Region1"),
            ("Snohomish", "Region1"),
            ("Yakima", "Region2"),
        ]
        .into_iter()
        .map(|(c, r)| (c.to_string(), r.to_string()))
        .collect()
    }

    #[test]
    fn test_get_region() {
        let mut lookup = RegionLookup::from_table(sample_table());
        assert_eq!(lookup.get_region("King").unwrap(), "Region1");
        assert_eq!(lookup.get_region("Yakima").unwrap(), "Region2");
    }

    #[test]
    fn test_unknown_county() {
        let mut lookup = RegionLookup::from_table(sample_table());
        let err = lookup.get_region("Multnomah").unwrap_err();
        assert!(matches!(err, LookupError::UnknownCounty(_)));
    }

    #[test]
    fn test_unknown_region() {
        let mut lookup = RegionLookup::from_table(sample_table());
        let err = lookup.get_county("Region9").unwrap_err();
        assert!(matches!(err, LookupError::UnknownRegion(_)));
    }

    #[test]
    fn test_county_lists_are_alphabetical() {
        let mut lookup = RegionLookup::from_table(sample_table());
        assert_eq!(lookup.get_county("Region1").unwrap(), "King,Snohomish");
        assert_eq!(lookup.get_county("Region2").unwrap(), "Yakima");
    }

    #[test]
    fn test_every_county_round_trips() {
        let table = sample_table();
        let mut lookup = RegionLookup::from_table(table.clone());

        for county in table.keys() {
            let region = lookup.get_region(county).unwrap().to_string();
            let members = lookup.get_county(&region).unwrap().to_string();
            assert!(members.split(',').any(|c| c == county));
        }
    }

    #[test]
    fn test_index_regions_match_table() {
        let table = sample_table();
        let mut lookup = RegionLookup::from_table(table.clone());

        let distinct: HashSet<&String> = table.values().collect();
        for region in &distinct {
            assert!(lookup.get_county(region).is_ok());
        }
    }

    #[test]
    fn test_missing_table_file() {
        let mut lookup = RegionLookup::new("/nonexistent/regions.json");
        let err = lookup.get_region("King").unwrap_err();
        assert!(matches!(err, LookupError::Io { .. }));
    }

    #[test]
    fn test_malformed_table_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("regions.json");
        fs::write(&path, "[1, 2, 3]").unwrap();

        let mut lookup = RegionLookup::new(&path);
        let err = lookup.get_region("King").unwrap_err();
        assert!(matches!(err, LookupError::Parse { .. }));
    }

    #[test]
    fn test_refresh_rebuilds_index() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("regions.json");
        fs::write(&path, r#"{"King": "Region1"}"#).unwrap();

        let mut lookup = RegionLookup::new(&path);
        assert_eq!(lookup.get_region("King").unwrap(), "Region1");
        assert_eq!(lookup.get_county("Region1").unwrap(), "King");

        fs::write(&path, r#"{"King": "Region1", "Pierce": "Region1"}"#).unwrap();
        lookup.refresh().unwrap();

        assert_eq!(lookup.get_region("Pierce").unwrap(), "Region1");
        assert_eq!(lookup.get_county("Region1").unwrap(), "King,Pierce");
    }
}
