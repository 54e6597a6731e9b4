use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::Deserialize;

use crate::error::DataError;
use crate::resource;

// The boundary dataset identifies Puerto Rico with FIPS `72` while the
// lookup table files it under `43`.
const PUERTO_RICO_GEOMETRY_FIPS: &str = "72";
const PUERTO_RICO_TABLE_FIPS: &str = "43";

/// One entry of the FIPS-to-state lookup table. Read-only reference data.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct FipsEntry {
    pub abbreviation: String,
    pub name: String,
}

/// The FIPS-to-state lookup table, keyed by FIPS code string.
#[derive(Debug, Clone, Deserialize)]
#[serde(transparent)]
pub struct FipsTable {
    entries: HashMap<String, FipsEntry>,
}

impl FipsTable {
    /// Looks up the entry for a boundary-feature FIPS code, applying the
    /// Puerto Rico remap first. A code absent from the table yields `None`;
    /// callers degrade (fallback fill, no tooltip) rather than fail.
    pub fn entry(&self, fips: &str) -> Option<&FipsEntry> {
        self.entries.get(resolve_fips(fips))
    }

    /// The state abbreviation for a boundary-feature FIPS code.
    pub fn abbreviation(&self, fips: &str) -> Option<&str> {
        self.entry(fips).map(|entry| entry.abbreviation.as_str())
    }
}

impl FromIterator<(String, FipsEntry)> for FipsTable {
    fn from_iter<I: IntoIterator<Item = (String, FipsEntry)>>(iter: I) -> FipsTable {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// Maps a boundary-feature FIPS code onto the lookup table's key space.
pub fn resolve_fips(fips: &str) -> &str {
    if fips == PUERTO_RICO_GEOMETRY_FIPS {
        PUERTO_RICO_TABLE_FIPS
    } else {
        fips
    }
}

/// Reads the FIPS lookup table stored at `path/states-by-fips.json`.
pub fn load_fips_table(path: &Path) -> Result<FipsTable, DataError> {
    let file = File::open(path.join(resource::FIPS_FILE_NAME))?;
    let table = serde_json::from_reader(BufReader::new(file))?;

    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> FipsTable {
        [
            (
                String::from("36"),
                FipsEntry {
                    abbreviation: String::from("NY"),
                    name: String::from("New York"),
                },
            ),
            (
                String::from("43"),
                FipsEntry {
                    abbreviation: String::from("PR"),
                    name: String::from("Puerto Rico"),
                },
            ),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn puerto_rico_is_remapped() {
        assert_eq!(resolve_fips("72"), "43");
    }

    #[test]
    fn other_codes_pass_through() {
        assert_eq!(resolve_fips("36"), "36");
        assert_eq!(resolve_fips("43"), "43");
        assert_eq!(resolve_fips(""), "");
    }

    #[test]
    fn lookup_applies_the_remap() {
        let table = table();

        assert_eq!(table.abbreviation("72"), Some("PR"));
        assert_eq!(table.abbreviation("36"), Some("NY"));
    }

    #[test]
    fn missing_codes_yield_none() {
        let table = table();

        assert_eq!(table.entry("78"), None);
    }
}
