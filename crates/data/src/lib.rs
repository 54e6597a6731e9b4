//! Loading and normalization of COVID-19 testing statistics.
//!
//! The crate models the three resources the visualization is built from:
//! daily per-state testing records, U.S. state boundary geometry, and the
//! FIPS-to-state lookup table. Records are normalized at ingestion: missing
//! numeric fields coerce to zero and no record is dropped for missing data.

mod filter;

pub mod error;
pub mod fips;
pub mod geo;
pub mod records;

pub use crate::filter::RecordFilter;

/// File names used by `covis fetch` when storing the resources and by the
/// loaders when reading them back.
pub mod resource {
    pub const RECORDS_FILE_NAME: &str = "daily.json";
    pub const GEOMETRY_FILE_NAME: &str = "us-states.json";
    pub const FIPS_FILE_NAME: &str = "states-by-fips.json";
}
