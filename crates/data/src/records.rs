use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use chrono::NaiveDate;
use serde::Deserialize;

use crate::error::DataError;
use crate::resource;

const RAW_DATE_FORMAT: &str = "%Y%m%d";
const DISPLAY_DATE_FORMAT: &str = "%m-%d";

/// One testing observation for one state on one date.
///
/// Numeric fields that are null or absent in the source feed are coerced to
/// zero at ingestion; a value that is present as `0` stays `0`. Records are
/// immutable after ingestion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestingRecord {
    pub state: String,
    /// The source date string, fixed-width `YYYYMMDD`. Lexicographic order
    /// over these strings equals chronological order.
    pub raw_date: String,
    /// Display-formatted date, `MM-DD`.
    pub date: String,
    pub positive: u64,
    pub negative: u64,
    pub pending: u64,
    pub death: u64,
    /// Cumulative number of test results reported up to this date.
    pub total_test_results: u64,
    pub fips: Option<String>,
}

impl TestingRecord {
    /// Parses [`TestingRecord::raw_date`] into a calendar date.
    pub fn parsed_date(&self) -> Result<NaiveDate, DataError> {
        parse_raw_date(&self.raw_date)
    }
}

fn parse_raw_date(raw_date: &str) -> Result<NaiveDate, DataError> {
    NaiveDate::parse_from_str(raw_date, RAW_DATE_FORMAT).map_err(|error| DataError::Date {
        raw_date: raw_date.to_owned(),
        error,
    })
}

/// The shape of one entry in the daily feed. Every numeric field may be null
/// or missing; the cumulative total is reported as `total` in early feed
/// revisions and as `totalTestResults` later.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawRecord {
    date: u32,
    state: String,
    positive: Option<u64>,
    negative: Option<u64>,
    pending: Option<u64>,
    death: Option<u64>,
    total: Option<u64>,
    total_test_results: Option<u64>,
    fips: Option<FipsValue>,
}

// The feed has reported FIPS codes both as strings and as bare numbers.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum FipsValue {
    Code(String),
    Number(u64),
}

impl From<FipsValue> for String {
    fn from(value: FipsValue) -> String {
        match value {
            FipsValue::Code(code) => code,
            FipsValue::Number(number) => number.to_string(),
        }
    }
}

impl TryFrom<RawRecord> for TestingRecord {
    type Error = DataError;

    fn try_from(raw: RawRecord) -> Result<TestingRecord, DataError> {
        let raw_date = raw.date.to_string();
        let date = parse_raw_date(&raw_date)?
            .format(DISPLAY_DATE_FORMAT)
            .to_string();

        Ok(TestingRecord {
            state: raw.state,
            raw_date,
            date,
            positive: raw.positive.unwrap_or(0),
            negative: raw.negative.unwrap_or(0),
            pending: raw.pending.unwrap_or(0),
            death: raw.death.unwrap_or(0),
            total_test_results: raw.total_test_results.or(raw.total).unwrap_or(0),
            fips: raw.fips.map(String::from),
        })
    }
}

/// Reads and normalizes the daily testing records stored at
/// `path/daily.json`.
pub fn load_records(path: &Path) -> Result<Vec<TestingRecord>, DataError> {
    let file = File::open(path.join(resource::RECORDS_FILE_NAME))?;
    let raw: Vec<RawRecord> = serde_json::from_reader(BufReader::new(file))?;

    raw.into_iter().map(TestingRecord::try_from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deserialize(json: &str) -> TestingRecord {
        let raw: RawRecord = serde_json::from_str(json).unwrap();
        TestingRecord::try_from(raw).unwrap()
    }

    #[test]
    fn null_numeric_fields_coerce_to_zero() {
        let record = deserialize(
            r#"{"date": 20200301, "state": "WA", "positive": null,
                "negative": null, "pending": null, "death": null,
                "totalTestResults": null}"#,
        );

        assert_eq!(record.positive, 0);
        assert_eq!(record.negative, 0);
        assert_eq!(record.pending, 0);
        assert_eq!(record.death, 0);
        assert_eq!(record.total_test_results, 0);
    }

    #[test]
    fn present_zero_stays_zero() {
        let record =
            deserialize(r#"{"date": 20200301, "state": "WA", "positive": 0, "total": 12}"#);

        assert_eq!(record.positive, 0);
    }

    #[test]
    fn total_test_results_is_preferred_over_total() {
        let record = deserialize(
            r#"{"date": 20200301, "state": "NY", "total": 10,
                "totalTestResults": 15}"#,
        );

        assert_eq!(record.total_test_results, 15);
    }

    #[test]
    fn total_is_used_when_total_test_results_is_missing() {
        let record = deserialize(r#"{"date": 20200301, "state": "NY", "total": 10}"#);

        assert_eq!(record.total_test_results, 10);
    }

    #[test]
    fn display_date_is_derived_from_the_raw_date() {
        let record = deserialize(r#"{"date": 20200314, "state": "NY"}"#);

        assert_eq!(record.raw_date, "20200314");
        assert_eq!(record.date, "03-14");
    }

    #[test]
    fn numeric_fips_codes_are_read_as_strings() {
        let record = deserialize(r#"{"date": 20200301, "state": "NY", "fips": 36}"#);

        assert_eq!(record.fips.as_deref(), Some("36"));
    }

    #[test]
    fn invalid_dates_are_reported() {
        let raw: RawRecord = serde_json::from_str(r#"{"date": 20201399, "state": "NY"}"#).unwrap();
        let record = TestingRecord::try_from(raw);

        assert!(matches!(record, Err(DataError::Date { .. })));
    }
}
