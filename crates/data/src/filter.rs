use crate::records::TestingRecord;

/// Selects the records one visualization is built from.
///
/// The chart is filtered to a single selected state; the optional raw-date
/// window narrows the series further. A state absent from the data matches
/// nothing, which renders as an empty chart rather than an error.
#[derive(Debug, Default, Clone)]
pub struct RecordFilter {
    state: Option<String>,
    start_date: Option<String>,
    end_date: Option<String>,
}

impl RecordFilter {
    pub fn new(
        state: Option<String>,
        start_date: Option<String>,
        end_date: Option<String>,
    ) -> Self {
        Self {
            state,
            start_date,
            end_date,
        }
    }

    pub fn by_state(state: &str) -> Self {
        Self::new(Some(state.to_owned()), None, None)
    }

    pub fn matches(&self, record: &TestingRecord) -> bool {
        self.matches_state(record) && self.matches_date(record)
    }

    /// Filters a record list, preserving order.
    pub fn apply<'a>(&self, records: &'a [TestingRecord]) -> Vec<&'a TestingRecord> {
        records.iter().filter(|r| self.matches(r)).collect()
    }

    fn matches_state(&self, record: &TestingRecord) -> bool {
        match self.state {
            Some(ref state) => state == &record.state,
            None => true,
        }
    }

    // Raw dates are fixed-width YYYYMMDD, so string comparison is
    // chronological comparison.
    fn matches_date(&self, record: &TestingRecord) -> bool {
        match (self.start_date.as_deref(), self.end_date.as_deref()) {
            (None, None) => true,
            (None, Some(end)) => record.raw_date.as_str() <= end,
            (Some(start), None) => record.raw_date.as_str() >= start,
            (Some(start), Some(end)) => {
                record.raw_date.as_str() >= start && record.raw_date.as_str() <= end
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(state: &str, raw_date: &str) -> TestingRecord {
        TestingRecord {
            state: state.to_owned(),
            raw_date: raw_date.to_owned(),
            date: String::new(),
            positive: 0,
            negative: 0,
            pending: 0,
            death: 0,
            total_test_results: 0,
            fips: None,
        }
    }

    #[test]
    fn filters_by_state() {
        let records = vec![
            record("NY", "20200301"),
            record("WA", "20200301"),
            record("NY", "20200302"),
        ];

        let filtered = RecordFilter::by_state("NY").apply(&records);

        assert_eq!(filtered.len(), 2);
        assert!(filtered.iter().all(|r| r.state == "NY"));
    }

    #[test]
    fn unknown_state_matches_nothing() {
        let records = vec![record("NY", "20200301")];

        let filtered = RecordFilter::by_state("ZZ").apply(&records);

        assert!(filtered.is_empty());
    }

    #[test]
    fn filters_by_date_window() {
        let records = vec![
            record("NY", "20200301"),
            record("NY", "20200305"),
            record("NY", "20200310"),
        ];

        let filter = RecordFilter::new(
            None,
            Some(String::from("20200302")),
            Some(String::from("20200309")),
        );
        let filtered = filter.apply(&records);

        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].raw_date, "20200305");
    }

    #[test]
    fn default_filter_matches_everything() {
        let records = vec![record("NY", "20200301"), record("WA", "20200302")];

        assert_eq!(RecordFilter::default().apply(&records).len(), 2);
    }
}
