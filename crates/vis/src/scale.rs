use std::collections::BTreeSet;

use chrono::NaiveDate;

use covis_data::records::TestingRecord;

const DEFAULT_TICK_COUNT: usize = 10;

/// The chart viewport, in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dimensions {
    /// Viewport width in pixels.
    pub width: f64,
    /// Viewport height in pixels.
    pub height: f64,
}

/// Fixed margins around the plotting area.
#[derive(Debug, Clone, Copy)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Margin {
    pub const CHART: Margin = Margin {
        top: 10.0,
        right: 90.0,
        bottom: 10.0,
        left: 100.0,
    };
}

/// Maps calendar dates onto horizontal pixel coordinates.
///
/// A degenerate domain (all observations on one date) maps every input to
/// the range start.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeScale {
    domain: (NaiveDate, NaiveDate),
    range: (f64, f64),
}

impl TimeScale {
    /// Builds a scale over the min/max of the given dates.
    /// Returns `None` when there are no dates to cover.
    pub fn over_dates<I>(dates: I, range: (f64, f64)) -> Option<TimeScale>
    where
        I: IntoIterator<Item = NaiveDate>,
    {
        let mut dates = dates.into_iter();
        let first = dates.next()?;
        let (min, max) = dates.fold((first, first), |(min, max), date| {
            (min.min(date), max.max(date))
        });

        Some(Self {
            domain: (min, max),
            range,
        })
    }

    pub fn scale(&self, date: NaiveDate) -> f64 {
        let (start, end) = self.domain;
        let span = (end - start).num_days();

        if span == 0 {
            return self.range.0;
        }

        let t = (date - start).num_days() as f64 / span as f64;
        self.range.0 + t * (self.range.1 - self.range.0)
    }

    pub fn domain(&self) -> (NaiveDate, NaiveDate) {
        self.domain
    }
}

/// Maps numeric values onto vertical pixel coordinates. The range is
/// inverted (larger values plot higher), so `scale(0)` is the chart bottom.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> LinearScale {
        Self { domain, range }
    }

    /// Builds a scale with a domain of `[0, stop]`, niced to round bounds.
    pub fn nice(stop: f64, range: (f64, f64)) -> LinearScale {
        Self::new((0.0, nice_stop(stop)), range)
    }

    pub fn scale(&self, value: f64) -> f64 {
        let (start, end) = self.domain;

        if end == start {
            return self.range.0;
        }

        let t = (value - start) / (end - start);
        self.range.0 + t * (self.range.1 - self.range.0)
    }

    /// Tick values over the domain, at a round step.
    pub fn ticks(&self) -> Vec<f64> {
        let (start, end) = self.domain;
        let step = tick_increment(start, end, DEFAULT_TICK_COUNT);

        if !step.is_finite() || step <= 0.0 {
            return vec![start];
        }

        let mut ticks = Vec::new();
        let mut value = (start / step).ceil() * step;

        while value <= end + step * f64::EPSILON {
            ticks.push(value);
            value += step;
        }

        ticks
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    pub fn range(&self) -> (f64, f64) {
        self.range
    }
}

/// The two chart scales computed from one filtered record set.
#[derive(Debug, Clone, Copy)]
pub struct ChartScales {
    /// Horizontal time scale; absent when the record set is empty.
    pub x: Option<TimeScale>,
    pub y: LinearScale,
}

/// Computes the chart scales for a filtered record set and viewport.
///
/// The time scale covers the distinct observed dates; the linear scale
/// covers `[0, max cumulative total]` with a floor of 1 to avoid a
/// degenerate zero-width domain, niced to round bounds.
pub fn chart_scales(records: &[&TestingRecord], dimensions: Dimensions) -> ChartScales {
    let margin = Margin::CHART;

    let dates: BTreeSet<NaiveDate> = records
        .iter()
        .filter_map(|record| record.parsed_date().ok())
        .collect();
    let x = TimeScale::over_dates(
        dates,
        (margin.left, dimensions.width - margin.right),
    );

    let max_total = records
        .iter()
        .map(|record| record.total_test_results)
        .max()
        .unwrap_or(0)
        .max(1);
    let y = LinearScale::nice(
        max_total as f64,
        (dimensions.height - margin.bottom, margin.top),
    );

    ChartScales { x, y }
}

// Round tick step covering (stop - start) / count, following the usual
// 1/2/5 x 10^k scheme.
fn tick_increment(start: f64, stop: f64, count: usize) -> f64 {
    let step = (stop - start) / count.max(1) as f64;

    if step <= 0.0 || !step.is_finite() {
        return step;
    }

    let power = step.log10().floor();
    let error = step / 10f64.powf(power);
    let factor = if error >= 50f64.sqrt() {
        10.0
    } else if error >= 10f64.sqrt() {
        5.0
    } else if error >= 2f64.sqrt() {
        2.0
    } else {
        1.0
    };

    factor * 10f64.powf(power)
}

// Rounds a domain stop up to the next tick increment, iterating until the
// increment stabilizes.
fn nice_stop(stop: f64) -> f64 {
    let stop = stop.max(1.0);
    let mut niced = stop;
    let mut prestep = 0.0;

    for _ in 0..10 {
        let step = tick_increment(0.0, niced, DEFAULT_TICK_COUNT);

        if step == prestep || step <= 0.0 || !step.is_finite() {
            break;
        }

        niced = (stop / step).ceil() * step;
        prestep = step;
    }

    niced
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(raw_date: &str, total: u64) -> TestingRecord {
        TestingRecord {
            state: String::from("NY"),
            raw_date: raw_date.to_owned(),
            date: String::new(),
            positive: 0,
            negative: 0,
            pending: 0,
            death: 0,
            total_test_results: total,
            fips: None,
        }
    }

    fn date(raw: &str) -> NaiveDate {
        NaiveDate::parse_from_str(raw, "%Y%m%d").unwrap()
    }

    #[test]
    fn time_scale_maps_domain_endpoints_to_range_endpoints() {
        let scale = TimeScale::over_dates(
            vec![date("20200301"), date("20200311")],
            (100.0, 400.0),
        )
        .unwrap();

        assert_eq!(scale.scale(date("20200301")), 100.0);
        assert_eq!(scale.scale(date("20200311")), 400.0);
        assert_eq!(scale.scale(date("20200306")), 250.0);
    }

    #[test]
    fn degenerate_time_domain_maps_to_range_start() {
        let scale = TimeScale::over_dates(vec![date("20200301")], (100.0, 400.0)).unwrap();

        assert_eq!(scale.scale(date("20200301")), 100.0);
        assert_eq!(scale.scale(date("20200401")), 100.0);
    }

    #[test]
    fn time_scale_over_no_dates_is_absent() {
        assert!(TimeScale::over_dates(vec![], (0.0, 1.0)).is_none());
    }

    #[test]
    fn linear_scale_inverts_the_range() {
        let scale = LinearScale::new((0.0, 100.0), (190.0, 10.0));

        assert_eq!(scale.scale(0.0), 190.0);
        assert_eq!(scale.scale(100.0), 10.0);
        assert_eq!(scale.scale(50.0), 100.0);
    }

    #[test]
    fn zero_maps_to_the_range_start() {
        let scale = LinearScale::nice(23.0, (190.0, 10.0));

        assert_eq!(scale.scale(0.0), scale.range().0);
    }

    #[test]
    fn nice_domain_has_round_bounds() {
        let scale = LinearScale::nice(23.0, (190.0, 10.0));

        assert_eq!(scale.domain(), (0.0, 24.0));

        let scale = LinearScale::nice(987.0, (190.0, 10.0));

        assert_eq!(scale.domain(), (0.0, 1000.0));
    }

    #[test]
    fn ticks_cover_the_domain_at_a_round_step() {
        let scale = LinearScale::nice(987.0, (190.0, 10.0));
        let ticks = scale.ticks();

        assert_eq!(ticks.first().copied(), Some(0.0));
        assert_eq!(ticks.last().copied(), Some(1000.0));
        assert_eq!(ticks.len(), 11);
    }

    #[test]
    fn chart_scales_are_deterministic() {
        let records = vec![record("20200301", 15), record("20200302", 23)];
        let refs: Vec<&TestingRecord> = records.iter().collect();
        let dimensions = Dimensions {
            width: 1000.0,
            height: 400.0,
        };

        let first = chart_scales(&refs, dimensions);
        let second = chart_scales(&refs, dimensions);

        assert_eq!(first.y, second.y);
        assert_eq!(first.x, second.x);

        let x1 = first.x.unwrap();
        let x2 = second.x.unwrap();
        assert_eq!(x1.scale(date("20200302")), x2.scale(date("20200302")));
        assert_eq!(first.y.scale(15.0), second.y.scale(15.0));
    }

    #[test]
    fn empty_record_sets_floor_the_linear_domain_at_one() {
        let scales = chart_scales(
            &[],
            Dimensions {
                width: 1000.0,
                height: 400.0,
            },
        );

        assert!(scales.x.is_none());
        assert_eq!(scales.y.domain(), (0.0, 1.0));
    }

    #[test]
    fn chart_scale_ranges_respect_the_margins() {
        let records = vec![record("20200301", 15), record("20200302", 23)];
        let refs: Vec<&TestingRecord> = records.iter().collect();
        let scales = chart_scales(
            &refs,
            Dimensions {
                width: 1000.0,
                height: 400.0,
            },
        );

        assert_eq!(scales.x.unwrap().scale(date("20200301")), 100.0);
        assert_eq!(scales.y.scale(0.0), 390.0);
    }
}
