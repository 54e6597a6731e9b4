use std::collections::BTreeSet;
use std::collections::HashMap;
use std::fmt::Write;

use serde::Serialize;

use covis_data::fips::FipsTable;
use covis_data::fips::resolve_fips;
use covis_data::geo::Bounds;
use covis_data::geo::FeatureCollection;
use covis_data::geo::Position;
use covis_data::records::TestingRecord;

use crate::color::ColorScale;
use crate::color::FALLBACK_FILL;
use crate::color::interpolate;
use crate::scale::Dimensions;

const MAX_MAP_WIDTH: f64 = 900.0;
const MAX_MAP_HEIGHT: f64 = 400.0;

const LEGEND_STOPS: usize = 5;
const LEGEND_SWATCH: f64 = 24.0;
const LEGEND_X: f64 = 20.0;

/// One boundary region ready to draw.
#[derive(Debug, Serialize)]
pub(crate) struct Region {
    pub path: String,
    pub fill: String,
    /// Tooltip text; absent when the region cannot be named.
    pub label: Option<String>,
    /// Link to the region's chart page; absent when no records exist for it.
    pub href: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct LegendStop {
    pub color: String,
    pub x: f64,
}

/// Screen-space draw commands for the choropleth index map.
#[derive(Debug, Serialize)]
pub(crate) struct MapLayout {
    pub width: f64,
    pub height: f64,
    pub regions: Vec<Region>,
    pub has_legend: bool,
    pub legend: Vec<LegendStop>,
    pub legend_y: f64,
    pub legend_min: String,
    pub legend_max: String,
}

impl MapLayout {
    /// Projects the boundary dataset into the viewport, clamped to
    /// 900x400, and colors each region by its state's maximum cumulative
    /// test total. Returns `None` when the dataset has no coordinates
    /// to fit.
    pub fn build(
        geometry: &FeatureCollection,
        records: &[TestingRecord],
        fips_table: Option<&FipsTable>,
        known_states: &BTreeSet<String>,
        dimensions: Dimensions,
    ) -> Option<MapLayout> {
        let width = dimensions.width.min(MAX_MAP_WIDTH);
        let height = dimensions.height.min(MAX_MAP_HEIGHT);

        let projection = Projection::fit(geometry.bounds()?, width, height);

        let maxima = max_by_fips(records);
        let scale = ColorScale::over_maxima(maxima.values().copied());

        let regions = geometry
            .features
            .iter()
            .map(|feature| {
                let mut path = String::new();
                for ring in feature.geometry.rings() {
                    projection.append_ring(&mut path, ring);
                }

                let fips = feature.id.as_deref().unwrap_or_default();
                // Records carry the feed's own FIPS codes, so the raw id
                // joins first; the remap only bridges ids filed under a
                // different code in the lookup table.
                let value = maxima
                    .get(fips)
                    .or_else(|| maxima.get(resolve_fips(fips)))
                    .copied();

                let fill = match (value, &scale) {
                    (Some(value), Some(scale)) => scale.color(value),
                    _ => String::from(FALLBACK_FILL),
                };

                let name = fips_table
                    .and_then(|table| table.entry(fips))
                    .map(|entry| entry.name.as_str())
                    .or(feature.properties.name.as_deref());
                let label = match (name, value) {
                    (Some(name), Some(value)) => {
                        Some(format!("{name}: {value} total tests"))
                    }
                    (Some(name), None) => Some(format!("{name}: no data")),
                    (None, _) => None,
                };

                let href = fips_table
                    .and_then(|table| table.abbreviation(fips))
                    .filter(|state| known_states.contains(*state))
                    .map(|state| format!("views/{state}.html"));

                Region {
                    path,
                    fill,
                    label,
                    href,
                }
            })
            .collect();

        let legend = legend_stops();
        let (legend_min, legend_max) = match scale {
            Some(_) => {
                let min = maxima.values().min().copied().unwrap_or(0);
                let max = maxima.values().max().copied().unwrap_or(0);
                (min.to_string(), max.to_string())
            }
            None => (String::new(), String::new()),
        };

        Some(MapLayout {
            width,
            height,
            regions,
            has_legend: scale.is_some(),
            legend,
            legend_y: height - LEGEND_SWATCH - 6.0,
            legend_min,
            legend_max,
        })
    }
}

/// The maximum cumulative test total per FIPS code, over every record that
/// carries one.
fn max_by_fips(records: &[TestingRecord]) -> HashMap<&str, u64> {
    let mut maxima: HashMap<&str, u64> = HashMap::new();

    for record in records {
        let Some(fips) = record.fips.as_deref() else {
            continue;
        };

        let entry = maxima.entry(fips).or_default();
        *entry = (*entry).max(record.total_test_results);
    }

    maxima
}

fn legend_stops() -> Vec<LegendStop> {
    (0..LEGEND_STOPS)
        .map(|i| LegendStop {
            color: interpolate(i as f64 / (LEGEND_STOPS - 1) as f64),
            x: LEGEND_X + i as f64 * LEGEND_SWATCH,
        })
        .collect()
}

/// A linear lon/lat projection fitting a bounding box into a viewport,
/// preserving aspect ratio and centering the slack.
#[derive(Debug, Clone, Copy)]
struct Projection {
    bounds: Bounds,
    scale: f64,
    offset_x: f64,
    offset_y: f64,
}

impl Projection {
    fn fit(bounds: Bounds, width: f64, height: f64) -> Projection {
        let scale_x = width / bounds.width();
        let scale_y = height / bounds.height();
        let mut scale = scale_x.min(scale_y);

        if !scale.is_finite() || scale <= 0.0 {
            scale = 1.0;
        }

        Self {
            bounds,
            scale,
            offset_x: (width - scale * bounds.width()) / 2.0,
            offset_y: (height - scale * bounds.height()) / 2.0,
        }
    }

    /// Latitude grows northward but pixel y grows downward, so it flips.
    fn project(&self, position: Position) -> (f64, f64) {
        let [lon, lat] = position;

        (
            self.offset_x + (lon - self.bounds.min_lon) * self.scale,
            self.offset_y + (self.bounds.max_lat - lat) * self.scale,
        )
    }

    fn append_ring(&self, path: &mut String, ring: &[Position]) {
        let mut command = 'M';

        for &position in ring {
            let (x, y) = self.project(position);

            if !x.is_finite() || !y.is_finite() {
                continue;
            }

            // String formatting does not fail.
            let _ = write!(path, "{command}{x:.1},{y:.1}");
            command = 'L';
        }

        if command == 'L' {
            path.push('Z');
        }
    }
}
