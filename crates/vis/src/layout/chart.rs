use serde::Serialize;

use covis_data::records::TestingRecord;

use crate::scale::ChartScales;
use crate::scale::Dimensions;
use crate::scale::Margin;
use crate::scale::chart_scales;
use crate::view::PointerPosition;

pub(crate) const CIRCLE_RADIUS: f64 = 3.0;
pub(crate) const TOOLTIP_WIDTH: f64 = 125.0;

// Date labels get unreadable past this count; every n-th tick is kept.
const MAX_X_TICKS: usize = 12;

// Room below the plotting area for the x axis labels and title.
const AXIS_LABEL_OFFSET: f64 = 14.0;
const X_TITLE_OFFSET: f64 = 26.0;
const SVG_BOTTOM_PADDING: f64 = 36.0;

// Category legend swatch column, drawn in the right margin.
const LEGEND_SWATCH: f64 = 10.0;
const LEGEND_PADDING: f64 = 5.0;
const LEGEND_OFFSET: f64 = 8.0;

/// A category of test-outcome data. The bar chart stacks `Positive` on
/// `Negative`; `Death` renders as a circle marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Positive test results.
    Positive,
    /// Negative test results.
    Negative,
    /// Tests with pending results.
    Pending,
    /// Deaths.
    Death,
}

impl Category {
    /// The record field this category reads.
    pub fn value(&self, record: &TestingRecord) -> u64 {
        match self {
            Category::Positive => record.positive,
            Category::Negative => record.negative,
            Category::Pending => record.pending,
            Category::Death => record.death,
        }
    }

    /// The category name used in labels and fills.
    pub fn name(&self) -> &'static str {
        match self {
            Category::Positive => "positive",
            Category::Negative => "negative",
            Category::Pending => "pending",
            Category::Death => "death",
        }
    }

    /// The capitalized name shown in the chart legend.
    pub fn legend_label(&self) -> &'static str {
        match self {
            Category::Positive => "Positive",
            Category::Negative => "Negative",
            Category::Pending => "Pending",
            Category::Death => "Deaths",
        }
    }

    fn fill(&self) -> &'static str {
        match self {
            Category::Positive => "#e76f51",
            Category::Negative => "#4682b4",
            Category::Pending => "#e9c46a",
            Category::Death => "#222222",
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct Bar {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub fill: &'static str,
    pub category: Category,
    pub label: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct CircleMark {
    pub x: f64,
    pub y: f64,
    pub r: f64,
    pub fill: &'static str,
    pub label: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct Tick {
    pub x: f64,
    pub y: f64,
    pub label: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct LegendSwatch {
    pub x: f64,
    pub y: f64,
    pub size: f64,
    pub fill: &'static str,
    pub label_x: f64,
    pub label_y: f64,
    pub label: &'static str,
}

#[derive(Debug, Serialize)]
pub(crate) struct LegendDeath {
    pub x: f64,
    pub y: f64,
    pub r: f64,
    pub fill: &'static str,
    pub label_x: f64,
    pub label_y: f64,
    pub label: &'static str,
}

/// Screen-space draw commands for one state's stacked bar/scatter chart.
#[derive(Debug, Serialize)]
pub(crate) struct ChartLayout {
    pub width: f64,
    pub height: f64,
    pub svg_height: f64,
    pub bar_width: f64,
    pub bars: Vec<Bar>,
    pub deaths: Vec<CircleMark>,
    pub x_ticks: Vec<Tick>,
    pub y_ticks: Vec<Tick>,
    pub legend: Vec<LegendSwatch>,
    pub legend_death: LegendDeath,
    pub axis_y: f64,
    pub axis_x1: f64,
    pub axis_x2: f64,
    pub x_title_x: f64,
    pub x_title_y: f64,
    pub y_title_x: f64,
    pub y_title_y: f64,
}

impl ChartLayout {
    /// Computes the stacked layout for a filtered record set: positive sits
    /// on top of negative, every segment height is `y(0) - y(value)`, and
    /// bars tile the inner width without overlap.
    pub fn build(records: &[&TestingRecord], dimensions: Dimensions) -> ChartLayout {
        let margin = Margin::CHART;
        let scales = chart_scales(records, dimensions);

        let inner_width = dimensions.width - margin.left - margin.right;
        let bar_width = inner_width / records.len().max(1) as f64;
        let baseline = scales.y.scale(0.0);

        let mut bars = Vec::with_capacity(records.len() * 2);
        let mut deaths = Vec::with_capacity(records.len());

        if let Some(ref x_scale) = scales.x {
            for record in records {
                let Ok(date) = record.parsed_date() else {
                    continue;
                };
                let x = x_scale.scale(date);

                let positive = record.positive as f64;
                let stacked = (record.positive + record.negative) as f64;

                bars.push(Bar {
                    x,
                    y: scales.y.scale(positive),
                    width: bar_width,
                    height: baseline - scales.y.scale(positive),
                    fill: Category::Positive.fill(),
                    category: Category::Positive,
                    label: mark_label(record, Category::Positive),
                });
                bars.push(Bar {
                    x,
                    y: scales.y.scale(stacked),
                    width: bar_width,
                    height: baseline - scales.y.scale(record.negative as f64),
                    fill: Category::Negative.fill(),
                    category: Category::Negative,
                    label: mark_label(record, Category::Negative),
                });

                if record.death > 0 {
                    deaths.push(CircleMark {
                        x: bar_width / 2.0 + CIRCLE_RADIUS / 3.0 + x,
                        y: scales.y.scale(record.death as f64),
                        r: CIRCLE_RADIUS,
                        fill: Category::Death.fill(),
                        label: mark_label(record, Category::Death),
                    });
                }
            }
        }

        let axis_y = dimensions.height - margin.bottom;
        let (legend, legend_death) = legend(dimensions, margin);

        ChartLayout {
            width: dimensions.width,
            height: dimensions.height,
            svg_height: dimensions.height + SVG_BOTTOM_PADDING,
            bar_width,
            bars,
            deaths,
            x_ticks: x_ticks(records, &scales, bar_width, axis_y),
            y_ticks: y_ticks(&scales, margin.left),
            legend,
            legend_death,
            axis_y,
            axis_x1: margin.left,
            axis_x2: dimensions.width - margin.right,
            x_title_x: dimensions.width / 2.0,
            x_title_y: axis_y + X_TITLE_OFFSET,
            // The y title is rotated -90 degrees, so its x runs up the axis.
            y_title_x: -dimensions.height / 2.0,
            y_title_y: margin.left / 2.0,
        }
    }
}

/// Where the tooltip anchors for a hovered mark.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TooltipAnchor {
    pub left: f64,
    pub top: f64,
}

/// Places the tooltip relative to the pointer, centered over the hovered
/// bar column.
pub fn tooltip_anchor(pointer: PointerPosition, bar_width: f64) -> TooltipAnchor {
    TooltipAnchor {
        left: pointer.x - (TOOLTIP_WIDTH + bar_width) / 2.0,
        top: pointer.y - 100.0,
    }
}

pub(crate) fn mark_label(record: &TestingRecord, category: Category) -> String {
    format!(
        "{state} {date} {name}s: {value}",
        state = record.state,
        date = record.date,
        name = category.name(),
        value = category.value(record)
    )
}

// Fixed swatch column in the right margin: one square per stacked
// category and a circle for the death marker.
fn legend(dimensions: Dimensions, margin: Margin) -> (Vec<LegendSwatch>, LegendDeath) {
    let x = dimensions.width - margin.right + LEGEND_OFFSET;
    let label_x = x + LEGEND_SWATCH + LEGEND_PADDING;
    let row = |i: usize| margin.top + i as f64 * (LEGEND_SWATCH + LEGEND_PADDING);

    let swatches = [Category::Negative, Category::Positive]
        .into_iter()
        .enumerate()
        .map(|(i, category)| LegendSwatch {
            x,
            y: row(i),
            size: LEGEND_SWATCH,
            fill: category.fill(),
            label_x,
            label_y: row(i) + LEGEND_SWATCH - 1.0,
            label: category.legend_label(),
        })
        .collect();

    let death_row = row(2);
    let legend_death = LegendDeath {
        x: x + LEGEND_SWATCH / 2.0,
        y: death_row + LEGEND_SWATCH / 2.0,
        r: CIRCLE_RADIUS,
        fill: Category::Death.fill(),
        label_x,
        label_y: death_row + LEGEND_SWATCH - 1.0,
        label: Category::Death.legend_label(),
    };

    (swatches, legend_death)
}

fn x_ticks(
    records: &[&TestingRecord],
    scales: &ChartScales,
    bar_width: f64,
    axis_y: f64,
) -> Vec<Tick> {
    let Some(ref x_scale) = scales.x else {
        return Vec::new();
    };

    let mut dates: Vec<_> = records
        .iter()
        .filter_map(|record| {
            let date = record.parsed_date().ok()?;
            Some((date, record.date.clone()))
        })
        .collect();
    dates.sort();
    dates.dedup();

    let step = dates.len().div_ceil(MAX_X_TICKS).max(1);

    dates
        .into_iter()
        .step_by(step)
        .map(|(date, label)| Tick {
            x: x_scale.scale(date) + bar_width / 2.0,
            y: axis_y + AXIS_LABEL_OFFSET,
            label,
        })
        .collect()
}

fn y_ticks(scales: &ChartScales, axis_x: f64) -> Vec<Tick> {
    scales
        .y
        .ticks()
        .into_iter()
        .map(|value| Tick {
            x: axis_x - 8.0,
            y: scales.y.scale(value) + 3.0,
            label: format_tick(value),
        })
        .collect()
}

fn format_tick(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}
