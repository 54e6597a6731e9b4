//! Generates the static HTML report.
//!
//! The report is an `index.html` with the choropleth map and state list,
//! plus one chart page per state under `views/`. Each visualization
//! degrades independently: a missing dataset renders as a "data
//! unavailable" block instead of failing the whole report.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

use serde::Serialize;

use covis_data::RecordFilter;
use covis_data::fips::FipsTable;
use covis_data::geo::FeatureCollection;
use covis_data::records::TestingRecord;

use crate::error::Result;
use crate::layout::chart::ChartLayout;
use crate::layout::chart::TOOLTIP_WIDTH;
use crate::layout::chart::mark_label;
use crate::layout::chart::tooltip_anchor;
use crate::layout::map::MapLayout;
use crate::template::TemplateEngine;
use crate::view::HoverTarget;
use crate::view::ViewState;

const INDEX_FILE_NAME: &str = "index.html";
const VIEWS_DIR_NAME: &str = "views";

const REPORT_TITLE: &str = "COVID-19 testing dashboard";

/// The inputs one report is generated from. Every dataset is optional;
/// an absent one only disables the visualizations built from it.
#[derive(Debug, Clone, Copy)]
pub struct Report<'a> {
    /// The normalized testing records, if they could be fetched.
    pub records: Option<&'a [TestingRecord]>,
    /// The state boundary dataset, if it could be fetched.
    pub geometry: Option<&'a FeatureCollection>,
    /// The FIPS lookup table, if it could be fetched.
    pub fips_table: Option<&'a FipsTable>,
    /// The view state the pages are rendered for.
    pub view: &'a ViewState,
}

/// Manages the directory layout of the generated report.
#[derive(Debug)]
pub struct VisLayout {
    path: PathBuf,
}

impl VisLayout {
    /// Initializes the report directory at the given path.
    pub fn init(path: &Path) -> Result<VisLayout> {
        fs::create_dir_all(path)?;

        Ok(Self {
            path: path.to_path_buf(),
        })
    }

    /// Generates the report pages and returns the path of the index page.
    pub fn generate_report(&self, report: &Report) -> Result<PathBuf> {
        let engine = TemplateEngine::new()?;

        let records = report.records.unwrap_or_default();
        let states: BTreeSet<String> =
            records.iter().map(|record| record.state.clone()).collect();

        let index_path = self.path.join(INDEX_FILE_NAME);
        let index = index_context(report, records, &states);
        fs::write(&index_path, engine.render_index(&index)?)?;

        if !states.is_empty() {
            let views_path = self.path.join(VIEWS_DIR_NAME);
            fs::create_dir_all(&views_path)?;

            for state in &states {
                let view = view_context(report, records, state);
                let page = engine.render_view(&view)?;
                fs::write(views_path.join(format!("{state}.html")), page)?;
            }
        }

        Ok(index_path)
    }
}

#[derive(Serialize)]
struct IndexContext {
    title: &'static str,
    selected_state: String,
    has_map: bool,
    map: Option<MapLayout>,
    has_states: bool,
    states: Vec<StateLink>,
}

#[derive(Serialize)]
struct StateLink {
    state: String,
    href: String,
    selected: bool,
}

#[derive(Serialize)]
struct ViewContext {
    title: String,
    state: String,
    has_chart: bool,
    chart: Option<ChartLayout>,
    has_tooltip: bool,
    tooltip: Option<TooltipContext>,
}

#[derive(Serialize)]
struct TooltipContext {
    left: f64,
    top: f64,
    width: f64,
    label: String,
}

fn index_context(
    report: &Report,
    records: &[TestingRecord],
    states: &BTreeSet<String>,
) -> IndexContext {
    let map = report.geometry.and_then(|geometry| {
        MapLayout::build(
            geometry,
            records,
            report.fips_table,
            states,
            report.view.dimensions,
        )
    });

    let states: Vec<StateLink> = states
        .iter()
        .map(|state| StateLink {
            state: state.clone(),
            href: format!("{VIEWS_DIR_NAME}/{state}.html"),
            selected: *state == report.view.selected_state,
        })
        .collect();

    IndexContext {
        title: REPORT_TITLE,
        selected_state: report.view.selected_state.clone(),
        has_map: map.is_some(),
        map,
        has_states: !states.is_empty(),
        states,
    }
}

fn view_context(report: &Report, records: &[TestingRecord], state: &str) -> ViewContext {
    let state_records = RecordFilter::by_state(state).apply(records);
    let chart = ChartLayout::build(&state_records, report.view.dimensions);

    let tooltip = tooltip_context(report, &state_records, state, &chart);

    ViewContext {
        title: format!("{state} testing data"),
        state: state.to_owned(),
        has_chart: !state_records.is_empty(),
        chart: Some(chart),
        has_tooltip: tooltip.is_some(),
        tooltip,
    }
}

// The tooltip renders only on the selected state's page, when a chart
// mark is hovered.
fn tooltip_context(
    report: &Report,
    state_records: &[&TestingRecord],
    state: &str,
    chart: &ChartLayout,
) -> Option<TooltipContext> {
    if state != report.view.selected_state {
        return None;
    }

    let hover = report.view.hover.as_ref()?;
    let HoverTarget::Record { index, category } = &hover.target else {
        return None;
    };
    let record = state_records.get(*index)?;

    let anchor = tooltip_anchor(hover.pointer, chart.bar_width);

    Some(TooltipContext {
        left: anchor.left,
        top: anchor.top,
        width: TOOLTIP_WIDTH,
        label: mark_label(record, *category),
    })
}
