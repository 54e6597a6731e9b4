use covis_data::RecordFilter;
use covis_data::fips::load_fips_table;
use covis_data::geo::load_geometry;
use covis_data::records::TestingRecord;
use covis_data::records::load_records;

use covis_vis::render::Report;
use covis_vis::render::VisLayout;
use covis_vis::view::Event;
use covis_vis::view::ViewState;

use crate::cli::PathExt;
use crate::cli::ReportArgs;
use crate::error::CliError;

/// Generates the dashboard report from the locally stored datasets.
///
/// A dataset that fails to load is reported and left out; the report
/// renders the remaining visualizations and marks the missing ones as
/// unavailable.
pub(crate) fn report(args: ReportArgs) -> Result<(), CliError> {
    let output_path = args.output_path.or_current_dir()?;

    println!(
        "covis reads the testing datasets from: `{}` and generates the dashboard report in: `{}`",
        args.path.display(),
        output_path.display()
    );

    let records = match load_records(&args.path) {
        Ok(records) => Some(records),
        Err(error) => {
            eprintln!("loading the testing records failed: {error}");
            None
        }
    };
    let geometry = match load_geometry(&args.path) {
        Ok(geometry) => Some(geometry),
        Err(error) => {
            eprintln!("loading the state boundaries failed: {error}");
            None
        }
    };
    let fips_table = match load_fips_table(&args.path) {
        Ok(table) => Some(table),
        Err(error) => {
            eprintln!("loading the FIPS lookup table failed: {error}");
            None
        }
    };

    let filter = RecordFilter::new(None, args.start_date, args.end_date);
    let records: Option<Vec<TestingRecord>> = records
        .map(|records| filter.apply(&records).into_iter().cloned().collect());

    let mut view = ViewState::new(args.window_width);
    if let Some(state) = args.state {
        view = view.apply(Event::SelectState { state }, fips_table.as_ref());
    }
    if let Some(feature_id) = args.fips {
        view = view.apply(Event::MapClick { feature_id }, fips_table.as_ref());
    }

    let vis = VisLayout::init(&output_path)?;
    let index_path = vis.generate_report(&Report {
        records: records.as_deref(),
        geometry: geometry.as_ref(),
        fips_table: fips_table.as_ref(),
        view: &view,
    })?;

    println!(
        "generated the dashboard report: `{}`",
        index_path.display()
    );

    Ok(())
}
