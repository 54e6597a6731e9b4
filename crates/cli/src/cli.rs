use std::env;
use std::path::PathBuf;

use clap::Args;
use clap::Parser;
use clap::Subcommand;

use crate::error::CliError;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Fetch the testing datasets and store them locally.
    Fetch(FetchArgs),
    /// Generate the testing dashboard report from locally stored datasets.
    Report(ReportArgs),
}

#[derive(Args)]
pub(crate) struct FetchArgs {
    /// Specify the path where the fetched datasets will be stored.
    /// If the path is not specified then the current working directory
    /// is used.
    #[arg(short, long, value_parser(parse_path))]
    pub(crate) path: Option<PathBuf>,
}

#[derive(Args)]
pub(crate) struct ReportArgs {
    /// Specify the path from where to read the testing datasets.
    /// The path must exist and it must point to a directory.
    #[arg(short, long, value_parser(parse_path))]
    pub(crate) path: PathBuf,

    /// Specify the path where the generated report will be created.
    /// If the output path is not specified then the current working
    /// directory is used.
    #[arg(short, long, value_parser(parse_path))]
    pub(crate) output_path: Option<PathBuf>,

    /// Select a state by its abbreviation, for example `WA`.
    #[arg(short, long)]
    pub(crate) state: Option<String>,

    /// Select a state by clicking its map region, identified by the
    /// boundary-feature FIPS code, for example `72` for Puerto Rico.
    #[arg(short, long)]
    pub(crate) fips: Option<String>,

    /// Specify the window width the report is laid out for, in pixels.
    #[arg(short, long, default_value_t = 1400.0)]
    pub(crate) window_width: f64,

    /// Specify the start of the reported date window, as `YYYYMMDD`.
    #[arg(short = 'r', long)]
    pub(crate) start_date: Option<String>,

    /// Specify the end of the reported date window, as `YYYYMMDD`.
    #[arg(short = 'e', long)]
    pub(crate) end_date: Option<String>,
}

fn parse_path(path: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(path);

    if !path.exists() {
        return Err(format!("The `{}` path does not exist.", path.display()));
    }

    if !path.is_dir() {
        return Err(format!(
            "The `{}` path must point to a directory.",
            path.display()
        ));
    }

    Ok(path)
}

pub(crate) trait PathExt {
    fn or_current_dir(self) -> Result<PathBuf, CliError>;
}

impl PathExt for Option<PathBuf> {
    fn or_current_dir(self) -> Result<PathBuf, CliError> {
        if let Some(path) = self {
            Ok(path)
        } else {
            env::current_dir().map_err(|e| CliError::Path(e.to_string()))
        }
    }
}
