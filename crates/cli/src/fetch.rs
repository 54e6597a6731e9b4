pub(crate) mod client;
pub(crate) mod error;

use crate::cli::FetchArgs;
use crate::cli::PathExt;
use crate::error::CliError;
use crate::fetch::client::DataClient;

/// Downloads the three datasets the report is built from. Each download
/// is independent: a failed one is reported and the others still run,
/// matching the per-visualization degradation of the report itself.
pub(crate) fn fetch(args: FetchArgs) -> Result<(), CliError> {
    let path = args.path.or_current_dir()?;
    let client = DataClient::new()?;

    println!(
        "covis fetches the testing datasets into: `{}`",
        path.display()
    );

    let downloads = [
        ("testing records", client.fetch_records(&path)),
        ("state boundaries", client.fetch_geometry(&path)),
        ("FIPS lookup table", client.fetch_fips_table(&path)),
    ];

    let mut first_error = None;
    let mut fetched = 0;

    for (name, result) in downloads {
        match result {
            Ok(bytes) => {
                fetched += 1;
                println!("fetched the {name}: {bytes} bytes");
            }
            Err(error) => {
                eprintln!("fetching the {name} failed: {error}");
                first_error.get_or_insert(error);
            }
        }
    }

    // The command fails only when nothing at all could be fetched.
    match (fetched, first_error) {
        (0, Some(error)) => Err(error.into()),
        _ => Ok(()),
    }
}
