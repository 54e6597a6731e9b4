mod cli;
mod error;
mod fetch;
mod report;

use std::process::ExitCode;

use clap::Parser;

use cli::Cli;
use cli::Commands;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Fetch(args) => fetch::fetch(args),
        Commands::Report(args) => report::report(args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("{error}");
            ExitCode::FAILURE
        }
    }
}
