// ffprog-cli/src/main.rs
//
// Entry point for the `ffmpeg-progress` binary.
//
// Parses the command line, sets up logging on stderr and runs ffmpeg on the
// given file while drawing its progress. Any error, including ffmpeg itself
// failing, is printed to stderr and turns into exit code 1.

use clap::Parser;
use ffprog_cli::{Cli, logging, run_progress};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match run_progress(&cli) {
        Ok(summary) => {
            log::info!(
                "Finished {} ({}, {} updates)",
                cli.file.display(),
                summary.report.outcome,
                summary.report.callbacks
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::debug!("Run failed: {e:?}");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
