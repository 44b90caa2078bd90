//! Implementation of the progress run.
//!
//! Validates the input, checks that ffprobe and ffmpeg are installed, builds
//! the session configuration from the command line and hands over to
//! ffprog-core. ffmpeg is reaped afterwards so a failed transcode is reported
//! even when the progress loop ended quietly.

use crate::cli::Cli;
use crate::error::{CliErrorContext, CliResult};
use crate::launcher::FfmpegLauncher;
use crate::progress::BarProgress;

use ffprog_core::{
    CoreError, MonitorOutcome, ProgressSession, RunSummary, SessionConfig, SessionConfigBuilder,
    check_dependency,
};

use std::fs;
use std::path::Path;

use log::{debug, info, warn};

/// Checks that the input exists and is a regular file.
pub fn validate_input(input: &Path) -> CliResult<()> {
    let metadata = fs::metadata(input)
        .cli_with_context(|| format!("Invalid input path '{}'", input.display()))?;
    if !metadata.is_file() {
        return Err(CoreError::OperationFailed(format!(
            "Input path '{}' is not a file",
            input.display()
        )));
    }
    Ok(())
}

/// Maps command-line options onto a session configuration.
pub fn build_config(args: &Cli) -> CliResult<SessionConfig> {
    let mut builder = SessionConfigBuilder::new()
        .stream_index(args.stream_index)
        .wait_time(args.wait_time)
        .initial_wait_time(args.initial_wait_time)
        .keep_stats_file(args.keep_stats);
    if let Some(dir) = &args.stats_dir {
        builder = builder.temp_dir(dir);
    }
    builder.build()
}

/// Runs ffmpeg on `args.file` and draws its progress until it finishes.
pub fn run_progress(args: &Cli) -> CliResult<RunSummary> {
    validate_input(&args.file)?;
    let config = build_config(args)?;

    check_dependency("ffprobe")?;
    check_dependency("ffmpeg")?;

    let output = args.output_path();
    info!("Input: {}", args.file.display());
    info!("Output: {}", output.display());
    debug!("Session settings: {config:?}");

    let session = ProgressSession::new(config);
    let mut launcher = FfmpegLauncher::new(args.ffmpeg_args.clone());

    let result = if args.bar {
        let mut bar = BarProgress::new();
        let result = session.run(&args.file, &output, &mut launcher, Some(&mut bar), None);
        bar.finish();
        result
    } else {
        // Ends the progress line drawn by the default renderer
        let mut on_done = || println!();
        session.run(&args.file, &output, &mut launcher, None, Some(&mut on_done))
    };
    let summary = result?;

    match summary.report.outcome {
        MonitorOutcome::Completed => info!("All {} frames reported", summary.estimate.total_frames),
        outcome => warn!(
            "ffmpeg stopped at {} of {} frames ({outcome})",
            summary.report.last_sample.frames_done, summary.estimate.total_frames
        ),
    }

    launcher
        .finish()
        .cli_with_context(|| format!("Transcoding '{}' failed", args.file.display()))?;

    if summary.stats_kept {
        eprintln!("Stats log kept at {}", summary.stats_path.display());
    }
    Ok(summary)
}
