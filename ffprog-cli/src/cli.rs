// ffprog-cli/src/cli.rs
//
// Defines the command-line argument structures using clap.

use clap::Parser;
use std::path::{Path, PathBuf};

// --- CLI Argument Definition ---

#[derive(Parser, Debug)]
#[command(
    name = "ffmpeg-progress",
    author,
    version, // Reads from Cargo.toml via "cargo" feature in clap
    about = "Run ffmpeg on a file and show its progress",
    long_about = "Probes FILE with ffprobe to estimate the number of frames, runs ffmpeg \
                  with a vstats log and draws a progress bar from it. Arguments after FILE \
                  (or after --) are passed to ffmpeg between the input and the output."
)]
pub struct Cli {
    /// Input media file
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Output file (defaults to the input name with .mp4 in the current directory)
    #[arg(short = 'o', long = "output", value_name = "OUTPUT")]
    pub output: Option<PathBuf>,

    /// Stream whose frame rate is used for the frame estimate
    #[arg(long, value_name = "INDEX", default_value_t = ffprog_core::config::DEFAULT_STREAM_INDEX)]
    pub stream_index: usize,

    /// Seconds between polls of the stats log
    #[arg(
        long,
        value_name = "SECONDS",
        env = "FFPROG_WAIT_TIME",
        default_value_t = ffprog_core::config::DEFAULT_WAIT_TIME
    )]
    pub wait_time: f64,

    /// Seconds to wait after starting ffmpeg before the first poll
    #[arg(
        long,
        value_name = "SECONDS",
        env = "FFPROG_INITIAL_WAIT_TIME",
        default_value_t = ffprog_core::config::DEFAULT_INITIAL_WAIT_TIME
    )]
    pub initial_wait_time: f64,

    /// Optional: Directory for the stats log (defaults to the system temp dir)
    #[arg(long, value_name = "DIR")]
    pub stats_dir: Option<PathBuf>,

    /// Keep the vstats log after ffmpeg finishes
    #[arg(long)]
    pub keep_stats: bool,

    /// Draw an interactive progress bar instead of the plain text line
    #[arg(long)]
    pub bar: bool,

    /// Increase log output (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Extra ffmpeg output arguments
    #[arg(
        value_name = "FFMPEG_ARGS",
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub ffmpeg_args: Vec<String>,
}

impl Cli {
    /// Output path, falling back to `<input stem>.mp4` in the current directory.
    pub fn output_path(&self) -> PathBuf {
        match &self.output {
            Some(path) => path.clone(),
            None => default_output_path(&self.file),
        }
    }
}

/// `<stem>.mp4` relative to the current directory.
pub fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    PathBuf::from(format!("{stem}.mp4"))
}
