// ffprog-cli/src/lib.rs
//
// Library portion of the ffmpeg-progress CLI application.
// Contains argument definitions and command logic.

pub mod cli;
pub mod commands;
pub mod error;
pub mod launcher;
pub mod logging;
pub mod progress;

// Re-export items needed by the binary or integration tests
pub use cli::{Cli, default_output_path};
pub use commands::run::run_progress;
pub use error::{CliErrorContext, CliResult};
pub use launcher::FfmpegLauncher;
pub use progress::BarProgress;
