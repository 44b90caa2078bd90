//! Core library for reporting the progress of an external ffmpeg process.
//!
//! ffmpeg has no progress API a wrapper can call, but it can append one line
//! of statistics per frame to a `-vstats_file`. This crate probes the input
//! with ffprobe to estimate the total frame count, lets the caller launch
//! ffmpeg against a fresh stats log, then tails that log at a fixed interval
//! and reports a percentage through a callback until the frame count is
//! reached or the process goes away.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use ffprog_core::{CoreResult, ProgressSample, ProgressSession, SessionConfigBuilder};
//! use std::path::Path;
//! use std::process::Command;
//!
//! let config = SessionConfigBuilder::new().wait_time(0.5).build().unwrap();
//! let session = ProgressSession::new(config);
//!
//! let mut launcher = |input: &Path, output: &Path, stats: &Path| -> CoreResult<u32> {
//!     let child = Command::new("ffmpeg")
//!         .args(["-nostats", "-loglevel", "0", "-y", "-vstats_file"])
//!         .arg(stats)
//!         .arg("-i")
//!         .arg(input)
//!         .arg(output)
//!         .spawn()?;
//!     Ok(child.id())
//! };
//! let mut on_progress = |s: &ProgressSample| println!("{:.1}%", s.percent);
//!
//! session
//!     .run(Path::new("in.mkv"), Path::new("out.mp4"), &mut launcher, Some(&mut on_progress), None)
//!     .unwrap();
//! ```

pub mod config;
pub mod error;
pub mod estimate;
pub mod external;
pub mod monitor;
pub mod progress;
pub mod session;
pub mod tail;
pub mod temp_files;

// Re-exports for public API
pub use config::{SessionConfig, SessionConfigBuilder};
pub use error::{CoreError, CoreResult};
pub use estimate::{WorkEstimate, estimate_total_frames, parse_frame_rate};
pub use external::{
    CommandFfprobeExecutor, FfprobeExecutor, ProbeOutput, ProcessId, ProcessLauncher,
    ProcessState, ProcessWatcher, SystemProcessWatcher, check_dependency,
};
pub use monitor::{MonitorOutcome, MonitorReport, monitor_progress};
pub use progress::{
    ClassicProgressRenderer, CompletionCallback, NullProgressCallback, ProgressCallback,
    ProgressSample, format_progress_line,
};
pub use session::{ProgressSession, RunSummary, run};
pub use tail::{parse_frame_count, tail_last_line};
