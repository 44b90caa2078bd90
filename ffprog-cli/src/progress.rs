// ============================================================================
// ffprog-cli/src/progress.rs
// ============================================================================
//
// PROGRESS REPORTING: indicatif Progress Bar for the CLI
//
// The core draws a plain text line by default. With `--bar` the CLI swaps in
// this renderer, which feeds the same samples into an indicatif bar measured
// in frames.
//
// KEY COMPONENTS:
// - BarProgress: ProgressCallback backed by an indicatif ProgressBar
// - format_elapsed: HH:MM:SS rendering for the bar message

// ---- External crate imports ----
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

// ---- Internal crate imports ----
use ffprog_core::{ProgressCallback, ProgressSample};

// ---- Standard library imports ----
use std::time::Duration;

const BAR_TEMPLATE: &str =
    "{spinner:.green} [{bar:40.cyan/blue}] {percent:>3}% {pos}/{len} frames | {msg}";

/// Progress bar driven by progress samples.
pub struct BarProgress {
    pb: ProgressBar,
}

impl BarProgress {
    /// Creates a bar drawing to stderr. The length is set from the first sample.
    pub fn new() -> Self {
        Self::with_target(ProgressDrawTarget::stderr())
    }

    pub fn with_target(target: ProgressDrawTarget) -> Self {
        let pb = ProgressBar::with_draw_target(Some(0), target);
        match ProgressStyle::default_bar().template(BAR_TEMPLATE) {
            Ok(style) => pb.set_style(style.progress_chars("█▓▒░ ")),
            Err(e) => log::debug!("Falling back to default bar style: {e}"),
        }
        pb.enable_steady_tick(Duration::from_millis(100));
        Self { pb }
    }

    /// Frames shown so far.
    pub fn position(&self) -> u64 {
        self.pb.position()
    }

    pub fn length(&self) -> Option<u64> {
        self.pb.length()
    }

    /// Leaves the bar on screen in its final state.
    pub fn finish(&self) {
        self.pb.finish();
    }
}

impl Default for BarProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressCallback for BarProgress {
    fn on_progress(&mut self, sample: &ProgressSample) {
        if self.pb.length() != Some(sample.total_frames) {
            self.pb.set_length(sample.total_frames);
        }
        self.pb.set_position(sample.frames_done.min(sample.total_frames));
        self.pb
            .set_message(format!("elapsed {}", format_elapsed(sample.elapsed_secs)));
    }
}

/// Formats seconds as `HH:MM:SS`.
pub fn format_elapsed(seconds: f64) -> String {
    let total = seconds.max(0.0) as u64;
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let secs = total % 60;

    format!("{hours:02}:{minutes:02}:{secs:02}")
}
