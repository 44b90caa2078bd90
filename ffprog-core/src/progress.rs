// ============================================================================
// ffprog-core/src/progress.rs
// ============================================================================
//
// PROGRESS REPORTING: Progress Samples and Callbacks
//
// This module defines what the polling loop hands to consumers on every tick
// and the callback traits consumers implement to receive it. The loop calls
// `ProgressCallback::on_progress` synchronously once per completed poll, and
// the session calls `CompletionCallback::on_done` at most once at the end.
//
// KEY COMPONENTS:
// - ProgressSample: percent, frames done, total frames, elapsed seconds
// - ProgressCallback / CompletionCallback: traits (closures implement both)
// - NullProgressCallback: no-op
// - ClassicProgressRenderer: the default single-line text bar

// ---- Standard library imports ----
use std::io::{self, Write};

/// Percentage at which the loop considers the work finished.
pub const PERCENT_100: f64 = 100.0;

/// Number of cells in the default text bar.
pub const BAR_WIDTH: usize = 20;

// ============================================================================
// PROGRESS SAMPLE
// ============================================================================

/// One observation of the transcode's progress.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ProgressSample {
    /// Progress percentage (0.0 to 100.0)
    pub percent: f64,
    /// Highest frame counter seen so far in the stats log
    pub frames_done: u64,
    /// Estimated total frame count
    pub total_frames: u64,
    /// Seconds since polling started
    pub elapsed_secs: f64,
}

// ============================================================================
// CALLBACKS
// ============================================================================

/// Receives a sample on every poll that reads the stats log.
///
/// Called from the polling loop itself, so a slow implementation delays the
/// next poll.
pub trait ProgressCallback {
    fn on_progress(&mut self, sample: &ProgressSample);
}

impl<F> ProgressCallback for F
where
    F: FnMut(&ProgressSample),
{
    fn on_progress(&mut self, sample: &ProgressSample) {
        self(sample);
    }
}

/// Invoked once after the loop has exited and the stats log was released.
pub trait CompletionCallback {
    fn on_done(&mut self);
}

impl<F> CompletionCallback for F
where
    F: FnMut(),
{
    fn on_done(&mut self) {
        self();
    }
}

/// No-op implementation of ProgressCallback.
#[derive(Debug, Clone, Default)]
pub struct NullProgressCallback;

impl ProgressCallback for NullProgressCallback {
    fn on_progress(&mut self, _sample: &ProgressSample) {}
}

// ============================================================================
// DEFAULT RENDERER
// ============================================================================

/// Formats a sample as
/// `|░░░░░░░░░░          |   50.0%   500 / 1000 frames;   elapsed time: 12.34 seconds`.
///
/// At least one cell is always filled. Half cells round to even.
#[must_use]
pub fn format_progress_line(sample: &ProgressSample) -> String {
    let ratio = if sample.total_frames == 0 {
        0.0
    } else {
        sample.frames_done as f64 / sample.total_frames as f64
    };
    let filled = ((ratio * BAR_WIDTH as f64).round_ties_even() as usize).clamp(1, BAR_WIDTH);

    let mut bar = String::with_capacity(BAR_WIDTH * 3 + 2);
    bar.push('|');
    bar.extend(std::iter::repeat_n('░', filled));
    bar.extend(std::iter::repeat_n(' ', BAR_WIDTH - filled));
    bar.push('|');

    format!(
        "{bar}  {:5.1}%   {} / {} frames;   elapsed time: {:.2} seconds",
        sample.percent, sample.frames_done, sample.total_frames, sample.elapsed_secs
    )
}

/// Rewrites a single text line on each sample, returning the cursor with `\r`.
pub struct ClassicProgressRenderer<W: Write = io::Stdout> {
    out: W,
}

impl ClassicProgressRenderer {
    /// Renders to standard output.
    #[must_use]
    pub fn stdout() -> Self {
        Self { out: io::stdout() }
    }
}

impl<W: Write> ClassicProgressRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ProgressCallback for ClassicProgressRenderer<W> {
    fn on_progress(&mut self, sample: &ProgressSample) {
        // A closed stdout must not abort polling
        let _ = write!(self.out, "\r{}", format_progress_line(sample));
        let _ = self.out.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(percent: f64, frames_done: u64, total_frames: u64, elapsed_secs: f64) -> ProgressSample {
        ProgressSample {
            percent,
            frames_done,
            total_frames,
            elapsed_secs,
        }
    }

    #[test]
    fn test_format_half_way() {
        assert_eq!(
            format_progress_line(&sample(50.0, 500, 1000, 12.34)),
            "|░░░░░░░░░░          |   50.0%   500 / 1000 frames;   elapsed time: 12.34 seconds"
        );
    }

    #[test]
    fn test_format_fills_at_least_one_cell() {
        let line = format_progress_line(&sample(0.0, 0, 1000, 0.0));
        assert!(line.starts_with("|░                   |    0.0%"));
    }

    #[test]
    fn test_format_complete() {
        let line = format_progress_line(&sample(100.0, 100, 100, 3.0));
        assert!(line.starts_with(&format!("|{}|  100.0%", "░".repeat(BAR_WIDTH))));
    }

    #[test]
    fn test_format_overshoot_is_clamped() {
        let line = format_progress_line(&sample(100.0, 150, 100, 3.0));
        assert!(line.starts_with(&format!("|{}|", "░".repeat(BAR_WIDTH))));
    }

    #[test]
    fn test_renderer_writes_carriage_return_line() {
        let mut renderer = ClassicProgressRenderer::new(Vec::new());
        renderer.on_progress(&sample(50.0, 500, 1000, 12.34));
        let written = String::from_utf8(renderer.into_inner()).unwrap();
        assert_eq!(
            written,
            "\r|░░░░░░░░░░          |   50.0%   500 / 1000 frames;   elapsed time: 12.34 seconds"
        );
    }

    #[test]
    fn test_closures_are_callbacks() {
        let mut seen = Vec::new();
        {
            let mut cb = |s: &ProgressSample| seen.push(s.frames_done);
            cb.on_progress(&sample(1.0, 1, 100, 0.1));
            cb.on_progress(&sample(2.0, 2, 100, 0.2));
        }
        assert_eq!(seen, vec![1, 2]);

        let mut done = 0;
        {
            let mut cb = || done += 1;
            cb.on_done();
        }
        assert_eq!(done, 1);
    }
}
