// ============================================================================
// ffprog-core/src/monitor.rs
// ============================================================================
//
// PROGRESS LOOP: Polling the vstats Log While ffmpeg Runs
//
// The loop alternates between one fixed sleep and a burst of fast synchronous
// work: two liveness checks on the ffmpeg pid, a tail of the stats log, and a
// callback. It stops when the frame counter reaches the estimate, or quietly
// when the process is gone or defunct.
//
// KEY COMPONENTS:
// - ProgressState: monotonic frame counter and percentage
// - MonitorOutcome / MonitorReport: why and where the loop stopped
// - monitor_progress: the loop itself

// ---- Internal crate imports ----
use crate::external::{ProcessId, ProcessState, ProcessWatcher};
use crate::progress::{PERCENT_100, ProgressCallback, ProgressSample};
use crate::tail::{parse_frame_count, tail_last_line};

// ---- Standard library imports ----
use std::fmt;
use std::io::{Read, Seek};
use std::thread;
use std::time::{Duration, Instant};

// ============================================================================
// STATE
// ============================================================================

/// Progress as seen by the loop. The frame counter never decreases.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressState {
    total_frames: u64,
    frames_done: u64,
    percent: f64,
    elapsed_secs: f64,
}

impl ProgressState {
    #[must_use]
    pub fn new(total_frames: u64) -> Self {
        Self {
            total_frames,
            frames_done: 0,
            percent: 0.0,
            elapsed_secs: 0.0,
        }
    }

    /// Records a frame counter read from the log. Values not above the
    /// current count are ignored. Returns whether progress advanced.
    pub fn observe(&mut self, frames: u64) -> bool {
        if frames <= self.frames_done {
            return false;
        }
        self.frames_done = frames;
        self.percent = PERCENT_100 * (frames as f64 / self.total_frames as f64);
        true
    }

    pub fn set_elapsed(&mut self, elapsed: Duration) {
        self.elapsed_secs = elapsed.as_secs_f64();
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.frames_done >= self.total_frames || self.percent >= PERCENT_100
    }

    #[must_use]
    pub fn frames_done(&self) -> u64 {
        self.frames_done
    }

    #[must_use]
    pub fn sample(&self) -> ProgressSample {
        ProgressSample {
            percent: self.percent,
            frames_done: self.frames_done,
            total_frames: self.total_frames,
            elapsed_secs: self.elapsed_secs,
        }
    }
}

// ============================================================================
// OUTCOME
// ============================================================================

/// Why the loop stopped. None of these are errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorOutcome {
    /// The frame counter reached the estimated total
    Completed,
    /// The pid no longer refers to a process
    ProcessExited,
    /// The process exited and is waiting to be reaped
    ProcessDefunct,
}

impl fmt::Display for MonitorOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MonitorOutcome::Completed => write!(f, "completed"),
            MonitorOutcome::ProcessExited => write!(f, "process exited"),
            MonitorOutcome::ProcessDefunct => write!(f, "process defunct"),
        }
    }
}

/// Summary of one run of the loop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonitorReport {
    pub outcome: MonitorOutcome,
    /// State after the last poll, whether or not it was reported
    pub last_sample: ProgressSample,
    /// Number of times the progress callback was invoked
    pub callbacks: u64,
}

// ============================================================================
// LOOP
// ============================================================================

/// Polls `stats_log` every `wait_time` until the transcode finishes or the
/// process with `pid` goes away.
///
/// Each poll: sleep, check the pid exists, check it is not defunct, tail the
/// log, parse field 5, update the monotonic counter, refresh elapsed time and
/// invoke `on_progress`. A log that is not ready yet skips the callback for
/// that poll. The process disappearing ends the loop without a final callback.
pub fn monitor_progress<R, W>(
    stats_log: &mut R,
    pid: ProcessId,
    total_frames: u64,
    watcher: &W,
    on_progress: &mut dyn ProgressCallback,
    wait_time: Duration,
) -> MonitorReport
where
    R: Read + Seek,
    W: ProcessWatcher + ?Sized,
{
    let start = Instant::now();
    let mut state = ProgressState::new(total_frames);
    let mut callbacks = 0u64;

    let outcome = loop {
        if state.is_complete() {
            break MonitorOutcome::Completed;
        }

        thread::sleep(wait_time);

        match watcher.state(pid) {
            ProcessState::Running => {}
            ProcessState::NotFound => break MonitorOutcome::ProcessExited,
            ProcessState::Defunct => break MonitorOutcome::ProcessDefunct,
        }

        let line = match tail_last_line(stats_log) {
            Ok(Some(line)) => line,
            Ok(None) => {
                log::trace!("Stats log not ready yet");
                continue;
            }
            Err(e) => {
                log::warn!("Failed to read stats log, retrying on next poll: {e}");
                continue;
            }
        };

        let frames = parse_frame_count(&line);
        if state.observe(frames) {
            log::debug!("Frame {} of {} ({line})", frames, total_frames);
        }
        state.set_elapsed(start.elapsed());

        on_progress.on_progress(&state.sample());
        callbacks += 1;
    };

    match outcome {
        MonitorOutcome::Completed => log::info!(
            "Progress complete: {} of {} frames in {:.2}s",
            state.frames_done(),
            total_frames,
            start.elapsed().as_secs_f64()
        ),
        _ => log::info!(
            "Stopped polling pid {pid} ({outcome}) at {} of {} frames",
            state.frames_done(),
            total_frames
        ),
    }

    MonitorReport {
        outcome,
        last_sample: state.sample(),
        callbacks,
    }
}
