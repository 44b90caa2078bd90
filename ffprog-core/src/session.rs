// ============================================================================
// ffprog-core/src/session.rs
// ============================================================================
//
// ORCHESTRATION: One Progress Session From Probe to Completion
//
// A session probes the input, estimates the total frame count, creates a
// unique stats log, lets the caller launch ffmpeg against it, waits for the
// log to appear, runs the polling loop and finally calls the completion
// callback. The stats log handle is owned by the session and released on
// every path out of `run`, including errors.
//
// KEY COMPONENTS:
// - ProgressSession: orchestrator, generic over prober and watcher
// - RunSummary: what happened during a completed session
// - run: convenience entry point with the real ffprobe and process watcher

// ---- Internal crate imports ----
use crate::config::SessionConfig;
use crate::error::{CoreError, CoreResult};
use crate::estimate::{WorkEstimate, estimate_total_frames};
use crate::external::{
    CommandFfprobeExecutor, FfprobeExecutor, ProcessId, ProcessLauncher, ProcessWatcher,
    SystemProcessWatcher,
};
use crate::monitor::{MonitorReport, monitor_progress};
use crate::progress::{ClassicProgressRenderer, CompletionCallback, ProgressCallback};
use crate::temp_files::create_stats_file;

// ---- Standard library imports ----
use std::path::{Path, PathBuf};
use std::thread;

/// Result of a session that reached the end of the polling loop.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub estimate: WorkEstimate,
    pub pid: ProcessId,
    pub report: MonitorReport,
    /// Location of the stats log. Only still on disk when it was kept.
    pub stats_path: PathBuf,
    pub stats_kept: bool,
}

/// Drives one progress session.
#[derive(Debug, Clone)]
pub struct ProgressSession<P = CommandFfprobeExecutor, W = SystemProcessWatcher> {
    config: SessionConfig,
    prober: P,
    watcher: W,
}

impl ProgressSession {
    /// Creates a session using the `ffprobe` binary on `PATH` and real OS
    /// process checks.
    #[must_use]
    pub fn new(config: SessionConfig) -> Self {
        Self::with_components(config, CommandFfprobeExecutor::new(), SystemProcessWatcher::new())
    }
}

impl<P, W> ProgressSession<P, W>
where
    P: FfprobeExecutor,
    W: ProcessWatcher,
{
    pub fn with_components(config: SessionConfig, prober: P, watcher: W) -> Self {
        Self {
            config,
            prober,
            watcher,
        }
    }

    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Probes `input` and estimates its total frame count.
    pub fn estimate(&self, input: &Path) -> CoreResult<WorkEstimate> {
        let probe = self.prober.probe(input)?;
        estimate_total_frames(&probe, self.config.stream_index)
    }

    /// Runs the whole session.
    ///
    /// `on_progress` defaults to the classic text bar on stdout. `on_done`
    /// is called exactly once, after the stats log was released, and only
    /// when no earlier step failed.
    ///
    /// # Errors
    ///
    /// Any probe or estimate error, `CoreError::InvalidProcessHandle` when the
    /// launcher returns pid 0, launcher errors, and I/O errors creating the
    /// stats log. The process disappearing is not an error; see
    /// `RunSummary::report`.
    pub fn run<L>(
        &self,
        input: &Path,
        output: &Path,
        launcher: &mut L,
        on_progress: Option<&mut dyn ProgressCallback>,
        on_done: Option<&mut dyn CompletionCallback>,
    ) -> CoreResult<RunSummary>
    where
        L: ProcessLauncher + ?Sized,
    {
        self.config.validate()?;

        let estimate = self.estimate(input)?;
        log::info!(
            "{}: {} frames expected ({:.2}s at {:.3} fps)",
            input.display(),
            estimate.total_frames,
            estimate.duration_secs,
            estimate.fps
        );

        let mut stats = create_stats_file(input, self.config.temp_dir.as_deref())?;
        let stats_path = stats.path().to_path_buf();

        let raw_pid = launcher.launch(input, output, &stats_path)?;
        let pid = ProcessId::new(raw_pid).ok_or(CoreError::InvalidProcessHandle)?;
        log::info!("Monitoring pid {pid} via {}", stats_path.display());

        thread::sleep(self.config.initial_wait_time);

        let mut fallback = ClassicProgressRenderer::stdout();
        let on_progress: &mut dyn ProgressCallback = match on_progress {
            Some(cb) => cb,
            None => &mut fallback,
        };

        let report = monitor_progress(
            stats.as_file_mut(),
            pid,
            estimate.total_frames,
            &self.watcher,
            on_progress,
            self.config.wait_time,
        );

        let stats_kept = if self.config.keep_stats_file {
            match stats.keep() {
                Ok((file, path)) => {
                    drop(file);
                    log::info!("Kept stats log {}", path.display());
                    true
                }
                Err(e) => {
                    log::warn!("Could not keep stats log {}: {}", stats_path.display(), e);
                    false
                }
            }
        } else {
            drop(stats);
            false
        };

        if let Some(cb) = on_done {
            cb.on_done();
        }

        Ok(RunSummary {
            estimate,
            pid,
            report,
            stats_path,
            stats_kept,
        })
    }
}

/// Runs a session with the real ffprobe and OS process checks.
///
/// The launcher receives `(input, output, stats_path)`, must start ffmpeg with
/// `-vstats_file <stats_path>` and return its pid.
///
/// ```rust,no_run
/// use ffprog_core::{CoreResult, SessionConfig, run};
/// use std::path::Path;
/// use std::process::Command;
///
/// let mut launcher = |input: &Path, output: &Path, stats: &Path| -> CoreResult<u32> {
///     let child = Command::new("ffmpeg")
///         .args(["-nostats", "-loglevel", "0", "-y", "-vstats_file"])
///         .arg(stats)
///         .arg("-i")
///         .arg(input)
///         .arg(output)
///         .spawn()?;
///     Ok(child.id())
/// };
/// let summary = run(
///     Path::new("in.mkv"),
///     Path::new("out.mp4"),
///     &mut launcher,
///     None,
///     None,
///     &SessionConfig::default(),
/// )
/// .unwrap();
/// println!("\n{}", summary.report.outcome);
/// ```
pub fn run<L>(
    input: &Path,
    output: &Path,
    launcher: &mut L,
    on_progress: Option<&mut dyn ProgressCallback>,
    on_done: Option<&mut dyn CompletionCallback>,
    config: &SessionConfig,
) -> CoreResult<RunSummary>
where
    L: ProcessLauncher + ?Sized,
{
    ProgressSession::new(config.clone()).run(input, output, launcher, on_progress, on_done)
}
