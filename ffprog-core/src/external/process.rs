// ============================================================================
// ffprog-core/src/external/process.rs
// ============================================================================
//
// PROCESS BOUNDARY: Launching and Observing the Transcoding Process
//
// The core never starts ffmpeg itself. A caller-supplied `ProcessLauncher`
// starts it and hands back its pid; from then on the core only observes the
// process through a `ProcessWatcher`, which must never deliver a real signal.
//
// KEY COMPONENTS:
// - ProcessId: non-zero OS process identifier
// - ProcessLauncher: trait for the caller's launch function (closures implement it)
// - ProcessWatcher: trait for the two liveness checks
// - SystemProcessWatcher: signal-0 probe via nix, zombie check via sysinfo

use crate::error::CoreResult;

use std::fmt;
use std::path::Path;

/// OS process identifier of the monitored process. Never zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProcessId(u32);

impl ProcessId {
    /// Wraps a raw pid, rejecting zero.
    #[must_use]
    pub fn new(raw: u32) -> Option<Self> {
        (raw != 0).then_some(Self(raw))
    }

    #[must_use]
    pub fn as_u32(self) -> u32 {
        self.0
    }
}

impl fmt::Display for ProcessId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Starts the external transcoding process.
///
/// The launcher must configure the process to append its statistics to
/// `stats_path` and return the pid synchronously after spawning. Returning
/// `0` is reported as `CoreError::InvalidProcessHandle`.
pub trait ProcessLauncher {
    fn launch(&mut self, input: &Path, output: &Path, stats_path: &Path) -> CoreResult<u32>;
}

impl<F> ProcessLauncher for F
where
    F: FnMut(&Path, &Path, &Path) -> CoreResult<u32>,
{
    fn launch(&mut self, input: &Path, output: &Path, stats_path: &Path) -> CoreResult<u32> {
        self(input, output, stats_path)
    }
}

/// Liveness of a watched process as seen by one poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessState {
    Running,
    NotFound,
    /// Exited but not yet reaped by its parent
    Defunct,
}

/// Non-destructive liveness checks used by the polling loop.
pub trait ProcessWatcher {
    /// Whether the pid still refers to a process (signal-0 style probe).
    fn exists(&self, pid: ProcessId) -> bool;

    /// Whether the process has exited but not yet been reaped.
    fn is_defunct(&self, pid: ProcessId) -> bool;

    /// Existence first, then the zombie check.
    fn state(&self, pid: ProcessId) -> ProcessState {
        if !self.exists(pid) {
            ProcessState::NotFound
        } else if self.is_defunct(pid) {
            ProcessState::Defunct
        } else {
            ProcessState::Running
        }
    }
}

/// Watches real OS processes.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemProcessWatcher;

impl SystemProcessWatcher {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl ProcessWatcher for SystemProcessWatcher {
    #[cfg(unix)]
    fn exists(&self, pid: ProcessId) -> bool {
        use nix::errno::Errno;
        use nix::sys::signal::kill;
        use nix::unistd::Pid;

        let Ok(raw) = i32::try_from(pid.as_u32()) else {
            return false;
        };
        match kill(Pid::from_raw(raw), None) {
            Ok(()) => true,
            // Exists but belongs to someone else
            Err(Errno::EPERM) => true,
            Err(Errno::ESRCH) => false,
            Err(e) => {
                log::debug!("Liveness probe for pid {pid} failed: {e}");
                false
            }
        }
    }

    #[cfg(not(unix))]
    fn exists(&self, pid: ProcessId) -> bool {
        process_status(pid).is_some()
    }

    fn is_defunct(&self, pid: ProcessId) -> bool {
        matches!(process_status(pid), Some(sysinfo::ProcessStatus::Zombie))
    }
}

fn process_status(pid: ProcessId) -> Option<sysinfo::ProcessStatus> {
    use sysinfo::{Pid, ProcessesToUpdate, System};

    let pid = Pid::from_u32(pid.as_u32());
    let mut system = System::new();
    system.refresh_processes(ProcessesToUpdate::Some(&[pid]), true);
    system.process(pid).map(sysinfo::Process::status)
}
