// ============================================================================
// ffprog-core/src/external/mod.rs
// ============================================================================
//
// EXTERNAL TOOLS: Interactions with ffprobe and the Transcoding Process
//
// This module encapsulates everything that crosses the process boundary: the
// ffprobe metadata probe, the caller's launcher, and the liveness checks on
// the launched process. Each interaction sits behind a trait so the
// orchestration can be exercised in tests without real binaries.
//
// KEY COMPONENTS:
// - FfprobeExecutor / CommandFfprobeExecutor: the metadata probe
// - ProcessLauncher: caller-supplied start function
// - ProcessWatcher / SystemProcessWatcher: liveness checks
// - check_dependency: verifies that an external binary can be started

// ---- Internal crate imports ----
use crate::error::{CoreError, CoreResult, command_start_error};

// ---- Standard library imports ----
use std::io;
use std::process::{Command, Stdio};

// ============================================================================
// SUBMODULES
// ============================================================================

/// Contains the ffprobe invocation and the probe result types
pub mod ffprobe_executor;

/// Contains the launcher and liveness-check abstractions
pub mod process;

// ============================================================================
// RE-EXPORTS
// ============================================================================

pub use ffprobe_executor::{
    CommandFfprobeExecutor, FfprobeExecutor, ProbeFormat, ProbeOutput, ProbeStream,
    parse_probe_output,
};
pub use process::{
    ProcessId, ProcessLauncher, ProcessState, ProcessWatcher, SystemProcessWatcher,
};

// ============================================================================
// DEPENDENCY CHECKING
// ============================================================================

/// Checks if a required external command is available and executable.
///
/// Runs `<cmd_name> -version` with output discarded. Only a failure to start
/// the command counts; its exit status is ignored.
///
/// # Returns
///
/// * `Ok(())` - The command could be started
/// * `Err(CoreError::MissingDependency)` - The command is not on `PATH`
/// * `Err(CoreError::CommandStart)` - The command exists but failed to start
pub fn check_dependency(cmd_name: &str) -> CoreResult<()> {
    let result = Command::new(cmd_name)
        .arg("-version")
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status();

    match result {
        Ok(_) => {
            log::debug!("Found dependency: {cmd_name}");
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            log::warn!("Dependency '{cmd_name}' not found.");
            Err(CoreError::MissingDependency(cmd_name.to_string()))
        }
        Err(e) => {
            log::error!("Failed to start dependency check command '{cmd_name}': {e}");
            Err(command_start_error(cmd_name, e))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_dependency() {
        let err = check_dependency("ffprog-definitely-not-installed").unwrap_err();
        assert!(matches!(err, CoreError::MissingDependency(ref cmd) if cmd == "ffprog-definitely-not-installed"));
    }
}
