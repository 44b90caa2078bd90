// ============================================================================
// ffprog-core/src/error.rs
// ============================================================================
//
// ERROR HANDLING: Error Types for the ffprog Core Library
//
// Every way a progress estimate cannot be produced has its own variant here.
// All of them are terminal: nothing in the core retries. Conditions the polling
// loop treats as transient (log not ready, malformed line, process gone) never
// become a `CoreError`.

use std::process::ExitStatus;
use thiserror::Error;

/// Errors returned by the ffprog core library.
#[derive(Error, Debug)]
pub enum CoreError {
    /// ffprobe could not be run, exited unsuccessfully, or printed garbage.
    #[error("Probe execution failed: {0}")]
    ProbeExecution(String),

    /// The requested stream is missing from the probe result.
    #[error("Probe failed.")]
    ProbeFailed,

    /// The frame rate string has a zero denominator or is not a rational.
    #[error("Cannot use input FPS.")]
    InvalidFps,

    #[error("Unexpected zero FPS.")]
    UnexpectedZeroFps,

    #[error("Unable to determine duration.")]
    NoDuration,

    #[error("Total frames is less than or equal to zero.")]
    TotalFramesLteZero,

    /// The launcher did not hand back a usable process id.
    #[error("ffmpeg launcher must return a valid PID.")]
    InvalidProcessHandle,

    #[error("Failed to launch ffmpeg: {0}")]
    Launch(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Required command '{0}' was not found on PATH")]
    MissingDependency(String),

    #[error("{0}")]
    OperationFailed(String),

    #[error("Failed to start command '{0}': {1}")]
    CommandStart(String, std::io::Error),

    #[error("Command '{0}' exited with {1}: {2}")]
    CommandFailed(String, ExitStatus, String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for ffprog core operations
pub type CoreResult<T> = std::result::Result<T, CoreError>;

/// Builds a `CoreError::CommandStart` for a command that could not be spawned.
pub fn command_start_error(cmd: impl Into<String>, err: std::io::Error) -> CoreError {
    CoreError::CommandStart(cmd.into(), err)
}

/// Builds a `CoreError::CommandFailed` for a command with a non-zero exit.
pub fn command_failed_error(
    cmd: impl Into<String>,
    status: ExitStatus,
    stderr: impl Into<String>,
) -> CoreError {
    CoreError::CommandFailed(cmd.into(), status, stderr.into())
}

impl CoreError {
    /// Returns true for the variants that describe a bad probe result rather
    /// than a failure to run something.
    #[must_use]
    pub fn is_estimate_error(&self) -> bool {
        matches!(
            self,
            CoreError::ProbeFailed
                | CoreError::InvalidFps
                | CoreError::UnexpectedZeroFps
                | CoreError::NoDuration
                | CoreError::TotalFramesLteZero
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_match_cli_output() {
        assert_eq!(CoreError::ProbeFailed.to_string(), "Probe failed.");
        assert_eq!(CoreError::InvalidFps.to_string(), "Cannot use input FPS.");
        assert_eq!(
            CoreError::TotalFramesLteZero.to_string(),
            "Total frames is less than or equal to zero."
        );
    }

    #[test]
    fn test_is_estimate_error() {
        assert!(CoreError::NoDuration.is_estimate_error());
        assert!(!CoreError::InvalidProcessHandle.is_estimate_error());
        assert!(!CoreError::ProbeExecution("boom".into()).is_estimate_error());
    }
}
