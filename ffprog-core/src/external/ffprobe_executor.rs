//! FFprobe integration for the one-shot metadata probe.
//!
//! Only two scalars matter to the estimate: the selected stream's
//! `avg_frame_rate` and the container `duration`. Everything else ffprobe
//! prints is ignored by the deserializer.
use crate::error::{CoreError, CoreResult};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Arguments passed to ffprobe ahead of the input path.
pub const FFPROBE_ARGS: [&str; 6] = [
    "-v",
    "quiet",
    "-print_format",
    "json",
    "-show_format",
    "-show_streams",
];

/// Minimal view of `ffprobe -print_format json` output.
///
/// Both keys are optional so that a structurally odd probe result surfaces as
/// an estimate error instead of a deserialization failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProbeOutput {
    pub streams: Option<Vec<ProbeStream>>,
    pub format: Option<ProbeFormat>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProbeStream {
    pub index: Option<i64>,
    pub codec_type: Option<String>,
    /// Rational frame rate such as `"30000/1001"`, or `"0/0"` for still streams
    pub avg_frame_rate: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProbeFormat {
    /// ffprobe prints this as a string, other producers as a number
    pub duration: Option<serde_json::Value>,
}

impl ProbeFormat {
    /// Duration in seconds, whether it was given as a string or a number.
    #[must_use]
    pub fn duration_secs(&self) -> Option<f64> {
        match self.duration.as_ref()? {
            serde_json::Value::Number(n) => n.as_f64(),
            serde_json::Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        }
    }
}

/// Parses the JSON text printed by ffprobe.
pub fn parse_probe_output(json: &str) -> CoreResult<ProbeOutput> {
    serde_json::from_str(json).map_err(|e| {
        CoreError::ProbeExecution(format!("ffprobe output deserialization: {e}"))
    })
}

/// Trait for running the metadata probe against an input file.
pub trait FfprobeExecutor {
    fn probe(&self, input_path: &Path) -> CoreResult<ProbeOutput>;
}

/// Runs the real `ffprobe` binary.
#[derive(Debug, Clone)]
pub struct CommandFfprobeExecutor {
    program: PathBuf,
}

impl Default for CommandFfprobeExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandFfprobeExecutor {
    #[must_use]
    pub fn new() -> Self {
        Self::with_program("ffprobe")
    }

    /// Uses a specific ffprobe binary instead of the one on `PATH`.
    #[must_use]
    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl FfprobeExecutor for CommandFfprobeExecutor {
    fn probe(&self, input_path: &Path) -> CoreResult<ProbeOutput> {
        log::debug!(
            "Running {} for metadata on: {}",
            self.program.display(),
            input_path.display()
        );
        let output = Command::new(&self.program)
            .args(FFPROBE_ARGS)
            .arg(input_path)
            .stdin(Stdio::null())
            .stderr(Stdio::null())
            .output()
            .map_err(|e| {
                log::error!("Failed to start {}: {}", self.program.display(), e);
                CoreError::ProbeExecution(format!(
                    "failed to start {}: {e}",
                    self.program.display()
                ))
            })?;

        if !output.status.success() {
            log::error!(
                "ffprobe failed on {} with {}",
                input_path.display(),
                output.status
            );
            return Err(CoreError::ProbeExecution(format!(
                "ffprobe exited with {} for {}",
                output.status,
                input_path.display()
            )));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        parse_probe_output(&stdout)
    }
}
