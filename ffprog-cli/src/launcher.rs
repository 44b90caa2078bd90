// ============================================================================
// ffprog-cli/src/launcher.rs
// ============================================================================
//
// FFMPEG LAUNCHER: Starts ffmpeg With a vstats Log
//
// The launcher spawns ffmpeg without console output and keeps the `Child`.
// The child is not waited on while the session polls: once ffmpeg exits it
// stays a zombie, which the process watcher reports as defunct. After the
// session the CLI reaps it here to get the real exit status.

// ---- Internal crate imports ----
use ffprog_core::error::{command_failed_error, command_start_error};
use ffprog_core::{CoreError, CoreResult, ProcessLauncher};

// ---- Standard library imports ----
use std::ffi::OsString;
use std::io;
use std::path::Path;
use std::process::{Child, Command, ExitStatus, Stdio};

/// Arguments placed before `-vstats_file`.
const FFMPEG_BASE_ARGS: [&str; 4] = ["-nostats", "-loglevel", "0", "-y"];

/// Launches `ffmpeg` and remembers the child process.
#[derive(Debug)]
pub struct FfmpegLauncher {
    program: String,
    extra_args: Vec<String>,
    child: Option<Child>,
}

impl FfmpegLauncher {
    /// `extra_args` go between the input and the output path.
    pub fn new(extra_args: Vec<String>) -> Self {
        Self::with_program("ffmpeg", extra_args)
    }

    pub fn with_program(program: impl Into<String>, extra_args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            extra_args,
            child: None,
        }
    }

    /// Full argument list for one run.
    pub fn build_args(&self, input: &Path, output: &Path, stats_path: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = FFMPEG_BASE_ARGS.iter().map(OsString::from).collect();
        args.push("-vstats_file".into());
        args.push(stats_path.into());
        args.push("-i".into());
        args.push(input.into());
        args.extend(self.extra_args.iter().map(OsString::from));
        args.push(output.into());
        args
    }

    /// Waits for the launched process and returns its exit status.
    ///
    /// Returns `Ok(None)` when nothing was launched.
    pub fn wait(&mut self) -> CoreResult<Option<ExitStatus>> {
        match self.child.as_mut() {
            Some(child) => Ok(Some(child.wait()?)),
            None => Ok(None),
        }
    }

    /// Waits for the process and turns a non-zero exit into an error.
    pub fn finish(&mut self) -> CoreResult<()> {
        match self.wait()? {
            Some(status) if !status.success() => Err(command_failed_error(
                self.program.as_str(),
                status,
                "output was suppressed, rerun ffmpeg directly for details",
            )),
            Some(status) => {
                log::debug!("{} exited with {status}", self.program);
                Ok(())
            }
            None => Ok(()),
        }
    }
}

impl ProcessLauncher for FfmpegLauncher {
    fn launch(&mut self, input: &Path, output: &Path, stats_path: &Path) -> CoreResult<u32> {
        let args = self.build_args(input, output, stats_path);
        log::debug!("Running: {} {:?}", self.program, args);

        let child = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| match e.kind() {
                io::ErrorKind::NotFound => CoreError::MissingDependency(self.program.clone()),
                _ => command_start_error(self.program.as_str(), e),
            })?;

        let pid = child.id();
        self.child = Some(child);
        Ok(pid)
    }
}
