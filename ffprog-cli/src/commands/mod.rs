//! Command implementations for the CLI.
//!
//! Each submodule contains the implementation of a specific command.

/// Module containing the implementation of the default command: run ffmpeg
/// on one file and report its progress.
pub mod run;
