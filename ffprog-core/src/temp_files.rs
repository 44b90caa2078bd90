//! Temporary stats log management.
//!
//! The vstats log is created with the tempfile crate so every session gets a
//! unique name, even when several sessions run for the same input at once.
//! The returned `NamedTempFile` owns the only handle the core keeps open and
//! deletes the file when dropped unless it is persisted.

use crate::config::{DEFAULT_STATS_PREFIX, STATS_SUFFIX};
use crate::error::CoreResult;
use std::path::Path;
use tempfile::{Builder as TempFileBuilder, NamedTempFile};

/// Creates `<dir>/ffprog-<input stem><random>.vstats`, or the same name in
/// the system temp dir when `dir` is `None`.
pub fn create_stats_file(input: &Path, dir: Option<&Path>) -> CoreResult<NamedTempFile> {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let prefix = format!("{DEFAULT_STATS_PREFIX}{stem}");

    let mut builder = TempFileBuilder::new();
    builder.prefix(&prefix).suffix(STATS_SUFFIX);

    let file = match dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)?;
            builder.tempfile_in(dir)?
        }
        None => builder.tempfile()?,
    };
    log::debug!("Created stats log {}", file.path().display());
    Ok(file)
}
