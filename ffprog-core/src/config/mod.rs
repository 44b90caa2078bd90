//! Configuration structures and constants for the ffprog-core library.
//!
//! A `SessionConfig` holds the knobs of one progress session: which stream to
//! estimate from, how often to poll, how long to wait before the first poll,
//! and where the stats log lives.

mod builder;

use crate::error::{CoreError, CoreResult};

use std::path::PathBuf;
use std::time::Duration;

pub use builder::SessionConfigBuilder;

// Default constants

/// Default index of the stream whose frame rate drives the estimate.
pub const DEFAULT_STREAM_INDEX: usize = 0;

/// Default interval between polls of the stats log, in seconds.
pub const DEFAULT_WAIT_TIME: f64 = 1.0;

/// Default delay before the first poll, in seconds. Gives ffmpeg time to open
/// the stats log and write its first lines.
pub const DEFAULT_INITIAL_WAIT_TIME: f64 = 2.0;

/// Prefix of the temporary stats log file name, followed by the input stem.
pub const DEFAULT_STATS_PREFIX: &str = "ffprog-";

/// Suffix of the temporary stats log file name.
pub const STATS_SUFFIX: &str = ".vstats";

/// Settings for one progress session.
///
/// # Examples
///
/// ```rust
/// use ffprog_core::config::SessionConfigBuilder;
///
/// let config = SessionConfigBuilder::new()
///     .stream_index(0)
///     .wait_time(0.5)
///     .initial_wait_time(1.0)
///     .build()
///     .unwrap();
/// assert_eq!(config.wait_time.as_millis(), 500);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    /// Stream used for the frame-rate lookup
    pub stream_index: usize,

    /// Sleep between polls
    pub wait_time: Duration,

    /// Sleep between launching ffmpeg and the first poll
    pub initial_wait_time: Duration,

    /// Directory for the stats log (defaults to the system temp dir)
    pub temp_dir: Option<PathBuf>,

    /// Keep the stats log on disk after the session instead of deleting it
    pub keep_stats_file: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            stream_index: DEFAULT_STREAM_INDEX,
            wait_time: Duration::from_secs_f64(DEFAULT_WAIT_TIME),
            initial_wait_time: Duration::from_secs_f64(DEFAULT_INITIAL_WAIT_TIME),
            temp_dir: None,
            keep_stats_file: false,
        }
    }
}

impl SessionConfig {
    /// Checks settings that cannot be enforced by the types alone.
    pub fn validate(&self) -> CoreResult<()> {
        if let Some(dir) = &self.temp_dir {
            if dir.exists() && !dir.is_dir() {
                return Err(CoreError::Config(format!(
                    "Stats directory '{}' is not a directory",
                    dir.display()
                )));
            }
        }
        Ok(())
    }
}

/// Converts a number of seconds into a `Duration`, rejecting negative,
/// NaN and infinite values.
pub fn seconds_to_duration(name: &str, secs: f64) -> CoreResult<Duration> {
    Duration::try_from_secs_f64(secs)
        .map_err(|_| CoreError::Config(format!("{name} must be a finite, non-negative number of seconds, got {secs}")))
}
