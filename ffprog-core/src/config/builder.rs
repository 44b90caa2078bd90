// ============================================================================
// ffprog-core/src/config/builder.rs
// ============================================================================
//
// CONFIGURATION BUILDER: Builder Pattern for SessionConfig
//
// Wait times are accepted as seconds in `f64`, the unit the CLI and callers
// think in, and converted and validated in `build`.

// ---- Standard library imports ----
use std::path::PathBuf;

// ---- Internal crate imports ----
use super::{SessionConfig, seconds_to_duration};
use crate::error::CoreResult;

/// Builder for creating SessionConfig instances.
#[derive(Debug, Clone)]
pub struct SessionConfigBuilder {
    stream_index: usize,
    wait_time: f64,
    initial_wait_time: f64,
    temp_dir: Option<PathBuf>,
    keep_stats_file: bool,
}

impl Default for SessionConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionConfigBuilder {
    /// Creates a new SessionConfigBuilder with default values.
    pub fn new() -> Self {
        Self {
            stream_index: super::DEFAULT_STREAM_INDEX,
            wait_time: super::DEFAULT_WAIT_TIME,
            initial_wait_time: super::DEFAULT_INITIAL_WAIT_TIME,
            temp_dir: None,
            keep_stats_file: false,
        }
    }

    /// Sets the stream whose frame rate is used for the estimate.
    pub fn stream_index(mut self, index: usize) -> Self {
        self.stream_index = index;
        self
    }

    /// Sets the poll interval in seconds.
    pub fn wait_time(mut self, secs: f64) -> Self {
        self.wait_time = secs;
        self
    }

    /// Sets the delay before the first poll in seconds.
    pub fn initial_wait_time(mut self, secs: f64) -> Self {
        self.initial_wait_time = secs;
        self
    }

    /// Sets the directory the stats log is created in.
    pub fn temp_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.temp_dir = Some(dir.into());
        self
    }

    pub fn keep_stats_file(mut self, keep: bool) -> Self {
        self.keep_stats_file = keep;
        self
    }

    /// Builds and validates the SessionConfig.
    ///
    /// # Errors
    ///
    /// `CoreError::Config` for a negative or non-finite wait time, or a
    /// `temp_dir` that exists but is not a directory.
    pub fn build(self) -> CoreResult<SessionConfig> {
        let config = SessionConfig {
            stream_index: self.stream_index,
            wait_time: seconds_to_duration("wait time", self.wait_time)?,
            initial_wait_time: seconds_to_duration("initial wait time", self.initial_wait_time)?,
            temp_dir: self.temp_dir,
            keep_stats_file: self.keep_stats_file,
        };
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use std::time::Duration;

    #[test]
    fn test_builder_defaults_match_config_defaults() {
        assert_eq!(SessionConfigBuilder::new().build().unwrap(), SessionConfig::default());
    }

    #[test]
    fn test_builder_sets_fields() {
        let dir = tempfile::tempdir().unwrap();
        let config = SessionConfigBuilder::new()
            .stream_index(2)
            .wait_time(0.1)
            .initial_wait_time(0.0)
            .temp_dir(dir.path())
            .keep_stats_file(true)
            .build()
            .unwrap();
        assert_eq!(config.stream_index, 2);
        assert_eq!(config.wait_time, Duration::from_millis(100));
        assert_eq!(config.initial_wait_time, Duration::ZERO);
        assert_eq!(config.temp_dir.as_deref(), Some(dir.path()));
        assert!(config.keep_stats_file);
    }

    #[test]
    fn test_builder_rejects_negative_wait() {
        let err = SessionConfigBuilder::new().wait_time(-0.5).build().unwrap_err();
        assert!(matches!(err, CoreError::Config(_)));
        let err = SessionConfigBuilder::new().initial_wait_time(f64::NAN).build().unwrap_err();
        assert!(matches!(err, CoreError::Config(_)));
    }
}
