//! Total frame estimation from a probe result.
//!
//! The estimate is `floor(duration * fps)` for the selected stream. Each way
//! this can go wrong has a dedicated `CoreError` variant, checked in the order
//! stream, frame rate, duration, total.

use crate::error::{CoreError, CoreResult};
use crate::external::ProbeOutput;

/// Expected amount of work for one transcode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorkEstimate {
    /// Always greater than zero
    pub total_frames: u64,
    pub fps: f64,
    pub duration_secs: f64,
}

/// Parses an ffprobe rational such as `"30000/1001"` into frames per second.
///
/// A bare number is accepted as a rate over one. A zero denominator or a
/// string that is not a rational yields `CoreError::InvalidFps`.
pub fn parse_frame_rate(rate: &str) -> CoreResult<f64> {
    let rate = rate.trim();
    let (num, den) = match rate.split_once('/') {
        Some((num, den)) => (num.trim(), den.trim()),
        None => (rate, "1"),
    };
    let num = num.parse::<f64>().map_err(|_| CoreError::InvalidFps)?;
    let den = den.parse::<f64>().map_err(|_| CoreError::InvalidFps)?;
    if den == 0.0 || !num.is_finite() || !den.is_finite() {
        return Err(CoreError::InvalidFps);
    }
    Ok(num / den)
}

/// Derives the total frame count for `stream_index` of a probe result.
pub fn estimate_total_frames(probe: &ProbeOutput, stream_index: usize) -> CoreResult<WorkEstimate> {
    let stream = probe
        .streams
        .as_ref()
        .and_then(|streams| streams.get(stream_index))
        .ok_or(CoreError::ProbeFailed)?;

    let fps = parse_frame_rate(stream.avg_frame_rate.as_deref().ok_or(CoreError::InvalidFps)?)?;
    if fps == 0.0 {
        return Err(CoreError::UnexpectedZeroFps);
    }

    let duration_secs = probe
        .format
        .as_ref()
        .and_then(|format| format.duration_secs())
        .ok_or(CoreError::NoDuration)?;

    let total = (duration_secs * fps).floor();
    if !total.is_finite() || total < 1.0 {
        return Err(CoreError::TotalFramesLteZero);
    }

    let estimate = WorkEstimate {
        total_frames: total as u64,
        fps,
        duration_secs,
    };
    log::debug!(
        "Estimated {} frames ({:.3}s at {:.3} fps) for stream {}",
        estimate.total_frames,
        duration_secs,
        fps,
        stream_index
    );
    Ok(estimate)
}
