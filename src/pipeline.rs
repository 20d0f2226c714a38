//! End-to-end systolic peak detection.
//!
//! Raw samples are smoothed, scanned for slope reversals, and reduced to
//! physiologically plausible peaks. Each run is independent; the input slice
//! is never modified.

use serde::Serialize;

use crate::config::DetectorConfig;
use crate::error::{PpgError, Result};
use crate::signal_processing::{find_candidates, select_peaks, smooth};

/// A detected systolic peak
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SystolicPeak {
    /// Sample index into the waveform
    pub index: usize,
    /// Time of the peak from the first sample, in seconds
    pub time_s: f64,
    /// Filtered signal value at the peak
    pub amplitude: f64,
}

/// Result of one detection run
#[derive(Debug, Clone)]
pub struct PeakDetection {
    pub sampling_rate_hz: f64,
    /// Smoothing window used, in samples
    pub window_size: usize,
    /// Refractory distance used, in samples
    pub min_distance: usize,
    /// Threshold after resolving the configured policy against the signal
    pub amplitude_threshold: f64,
    /// Number of slope reversals before amplitude and distance filtering
    pub candidate_count: usize,
    pub peaks: Vec<SystolicPeak>,
    /// Smoothed waveform, same length as the input
    pub filtered: Vec<f64>,
}

impl PeakDetection {
    /// Accepted peak indices in ascending order
    pub fn indices(&self) -> Vec<usize> {
        self.peaks.iter().map(|p| p.index).collect()
    }

    pub fn sample_count(&self) -> usize {
        self.filtered.len()
    }
}

/// Detect systolic peaks in a complete PPG recording
///
/// # Arguments
/// * `samples` - Raw single-channel waveform
/// * `config` - Detector parameters; validated before any processing
///
/// # Errors
/// `EmptyInput` for an empty recording, `InvalidParameter` for an invalid
/// configuration or a smoothing window longer than the recording.
pub fn detect_systolic_peaks(samples: &[f64], config: &DetectorConfig) -> Result<PeakDetection> {
    config.validate()?;
    if samples.is_empty() {
        return Err(PpgError::EmptyInput);
    }

    let window_size = config.window_size()?;
    let min_distance = config.min_distance()?;
    log::debug!(
        "Detecting peaks in {} samples at {} Hz (window {}, min distance {})",
        samples.len(),
        config.sampling_rate_hz,
        window_size,
        min_distance
    );

    let filtered = smooth(samples, window_size)?;
    let amplitude_threshold = config.amplitude_threshold.resolve(&filtered)?;

    let candidates = find_candidates(&filtered);
    let indices = select_peaks(&filtered, &candidates, amplitude_threshold, min_distance)?;
    log::debug!(
        "{} candidates, {} peaks above {:.4}",
        candidates.len(),
        indices.len(),
        amplitude_threshold
    );
    if indices.is_empty() {
        log::warn!(
            "No systolic peaks found ({} candidates, threshold {:.4})",
            candidates.len(),
            amplitude_threshold
        );
    }

    let peaks = indices
        .into_iter()
        .map(|index| SystolicPeak {
            index,
            time_s: index as f64 / config.sampling_rate_hz,
            amplitude: filtered[index],
        })
        .collect();

    Ok(PeakDetection {
        sampling_rate_hz: config.sampling_rate_hz,
        window_size,
        min_distance,
        amplitude_threshold,
        candidate_count: candidates.len(),
        peaks,
        filtered,
    })
}
