//! Default detector parameters
//!
//! The defaults follow Elgendi's systolic peak detector as commonly applied to
//! finger PPG recorded at 1 kHz.

/// Smoothing window length as a fraction of the sampling rate (120 ms).
pub const DEFAULT_WINDOW_FRACTION: f64 = 0.12;

/// Highest heart rate treated as physiologically plausible, in beats per minute.
/// Sets the refractory distance between accepted peaks.
pub const DEFAULT_MAX_EXPECTED_BPM: f64 = 100.0;

/// Fixed amplitude threshold applied to the filtered signal.
pub const DEFAULT_AMPLITUDE_THRESHOLD: f64 = 0.5;

/// Sampling rate assumed by the command line tools when none is given.
pub const DEFAULT_SAMPLING_RATE_HZ: f64 = 1000.0;

pub const SECONDS_PER_MINUTE: f64 = 60.0;
