use crate::error::{PpgError, Result};

/// Derive the smoothing window length for a sampling rate
///
/// The window spans `window_fraction` seconds, rounded to the nearest sample
/// and forced odd (rounded up) so that every window has a unique center sample.
///
/// # Arguments
/// * `sampling_rate_hz` - Sampling rate of the waveform
/// * `window_fraction` - Window duration in seconds (0.12 for a 120 ms window)
pub fn window_size_for(sampling_rate_hz: f64, window_fraction: f64) -> Result<usize> {
    if !sampling_rate_hz.is_finite() || sampling_rate_hz <= 0.0 {
        return Err(PpgError::InvalidParameter(format!(
            "sampling rate must be positive, got {}",
            sampling_rate_hz
        )));
    }
    if !window_fraction.is_finite() || window_fraction <= 0.0 {
        return Err(PpgError::InvalidParameter(format!(
            "window fraction must be positive, got {}",
            window_fraction
        )));
    }

    let mut window = (window_fraction * sampling_rate_hz).round() as usize;
    if window % 2 == 0 {
        window += 1;
    }
    Ok(window.max(1))
}

/// Extend a signal at both ends by mirroring it about its edge samples
///
/// The edge sample itself is not repeated: `[a, b, c, d]` padded by 2 becomes
/// `[c, b, a, b, c, d, c, b]`.
///
/// `pad` must be smaller than the signal length.
pub fn reflect_pad(signal: &[f64], pad: usize) -> Vec<f64> {
    let n = signal.len();
    debug_assert!(pad < n.max(1));

    let mut padded = Vec::with_capacity(n + 2 * pad);
    padded.extend((1..=pad).rev().map(|k| signal[k]));
    padded.extend_from_slice(signal);
    padded.extend((1..=pad).map(|k| signal[n - 1 - k]));
    padded
}

/// Smooth a waveform with a centered moving average over a reflected signal
///
/// Removes high-frequency noise while keeping the output aligned with and the
/// same length as the input. The input is never modified.
///
/// # Arguments
/// * `signal` - Raw samples, must not be empty
/// * `window_size` - Window length in samples; an even length is rounded up to
///   the next odd one, which must not exceed `signal.len()`
///
/// # Returns
/// A newly allocated filtered sequence with one value per input sample
pub fn smooth(signal: &[f64], window_size: usize) -> Result<Vec<f64>> {
    if signal.is_empty() {
        return Err(PpgError::EmptyInput);
    }
    if window_size == 0 {
        return Err(PpgError::InvalidParameter(
            "window size must be positive".to_string(),
        ));
    }
    let window_size = if window_size % 2 == 0 {
        window_size + 1
    } else {
        window_size
    };
    if window_size > signal.len() {
        return Err(PpgError::InvalidParameter(format!(
            "window size {} exceeds signal length {}",
            window_size,
            signal.len()
        )));
    }

    if window_size == 1 {
        return Ok(signal.to_vec());
    }

    let padded = reflect_pad(signal, window_size / 2);
    let scale = 1.0 / window_size as f64;

    Ok(padded
        .windows(window_size)
        .map(|window| window.iter().sum::<f64>() * scale)
        .collect())
}
