use crate::constants::SECONDS_PER_MINUTE;
use crate::error::{PpgError, Result};

/// Minimum spacing between systolic peaks in samples
///
/// Two beats cannot be closer than one period at the highest plausible heart
/// rate: `floor(sampling_rate_hz * 60 / max_expected_bpm)`.
///
/// # Arguments
/// * `sampling_rate_hz` - Sampling rate of the waveform
/// * `max_expected_bpm` - Highest heart rate to accept (100 by default)
pub fn min_peak_distance(sampling_rate_hz: f64, max_expected_bpm: f64) -> Result<usize> {
    if !sampling_rate_hz.is_finite() || sampling_rate_hz <= 0.0 {
        return Err(PpgError::InvalidParameter(format!(
            "sampling rate must be positive, got {}",
            sampling_rate_hz
        )));
    }
    if !max_expected_bpm.is_finite() || max_expected_bpm <= 0.0 {
        return Err(PpgError::InvalidParameter(format!(
            "maximum expected heart rate must be positive, got {}",
            max_expected_bpm
        )));
    }

    let distance = (sampling_rate_hz * SECONDS_PER_MINUTE / max_expected_bpm).floor() as usize;
    if distance == 0 {
        return Err(PpgError::InvalidParameter(format!(
            "minimum peak distance is zero for {} Hz at {} bpm",
            sampling_rate_hz, max_expected_bpm
        )));
    }
    Ok(distance)
}

/// Reduce candidate maxima to accepted systolic peaks
///
/// Candidates whose filtered amplitude is below `amplitude_threshold` are
/// dropped first. The rest are scanned in order against the last accepted
/// peak: a candidate at least `min_distance` samples later is accepted, while
/// a closer one competes with the last accepted peak and only the higher of
/// the two survives (the earlier one on a tie). This merges a single upstroke
/// that produced two nearby slope reversals.
///
/// # Arguments
/// * `filtered` - Smoothed waveform the candidates index into
/// * `candidates` - Strictly increasing candidate indices from
///   [`find_candidates`](super::find_candidates)
/// * `amplitude_threshold` - Minimum filtered value of an accepted peak
/// * `min_distance` - Refractory distance in samples, must be positive
///
/// # Returns
/// Strictly increasing peak indices, possibly empty
pub fn select_peaks(
    filtered: &[f64],
    candidates: &[usize],
    amplitude_threshold: f64,
    min_distance: usize,
) -> Result<Vec<usize>> {
    if min_distance == 0 {
        return Err(PpgError::InvalidParameter(
            "minimum peak distance must be positive".to_string(),
        ));
    }
    if let Some(&bad) = candidates.iter().find(|&&i| i >= filtered.len()) {
        return Err(PpgError::InvalidParameter(format!(
            "candidate index {} out of range for {} samples",
            bad,
            filtered.len()
        )));
    }
    if let Some(pair) = candidates.windows(2).find(|pair| pair[1] <= pair[0]) {
        return Err(PpgError::InvalidParameter(format!(
            "candidate indices must be strictly increasing, got {} after {}",
            pair[1], pair[0]
        )));
    }

    let peaks = candidates
        .iter()
        .copied()
        .filter(|&i| filtered[i] >= amplitude_threshold)
        .fold(Vec::new(), |mut accepted: Vec<usize>, candidate| {
            match accepted.last().copied() {
                Some(last) if candidate - last < min_distance => {
                    if filtered[candidate] > filtered[last] {
                        log::trace!(
                            "Peak at {} replaces {} ({} samples apart)",
                            candidate,
                            last,
                            candidate - last
                        );
                        if let Some(slot) = accepted.last_mut() {
                            *slot = candidate;
                        }
                    } else {
                        log::trace!("Peak at {} merged into {}", candidate, last);
                    }
                }
                _ => accepted.push(candidate),
            }
            accepted
        });

    Ok(peaks)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_min_peak_distance() {
        assert_eq!(min_peak_distance(1000.0, 100.0).unwrap(), 600);
        assert_eq!(min_peak_distance(125.0, 100.0).unwrap(), 75);
        assert_eq!(min_peak_distance(250.0, 180.0).unwrap(), 83); // 83.33 floored
    }

    #[test]
    fn test_min_peak_distance_rejects_bad_parameters() {
        for (fs, bpm) in [(0.0, 100.0), (-1.0, 100.0), (1000.0, 0.0), (1000.0, f64::NAN)] {
            assert!(matches!(
                min_peak_distance(fs, bpm),
                Err(PpgError::InvalidParameter(_))
            ));
        }
        // 1 Hz at 100 bpm floors to zero samples
        assert!(matches!(
            min_peak_distance(1.0, 100.0),
            Err(PpgError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_refractory_merge_keeps_higher_peak() {
        let mut filtered = vec![0.0; 20];
        filtered[10] = 0.9;
        filtered[12] = 1.1;

        let peaks = select_peaks(&filtered, &[10, 12], 0.5, 5).unwrap();
        assert_eq!(peaks, vec![12]);
    }

    #[test]
    fn test_refractory_merge_keeps_earlier_on_higher_or_equal() {
        let mut filtered = vec![0.0; 20];
        filtered[10] = 1.1;
        filtered[12] = 0.9;
        filtered[14] = 1.1;

        let peaks = select_peaks(&filtered, &[10, 12, 14], 0.5, 5).unwrap();
        assert_eq!(peaks, vec![10]);
    }

    #[test]
    fn test_scan_continues_from_kept_peak() {
        let mut filtered = vec![0.0; 40];
        filtered[10] = 0.8;
        filtered[14] = 1.0; // replaces 10
        filtered[17] = 0.9; // within 5 of 14, dropped
        filtered[20] = 0.7; // 6 after 14, accepted

        let peaks = select_peaks(&filtered, &[10, 14, 17, 20], 0.5, 5).unwrap();
        assert_eq!(peaks, vec![14, 20]);
    }

    #[test]
    fn test_amplitude_rejection_regardless_of_spacing() {
        let mut filtered = vec![0.0; 100];
        filtered[10] = 1.0;
        filtered[50] = 0.2;
        filtered[90] = 1.0;

        let peaks = select_peaks(&filtered, &[10, 50, 90], 0.5, 5).unwrap();
        assert_eq!(peaks, vec![10, 90]);
    }

    #[test]
    fn test_low_candidate_cannot_displace_accepted_peak() {
        let mut filtered = vec![0.0; 20];
        filtered[5] = 0.6;
        filtered[7] = 0.4;

        let peaks = select_peaks(&filtered, &[5, 7], 0.5, 5).unwrap();
        assert_eq!(peaks, vec![5]);
    }

    #[test]
    fn test_exact_min_distance_is_accepted() {
        let filtered = vec![1.0; 20];
        let peaks = select_peaks(&filtered, &[2, 7, 12], 0.5, 5).unwrap();
        assert_eq!(peaks, vec![2, 7, 12]);
    }

    #[test]
    fn test_output_strictly_increasing() {
        let filtered: Vec<f64> = (0..200).map(|i| ((i * 37) % 11) as f64 / 10.0).collect();
        let candidates: Vec<usize> = (1..199).step_by(3).collect();

        let peaks = select_peaks(&filtered, &candidates, 0.3, 7).unwrap();
        assert!(peaks.windows(2).all(|w| w[1] > w[0]));
        assert!(peaks.windows(2).all(|w| w[1] - w[0] >= 7));
        assert!(peaks.iter().all(|&i| filtered[i] >= 0.3));
    }

    #[test]
    fn test_empty_candidates() {
        assert!(select_peaks(&[1.0, 2.0], &[], 0.0, 3).unwrap().is_empty());
    }

    #[test]
    fn test_select_peaks_rejects_bad_parameters() {
        assert!(matches!(
            select_peaks(&[0.0, 1.0, 0.0], &[1], 0.0, 0),
            Err(PpgError::InvalidParameter(_))
        ));
        assert!(matches!(
            select_peaks(&[0.0, 1.0, 0.0], &[1, 3], 0.0, 2),
            Err(PpgError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_select_peaks_rejects_unordered_candidates() {
        let filtered = vec![1.0; 20];
        assert!(matches!(
            select_peaks(&filtered, &[12, 10], 0.5, 5),
            Err(PpgError::InvalidParameter(_))
        ));
        assert!(matches!(
            select_peaks(&filtered, &[3, 8, 8], 0.5, 5),
            Err(PpgError::InvalidParameter(_))
        ));
        // Order is checked before the amplitude filter drops anything
        let mut low = vec![0.0; 20];
        low[15] = 1.0;
        assert!(matches!(
            select_peaks(&low, &[15, 4], 0.5, 5),
            Err(PpgError::InvalidParameter(_))
        ));
    }
}
