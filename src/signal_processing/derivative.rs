/// First-difference derivative of a sampled signal
///
/// Element `i` is the slope between samples `i` and `i + 1`, so the result is
/// one sample shorter than the input (empty for fewer than two samples).
pub fn first_difference(signal: &[f64]) -> Vec<f64> {
    signal.windows(2).map(|pair| pair[1] - pair[0]).collect()
}

/// Find local maxima as positive-to-non-positive slope transitions
///
/// A candidate is reported at sample `i + 1` when the slope into it is strictly
/// positive and the slope out of it is zero or negative. A plateau that follows
/// a rise is therefore reported at its first flat sample. The first and last
/// samples are never candidates.
///
/// No amplitude or spacing rules are applied here; see
/// [`select_peaks`](super::select_peaks).
///
/// # Returns
/// Ascending indices into `filtered`, possibly empty
pub fn find_candidates(filtered: &[f64]) -> Vec<usize> {
    let slope = first_difference(filtered);

    slope
        .windows(2)
        .enumerate()
        .filter(|(_, pair)| pair[0] > 0.0 && pair[1] <= 0.0)
        .map(|(i, _)| i + 1)
        .collect()
}
