/// Add a slow linear drift to a signal
pub fn with_linear_drift(signal: &[f64], total_drift: f64) -> Vec<f64> {
    let n = signal.len().max(1) as f64;
    signal
        .iter()
        .enumerate()
        .map(|(i, &x)| x + total_drift * i as f64 / n)
        .collect()
}
