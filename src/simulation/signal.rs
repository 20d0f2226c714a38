use std::f64::consts::PI;

/// Relative height of the diastolic wave in the synthetic PPG pulse
pub const DIASTOLIC_RATIO: f64 = 0.35;

/// Sample positions of pulse apexes starting at `first_apex`, every `period` samples
pub fn pulse_apexes(len: usize, period: usize, first_apex: usize) -> Vec<usize> {
    (first_apex..len).step_by(period.max(1)).collect()
}

/// Train of symmetric triangular pulses on a zero baseline
///
/// Each pulse rises linearly over `half_width` samples to `amplitude` at its
/// apex and falls back to zero over the next `half_width` samples. Apexes are
/// placed at `first_apex + k * period`.
pub fn triangular_pulse_train(
    len: usize,
    period: usize,
    first_apex: usize,
    half_width: usize,
    amplitude: f64,
) -> Vec<f64> {
    let mut signal = vec![0.0; len];
    if half_width == 0 {
        return signal;
    }

    for apex in pulse_apexes(len + half_width, period, first_apex) {
        let start = apex.saturating_sub(half_width - 1);
        let end = (apex + half_width).min(len);
        for (i, sample) in signal.iter_mut().enumerate().take(end).skip(start) {
            let value = amplitude * (1.0 - i.abs_diff(apex) as f64 / half_width as f64);
            if value > *sample {
                *sample = value;
            }
        }
    }

    signal
}

/// Parameters of a synthetic fingertip PPG recording
#[derive(Clone, Debug, serde::Deserialize)]
pub struct PpgSignalConfig {
    pub sampling_rate_hz: f64,
    pub duration_secs: f64,
    pub heart_rate_bpm: f64,
    /// Systolic peak height above baseline
    pub amplitude: f64,
    /// Width (standard deviation) of the systolic wave in seconds
    pub systolic_width_s: f64,
    /// Delay of the diastolic wave after the systolic peak in seconds
    pub diastolic_delay_s: f64,
}

impl Default for PpgSignalConfig {
    fn default() -> Self {
        Self {
            sampling_rate_hz: 1000.0,
            duration_secs: 10.0,
            heart_rate_bpm: 75.0,
            amplitude: 1.0,
            systolic_width_s: 0.08,
            diastolic_delay_s: 0.3,
        }
    }
}

/// Clean synthetic PPG and the sample index of every systolic apex
#[derive(Clone, Debug)]
pub struct SyntheticPpg {
    pub samples: Vec<f64>,
    pub apexes: Vec<usize>,
}

/// Generate a noise-free PPG made of a systolic and a smaller diastolic
/// Gaussian wave per beat
///
/// The first beat is placed half a period into the recording. No beat starts
/// after the last apex, so the recording ends on the falling diastolic tail
/// rather than on a partial upstroke.
pub fn generate_ppg_signal(config: &PpgSignalConfig) -> SyntheticPpg {
    let fs = config.sampling_rate_hz;
    let len = (config.duration_secs * fs) as usize;
    let period = ((60.0 / config.heart_rate_bpm) * fs).round() as usize;
    let apexes = pulse_apexes(len, period, period / 2);

    let sigma = config.systolic_width_s * fs;
    let diastolic_delay = config.diastolic_delay_s * fs;

    let mut samples = vec![0.0; len];
    for &apex in &apexes {
        for (i, sample) in samples.iter_mut().enumerate() {
            let t = i as f64 - apex as f64;
            *sample += config.amplitude * (-0.5 * (t / sigma).powi(2)).exp();
            let td = t - diastolic_delay;
            *sample += config.amplitude
                * DIASTOLIC_RATIO
                * (-0.5 * (td / sigma).powi(2)).exp();
        }
    }

    SyntheticPpg { samples, apexes }
}

/// Sinusoidal baseline drift, as from respiration or sensor movement
pub fn baseline_wander(
    len: usize,
    sampling_rate_hz: f64,
    amplitude: f64,
    frequency_hz: f64,
    phase: f64,
) -> Vec<f64> {
    (0..len)
        .map(|i| {
            let t = i as f64 / sampling_rate_hz;
            amplitude * (2.0 * PI * frequency_hz * t + phase).sin()
        })
        .collect()
}
