mod noise;
mod signal;

pub use noise::{BaselineWanderConfig, GaussianNoiseConfig, NoiseConfig, apply_noise};
pub use signal::{
    DIASTOLIC_RATIO, PpgSignalConfig, SyntheticPpg, baseline_wander, generate_ppg_signal,
    pulse_apexes, triangular_pulse_train,
};

/// Generate a synthetic PPG and apply noise to it
pub fn generate_noisy_ppg(signal: &PpgSignalConfig, noise: &NoiseConfig) -> SyntheticPpg {
    let mut ppg = generate_ppg_signal(signal);
    apply_noise(&mut ppg.samples, signal.sampling_rate_hz, noise);
    ppg
}
