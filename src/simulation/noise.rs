use rand::RngExt;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};
use std::f64::consts::PI;

use super::signal::baseline_wander;

#[derive(Clone, Debug, Default, serde::Deserialize)]
pub struct NoiseConfig {
    pub seed: Option<u64>,
    pub gaussian: Option<GaussianNoiseConfig>,
    pub baseline_wander: Option<BaselineWanderConfig>,
}

impl NoiseConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_gaussian(mut self, std_dev: f64) -> Self {
        self.gaussian = Some(GaussianNoiseConfig { std_dev });
        self
    }

    pub fn with_baseline_wander(mut self, amplitude: f64, frequency_hz: f64) -> Self {
        self.baseline_wander = Some(BaselineWanderConfig {
            amplitude,
            frequency_hz,
        });
        self
    }
}

#[derive(Clone, Debug, serde::Deserialize)]
pub struct GaussianNoiseConfig {
    pub std_dev: f64,
}

#[derive(Clone, Debug, serde::Deserialize)]
pub struct BaselineWanderConfig {
    pub amplitude: f64,
    pub frequency_hz: f64,
}

fn create_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => rand::make_rng(),
    }
}

fn apply_gaussian_noise(signal: &mut [f64], config: &GaussianNoiseConfig, rng: &mut ChaCha8Rng) {
    let Ok(normal) = Normal::new(0.0, config.std_dev) else {
        return;
    };

    for sample in signal.iter_mut() {
        *sample += normal.sample(rng);
    }
}

fn apply_baseline_wander(
    signal: &mut [f64],
    config: &BaselineWanderConfig,
    sampling_rate_hz: f64,
    rng: &mut ChaCha8Rng,
) {
    let phase = rng.random::<f64>() * 2.0 * PI;
    let wander = baseline_wander(
        signal.len(),
        sampling_rate_hz,
        config.amplitude,
        config.frequency_hz,
        phase,
    );
    for (sample, drift) in signal.iter_mut().zip(wander) {
        *sample += drift;
    }
}

/// Add the configured impairments to a clean signal in place
pub fn apply_noise(signal: &mut [f64], sampling_rate_hz: f64, config: &NoiseConfig) {
    let mut rng = create_rng(config.seed);

    if let Some(ref wander) = config.baseline_wander {
        apply_baseline_wander(signal, wander, sampling_rate_hz, &mut rng);
    }
    if let Some(ref gaussian) = config.gaussian {
        apply_gaussian_noise(signal, gaussian, &mut rng);
    }
}
