pub mod generate;

pub use generate::with_linear_drift;
pub use ppgpeak::simulation::{
    NoiseConfig, PpgSignalConfig, generate_noisy_ppg, pulse_apexes, triangular_pulse_train,
};
