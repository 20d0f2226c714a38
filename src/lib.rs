pub mod config;
pub mod constants;
pub mod error;
pub mod input;
pub mod output;
pub mod pipeline;
pub mod signal_processing;

#[cfg(feature = "simulation")]
pub mod simulation;

pub use config::{AmplitudeThreshold, DetectorConfig};
pub use error::{PpgError, Result};
pub use pipeline::{PeakDetection, SystolicPeak, detect_systolic_peaks};
