//! Configuration for systolic peak detection.
//!
//! A [`DetectorConfig`] can be built in code, parsed from TOML, or assembled
//! from command line flags:
//!
//! ```toml
//! sampling_rate_hz = 125.0
//! window_fraction = 0.12
//! max_expected_bpm = 120.0
//! amplitude_threshold = "range:0.5"
//! ```

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use rolling_stats::Stats;
use serde::Deserialize;

use crate::constants::{
    DEFAULT_AMPLITUDE_THRESHOLD, DEFAULT_MAX_EXPECTED_BPM, DEFAULT_SAMPLING_RATE_HZ,
    DEFAULT_WINDOW_FRACTION,
};
use crate::error::{PpgError, Result};
use crate::signal_processing::{min_peak_distance, window_size_for};

/// Amplitude threshold policy
///
/// Decides the minimum filtered value of an accepted peak, either as a fixed
/// level or derived from the filtered signal itself.
///
/// # Parsing formats
/// - `0.5` - fixed level
/// - `mean` - mean of the filtered signal
/// - `range:0.6` or `60%` - 60% of the way from the signal minimum to its maximum
///
/// # Example
/// ```
/// use ppgpeak::config::AmplitudeThreshold;
///
/// let threshold: AmplitudeThreshold = "range:0.5".parse().unwrap();
/// assert_eq!(threshold.resolve(&[1.0, 3.0, 2.0]).unwrap(), 2.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(try_from = "ThresholdRepr")]
pub enum AmplitudeThreshold {
    /// Fixed level in signal units
    Fixed(f64),
    /// Arithmetic mean of the filtered signal
    Mean,
    /// Fraction (0-1) of the filtered signal's min-to-max range, above its minimum
    RangeFraction(f64),
}

impl AmplitudeThreshold {
    /// Compute the concrete threshold for a filtered signal
    pub fn resolve(&self, filtered: &[f64]) -> Result<f64> {
        match *self {
            Self::Fixed(level) => Ok(level),
            Self::Mean => Ok(signal_stats(filtered)?.mean),
            Self::RangeFraction(fraction) => {
                let stats = signal_stats(filtered)?;
                Ok(stats.min + fraction * (stats.max - stats.min))
            }
        }
    }

    fn validate(&self) -> Result<()> {
        match *self {
            Self::Fixed(level) if !level.is_finite() => Err(PpgError::InvalidParameter(format!(
                "amplitude threshold must be finite, got {}",
                level
            ))),
            Self::RangeFraction(fraction) if !(0.0..=1.0).contains(&fraction) => {
                Err(PpgError::InvalidParameter(format!(
                    "range fraction must be within 0-1, got {}",
                    fraction
                )))
            }
            _ => Ok(()),
        }
    }
}

fn signal_stats(filtered: &[f64]) -> Result<Stats<f64>> {
    if filtered.is_empty() {
        return Err(PpgError::EmptyInput);
    }
    let mut stats: Stats<f64> = Stats::new();
    for &sample in filtered {
        stats.update(sample);
    }
    Ok(stats)
}

impl Default for AmplitudeThreshold {
    fn default() -> Self {
        Self::Fixed(DEFAULT_AMPLITUDE_THRESHOLD)
    }
}

impl fmt::Display for AmplitudeThreshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed(level) => write!(f, "{}", level),
            Self::Mean => write!(f, "mean"),
            Self::RangeFraction(fraction) => write!(f, "range:{}", fraction),
        }
    }
}

impl FromStr for AmplitudeThreshold {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim();

        if s.eq_ignore_ascii_case("mean") {
            return Ok(Self::Mean);
        }

        let fraction = if let Some(num) = s.strip_prefix("range:") {
            Some(
                num.trim()
                    .parse::<f64>()
                    .map_err(|_| format!("invalid range fraction: {}", s))?,
            )
        } else if let Some(num) = s.strip_suffix('%') {
            let percent: f64 = num
                .trim()
                .parse()
                .map_err(|_| format!("invalid percentage: {}", s))?;
            Some(percent / 100.0)
        } else {
            None
        };

        let threshold = match fraction {
            Some(fraction) => Self::RangeFraction(fraction),
            None => Self::Fixed(
                s.parse()
                    .map_err(|_| format!("invalid amplitude threshold: {}", s))?,
            ),
        };
        threshold.validate().map_err(|e| e.to_string())?;
        Ok(threshold)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ThresholdRepr {
    Level(f64),
    Policy(String),
}

impl TryFrom<ThresholdRepr> for AmplitudeThreshold {
    type Error = String;

    fn try_from(repr: ThresholdRepr) -> std::result::Result<Self, Self::Error> {
        match repr {
            ThresholdRepr::Level(level) => Ok(Self::Fixed(level)),
            ThresholdRepr::Policy(policy) => policy.parse(),
        }
    }
}

/// Systolic peak detector configuration
///
/// Every window and distance parameter is derived from `sampling_rate_hz`.
/// Use [`DetectorConfig::new`] for the standard defaults at a given rate.
///
/// # Example
/// ```
/// use ppgpeak::config::DetectorConfig;
///
/// let config = DetectorConfig::new(1000.0);
/// assert_eq!(config.window_size().unwrap(), 121);
/// assert_eq!(config.min_distance().unwrap(), 600);
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DetectorConfig {
    /// Sampling rate of the waveform in Hz
    pub sampling_rate_hz: f64,
    /// Smoothing window length as a fraction of the sampling rate (seconds)
    pub window_fraction: f64,
    /// Highest plausible heart rate, sets the refractory distance
    pub max_expected_bpm: f64,
    /// Minimum filtered amplitude of an accepted peak
    pub amplitude_threshold: AmplitudeThreshold,
}

impl DetectorConfig {
    pub fn new(sampling_rate_hz: f64) -> Self {
        Self {
            sampling_rate_hz,
            ..Self::default()
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)
            .map_err(|e| PpgError::InvalidParameter(format!("config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| PpgError::Input(format!("{}: {}", path.display(), e)))?;
        Self::from_toml_str(&content)
    }

    /// Check every parameter without touching any signal
    pub fn validate(&self) -> Result<()> {
        self.window_size()?;
        self.min_distance()?;
        self.amplitude_threshold.validate()
    }

    /// Smoothing window length in samples (odd)
    pub fn window_size(&self) -> Result<usize> {
        window_size_for(self.sampling_rate_hz, self.window_fraction)
    }

    /// Refractory distance between peaks in samples
    pub fn min_distance(&self) -> Result<usize> {
        min_peak_distance(self.sampling_rate_hz, self.max_expected_bpm)
    }
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            sampling_rate_hz: DEFAULT_SAMPLING_RATE_HZ,
            window_fraction: DEFAULT_WINDOW_FRACTION,
            max_expected_bpm: DEFAULT_MAX_EXPECTED_BPM,
            amplitude_threshold: AmplitudeThreshold::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_threshold_parsing() {
        assert_eq!(
            "0.5".parse::<AmplitudeThreshold>().unwrap(),
            AmplitudeThreshold::Fixed(0.5)
        );
        assert_eq!(
            "-1.25".parse::<AmplitudeThreshold>().unwrap(),
            AmplitudeThreshold::Fixed(-1.25)
        );
        assert_eq!(
            " Mean ".parse::<AmplitudeThreshold>().unwrap(),
            AmplitudeThreshold::Mean
        );
        assert_eq!(
            "range:0.6".parse::<AmplitudeThreshold>().unwrap(),
            AmplitudeThreshold::RangeFraction(0.6)
        );
        assert_eq!(
            "40%".parse::<AmplitudeThreshold>().unwrap(),
            AmplitudeThreshold::RangeFraction(0.4)
        );
    }

    #[test]
    fn test_threshold_parsing_rejects_garbage() {
        assert!("high".parse::<AmplitudeThreshold>().is_err());
        assert!("range:abc".parse::<AmplitudeThreshold>().is_err());
        assert!("range:1.5".parse::<AmplitudeThreshold>().is_err());
        assert!("-10%".parse::<AmplitudeThreshold>().is_err());
        assert!("inf".parse::<AmplitudeThreshold>().is_err());
    }

    #[test]
    fn test_threshold_display_round_trips() {
        for threshold in [
            AmplitudeThreshold::Fixed(0.75),
            AmplitudeThreshold::Mean,
            AmplitudeThreshold::RangeFraction(0.3),
        ] {
            assert_eq!(
                threshold.to_string().parse::<AmplitudeThreshold>().unwrap(),
                threshold
            );
        }
    }

    #[test]
    fn test_threshold_resolve() {
        let filtered = [0.0, 2.0, 4.0, 10.0];

        assert_eq!(AmplitudeThreshold::Fixed(0.5).resolve(&filtered).unwrap(), 0.5);
        assert_relative_eq!(AmplitudeThreshold::Mean.resolve(&filtered).unwrap(), 4.0);
        assert_relative_eq!(
            AmplitudeThreshold::RangeFraction(0.25)
                .resolve(&filtered)
                .unwrap(),
            2.5
        );
        assert_eq!(
            AmplitudeThreshold::Mean.resolve(&[]),
            Err(PpgError::EmptyInput)
        );
    }

    #[test]
    fn test_only_signal_dependent_thresholds_need_samples() {
        assert_eq!(AmplitudeThreshold::Fixed(0.7).resolve(&[]), Ok(0.7));
        assert_eq!(
            AmplitudeThreshold::RangeFraction(0.5).resolve(&[]),
            Err(PpgError::EmptyInput)
        );
        assert_relative_eq!(
            AmplitudeThreshold::RangeFraction(1.0)
                .resolve(&[-3.0, 5.0, 1.0])
                .unwrap(),
            5.0
        );
    }

    #[test]
    fn test_default_config() {
        let config = DetectorConfig::default();
        assert_eq!(config.sampling_rate_hz, 1000.0);
        assert_eq!(config.window_size().unwrap(), 121);
        assert_eq!(config.min_distance().unwrap(), 600);
        assert_eq!(config.amplitude_threshold, AmplitudeThreshold::Fixed(0.5));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = DetectorConfig::new(0.0);
        assert!(matches!(
            config.validate(),
            Err(PpgError::InvalidParameter(_))
        ));

        config.sampling_rate_hz = 125.0;
        config.max_expected_bpm = -60.0;
        assert!(config.validate().is_err());

        config.max_expected_bpm = 100.0;
        config.window_fraction = 0.0;
        assert!(config.validate().is_err());

        config.window_fraction = 0.12;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_toml() {
        let config = DetectorConfig::from_toml_str(
            r#"
            sampling_rate_hz = 125.0
            max_expected_bpm = 150.0
            amplitude_threshold = "range:0.5"
            "#,
        )
        .unwrap();

        assert_eq!(config.sampling_rate_hz, 125.0);
        assert_eq!(config.window_fraction, DEFAULT_WINDOW_FRACTION);
        assert_eq!(config.max_expected_bpm, 150.0);
        assert_eq!(
            config.amplitude_threshold,
            AmplitudeThreshold::RangeFraction(0.5)
        );
        assert_eq!(config.min_distance().unwrap(), 50);
    }

    #[test]
    fn test_from_toml_numeric_threshold() {
        let config = DetectorConfig::from_toml_str("amplitude_threshold = 0.25").unwrap();
        assert_eq!(config.amplitude_threshold, AmplitudeThreshold::Fixed(0.25));
    }

    #[test]
    fn test_from_toml_rejects_invalid() {
        assert!(DetectorConfig::from_toml_str("sampling_rate_hz = -5.0").is_err());
        assert!(DetectorConfig::from_toml_str("amplitude_threshold = \"loud\"").is_err());
        assert!(DetectorConfig::from_toml_str("unknown_key = 1").is_err());
    }
}
