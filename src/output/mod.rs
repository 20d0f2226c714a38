mod csv;
mod export;
mod json;
mod text;

use serde::Serialize;

use crate::pipeline::{PeakDetection, SystolicPeak};

pub use self::csv::CsvFormatter;
pub use self::export::write_filtered_csv;
pub use self::json::JsonFormatter;
pub use self::text::TextFormatter;

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Csv,
}

/// Detection summary for one recording, as handed to a formatter
#[derive(Debug, Clone, Serialize)]
pub struct PeakReport {
    pub source: String,
    pub sample_count: usize,
    pub sampling_rate_hz: f64,
    pub window_size: usize,
    pub min_distance: usize,
    pub amplitude_threshold: f64,
    pub candidate_count: usize,
    pub peaks: Vec<SystolicPeak>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PeakReport {
    pub fn from_detection(source: impl Into<String>, detection: &PeakDetection) -> Self {
        Self {
            source: source.into(),
            sample_count: detection.sample_count(),
            sampling_rate_hz: detection.sampling_rate_hz,
            window_size: detection.window_size,
            min_distance: detection.min_distance,
            amplitude_threshold: detection.amplitude_threshold,
            candidate_count: detection.candidate_count,
            peaks: detection.peaks.clone(),
            error: None,
        }
    }

    /// Report for a recording that could not be processed
    pub fn failed(source: impl Into<String>, sampling_rate_hz: f64, error: String) -> Self {
        Self {
            source: source.into(),
            sample_count: 0,
            sampling_rate_hz,
            window_size: 0,
            min_distance: 0,
            amplitude_threshold: 0.0,
            candidate_count: 0,
            peaks: Vec::new(),
            error: Some(error),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

pub trait Formatter {
    fn format(&self, report: &PeakReport) -> String;

    fn header(&self) -> Option<&'static str> {
        None
    }
}

pub fn create_formatter(format: OutputFormat, verbose: bool) -> Box<dyn Formatter> {
    match format {
        OutputFormat::Text => Box::new(TextFormatter::new(verbose)),
        OutputFormat::Json => Box::new(JsonFormatter),
        OutputFormat::Csv => Box::new(CsvFormatter),
    }
}
