use super::{Formatter, PeakReport};

pub struct TextFormatter {
    verbose: bool,
}

impl TextFormatter {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }
}

impl Formatter for TextFormatter {
    fn format(&self, report: &PeakReport) -> String {
        if let Some(ref error) = report.error {
            return format!("{}: ERROR: {}", report.source, error);
        }

        let duration_s = report.sample_count as f64 / report.sampling_rate_hz;
        let mut out = format!(
            "{}: {} systolic peaks in {:.2} s ({} samples @ {} Hz)",
            report.source,
            report.peaks.len(),
            duration_s,
            report.sample_count,
            report.sampling_rate_hz
        );

        if self.verbose {
            out.push_str(&format!(
                "\n  window: {} samples, min distance: {} samples, threshold: {:.4}, candidates: {}",
                report.window_size,
                report.min_distance,
                report.amplitude_threshold,
                report.candidate_count
            ));
            for peak in &report.peaks {
                out.push_str(&format!(
                    "\n  {:>8} {:>10.3} s {:>10.4}",
                    peak.index, peak.time_s, peak.amplitude
                ));
            }
        } else if !report.peaks.is_empty() {
            let indices: Vec<String> = report.peaks.iter().map(|p| p.index.to_string()).collect();
            out.push_str(&format!("\n  peaks: {}", indices.join(", ")));
        }

        out
    }
}
