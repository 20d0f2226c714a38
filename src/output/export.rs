use std::io::Write;

use crate::error::{PpgError, Result};
use crate::pipeline::PeakDetection;

/// Write raw and filtered samples with peak markers for external plotting
///
/// Columns: `sample,time_s,raw,filtered,is_peak`.
pub fn write_filtered_csv<W: Write>(
    writer: W,
    raw: &[f64],
    detection: &PeakDetection,
) -> Result<()> {
    if raw.len() != detection.filtered.len() {
        return Err(PpgError::InvalidParameter(format!(
            "raw signal has {} samples but filtered has {}",
            raw.len(),
            detection.filtered.len()
        )));
    }

    let to_err = |e: csv::Error| PpgError::Input(e.to_string());
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer
        .write_record(["sample", "time_s", "raw", "filtered", "is_peak"])
        .map_err(to_err)?;

    let mut peaks = detection.peaks.iter().map(|p| p.index).peekable();
    for (i, (&r, &f)) in raw.iter().zip(&detection.filtered).enumerate() {
        let is_peak = peaks.next_if_eq(&i).is_some();
        csv_writer
            .write_record([
                i.to_string(),
                format!("{:.6}", i as f64 / detection.sampling_rate_hz),
                r.to_string(),
                f.to_string(),
                u8::from(is_peak).to_string(),
            ])
            .map_err(to_err)?;
    }

    csv_writer
        .flush()
        .map_err(|e| PpgError::Input(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DetectorConfig;
    use crate::pipeline::detect_systolic_peaks;

    #[test]
    fn test_export_marks_peaks() {
        let raw = vec![0.0, 1.0, 2.0, 3.0, 2.0, 1.0, 0.0];
        let mut config = DetectorConfig::new(10.0);
        config.window_fraction = 0.1; // single-sample window
        config.max_expected_bpm = 300.0;

        let detection = detect_systolic_peaks(&raw, &config).unwrap();
        assert_eq!(detection.indices(), vec![3]);

        let mut out = Vec::new();
        write_filtered_csv(&mut out, &raw, &detection).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 8);
        assert_eq!(lines[0], "sample,time_s,raw,filtered,is_peak");
        assert_eq!(lines[4], "3,0.300000,3,3,1");
        assert!(lines[1].ends_with(",0"));
    }

    #[test]
    fn test_export_rejects_mismatched_lengths() {
        let raw = vec![0.0, 1.0, 0.0];
        let mut config = DetectorConfig::new(10.0);
        config.window_fraction = 0.1;
        config.max_expected_bpm = 300.0;
        let detection = detect_systolic_peaks(&raw, &config).unwrap();

        let result = write_filtered_csv(Vec::new(), &raw[..2], &detection);
        assert!(matches!(result, Err(PpgError::InvalidParameter(_))));
    }
}
