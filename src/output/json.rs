use super::{Formatter, PeakReport};

/// One JSON object per recording
pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn format(&self, report: &PeakReport) -> String {
        serde_json::to_string(report).unwrap_or_else(|e| {
            serde_json::json!({ "source": report.source, "error": e.to_string() }).to_string()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::test_support::sample_report;

    #[test]
    fn test_json_report() {
        let json = JsonFormatter.format(&sample_report());
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["source"], "finger.csv");
        assert_eq!(value["min_distance"], 600);
        assert_eq!(value["peaks"][1]["index"], 1210);
        assert_eq!(value["peaks"][0]["amplitude"], 0.8125);
        assert!(value.get("error").is_none());
    }

    #[test]
    fn test_json_error() {
        let report = PeakReport::failed("bad.csv", 125.0, "Empty input".to_string());
        let value: serde_json::Value = serde_json::from_str(&JsonFormatter.format(&report)).unwrap();
        assert_eq!(value["error"], "Empty input");
        assert_eq!(value["peaks"].as_array().unwrap().len(), 0);
    }
}
