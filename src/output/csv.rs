use super::{Formatter, PeakReport};

/// One row per peak; a failed recording produces a single row carrying the error
pub struct CsvFormatter;

impl Formatter for CsvFormatter {
    fn format(&self, report: &PeakReport) -> String {
        let rows: Vec<[String; 5]> = match report.error {
            Some(ref error) => vec![[
                report.source.clone(),
                String::new(),
                String::new(),
                String::new(),
                error.clone(),
            ]],
            None => report
                .peaks
                .iter()
                .map(|peak| {
                    [
                        report.source.clone(),
                        peak.index.to_string(),
                        format!("{:.4}", peak.time_s),
                        format!("{:.6}", peak.amplitude),
                        String::new(),
                    ]
                })
                .collect(),
        };

        write_rows(&rows).unwrap_or_else(|e| {
            log::error!("Failed to format CSV rows for {}: {}", report.source, e);
            String::new()
        })
    }

    fn header(&self) -> Option<&'static str> {
        Some("source,index,time_s,amplitude,error")
    }
}

/// Encode rows with the csv writer, without a trailing line terminator
fn write_rows(rows: &[[String; 5]]) -> ::csv::Result<String> {
    let mut writer = ::csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(::csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    for row in rows {
        writer.write_record(row)?;
    }
    let bytes = writer.into_inner().map_err(|e| e.into_error())?;

    let mut text = String::from_utf8_lossy(&bytes).into_owned();
    if text.ends_with('\n') {
        text.pop();
    }
    Ok(text)
}
