//! CSV loading for single-channel waveforms.

use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use crate::error::{PpgError, Result};

/// Which CSV column holds the waveform
///
/// Parsed from a column index (`0`, `3`) or a header name (`ppg`, `PLETH`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnSelector {
    Index(usize),
    Name(String),
}

impl Default for ColumnSelector {
    fn default() -> Self {
        Self::Index(0)
    }
}

impl fmt::Display for ColumnSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(index) => write!(f, "{}", index),
            Self::Name(name) => write!(f, "{}", name),
        }
    }
}

impl FromStr for ColumnSelector {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err("column must not be empty".to_string());
        }
        if s.bytes().all(|b| b.is_ascii_digit()) {
            let index = s.parse().map_err(|_| format!("invalid column index: {}", s))?;
            return Ok(Self::Index(index));
        }
        Ok(Self::Name(s.to_string()))
    }
}

/// Load one numeric column from a CSV file
pub fn load_csv_column(
    path: &Path,
    column: &ColumnSelector,
    has_headers: bool,
) -> Result<Vec<f64>> {
    let file =
        File::open(path).map_err(|e| PpgError::Input(format!("{}: {}", path.display(), e)))?;
    read_csv_column(file, column, has_headers)
}

/// Read one numeric column from CSV data
///
/// Selecting a column by name requires a header row. Record numbers in error
/// messages count data rows from 1.
pub fn read_csv_column<R: Read>(
    reader: R,
    column: &ColumnSelector,
    has_headers: bool,
) -> Result<Vec<f64>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(has_headers)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let index = match column {
        ColumnSelector::Index(index) => *index,
        ColumnSelector::Name(name) => {
            if !has_headers {
                return Err(PpgError::Input(format!(
                    "column '{}' selected by name but the input has no header row",
                    name
                )));
            }
            let headers = csv_reader
                .headers()
                .map_err(|e| PpgError::Input(e.to_string()))?;
            headers
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| PpgError::Input(format!("no column named '{}'", name)))?
        }
    };

    let mut samples = Vec::new();
    for (row, record) in csv_reader.records().enumerate() {
        let record = record.map_err(|e| PpgError::Input(e.to_string()))?;
        let field = record.get(index).ok_or_else(|| {
            PpgError::Input(format!("record {} has no column {}", row + 1, column))
        })?;
        let value: f64 = field.parse().map_err(|_| {
            PpgError::Input(format!(
                "record {}: '{}' is not a number",
                row + 1,
                field
            ))
        })?;
        samples.push(value);
    }

    log::debug!("Loaded {} samples from column {}", samples.len(), column);
    Ok(samples)
}
