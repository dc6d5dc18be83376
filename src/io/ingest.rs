//! CSV ingest for the measured-data figures.
//!
//! Both experimental datasets have a fixed, externally defined schema (one
//! header row, one row per observation). The rules here are:
//!
//! - **Strict schema**: a missing required column is a hard failure naming
//!   the column (exit code 2).
//! - **Batch, not streaming**: a malformed row aborts the whole load with
//!   its 1-based line number. A half-loaded report is worse than no report.
//! - **Empty input is an error**: a figure rendered from zero records would
//!   silently ship an empty panel.
//! - No fitting or derivation here; this module only produces typed rows.

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::StringRecord;

use crate::domain::{Observation, SensitivityRow};
use crate::error::AppError;

/// Load the HRC episode time series (`Episode, Throughput, Workload, Safety`).
pub fn load_observations(path: &Path) -> Result<Vec<Observation>, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::io(format!("Failed to open CSV '{}': {e}", path.display())))?;
    read_observations(file).map_err(|e| e.with_path(path))
}

/// Load the sensitivity sweep
/// (`Parameter, Value, Throughput, Workload, Safety, Std_*`).
pub fn load_sensitivity(path: &Path) -> Result<Vec<SensitivityRow>, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::io(format!("Failed to open CSV '{}': {e}", path.display())))?;
    read_sensitivity(file).map_err(|e| e.with_path(path))
}

/// Row-level failure before it is bound to a file path.
#[derive(Debug)]
pub struct IngestError {
    message: String,
}

impl IngestError {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    fn with_path(self, path: &Path) -> AppError {
        AppError::data_format(format!("{} ({})", self.message, path.display()))
    }
}

pub fn read_observations<R: Read>(reader: R) -> Result<Vec<Observation>, IngestError> {
    let (headers, records) = read_records(reader)?;
    ensure_columns(&headers, &["episode", "throughput", "workload", "safety"])?;

    let mut rows = Vec::with_capacity(records.len());
    for (line, record) in records {
        let episode = parse_field(&record, &headers, "episode", line)? as u32;
        rows.push(Observation {
            episode,
            throughput: parse_field(&record, &headers, "throughput", line)?,
            workload: parse_field(&record, &headers, "workload", line)?,
            safety: parse_field(&record, &headers, "safety", line)?,
        });
    }

    if rows.is_empty() {
        return Err(IngestError::new("CSV contains a header but no data rows"));
    }
    Ok(rows)
}

pub fn read_sensitivity<R: Read>(reader: R) -> Result<Vec<SensitivityRow>, IngestError> {
    let (headers, records) = read_records(reader)?;
    ensure_columns(
        &headers,
        &[
            "parameter",
            "value",
            "throughput",
            "workload",
            "safety",
            "std_throughput",
            "std_workload",
            "std_safety",
        ],
    )?;

    let mut rows = Vec::with_capacity(records.len());
    for (line, record) in records {
        let parameter = get_field(&record, &headers, "parameter", line)?.to_string();
        rows.push(SensitivityRow {
            parameter,
            value: parse_field(&record, &headers, "value", line)?,
            throughput: parse_field(&record, &headers, "throughput", line)?,
            workload: parse_field(&record, &headers, "workload", line)?,
            safety: parse_field(&record, &headers, "safety", line)?,
            std_throughput: parse_field(&record, &headers, "std_throughput", line)?,
            std_workload: parse_field(&record, &headers, "std_workload", line)?,
            std_safety: parse_field(&record, &headers, "std_safety", line)?,
        });
    }

    if rows.is_empty() {
        return Err(IngestError::new("CSV contains a header but no data rows"));
    }
    Ok(rows)
}

/// Read headers and all records, failing on the first malformed row.
fn read_records<R: Read>(
    reader: R,
) -> Result<(HashMap<String, usize>, Vec<(usize, StringRecord)>), IngestError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv_reader
        .headers()
        .map_err(|e| IngestError::new(format!("Failed to read CSV headers: {e}")))?
        .clone();
    let header_map = build_header_map(&headers);

    let mut records = Vec::new();
    for (idx, result) in csv_reader.records().enumerate() {
        // records() starts after the header; CSV lines are 1-based.
        let line = idx + 2;
        let record =
            result.map_err(|e| IngestError::new(format!("Line {line}: CSV parse error: {e}")))?;
        records.push((line, record));
    }

    Ok((header_map, records))
}

fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (normalize_header_name(name), idx))
        .collect()
}

fn normalize_header_name(name: &str) -> String {
    // Spreadsheet exports sometimes prefix the first header with a UTF-8 BOM;
    // without stripping it, schema validation reports a bogus missing column.
    let name = name.trim().trim_start_matches('\u{feff}');
    name.to_ascii_lowercase()
}

fn ensure_columns(headers: &HashMap<String, usize>, required: &[&str]) -> Result<(), IngestError> {
    for name in required {
        if !headers.contains_key(*name) {
            return Err(IngestError::new(format!("Missing required column: `{name}`")));
        }
    }
    Ok(())
}

fn get_field<'a>(
    record: &'a StringRecord,
    headers: &HashMap<String, usize>,
    name: &str,
    line: usize,
) -> Result<&'a str, IngestError> {
    headers
        .get(name)
        .and_then(|&idx| record.get(idx))
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| IngestError::new(format!("Line {line}: missing value for `{name}`")))
}

fn parse_field(
    record: &StringRecord,
    headers: &HashMap<String, usize>,
    name: &str,
    line: usize,
) -> Result<f64, IngestError> {
    let raw = get_field(record, headers, name, line)?;
    let value: f64 = raw
        .parse()
        .map_err(|_| IngestError::new(format!("Line {line}: invalid number '{raw}' in `{name}`")))?;
    if !value.is_finite() {
        return Err(IngestError::new(format!(
            "Line {line}: non-finite value in `{name}`"
        )));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HRC_CSV: &str = "\
Episode,Throughput,Workload,Safety
1,5.2,0.78,0.93
2,5.5,0.75,0.95
3,5.9,0.71,0.96
";

    #[test]
    fn observations_parse_in_order() {
        let rows = read_observations(HRC_CSV.as_bytes()).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].episode, 1);
        assert!((rows[2].throughput - 5.9).abs() < 1e-12);
        assert!((rows[1].workload - 0.75).abs() < 1e-12);
    }

    #[test]
    fn missing_column_names_the_column() {
        let csv = "Episode,Throughput,Workload\n1,5.2,0.78\n";
        let err = read_observations(csv.as_bytes()).unwrap_err();
        assert!(err.message.contains("`safety`"), "{}", err.message);
    }

    #[test]
    fn malformed_row_aborts_with_line_number() {
        let csv = "Episode,Throughput,Workload,Safety\n1,5.2,0.78,0.93\n2,oops,0.75,0.95\n";
        let err = read_observations(csv.as_bytes()).unwrap_err();
        assert!(err.message.contains("Line 3"), "{}", err.message);
    }

    #[test]
    fn empty_dataset_is_an_error() {
        let csv = "Episode,Throughput,Workload,Safety\n";
        let err = read_observations(csv.as_bytes()).unwrap_err();
        assert!(err.message.contains("no data rows"), "{}", err.message);
    }

    #[test]
    fn bom_on_first_header_is_stripped() {
        let csv = "\u{feff}Episode,Throughput,Workload,Safety\n1,5.2,0.78,0.93\n";
        let rows = read_observations(csv.as_bytes()).unwrap();
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn sensitivity_rows_parse() {
        let csv = "\
Parameter,Value,Throughput,Workload,Safety,Std_Throughput,Std_Workload,Std_Safety
fatigueRate,0.9,5.8,6600,0.96,0.2,120,0.01
fatigueRate,1.0,5.9,6500,0.97,0.2,110,0.01
";
        let rows = read_sensitivity(csv.as_bytes()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].parameter, "fatigueRate");
        assert!(!rows[0].is_baseline());
        assert!(rows[1].is_baseline());
    }
}
