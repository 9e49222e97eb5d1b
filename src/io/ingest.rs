//! CSV ingest and normalization.
//!
//! Turns a heterogeneous draw-history CSV into clean `DrawRecord`s that are
//! safe to analyze.
//!
//! Design goals:
//! - **Strict schema** for the date column (clear errors + exit code 2)
//! - **Cell-level validation** (drop bad numbers, but report what happened)
//! - **Deterministic behavior** (records sorted by date, oldest first)
//! - **Separation of concerns**: no statistics here

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use csv::StringRecord;

use crate::domain::{DigitString, DrawRecord};
use crate::error::AppError;

/// Ingest output: normalized records plus drop accounting.
#[derive(Debug, Clone)]
pub struct IngestedHistory {
    /// Draw records sorted by date ascending.
    pub records: Vec<DrawRecord>,
    pub rows_read: usize,
    pub numbers_kept: usize,
    /// Cells that did not parse as a 4-digit number (dropped silently).
    pub cells_dropped: usize,
    /// Rows skipped for a missing or unparseable date.
    pub rows_dropped: usize,
}

/// Load and normalize a draw-history CSV from disk.
pub fn load_history(path: &Path) -> Result<IngestedHistory, AppError> {
    let file = File::open(path).map_err(|e| {
        AppError::new(2, format!("Failed to open CSV '{}': {e}", path.display()))
    })?;
    read_history(file)
}

/// Load and normalize draw history from any reader.
///
/// The date column is required; every other column is treated as a potential
/// winning-number field and parsed cell by cell.
pub fn read_history<R: Read>(reader: R) -> Result<IngestedHistory, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader
        .headers()
        .map_err(|e| AppError::new(2, format!("Failed to read CSV headers: {e}")))?
        .clone();
    let header_map = build_header_map(&headers);

    let date_idx = resolve_date_column(&header_map)?;
    let number_columns: Vec<usize> = (0..headers.len()).filter(|&i| i != date_idx).collect();
    if number_columns.is_empty() {
        return Err(AppError::new(
            2,
            "CSV has a date column but no number columns.",
        ));
    }

    let mut records = Vec::new();
    let mut rows_read = 0usize;
    let mut numbers_kept = 0usize;
    let mut cells_dropped = 0usize;
    let mut rows_dropped = 0usize;

    for result in reader.records() {
        rows_read += 1;
        let record = match result {
            Ok(r) => r,
            Err(_) => {
                rows_dropped += 1;
                continue;
            }
        };

        let Some(date) = record.get(date_idx).and_then(|s| parse_date(s).ok()) else {
            rows_dropped += 1;
            continue;
        };

        let mut numbers = Vec::new();
        for &idx in &number_columns {
            let Some(cell) = record.get(idx).map(str::trim).filter(|s| !s.is_empty()) else {
                continue;
            };
            match DigitString::parse(cell) {
                Some(n) => {
                    numbers.push(n);
                    numbers_kept += 1;
                }
                None => cells_dropped += 1,
            }
        }

        if numbers.is_empty() {
            rows_dropped += 1;
            continue;
        }
        records.push(DrawRecord { date, numbers });
    }

    // Stable so same-date rows keep their file order.
    records.sort_by_key(|r| r.date);

    Ok(IngestedHistory {
        records,
        rows_read,
        numbers_kept,
        cells_dropped,
        rows_dropped,
    })
}

fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (normalize_header_name(name), idx))
        .collect()
}

fn normalize_header_name(name: &str) -> String {
    // Excel and other tools sometimes emit UTF-8 CSVs with a BOM prefix on
    // the first header. If we don't strip it, schema validation will
    // incorrectly report a missing date column.
    let name = name.trim().trim_start_matches('\u{feff}');
    name.to_ascii_lowercase().replace(' ', "_")
}

fn resolve_date_column(header_map: &HashMap<String, usize>) -> Result<usize, AppError> {
    for candidate in ["draw_date", "date"] {
        if let Some(&idx) = header_map.get(candidate) {
            return Ok(idx);
        }
    }
    Err(AppError::new(
        2,
        "Missing required column: `draw_date` (or `date`)",
    ))
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    // ISO dates are recommended, but historical draw exports commonly use
    // `DD/MM/YYYY` or `DD-MM-YYYY`. A small fixed set keeps parsing
    // deterministic.
    const FMTS: [&str; 4] = ["%Y-%m-%d", "%d/%m/%Y", "%d-%m-%Y", "%Y/%m/%d"];
    for fmt in FMTS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Ok(d);
        }
    }
    Err(format!(
        "Invalid date '{s}'. Expected one of: YYYY-MM-DD, DD/MM/YYYY, DD-MM-YYYY, YYYY/MM/DD."
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ingest(csv: &str) -> IngestedHistory {
        read_history(csv.as_bytes()).unwrap()
    }

    #[test]
    fn reads_multi_prize_rows() {
        let data = "\
Draw_Date,First_Prize,Second_Prize,Third_Prize
2025-01-01,1221,3443,9876
2025-01-04,0042,7,5555
";
        let h = ingest(data);
        assert_eq!(h.records.len(), 2);
        assert_eq!(h.rows_read, 2);
        assert_eq!(h.numbers_kept, 6);
        assert_eq!(h.cells_dropped, 0);
        // Short entries are zero-padded.
        assert_eq!(h.records[1].numbers[1].to_string(), "0007");
    }

    #[test]
    fn accepts_alternate_date_formats_and_sorts() {
        let data = "\
date,number
05/01/2025,1111
2025-01-02,2222
03-01-2025,3333
";
        let h = ingest(data);
        assert_eq!(h.records.len(), 3);
        assert_eq!(h.records[0].numbers[0].to_string(), "2222");
        assert_eq!(h.records[2].numbers[0].to_string(), "1111");
    }

    #[test]
    fn drops_bad_cells_and_dateless_rows() {
        let data = "\
Draw_Date,Number,Other
2025-01-01,12a4,5555
not-a-date,1234,5678
2025-01-03,,
";
        let h = ingest(data);
        assert_eq!(h.records.len(), 1);
        assert_eq!(h.numbers_kept, 1);
        assert_eq!(h.cells_dropped, 1);
        // One row has an invalid date, one has no usable numbers.
        assert_eq!(h.rows_dropped, 2);
    }

    #[test]
    fn rejects_missing_date_column() {
        let err = read_history("Number\n1234\n".as_bytes()).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn strips_bom_from_first_header() {
        let data = "\u{feff}Draw_Date,Number\n2025-01-01,1234\n";
        let h = ingest(data);
        assert_eq!(h.records.len(), 1);
    }

    #[test]
    fn empty_file_yields_empty_history_not_error() {
        let h = ingest("Draw_Date,Number\n");
        assert!(h.records.is_empty());
        assert_eq!(h.rows_read, 0);
    }
}
