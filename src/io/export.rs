//! Export run results to text and JSON files.
//!
//! Exports are meant to be easy to consume in spreadsheets or downstream
//! scripts; the text export is the exact report shown on the terminal.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::error::AppError;

/// Write the formatted report text to a file.
pub fn write_report(path: &Path, report: &str) -> Result<(), AppError> {
    let mut file = File::create(path).map_err(|e| {
        AppError::new(2, format!("Failed to create report '{}': {e}", path.display()))
    })?;
    file.write_all(report.as_bytes())
        .map_err(|e| AppError::new(2, format!("Failed to write report '{}': {e}", path.display())))
}

/// Write any serializable run output as pretty-printed JSON.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), AppError> {
    let file = File::create(path).map_err(|e| {
        AppError::new(2, format!("Failed to create JSON export '{}': {e}", path.display()))
    })?;
    serde_json::to_writer_pretty(file, value)
        .map_err(|e| AppError::new(4, format!("Failed to serialize JSON export: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn report_round_trips_through_disk() {
        let dir = std::env::temp_dir().join("fourcast-export-test");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("report.txt");

        write_report(&path, "hello\nworld\n").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "hello\nworld\n");
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn json_export_is_valid_json() {
        #[derive(Serialize)]
        struct Sample {
            name: &'static str,
            count: u32,
        }

        let dir = std::env::temp_dir().join("fourcast-export-test");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("out.json");

        write_json(&path, &Sample { name: "x", count: 3 }).unwrap();
        let parsed: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(parsed["count"], 3);
        fs::remove_file(&path).unwrap();
    }
}
