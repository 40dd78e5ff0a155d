//! File ingestion and export
//!
//! Uploaded bytes are dispatched on the filename extension to the CSV or
//! spreadsheet reader. Both produce an all-text [`Dataset`] with missing
//! tokens already mapped to missing cells.

pub mod csv_reader;
pub mod export;
pub mod spreadsheet;

pub use csv_reader::{decode_text, is_missing_token, read_csv};
pub use export::{to_csv_bytes, to_dataframe, write_csv};
pub use spreadsheet::read_spreadsheet;

use crate::error::{InsightError, Result};
use crate::models::Dataset;
use std::path::Path;
use tracing::info;

/// Supported upload formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Csv,
    Spreadsheet,
}

impl FileFormat {
    /// Detect the format from the filename extension (case-insensitive)
    pub fn from_filename(filename: &str) -> Result<Self> {
        let extension = Path::new(filename)
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        match extension.as_str() {
            "csv" => Ok(FileFormat::Csv),
            "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => Ok(FileFormat::Spreadsheet),
            _ => Err(InsightError::unsupported_format(filename, extension)),
        }
    }
}

/// Parse uploaded bytes into an all-text dataset
pub fn parse(bytes: &[u8], filename: &str) -> Result<Dataset> {
    match FileFormat::from_filename(filename)? {
        FileFormat::Csv => read_csv(bytes, filename),
        FileFormat::Spreadsheet => read_spreadsheet(bytes, filename),
    }
}

/// Read and parse a file from disk, returning the dataset and the file size in bytes
pub fn read_path(path: &Path) -> Result<(Dataset, usize)> {
    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    // Reject unknown extensions before touching the file
    FileFormat::from_filename(&filename)?;

    let bytes = std::fs::read(path).map_err(|e| InsightError::file_read(&filename, e.to_string()))?;
    let dataset = parse(&bytes, &filename)?;

    info!(
        "Loaded '{}': {} rows x {} columns ({} bytes)",
        filename,
        dataset.height(),
        dataset.width(),
        bytes.len()
    );

    Ok((dataset, bytes.len()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_format_detection() {
        assert_eq!(FileFormat::from_filename("sales.csv").unwrap(), FileFormat::Csv);
        assert_eq!(FileFormat::from_filename("SALES.CSV").unwrap(), FileFormat::Csv);
        assert_eq!(
            FileFormat::from_filename("report.xlsx").unwrap(),
            FileFormat::Spreadsheet
        );
        assert_eq!(
            FileFormat::from_filename("legacy.xls").unwrap(),
            FileFormat::Spreadsheet
        );
    }

    #[test]
    fn test_unsupported_extension() {
        let err = FileFormat::from_filename("notes.txt").unwrap_err();
        assert!(matches!(
            err,
            InsightError::UnsupportedFormat { ref extension, .. } if extension == "txt"
        ));
        assert!(FileFormat::from_filename("no_extension").is_err());
    }

    #[test]
    fn test_parse_dispatches_csv() {
        let dataset = parse(b"a,b\n1,2\n", "tiny.csv").unwrap();
        assert_eq!(dataset.column_names(), vec!["a", "b"]);
        assert_eq!(dataset.height(), 1);
    }

    #[test]
    fn test_read_path_reports_size() {
        let mut file = NamedTempFile::with_suffix(".csv").unwrap();
        write!(file, "date,revenue\n2024-01-01,100\n").unwrap();

        let (dataset, size) = read_path(file.path()).unwrap();
        assert_eq!(dataset.height(), 1);
        assert_eq!(size, 28);
    }
}
