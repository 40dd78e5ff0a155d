//! CSV decoding through polars
//!
//! Every column is read as text so the cleaning pipeline decides types.
//! Input that is not valid UTF-8 is decoded as Latin-1 and read again.

use crate::constants::MISSING_TOKENS;
use crate::error::{InsightError, Result};
use crate::models::{Column, ColumnValues, Dataset};
use polars::prelude::{CsvParseOptions, CsvReadOptions, DataFrame, DataType, SerReader};
use std::borrow::Cow;
use std::io::Cursor;
use tracing::{debug, warn};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// True for raw tokens that stand for a missing cell
pub fn is_missing_token(raw: &str) -> bool {
    MISSING_TOKENS.contains(&raw.trim())
}

/// Decode as UTF-8, falling back to Latin-1; the flag reports the fallback
pub fn decode_text(bytes: &[u8]) -> (Cow<'_, str>, bool) {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    match std::str::from_utf8(bytes) {
        Ok(text) => (Cow::Borrowed(text), false),
        // Latin-1 maps every byte to the code point of the same value
        Err(_) => (Cow::Owned(bytes.iter().map(|&b| char::from(b)).collect()), true),
    }
}

/// Read CSV bytes into an all-text dataset
pub fn read_csv(bytes: &[u8], filename: &str) -> Result<Dataset> {
    let (text, fell_back) = decode_text(bytes);
    if fell_back {
        warn!("'{}' is not valid UTF-8, decoding as Latin-1", filename);
    }

    // Labels are taken from the first record here rather than by polars,
    // which would rename repeated labels before the normalizer sees them
    let df = CsvReadOptions::default()
        .with_has_header(false)
        .with_infer_schema_length(Some(0))
        .with_parse_options(CsvParseOptions::default().with_quote_char(Some(b'"')))
        .into_reader_with_file_handle(Cursor::new(text.into_owned().into_bytes()))
        .finish()
        .map_err(|e| InsightError::file_read(filename, e.to_string()))?;

    debug!(
        "Read '{}': {} records x {} columns",
        filename,
        df.height(),
        df.width()
    );

    dataframe_to_dataset(&df)
}

/// Convert a headerless frame into text columns
///
/// The first record supplies the labels verbatim; the remaining records
/// become cells, with missing tokens mapped to `None`.
pub fn dataframe_to_dataset(df: &DataFrame) -> Result<Dataset> {
    let mut columns = Vec::with_capacity(df.width());

    for frame_column in df.get_columns() {
        let series = frame_column
            .as_materialized_series()
            .cast(&DataType::String)?;
        let mut records = series.str()?.into_iter();

        let label = records.next().flatten().unwrap_or_default().to_string();
        let cells = records
            .map(|cell| cell.filter(|raw| !is_missing_token(raw)).map(str::to_string))
            .collect();

        columns.push(Column::new(label, ColumnValues::Text(cells)));
    }

    Dataset::new(columns)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_utf8_passthrough() {
        let (text, fell_back) = decode_text("tanggal,pendapatan\n".as_bytes());
        assert_eq!(text, "tanggal,pendapatan\n");
        assert!(!fell_back);
    }

    #[test]
    fn test_decode_latin1_fallback() {
        // "café" with é encoded as a single Latin-1 byte
        let (text, fell_back) = decode_text(b"caf\xE9");
        assert_eq!(text, "café");
        assert!(fell_back);
    }

    #[test]
    fn test_bom_is_stripped() {
        let (text, _) = decode_text(b"\xEF\xBB\xBFa,b");
        assert_eq!(text, "a,b");
    }

    #[test]
    fn test_missing_tokens() {
        assert!(is_missing_token(""));
        assert!(is_missing_token(" NA "));
        assert!(is_missing_token("#N/A"));
        assert!(!is_missing_token("-"));
        assert!(!is_missing_token("0"));
    }

    #[test]
    fn test_read_csv_all_text() {
        let csv = b"Date,Revenue,Region\n2024-01-05,\"$1,200\",North\n2024-02-05,NA,\n";
        let dataset = read_csv(csv, "sales.csv").unwrap();

        assert_eq!(dataset.column_names(), vec!["Date", "Revenue", "Region"]);
        assert_eq!(dataset.height(), 2);
        assert_eq!(
            dataset.column("Revenue").unwrap().values,
            ColumnValues::Text(vec![Some("$1,200".to_string()), None])
        );
        assert_eq!(dataset.column("Region").unwrap().values.missing_count(), 1);
    }

    #[test]
    fn test_read_latin1_csv() {
        let csv = b"kota,nilai\nMontr\xE9al,10\n";
        let dataset = read_csv(csv, "legacy.csv").unwrap();
        assert_eq!(
            dataset.column("kota").unwrap().values,
            ColumnValues::Text(vec![Some("Montréal".to_string())])
        );
    }

    #[test]
    fn test_repeated_labels_are_kept_verbatim() {
        let dataset = read_csv(b"Revenue,Revenue,revenue
1,2,3
", "dupes.csv").unwrap();
        assert_eq!(
            dataset.column_names(),
            vec!["Revenue", "Revenue", "revenue"]
        );
        assert_eq!(
            dataset.columns()[1].values,
            ColumnValues::Text(vec![Some("2".to_string())])
        );
    }

    #[test]
    fn test_header_only_csv_has_no_rows() {
        let dataset = read_csv(b"date,revenue
", "empty.csv").unwrap();
        assert_eq!(dataset.column_names(), vec!["date", "revenue"]);
        assert_eq!(dataset.height(), 0);
    }
}
