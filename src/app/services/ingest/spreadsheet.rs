//! Spreadsheet decoding through calamine
//!
//! Only the first worksheet is read. Its first row supplies the labels and
//! every cell is rendered as text, so spreadsheets enter the cleaning
//! pipeline exactly like CSV files.

use super::csv_reader::is_missing_token;
use crate::error::{InsightError, Result};
use crate::models::{Column, ColumnValues, Dataset};
use calamine::{Data, Range, Reader, open_workbook_auto_from_rs};
use std::io::Cursor;
use tracing::debug;

/// Text rendering of one spreadsheet cell; `None` for empty and error cells
pub fn cell_text(cell: &Data) -> Option<String> {
    let text = match cell {
        Data::Empty | Data::Error(_) => return None,
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::Float(f) => f.to_string(),
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(ts) => ts.format("%Y-%m-%d %H:%M:%S").to_string(),
            None => dt.as_f64().to_string(),
        },
    };

    if is_missing_token(&text) {
        None
    } else {
        Some(text)
    }
}

/// Convert a worksheet range into text columns using its first row as labels
pub fn range_to_dataset(range: &Range<Data>) -> Result<Dataset> {
    let mut rows = range.rows();
    let Some(header) = rows.next() else {
        return Ok(Dataset::default());
    };

    let labels: Vec<String> = header
        .iter()
        .map(|cell| cell_text(cell).unwrap_or_default())
        .collect();
    let mut cells: Vec<Vec<Option<String>>> = vec![Vec::new(); labels.len()];

    for row in rows {
        for (index, column) in cells.iter_mut().enumerate() {
            column.push(row.get(index).and_then(cell_text));
        }
    }

    let columns = labels
        .into_iter()
        .zip(cells)
        .map(|(label, values)| Column::new(label, ColumnValues::Text(values)))
        .collect();

    Dataset::new(columns)
}

/// Read the first worksheet of an XLSX/XLS/ODS workbook
pub fn read_spreadsheet(bytes: &[u8], filename: &str) -> Result<Dataset> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))
        .map_err(|e| InsightError::spreadsheet(filename, e.to_string()))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| InsightError::spreadsheet(filename, "workbook has no worksheets"))?
        .map_err(|e| InsightError::spreadsheet(filename, e.to_string()))?;

    debug!(
        "Read first worksheet of '{}': {} rows x {} columns",
        filename,
        range.height(),
        range.width()
    );

    range_to_dataset(&range)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_text() {
        assert_eq!(cell_text(&Data::Empty), None);
        assert_eq!(cell_text(&Data::Float(1200.5)), Some("1200.5".to_string()));
        assert_eq!(cell_text(&Data::Int(7)), Some("7".to_string()));
        assert_eq!(cell_text(&Data::String("N/A".to_string())), None);
        assert_eq!(
            cell_text(&Data::String("North".to_string())),
            Some("North".to_string())
        );
    }

    #[test]
    fn test_range_to_dataset() {
        let mut range: Range<Data> = Range::new((0, 0), (2, 1));
        range.set_value((0, 0), Data::String("Date".to_string()));
        range.set_value((0, 1), Data::String("Revenue".to_string()));
        range.set_value((1, 0), Data::String("2024-01-05".to_string()));
        range.set_value((1, 1), Data::Float(1200.0));
        range.set_value((2, 0), Data::String("2024-02-05".to_string()));

        let dataset = range_to_dataset(&range).unwrap();

        assert_eq!(dataset.column_names(), vec!["Date", "Revenue"]);
        assert_eq!(
            dataset.column("Revenue").unwrap().values,
            ColumnValues::Text(vec![Some("1200".to_string()), None])
        );
    }

    #[test]
    fn test_invalid_workbook_is_spreadsheet_error() {
        let err = read_spreadsheet(b"not a workbook", "broken.xlsx").unwrap_err();
        assert!(matches!(err, InsightError::Spreadsheet { .. }));
    }
}
