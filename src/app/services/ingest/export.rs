//! Cleaned dataset export
//!
//! Typed columns are converted back into a polars frame so the CSV writer
//! keeps numbers as numbers and renders timestamps in one fixed layout.

use crate::error::{InsightError, Result};
use crate::models::{ColumnValues, Dataset};
use polars::prelude::{
    Column as PolarsColumn, CsvWriter, DataFrame, DataType, NamedFrom, SerWriter, Series,
    TimeUnit,
};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use tracing::info;

const EXPORT_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

fn to_series(name: &str, values: &ColumnValues) -> Result<Series> {
    let series = match values {
        ColumnValues::Text(cells) => Series::new(name.into(), cells.as_slice()),
        ColumnValues::Number(cells) => Series::new(name.into(), cells.as_slice()),
        ColumnValues::Timestamp(cells) => {
            let millis: Vec<Option<i64>> = cells
                .iter()
                .map(|cell| cell.map(|ts| ts.and_utc().timestamp_millis()))
                .collect();
            Series::new(name.into(), millis)
                .cast(&DataType::Datetime(TimeUnit::Milliseconds, None))?
        }
    };
    Ok(series)
}

/// Build a polars frame with one typed column per dataset column
pub fn to_dataframe(dataset: &Dataset) -> Result<DataFrame> {
    let columns = dataset
        .columns()
        .iter()
        .map(|column| to_series(&column.name, &column.values).map(PolarsColumn::from))
        .collect::<Result<Vec<_>>>()?;

    Ok(DataFrame::new(columns)?)
}

/// Serialize the dataset as CSV with a header row
pub fn to_csv_bytes(dataset: &Dataset) -> Result<Vec<u8>> {
    let mut df = to_dataframe(dataset)?;
    let mut buffer = Vec::new();

    CsvWriter::new(&mut buffer)
        .include_header(true)
        .with_datetime_format(Some(EXPORT_DATETIME_FORMAT.to_string()))
        .finish(&mut df)?;

    Ok(buffer)
}

/// Write the dataset to a CSV file
pub fn write_csv(dataset: &Dataset, path: &Path) -> Result<()> {
    let export_error = |reason: String| InsightError::Export {
        path: path.to_path_buf(),
        reason,
    };

    let mut df = to_dataframe(dataset)?;
    let file = File::create(path).map_err(|e| export_error(e.to_string()))?;
    let mut writer = BufWriter::new(file);

    CsvWriter::new(&mut writer)
        .include_header(true)
        .with_datetime_format(Some(EXPORT_DATETIME_FORMAT.to_string()))
        .finish(&mut df)
        .map_err(|e| export_error(e.to_string()))?;

    info!(
        "Exported {} rows x {} columns to {}",
        dataset.height(),
        dataset.width(),
        path.display()
    );
    Ok(())
}
