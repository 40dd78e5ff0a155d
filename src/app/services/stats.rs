//! Numeric summaries backed by polars chunked arrays
//!
//! Median and quartiles use linear interpolation between closest ranks.
//! Standard deviation is the sample estimate (ddof = 1).

use crate::error::Result;
use polars::prelude::*;

fn to_chunked(values: &[f64]) -> Float64Chunked {
    Float64Chunked::from_slice("values".into(), values)
}

/// Median of the values, `None` when empty
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    to_chunked(values).median()
}

/// First and third quartiles, `None` when empty
pub fn quartiles(values: &[f64]) -> Result<Option<(f64, f64)>> {
    if values.is_empty() {
        return Ok(None);
    }
    let ca = to_chunked(values);
    let q1 = ca.quantile(0.25, QuantileMethod::Linear)?;
    let q3 = ca.quantile(0.75, QuantileMethod::Linear)?;
    Ok(q1.zip(q3))
}

/// Arithmetic mean, `None` when empty
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    to_chunked(values).mean()
}

/// Sample standard deviation, `None` with fewer than two values
pub fn sample_std(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    to_chunked(values).std(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_median_odd_and_even() {
        assert_eq!(median(&[1200.0, 1500.0, 2000.0]), Some(1500.0));
        assert_eq!(median(&[1.0, 2.0, 3.0, 4.0]), Some(2.5));
        assert_eq!(median(&[]), None);
    }

    #[test]
    fn test_quartiles_linear_interpolation() {
        let values: Vec<f64> = (1..=10).map(f64::from).collect();
        let (q1, q3) = quartiles(&values).unwrap().unwrap();
        assert!(approx(q1, 3.25));
        assert!(approx(q3, 7.75));
    }

    #[test]
    fn test_sample_std() {
        let std = sample_std(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
        assert!(approx(std, 2.138089935299395));
        assert_eq!(sample_std(&[1.0]), None);
    }

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[100.0, 50.0]), Some(75.0));
        assert_eq!(mean(&[]), None);
    }
}
