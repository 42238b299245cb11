//! Shared numeric helpers for the analyses.

use crate::error::{AnalysisError, Result};
use polars::prelude::*;

// =============================================================================
// Data Type Utilities
// =============================================================================

/// Check if a DataType is numeric (integer or float).
#[inline]
pub fn is_numeric_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float32
            | DataType::Float64
    )
}

/// Read a declared-numeric column as `f64` values, keeping nulls as `None`.
///
/// NaN and infinite values are missing too and come back as `None`.
/// Numeric dtypes are cast directly. Text columns are parsed value by value;
/// blank cells count as null and anything else that does not parse is a
/// [`AnalysisError::Computation`].
pub fn numeric_values(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>> {
    let column = df
        .column(name)
        .map_err(|_| AnalysisError::ColumnNotFound(name.to_string()))?;
    let series = column.as_materialized_series();

    if is_numeric_dtype(series.dtype()) {
        let float_series = series.cast(&DataType::Float64)?;
        return Ok(float_series
            .f64()?
            .into_iter()
            .map(|value| value.filter(|v| v.is_finite()))
            .collect());
    }

    match series.dtype() {
        DataType::String => series
            .str()?
            .into_iter()
            .map(|value| match value.map(str::trim) {
                None | Some("") => Ok(None),
                Some(text) => text.parse::<f64>().map(|v| v.is_finite().then_some(v)).map_err(|_| {
                    AnalysisError::computation(
                        name,
                        format!("value '{}' is not numeric", text),
                    )
                }),
            })
            .collect(),
        DataType::Null => Ok(vec![None; series.len()]),
        other => Err(AnalysisError::computation(
            name,
            format!("dtype {} cannot be read as numbers", other),
        )),
    }
}

// =============================================================================
// Series Statistics Utilities
// =============================================================================

/// `part / total * 100`, defined as 0 when `total` is 0.
#[inline]
pub fn percentage(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64 * 100.0
    }
}

/// Sort values ascending, dropping NaN and infinities.
pub fn sorted_finite(values: impl IntoIterator<Item = f64>) -> Vec<f64> {
    let mut sorted: Vec<f64> = values.into_iter().filter(|v| v.is_finite()).collect();
    sorted.sort_by(f64::total_cmp);
    sorted
}

/// Quantile of already-sorted data, interpolating linearly between the two
/// closest ranks at position `(n - 1) * q`.
///
/// Returns NaN for empty input.
pub fn quantile_sorted(sorted: &[f64], q: f64) -> f64 {
    match sorted.len() {
        0 => f64::NAN,
        1 => sorted[0],
        n => {
            let position = (n - 1) as f64 * q.clamp(0.0, 1.0);
            let lower = position.floor() as usize;
            let upper = position.ceil() as usize;
            let fraction = position - lower as f64;
            sorted[lower] + (sorted[upper] - sorted[lower]) * fraction
        }
    }
}

/// Arithmetic mean, NaN for empty input.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation (n - 1 denominator), NaN below two values.
pub fn sample_std(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 2 {
        return f64::NAN;
    }
    let mean = mean(values);
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
    variance.sqrt()
}

/// Pearson correlation of paired samples.
///
/// NaN when fewer than two pairs exist or either side is constant.
pub fn pearson(xs: &[f64], ys: &[f64]) -> f64 {
    let n = xs.len().min(ys.len());
    if n < 2 {
        return f64::NAN;
    }
    let (xs, ys) = (&xs[..n], &ys[..n]);
    let mean_x = mean(xs);
    let mean_y = mean(ys);

    let mut covariance = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (x, y) in xs.iter().zip(ys) {
        let dx = x - mean_x;
        let dy = y - mean_y;
        covariance += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x == 0.0 || var_y == 0.0 {
        return f64::NAN;
    }
    covariance / (var_x.sqrt() * var_y.sqrt())
}

/// Round to two decimal places, as the console tables show values.
#[inline]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_numeric_dtype() {
        assert!(is_numeric_dtype(&DataType::Int64));
        assert!(is_numeric_dtype(&DataType::Float64));
        assert!(!is_numeric_dtype(&DataType::String));
        assert!(!is_numeric_dtype(&DataType::Boolean));
    }

    #[test]
    fn test_quantile_interpolates() {
        let sorted = [20.0, 40.0, 40.0, 100.0];
        assert_eq!(quantile_sorted(&sorted, 0.25), 35.0);
        assert_eq!(quantile_sorted(&sorted, 0.5), 40.0);
        assert_eq!(quantile_sorted(&sorted, 0.75), 55.0);
        assert_eq!(quantile_sorted(&sorted, 0.0), 20.0);
        assert_eq!(quantile_sorted(&sorted, 1.0), 100.0);
    }

    #[test]
    fn test_quantile_edge_cases() {
        assert!(quantile_sorted(&[], 0.5).is_nan());
        assert_eq!(quantile_sorted(&[7.0], 0.25), 7.0);
    }

    #[test]
    fn test_sample_std() {
        // Mean = 3, Variance = 10 / 4 = 2.5
        let std = sample_std(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        assert!((std - 2.5f64.sqrt()).abs() < 1e-12);
        assert!(sample_std(&[5.0]).is_nan());
    }

    #[test]
    fn test_pearson() {
        let xs = [1.0, 2.0, 3.0, 4.0];
        assert!((pearson(&xs, &[2.0, 4.0, 6.0, 8.0]) - 1.0).abs() < 1e-12);
        assert!((pearson(&xs, &[8.0, 6.0, 4.0, 2.0]) + 1.0).abs() < 1e-12);
        assert!(pearson(&xs, &[1.0, 1.0, 1.0, 1.0]).is_nan());
    }

    #[test]
    fn test_percentage_zero_total() {
        assert_eq!(percentage(3, 0), 0.0);
        assert_eq!(percentage(1, 4), 25.0);
    }

    #[test]
    fn test_numeric_values_from_text() {
        let df = df!["age" => [Some("39"), Some(" 50"), Some(""), None]].unwrap();
        let values = numeric_values(&df, "age").unwrap();
        assert_eq!(values, vec![Some(39.0), Some(50.0), None, None]);
    }

    #[test]
    fn test_numeric_values_non_finite_is_none() {
        let text = df!["age" => ["nan", "inf", "-Infinity", "30"]].unwrap();
        assert_eq!(
            numeric_values(&text, "age").unwrap(),
            vec![None, None, None, Some(30.0)]
        );

        let floats = df!["age" => [f64::NAN, f64::NEG_INFINITY, 30.0]].unwrap();
        assert_eq!(numeric_values(&floats, "age").unwrap(), vec![None, None, Some(30.0)]);
    }

    #[test]
    fn test_sorted_finite_drops_infinities() {
        let sorted = sorted_finite([f64::INFINITY, 3.0, f64::NAN, 1.0, f64::NEG_INFINITY]);
        assert_eq!(sorted, vec![1.0, 3.0]);
    }

    #[test]
    fn test_numeric_values_rejects_text() {
        let df = df!["age" => ["39", "?"]].unwrap();
        let err = numeric_values(&df, "age").unwrap_err();
        assert!(matches!(err, AnalysisError::Computation { .. }));
    }

    #[test]
    fn test_numeric_values_missing_column() {
        let df = df!["age" => [1i64]].unwrap();
        assert!(matches!(
            numeric_values(&df, "fnlwgt"),
            Err(AnalysisError::ColumnNotFound(_))
        ));
    }
}
