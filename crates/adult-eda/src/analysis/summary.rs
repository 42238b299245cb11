//! Descriptive statistics per numeric column.

use crate::error::{AnalysisError, Result};
use crate::schema::{ColumnKind, declared_kind};
use crate::utils::{mean, numeric_values, quantile_sorted, sample_std, sorted_finite};
use polars::prelude::*;
use serde::{Deserialize, Serialize};

/// count / mean / std / min / quartiles / max for one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnStatistics {
    pub column: String,
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub q25: f64,
    pub median: f64,
    pub q75: f64,
    pub max: f64,
}

impl ColumnStatistics {
    /// Describe the non-null values of one column.
    pub fn from_values(column: &str, values: &[Option<f64>]) -> Self {
        let sorted = sorted_finite(values.iter().flatten().copied());
        Self {
            column: column.to_string(),
            count: sorted.len(),
            mean: mean(&sorted),
            std: sample_std(&sorted),
            min: sorted.first().copied().unwrap_or(f64::NAN),
            q25: quantile_sorted(&sorted, 0.25),
            median: quantile_sorted(&sorted, 0.5),
            q75: quantile_sorted(&sorted, 0.75),
            max: sorted.last().copied().unwrap_or(f64::NAN),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatisticalSummary {
    pub columns: Vec<ColumnStatistics>,
}

impl StatisticalSummary {
    /// Summarize every declared-numeric column.
    pub fn compute(df: &DataFrame) -> Result<Self> {
        let mut columns = Vec::new();
        for column in df.get_columns() {
            if declared_kind(column.name(), column.dtype()) != ColumnKind::Numeric {
                continue;
            }
            let values = numeric_values(df, column.name())?;
            columns.push(ColumnStatistics::from_values(column.name(), &values));
        }

        if columns.is_empty() {
            return Err(AnalysisError::InvalidInput(
                "dataset has no numeric columns".to_string(),
            ));
        }
        Ok(Self { columns })
    }

    pub fn get(&self, column: &str) -> Option<&ColumnStatistics> {
        self.columns.iter().find(|c| c.column == column)
    }

    /// One row per column, `describe()`-style headers.
    pub fn to_dataframe(&self) -> Result<DataFrame> {
        let pick = |f: fn(&ColumnStatistics) -> f64| -> Vec<f64> { self.columns.iter().map(f).collect() };
        let names: Vec<&str> = self.columns.iter().map(|c| c.column.as_str()).collect();
        let counts: Vec<u64> = self.columns.iter().map(|c| c.count as u64).collect();

        Ok(df![
            "Column" => names,
            "count" => counts,
            "mean" => pick(|c| c.mean),
            "std" => pick(|c| c.std),
            "min" => pick(|c| c.min),
            "25%" => pick(|c| c.q25),
            "50%" => pick(|c| c.median),
            "75%" => pick(|c| c.q75),
            "max" => pick(|c| c.max),
        ]?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_numeric_columns_only() {
        let df = df![
            "age" => [Some(20i64), Some(30), None, Some(40), Some(50)],
            "sex" => ["Male", "Female", "Male", "Male", "Female"],
        ]
        .unwrap();

        let summary = StatisticalSummary::compute(&df).unwrap();
        assert_eq!(summary.columns.len(), 1);

        let age = summary.get("age").unwrap();
        assert_eq!(age.count, 4);
        assert_eq!(age.mean, 35.0);
        assert_eq!(age.min, 20.0);
        assert_eq!(age.q25, 27.5);
        assert_eq!(age.median, 35.0);
        assert_eq!(age.q75, 42.5);
        assert_eq!(age.max, 50.0);
        // sqrt(500 / 3)
        assert!((age.std - (500.0f64 / 3.0).sqrt()).abs() < 1e-9);
    }

    #[test]
    fn test_single_value_std_is_nan() {
        let stats = ColumnStatistics::from_values("age", &[Some(7.0)]);
        assert_eq!(stats.count, 1);
        assert!(stats.std.is_nan());
        assert_eq!(stats.median, 7.0);
    }

    #[test]
    fn test_no_numeric_columns() {
        let df = df!["income" => ["<=50K"]].unwrap();
        assert!(StatisticalSummary::compute(&df).is_err());
    }

    #[test]
    fn test_to_dataframe() {
        let df = df!["age" => [1i64, 2, 3], "fnlwgt" => [10i64, 20, 30]].unwrap();
        let frame = StatisticalSummary::compute(&df).unwrap().to_dataframe().unwrap();
        assert_eq!(frame.shape(), (2, 9));
    }
}
