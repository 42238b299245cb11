//! Outlier detection with Tukey's fences.
//!
//! Quartiles use linear interpolation between closest ranks, computed over
//! the non-null, finite values of each declared-numeric column. Percentages
//! are taken over all rows, nulls included.

use crate::config::DEFAULT_IQR_MULTIPLIER;
use crate::error::{AnalysisError, Result};
use crate::schema::{ColumnKind, declared_kind};
use crate::utils::{numeric_values, percentage, quantile_sorted, sorted_finite};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Fences and outlier count for one numeric column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutlierRecord {
    pub column: String,
    pub q1: f64,
    pub q3: f64,
    pub iqr: f64,
    pub lower_bound: f64,
    pub upper_bound: f64,
    pub outlier_count: usize,
    pub outlier_percentage: f64,
}

/// One record per numeric column, in column order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutlierReport {
    pub records: Vec<OutlierRecord>,
    pub total_rows: usize,
    pub total_outliers: usize,
}

impl OutlierReport {
    /// Look up the record of a column.
    pub fn get(&self, column: &str) -> Option<&OutlierRecord> {
        self.records.iter().find(|r| r.column == column)
    }

    /// Report as a frame with the
    /// `Column, Q1, Q3, IQR, Lower_Bound, Upper_Bound, Outlier_Count, Outlier_Percentage`
    /// layout.
    pub fn to_dataframe(&self) -> Result<DataFrame> {
        let pick = |f: fn(&OutlierRecord) -> f64| -> Vec<f64> { self.records.iter().map(f).collect() };
        let columns: Vec<&str> = self.records.iter().map(|r| r.column.as_str()).collect();
        let counts: Vec<u64> = self.records.iter().map(|r| r.outlier_count as u64).collect();

        Ok(df![
            "Column" => columns,
            "Q1" => pick(|r| r.q1),
            "Q3" => pick(|r| r.q3),
            "IQR" => pick(|r| r.iqr),
            "Lower_Bound" => pick(|r| r.lower_bound),
            "Upper_Bound" => pick(|r| r.upper_bound),
            "Outlier_Count" => counts,
            "Outlier_Percentage" => pick(|r| r.outlier_percentage),
        ]?)
    }
}

/// Detects outliers in every declared-numeric column.
pub struct OutlierAnalyzer;

impl OutlierAnalyzer {
    /// Analyze with the standard 1.5 multiplier.
    pub fn analyze(df: &DataFrame) -> Result<OutlierReport> {
        Self::analyze_with_multiplier(df, DEFAULT_IQR_MULTIPLIER)
    }

    /// Analyze with fences at `Q1 - k*IQR` and `Q3 + k*IQR`.
    ///
    /// Fails with `InvalidInput` when the frame has no numeric columns and
    /// with `Computation` when a numeric column holds non-numeric text.
    pub fn analyze_with_multiplier(df: &DataFrame, multiplier: f64) -> Result<OutlierReport> {
        let numeric: Vec<&str> = df
            .get_columns()
            .iter()
            .filter(|c| declared_kind(c.name(), c.dtype()) == ColumnKind::Numeric)
            .map(|c| c.name().as_str())
            .collect();

        if numeric.is_empty() {
            return Err(AnalysisError::InvalidInput(
                "dataset has no numeric columns".to_string(),
            ));
        }

        let total_rows = df.height();
        let mut records = Vec::with_capacity(numeric.len());
        for name in numeric {
            let values = numeric_values(df, name)?;
            let record = Self::fences(name, &values, multiplier, total_rows);
            debug!(
                "Column '{}': bounds [{}, {}], {} outliers",
                name, record.lower_bound, record.upper_bound, record.outlier_count
            );
            records.push(record);
        }

        let total_outliers = records.iter().map(|r| r.outlier_count).sum();
        Ok(OutlierReport {
            records,
            total_rows,
            total_outliers,
        })
    }

    /// Compute the fences for one column; nulls are ignored.
    pub fn fences(
        name: &str,
        values: &[Option<f64>],
        multiplier: f64,
        total_rows: usize,
    ) -> OutlierRecord {
        let sorted = sorted_finite(values.iter().flatten().copied());
        let q1 = quantile_sorted(&sorted, 0.25);
        let q3 = quantile_sorted(&sorted, 0.75);
        let iqr = q3 - q1;
        let lower_bound = q1 - multiplier * iqr;
        let upper_bound = q3 + multiplier * iqr;

        let outlier_count = sorted
            .iter()
            .filter(|&&v| v < lower_bound || v > upper_bound)
            .count();

        OutlierRecord {
            column: name.to_string(),
            q1,
            q3,
            iqr,
            lower_bound,
            upper_bound,
            outlier_count,
            outlier_percentage: percentage(outlier_count, total_rows),
        }
    }
}
