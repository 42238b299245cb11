//! Missing-value analysis.
//!
//! Text columns count cells equal to the placeholder token; numeric columns
//! count nulls, and NaN or infinite floats. The two predicates stay separate because the data encodes
//! missingness differently per type.

use crate::config::DEFAULT_MISSING_TOKEN;
use crate::error::Result;
use crate::schema::{ColumnKind, declared_kind, validate_adult_frame};
use crate::utils::percentage;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Missing count for one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissingRecord {
    pub column: String,
    pub missing_count: usize,
    /// Share of all rows, 0 to 100.
    pub percentage: f64,
}

/// Columns with at least one missing value, most missing first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissingReport {
    pub records: Vec<MissingRecord>,
    pub total_rows: usize,
    /// Sum of missing cells over every column.
    pub total_missing: usize,
    /// Rows with at least one missing cell.
    pub rows_with_missing: usize,
}

impl MissingReport {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Report as a frame with the `Column, Missing_Count, Percentage` layout.
    pub fn to_dataframe(&self) -> Result<DataFrame> {
        let columns: Vec<&str> = self.records.iter().map(|r| r.column.as_str()).collect();
        let counts: Vec<u64> = self.records.iter().map(|r| r.missing_count as u64).collect();
        let percentages: Vec<f64> = self.records.iter().map(|r| r.percentage).collect();

        Ok(df![
            "Column" => columns,
            "Missing_Count" => counts,
            "Percentage" => percentages,
        ]?)
    }
}

/// Counts missing values per column of an Adult frame.
pub struct MissingValueAnalyzer;

impl MissingValueAnalyzer {
    /// Analyze with the default `"?"` token.
    pub fn analyze(df: &DataFrame) -> Result<MissingReport> {
        Self::analyze_with_token(df, DEFAULT_MISSING_TOKEN)
    }

    /// Analyze, counting `token` as missing in text columns.
    ///
    /// Fails with `InvalidInput` when the frame has no rows or does not have
    /// exactly the Adult columns.
    pub fn analyze_with_token(df: &DataFrame, token: &str) -> Result<MissingReport> {
        validate_adult_frame(df)?;
        let total_rows = df.height();

        let mut flagged = vec![false; total_rows];
        let mut counts = Vec::with_capacity(df.width());
        for column in df.get_columns() {
            let mask = Self::missing_mask(column, token)?;
            let count = mask.iter().filter(|m| **m).count();
            for (flag, missing) in flagged.iter_mut().zip(&mask) {
                *flag |= *missing;
            }
            debug!("Column '{}': {} missing", column.name(), count);
            counts.push((column.name().to_string(), count));
        }

        let total_missing = counts.iter().map(|(_, count)| count).sum();
        let rows_with_missing = flagged.into_iter().filter(|f| *f).count();

        let mut records: Vec<MissingRecord> = counts
            .into_iter()
            .filter(|(_, count)| *count > 0)
            .map(|(column, missing_count)| MissingRecord {
                column,
                missing_count,
                percentage: percentage(missing_count, total_rows),
            })
            .collect();
        // stable: ties keep column order
        records.sort_by(|a, b| b.missing_count.cmp(&a.missing_count));

        Ok(MissingReport {
            records,
            total_rows,
            total_missing,
            rows_with_missing,
        })
    }

    /// Number of rows with at least one missing cell.
    pub fn rows_with_missing(df: &DataFrame, token: &str) -> Result<usize> {
        Ok(Self::analyze_with_token(df, token)?.rows_with_missing)
    }

    /// One flag per row: the placeholder in text columns; null, NaN or an
    /// infinity in numeric columns.
    fn missing_mask(column: &Column, token: &str) -> Result<Vec<bool>> {
        match declared_kind(column.name(), column.dtype()) {
            ColumnKind::Numeric if matches!(column.dtype(), DataType::Float32 | DataType::Float64) => {
                let floats = column.as_materialized_series().cast(&DataType::Float64)?;
                Ok(floats
                    .f64()?
                    .into_iter()
                    .map(|value| value.is_none_or(|v| !v.is_finite()))
                    .collect())
            }
            ColumnKind::Numeric => Ok(column
                .as_materialized_series()
                .is_null()
                .into_iter()
                .map(|value| value.unwrap_or(true))
                .collect()),
            ColumnKind::Text if column.dtype() == &DataType::String => Ok(column
                .str()?
                .into_iter()
                .map(|value| value == Some(token))
                .collect()),
            ColumnKind::Text => Ok(vec![false; column.len()]),
        }
    }
}
