//! Dataset overview: shape, columns, dtypes and the first rows.

use crate::error::Result;
use chrono::Local;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnOverview {
    /// 1-based position in the file.
    pub position: usize,
    pub name: String,
    pub dtype: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetOverview {
    pub generated_at: String,
    pub rows: usize,
    pub columns: Vec<ColumnOverview>,
    /// First rows rendered as a table.
    pub preview: String,
}

impl DatasetOverview {
    pub fn compute(df: &DataFrame, preview_rows: usize) -> Result<Self> {
        let columns = df
            .get_columns()
            .iter()
            .enumerate()
            .map(|(i, column)| ColumnOverview {
                position: i + 1,
                name: column.name().to_string(),
                dtype: column.dtype().to_string(),
            })
            .collect();

        Ok(Self {
            generated_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            rows: df.height(),
            columns,
            preview: format!("{}", df.head(Some(preview_rows))),
        })
    }
}

/// Plain-text report in the `exploration_summary.txt` layout.
impl fmt::Display for DatasetOverview {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "=".repeat(80);
        let thin = "-".repeat(80);

        writeln!(f, "{}", rule)?;
        writeln!(f, "ADULT DATASET - EXPLORATION SUMMARY")?;
        writeln!(f, "{}\n", rule)?;
        writeln!(f, "Generated: {}\n", self.generated_at)?;

        writeln!(f, "DATASET OVERVIEW")?;
        writeln!(f, "{}", thin)?;
        writeln!(f, "Total Records: {}", self.rows)?;
        writeln!(f, "Total Features: {}", self.columns.len())?;
        writeln!(f, "Dataset Shape: ({}, {})\n", self.rows, self.columns.len())?;

        writeln!(f, "COLUMN NAMES")?;
        writeln!(f, "{}", thin)?;
        for column in &self.columns {
            writeln!(f, "{:2}. {}", column.position, column.name)?;
        }

        writeln!(f, "\n\nFIRST ROWS")?;
        writeln!(f, "{}", thin)?;
        writeln!(f, "{}", self.preview)?;

        writeln!(f, "\n\nDATA TYPES")?;
        writeln!(f, "{}", thin)?;
        for column in &self.columns {
            writeln!(f, "{:<20} {}", column.name, column.dtype)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overview_lists_columns() {
        let df = df![
            "age" => [39i64, 50, 38],
            "workclass" => ["State-gov", "Self-emp-not-inc", "Private"],
        ]
        .unwrap();

        let overview = DatasetOverview::compute(&df, 2).unwrap();
        assert_eq!(overview.rows, 3);
        assert_eq!(overview.columns[1].position, 2);
        assert_eq!(overview.columns[1].name, "workclass");
        assert_eq!(overview.columns[0].dtype, "i64");

        let text = overview.to_string();
        assert!(text.contains("Total Records: 3"));
        assert!(text.contains(" 1. age"));
        assert!(text.contains("State-gov"));
        assert!(text.contains("DATA TYPES"));
        assert!(text.contains(&format!("{:<20} str", "workclass")));
        // only two preview rows
        assert!(!text.contains("Private"));
    }
}
