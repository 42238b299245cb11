use super::report::ExplorationReport;
use crate::error::{Result, ResultExt};
use polars::prelude::*;
use serde::Serialize;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

pub const MISSING_REPORT_FILE: &str = "missing_values_report.csv";
pub const OUTLIER_REPORT_FILE: &str = "outliers_report.csv";
pub const SUMMARY_REPORT_FILE: &str = "statistical_summary.csv";
pub const CORRELATION_REPORT_FILE: &str = "income_correlation.csv";
pub const CORRELATION_MATRIX_FILE: &str = "correlation_matrix.csv";
pub const HOURS_REPORT_FILE: &str = "hours_by_income.csv";
pub const INCOME_DISTRIBUTION_FILE: &str = "income_distribution.csv";
pub const EDUCATION_DISTRIBUTION_FILE: &str = "education_distribution.csv";
pub const AGE_HISTOGRAM_FILE: &str = "age_histogram.csv";
pub const EXPLORATION_SUMMARY_FILE: &str = "exploration_summary.txt";

/// Writes report tables and text into one output directory.
#[derive(Debug, Clone)]
pub struct ReportWriter {
    output_dir: PathBuf,
}

impl ReportWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Write `df` as a headed, comma-separated file.
    pub fn write_csv(&self, df: &DataFrame, file_name: &str) -> Result<PathBuf> {
        fs::create_dir_all(&self.output_dir)
            .context(format!("Failed to create {}", self.output_dir.display()))?;

        let path = self.output_dir.join(file_name);
        let mut file = File::create(&path).context(format!("Failed to create {}", path.display()))?;

        // CsvWriter needs a mutable frame
        let mut df = df.clone();
        CsvWriter::new(&mut file)
            .include_header(true)
            .with_separator(b',')
            .finish(&mut df)?;

        info!("Report saved: {}", path.display());
        Ok(path)
    }

    pub fn write_text(&self, content: &str, file_name: &str) -> Result<PathBuf> {
        fs::create_dir_all(&self.output_dir)
            .context(format!("Failed to create {}", self.output_dir.display()))?;

        let path = self.output_dir.join(file_name);
        let mut file = File::create(&path).context(format!("Failed to create {}", path.display()))?;
        file.write_all(content.as_bytes())?;

        info!("Report saved: {}", path.display());
        Ok(path)
    }

    /// Pretty-printed JSON of any report.
    pub fn write_json<T: Serialize>(&self, report: &T, file_name: &str) -> Result<PathBuf> {
        let json = serde_json::to_string_pretty(report)?;
        self.write_text(&json, file_name)
    }

    /// Write every table of an exploration run plus the text overview.
    pub fn write_all(&self, report: &ExplorationReport) -> Result<Vec<PathBuf>> {
        let tables = [
            (report.missing.to_dataframe()?, MISSING_REPORT_FILE),
            (report.outliers.to_dataframe()?, OUTLIER_REPORT_FILE),
            (report.summary.to_dataframe()?, SUMMARY_REPORT_FILE),
            (report.income_correlation.to_dataframe()?, CORRELATION_REPORT_FILE),
            (report.correlation_matrix.to_dataframe()?, CORRELATION_MATRIX_FILE),
            (report.hours_by_income.to_dataframe()?, HOURS_REPORT_FILE),
            (report.income_distribution.to_dataframe()?, INCOME_DISTRIBUTION_FILE),
            (report.education_distribution.to_dataframe()?, EDUCATION_DISTRIBUTION_FILE),
            (report.age_histogram.to_dataframe()?, AGE_HISTOGRAM_FILE),
        ];

        let mut written = Vec::with_capacity(tables.len() + 1);
        for (df, file_name) in &tables {
            written.push(self.write_csv(df, file_name)?);
        }
        written.push(self.write_text(&report.overview.to_string(), EXPLORATION_SUMMARY_FILE)?);

        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = env::temp_dir().join(format!("adult-eda-{}-{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn test_write_csv_creates_directory() {
        let dir = scratch_dir("csv");
        let writer = ReportWriter::new(dir.join("nested"));
        let df = df!["Column" => ["workclass"], "Missing_Count" => [2u64]].unwrap();

        let path = writer.write_csv(&df, MISSING_REPORT_FILE).unwrap();
        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, "Column,Missing_Count\nworkclass,2\n");

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_write_json() {
        let dir = scratch_dir("json");
        let writer = ReportWriter::new(&dir);
        let path = writer
            .write_json(&serde_json::json!({ "rows": 3 }), "report.json")
            .unwrap();
        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(value["rows"], 3);

        fs::remove_dir_all(&dir).unwrap();
    }
}
