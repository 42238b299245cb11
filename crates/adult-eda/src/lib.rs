//! Adult Census Exploratory Analysis Library
//!
//! Data-quality and exploratory analysis of the UCI Adult census dataset,
//! built on Polars.
//!
//! # Overview
//!
//! - **Loading**: headerless CSV with leading-space trimming and typed
//!   numeric columns ([`AdultLoader`])
//! - **Missing values**: `"?"` placeholders in text columns, nulls in numeric
//!   columns ([`MissingValueAnalyzer`])
//! - **Outliers**: Tukey's IQR fences per numeric column ([`OutlierAnalyzer`])
//! - **Exploration**: descriptive statistics, income correlation, hours by
//!   income with a t-test, value counts and histograms
//! - **Reporting**: CSV, text and JSON output ([`ReportWriter`])
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use adult_eda::{AdultLoader, MissingValueAnalyzer, OutlierAnalyzer};
//!
//! let df = AdultLoader::load("Adult Dataset/adult.data", "?")?;
//!
//! let missing = MissingValueAnalyzer::analyze(&df)?;
//! for record in &missing.records {
//!     println!("{}: {} ({:.2}%)", record.column, record.missing_count, record.percentage);
//! }
//!
//! let outliers = OutlierAnalyzer::analyze(&df)?;
//! println!("{} outlier cells", outliers.total_outliers);
//! ```
//!
//! # Full Exploration
//!
//! ```rust,ignore
//! use adult_eda::{AdultLoader, ExplorationReport, ExplorerConfig, ReportWriter};
//!
//! let config = ExplorerConfig::builder().output_dir("output").build()?;
//! let df = AdultLoader::load(&config.input_path, &config.missing_token)?;
//! let report = ExplorationReport::build(&df, &config)?;
//! ReportWriter::new(&config.output_dir).write_all(&report)?;
//! ```

pub mod analysis;
pub mod config;
pub mod error;
pub mod loader;
pub mod reporting;
pub mod schema;
pub mod utils;

pub use analysis::{
    CategoryDistribution, CorrelationMatrix, CorrelationReport, DatasetOverview, Histogram,
    HoursIncomeAnalysis, HoursIncomeReport, IncomeCorrelation, MissingReport,
    MissingValueAnalyzer, OutlierAnalyzer, OutlierReport, StatisticalSummary, StrengthThresholds,
    TTestResult,
};
pub use config::{ConfigValidationError, ExplorerConfig, ExplorerConfigBuilder};
pub use error::{AnalysisError, Result, ResultExt};
pub use loader::AdultLoader;
pub use reporting::{ExplorationReport, ReportWriter};
pub use schema::{ADULT_SCHEMA, ColumnKind};
