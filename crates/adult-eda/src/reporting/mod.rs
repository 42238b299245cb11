//! Report assembly and output.
//!
//! [`ExplorationReport`] bundles every analysis of one run; it serializes
//! to JSON for `--json` output. [`ReportWriter`] writes the individual tables
//! as CSV files plus the text overview.
//!
//! # Example
//!
//! ```rust,ignore
//! use adult_eda::reporting::{ExplorationReport, ReportWriter};
//!
//! let report = ExplorationReport::build(&df, &config)?;
//! ReportWriter::new("output").write_all(&report)?;
//! ```

mod report;
mod writer;

pub use report::ExplorationReport;
pub use writer::{
    AGE_HISTOGRAM_FILE, CORRELATION_MATRIX_FILE, CORRELATION_REPORT_FILE,
    EDUCATION_DISTRIBUTION_FILE, EXPLORATION_SUMMARY_FILE, HOURS_REPORT_FILE,
    INCOME_DISTRIBUTION_FILE, MISSING_REPORT_FILE, OUTLIER_REPORT_FILE, ReportWriter,
    SUMMARY_REPORT_FILE,
};
