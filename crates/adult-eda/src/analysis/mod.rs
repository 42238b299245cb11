//! Analyses over a loaded Adult `DataFrame`.
//!
//! Each analyzer is a unit struct with associated functions that borrow the
//! frame and return a serializable report. Nothing here touches the file
//! system.

mod correlation;
mod distribution;
mod hours_income;
mod missing;
mod outliers;
mod overview;
mod summary;

pub use correlation::{
    CorrelationMatrix, CorrelationReport, Direction, FeatureCorrelation, IncomeCorrelation,
    Strength, StrengthThresholds,
};
pub use distribution::{CategoryDistribution, Histogram, HistogramBin};
pub use hours_income::{GroupStatistics, HoursIncomeAnalysis, HoursIncomeReport, TTestResult};
pub use missing::{MissingRecord, MissingReport, MissingValueAnalyzer};
pub use outliers::{OutlierAnalyzer, OutlierRecord, OutlierReport};
pub use overview::{ColumnOverview, DatasetOverview};
pub use summary::{ColumnStatistics, StatisticalSummary};
