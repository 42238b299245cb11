use crate::analysis::{
    CategoryDistribution, CorrelationMatrix, CorrelationReport, DatasetOverview, Histogram,
    HoursIncomeAnalysis, HoursIncomeReport, IncomeCorrelation, MissingReport,
    MissingValueAnalyzer, OutlierAnalyzer, OutlierReport, StatisticalSummary, StrengthThresholds,
};
use crate::config::ExplorerConfig;
use crate::error::{Result, ResultExt};
use crate::schema::{AGE_COLUMN, EDUCATION_COLUMN, INCOME_COLUMN};
use polars::prelude::DataFrame;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Every analysis of one exploration run.
///
/// Used for `--json` output of `explore` and by [`super::ReportWriter::write_all`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExplorationReport {
    pub input_file: String,
    pub overview: DatasetOverview,
    pub missing: MissingReport,
    pub outliers: OutlierReport,
    pub summary: StatisticalSummary,
    pub income_correlation: CorrelationReport,
    pub correlation_matrix: CorrelationMatrix,
    pub hours_by_income: HoursIncomeReport,
    pub income_distribution: CategoryDistribution,
    pub education_distribution: CategoryDistribution,
    pub age_histogram: Histogram,
}

impl ExplorationReport {
    /// Run all analyses in order. The first failure aborts the run.
    pub fn build(df: &DataFrame, config: &ExplorerConfig) -> Result<Self> {
        // fields are public, so a config may have changed since build()
        config.validate()?;
        let thresholds = StrengthThresholds {
            strong: config.strong_correlation,
            moderate: config.moderate_correlation,
        };

        info!("[1/6] Dataset overview");
        let overview = DatasetOverview::compute(df, config.preview_rows)?;

        info!("[2/6] Missing values");
        let missing = MissingValueAnalyzer::analyze_with_token(df, &config.missing_token)
            .context("Missing-value analysis failed")?;

        info!("[3/6] Outliers");
        let outliers = OutlierAnalyzer::analyze_with_multiplier(df, config.iqr_multiplier)
            .context("Outlier analysis failed")?;

        info!("[4/6] Statistical summary");
        let summary = StatisticalSummary::compute(df)?;

        info!("[5/6] Income relationships");
        let income_correlation =
            IncomeCorrelation::analyze(df, &config.high_income_label, thresholds)?;
        let correlation_matrix = IncomeCorrelation::matrix(df)?;
        let hours_by_income = HoursIncomeAnalysis::analyze(
            df,
            &config.low_income_label,
            &config.high_income_label,
            config.significance_level,
        )?;

        info!("[6/6] Distributions");
        let income_distribution = CategoryDistribution::value_counts(df, INCOME_COLUMN)?;
        let education_distribution = CategoryDistribution::value_counts(df, EDUCATION_COLUMN)?;
        let age_histogram = Histogram::compute(df, AGE_COLUMN, config.histogram_bins)?;

        Ok(Self {
            input_file: config.input_path.display().to_string(),
            overview,
            missing,
            outliers,
            summary,
            income_correlation,
            correlation_matrix,
            hours_by_income,
            income_distribution,
            education_distribution,
            age_histogram,
        })
    }
}
