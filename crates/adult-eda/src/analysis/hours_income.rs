//! Working hours by income level, with a two-sample t-test.

use crate::error::{AnalysisError, Result};
use crate::schema::{HOURS_COLUMN, INCOME_COLUMN};
use crate::utils::{mean, numeric_values, quantile_sorted, round2, sample_std, sorted_finite};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF, StudentsT};
use std::collections::BTreeMap;
use tracing::debug;

/// Hours-per-week statistics for one income group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupStatistics {
    pub income: String,
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    pub std: f64,
    pub min: f64,
    pub max: f64,
}

/// Student's t-test with pooled variance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TTestResult {
    pub t_statistic: f64,
    pub degrees_of_freedom: f64,
    pub p_value: f64,
    pub alpha: f64,
    pub significant: bool,
}

impl TTestResult {
    /// Two-sided independent two-sample test assuming equal variances.
    ///
    /// Both samples need at least two values.
    pub fn independent(a: &[f64], b: &[f64], alpha: f64) -> Result<Self> {
        let (n1, n2) = (a.len(), b.len());
        if n1 < 2 || n2 < 2 {
            return Err(AnalysisError::InvalidInput(format!(
                "t-test needs at least 2 values per group, got {} and {}",
                n1, n2
            )));
        }

        let (var1, var2) = (sample_std(a).powi(2), sample_std(b).powi(2));
        let dof = (n1 + n2 - 2) as f64;
        let pooled = ((n1 - 1) as f64 * var1 + (n2 - 1) as f64 * var2) / dof;
        let standard_error = (pooled * (1.0 / n1 as f64 + 1.0 / n2 as f64)).sqrt();
        let t_statistic = (mean(a) - mean(b)) / standard_error;

        let p_value = if t_statistic.is_nan() {
            f64::NAN
        } else {
            let distribution = StudentsT::new(0.0, 1.0, dof)
                .map_err(|e| AnalysisError::computation(HOURS_COLUMN, e.to_string()))?;
            (2.0 * distribution.sf(t_statistic.abs())).min(1.0)
        };

        Ok(Self {
            t_statistic,
            degrees_of_freedom: dof,
            p_value,
            alpha,
            significant: p_value < alpha,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoursIncomeReport {
    /// Groups sorted by income label.
    pub groups: Vec<GroupStatistics>,
    pub t_test: TTestResult,
}

impl HoursIncomeReport {
    /// Group table rounded to two decimals.
    pub fn to_dataframe(&self) -> Result<DataFrame> {
        let pick = |f: fn(&GroupStatistics) -> f64| -> Vec<f64> {
            self.groups.iter().map(|g| round2(f(g))).collect()
        };
        let labels: Vec<&str> = self.groups.iter().map(|g| g.income.as_str()).collect();
        let counts: Vec<u64> = self.groups.iter().map(|g| g.count as u64).collect();

        Ok(df![
            "income" => labels,
            "count" => counts,
            "mean" => pick(|g| g.mean),
            "median" => pick(|g| g.median),
            "std" => pick(|g| g.std),
            "min" => pick(|g| g.min),
            "max" => pick(|g| g.max),
        ]?)
    }
}

pub struct HoursIncomeAnalysis;

impl HoursIncomeAnalysis {
    /// Group hours by income and test `low_label` against `high_label`.
    pub fn analyze(
        df: &DataFrame,
        low_label: &str,
        high_label: &str,
        alpha: f64,
    ) -> Result<HoursIncomeReport> {
        let hours = numeric_values(df, HOURS_COLUMN)?;
        let income = df
            .column(INCOME_COLUMN)
            .map_err(|_| AnalysisError::ColumnNotFound(INCOME_COLUMN.to_string()))?
            .str()?;

        let mut grouped: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
        for (label, value) in income.into_iter().zip(hours) {
            if let (Some(label), Some(value)) = (label, value) {
                grouped.entry(label).or_default().push(value);
            }
        }

        let groups = grouped
            .iter()
            .map(|(label, values)| Self::group_statistics(label, values))
            .collect();

        let empty = Vec::new();
        let low = grouped.get(low_label).unwrap_or(&empty);
        let high = grouped.get(high_label).unwrap_or(&empty);
        let t_test = TTestResult::independent(low, high, alpha)?;
        debug!(
            "t = {:.4}, p = {:.4} over {} and {} rows",
            t_test.t_statistic,
            t_test.p_value,
            low.len(),
            high.len()
        );

        Ok(HoursIncomeReport { groups, t_test })
    }

    fn group_statistics(label: &str, values: &[f64]) -> GroupStatistics {
        let sorted = sorted_finite(values.iter().copied());
        GroupStatistics {
            income: label.to_string(),
            count: sorted.len(),
            mean: mean(&sorted),
            median: quantile_sorted(&sorted, 0.5),
            std: sample_std(&sorted),
            min: sorted.first().copied().unwrap_or(f64::NAN),
            max: sorted.last().copied().unwrap_or(f64::NAN),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_statistics() {
        let df = df![
            "hours-per-week" => [Some(40i64), Some(30), None, Some(60), Some(50), Some(45)],
            "income" => ["<=50K", "<=50K", "<=50K", ">50K", ">50K", ">50K"],
        ]
        .unwrap();

        let report = HoursIncomeAnalysis::analyze(&df, "<=50K", ">50K", 0.05).unwrap();
        assert_eq!(report.groups.len(), 2);

        let low = &report.groups[0];
        assert_eq!(low.income, "<=50K");
        assert_eq!(low.count, 2);
        assert_eq!(low.mean, 35.0);
        assert_eq!(low.median, 35.0);
        assert_eq!(low.min, 30.0);
        assert_eq!(low.max, 40.0);

        let high = &report.groups[1];
        assert_eq!(high.income, ">50K");
        assert!((high.mean - 155.0 / 3.0).abs() < 1e-12);
        assert_eq!(high.median, 50.0);
    }

    #[test]
    fn test_t_test_matches_reference() {
        // scipy.stats.ttest_ind([1, 2, 3, 4, 5], [3, 4, 5, 6, 7]) -> t = -2.0, p = 0.0805
        let result =
            TTestResult::independent(&[1.0, 2.0, 3.0, 4.0, 5.0], &[3.0, 4.0, 5.0, 6.0, 7.0], 0.05)
                .unwrap();
        assert!((result.t_statistic + 2.0).abs() < 1e-12);
        assert_eq!(result.degrees_of_freedom, 8.0);
        assert!((result.p_value - 0.0805).abs() < 1e-3);
        assert!(!result.significant);
    }

    #[test]
    fn test_t_test_significant_difference() {
        let low: Vec<f64> = (0..50).map(|i| 35.0 + (i % 5) as f64).collect();
        let high: Vec<f64> = (0..50).map(|i| 50.0 + (i % 5) as f64).collect();
        let result = TTestResult::independent(&low, &high, 0.05).unwrap();
        assert!(result.t_statistic < 0.0);
        assert!(result.p_value < 1e-6);
        assert!(result.significant);
    }

    #[test]
    fn test_t_test_needs_two_values_per_group() {
        let err = TTestResult::independent(&[40.0], &[50.0, 60.0], 0.05).unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidInput(_)));
    }

    #[test]
    fn test_missing_group_is_invalid_input() {
        let df = df![
            "hours-per-week" => [40i64, 50, 60],
            "income" => ["<=50K", "<=50K", "<=50K"],
        ]
        .unwrap();
        assert!(matches!(
            HoursIncomeAnalysis::analyze(&df, "<=50K", ">50K", 0.05),
            Err(AnalysisError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_to_dataframe_rounds() {
        let df = df![
            "hours-per-week" => [40i64, 41, 42, 50, 52, 55],
            "income" => ["<=50K", "<=50K", "<=50K", ">50K", ">50K", ">50K"],
        ]
        .unwrap();
        let frame = HoursIncomeAnalysis::analyze(&df, "<=50K", ">50K", 0.05)
            .unwrap()
            .to_dataframe()
            .unwrap();
        assert_eq!(frame.shape(), (2, 7));
        let means = frame.column("mean").unwrap().f64().unwrap();
        assert_eq!(means.get(1), Some(52.33));
    }
}
