//! Correlation of numeric features with the income label.

use crate::error::{AnalysisError, Result};
use crate::schema::{INCOME_COLUMN, numeric_column_names};
use crate::utils::{numeric_values, pearson};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Strength {
    Strong,
    Moderate,
    Weak,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Positive,
    Negative,
}

impl fmt::Display for Strength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Strength::Strong => "Strong",
            Strength::Moderate => "Moderate",
            Strength::Weak => "Weak",
        };
        f.write_str(label)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Direction::Positive => "Positive",
            Direction::Negative => "Negative",
        };
        f.write_str(label)
    }
}

/// Correlation thresholds on |r|.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrengthThresholds {
    pub strong: f64,
    pub moderate: f64,
}

impl Default for StrengthThresholds {
    fn default() -> Self {
        Self {
            strong: 0.3,
            moderate: 0.1,
        }
    }
}

impl StrengthThresholds {
    pub fn classify(&self, r: f64) -> Strength {
        let magnitude = r.abs();
        if magnitude > self.strong {
            Strength::Strong
        } else if magnitude > self.moderate {
            Strength::Moderate
        } else {
            Strength::Weak
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureCorrelation {
    pub feature: String,
    pub correlation: f64,
    pub strength: Strength,
    pub direction: Direction,
}

/// Features ranked by absolute correlation with the binary income label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationReport {
    pub positive_label: String,
    pub features: Vec<FeatureCorrelation>,
}

impl CorrelationReport {
    pub fn to_dataframe(&self) -> Result<DataFrame> {
        let features: Vec<&str> = self.features.iter().map(|f| f.feature.as_str()).collect();
        let values: Vec<f64> = self.features.iter().map(|f| f.correlation).collect();
        let strengths: Vec<String> = self.features.iter().map(|f| f.strength.to_string()).collect();
        let directions: Vec<String> = self
            .features
            .iter()
            .map(|f| f.direction.to_string())
            .collect();

        Ok(df![
            "Feature" => features,
            "Correlation" => values,
            "Strength" => strengths,
            "Direction" => directions,
        ]?)
    }
}

/// Pairwise Pearson correlations between numeric features.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationMatrix {
    pub features: Vec<String>,
    /// Row-major, `features.len()` squared entries.
    pub values: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.features.iter().position(|f| f == a)?;
        let j = self.features.iter().position(|f| f == b)?;
        Some(self.values[i][j])
    }

    pub fn to_dataframe(&self) -> Result<DataFrame> {
        let mut columns = vec![Series::new("Feature".into(), self.features.clone()).into_column()];
        for (j, name) in self.features.iter().enumerate() {
            let column: Vec<f64> = self.values.iter().map(|row| row[j]).collect();
            columns.push(Series::new(name.as_str().into(), column).into_column());
        }
        Ok(DataFrame::new(columns)?)
    }
}

pub struct IncomeCorrelation;

impl IncomeCorrelation {
    /// Correlate each Adult numeric feature present in `df` with
    /// `income == positive_label`.
    pub fn analyze(
        df: &DataFrame,
        positive_label: &str,
        thresholds: StrengthThresholds,
    ) -> Result<CorrelationReport> {
        let labels = Self::binary_labels(df, positive_label)?;

        let mut features = Vec::new();
        for name in Self::present_features(df) {
            let values = numeric_values(df, name)?;
            let (xs, ys): (Vec<f64>, Vec<f64>) = values
                .iter()
                .zip(&labels)
                .filter_map(|(x, y)| x.map(|x| (x, *y)))
                .unzip();
            let correlation = pearson(&xs, &ys);

            features.push(FeatureCorrelation {
                feature: name.to_string(),
                correlation,
                strength: thresholds.classify(correlation),
                direction: if correlation > 0.0 {
                    Direction::Positive
                } else {
                    Direction::Negative
                },
            });
        }

        if features.is_empty() {
            return Err(AnalysisError::InvalidInput(
                "dataset has no numeric features".to_string(),
            ));
        }

        // NaN sorts last
        features.sort_by(|a, b| match (a.correlation.is_nan(), b.correlation.is_nan()) {
            (false, false) => b
                .correlation
                .abs()
                .partial_cmp(&a.correlation.abs())
                .unwrap_or(Ordering::Equal),
            (a_nan, b_nan) => a_nan.cmp(&b_nan),
        });

        Ok(CorrelationReport {
            positive_label: positive_label.to_string(),
            features,
        })
    }

    /// Pairwise-complete correlation matrix of the Adult numeric features.
    pub fn matrix(df: &DataFrame) -> Result<CorrelationMatrix> {
        let names = Self::present_features(df);
        let columns = names
            .iter()
            .map(|name| numeric_values(df, name))
            .collect::<Result<Vec<_>>>()?;

        let n = names.len();
        let mut values = vec![vec![f64::NAN; n]; n];
        for i in 0..n {
            values[i][i] = 1.0;
            for j in (i + 1)..n {
                let (xs, ys): (Vec<f64>, Vec<f64>) = columns[i]
                    .iter()
                    .zip(&columns[j])
                    .filter_map(|(x, y)| Some(((*x)?, (*y)?)))
                    .unzip();
                let r = pearson(&xs, &ys);
                values[i][j] = r;
                values[j][i] = r;
            }
        }

        Ok(CorrelationMatrix {
            features: names.iter().map(|s| s.to_string()).collect(),
            values,
        })
    }

    /// 1.0 where income equals `positive_label`, 0.0 otherwise.
    pub fn binary_labels(df: &DataFrame, positive_label: &str) -> Result<Vec<f64>> {
        let income = df
            .column(INCOME_COLUMN)
            .map_err(|_| AnalysisError::ColumnNotFound(INCOME_COLUMN.to_string()))?;
        Ok(income
            .str()?
            .into_iter()
            .map(|v| if v == Some(positive_label) { 1.0 } else { 0.0 })
            .collect())
    }

    fn present_features(df: &DataFrame) -> Vec<&'static str> {
        numeric_column_names()
            .into_iter()
            .filter(|name| df.column(name).is_ok())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DataFrame {
        df![
            "age" => [25i64, 35, 45, 55],
            "hours-per-week" => [40i64, 40, 40, 40],
            "capital-loss" => [10i64, 0, 5, 0],
            "income" => ["<=50K", "<=50K", ">50K", ">50K"],
        ]
        .unwrap()
    }

    #[test]
    fn test_ranked_by_absolute_correlation() {
        let report =
            IncomeCorrelation::analyze(&sample(), ">50K", StrengthThresholds::default()).unwrap();
        let order: Vec<&str> = report.features.iter().map(|f| f.feature.as_str()).collect();
        // hours-per-week is constant, so NaN and last
        assert_eq!(order, vec!["age", "capital-loss", "hours-per-week"]);

        let age = &report.features[0];
        assert!(age.correlation > 0.8);
        assert_eq!(age.strength, Strength::Strong);
        assert_eq!(age.direction, Direction::Positive);

        let loss = &report.features[1];
        assert!(loss.correlation < 0.0);
        assert_eq!(loss.direction, Direction::Negative);
        assert!(report.features[2].correlation.is_nan());
    }

    #[test]
    fn test_classify_thresholds() {
        let thresholds = StrengthThresholds::default();
        assert_eq!(thresholds.classify(0.31), Strength::Strong);
        assert_eq!(thresholds.classify(-0.2), Strength::Moderate);
        assert_eq!(thresholds.classify(0.1), Strength::Weak);
    }

    #[test]
    fn test_missing_income_column() {
        let df = df!["age" => [1i64, 2]].unwrap();
        let err = IncomeCorrelation::analyze(&df, ">50K", StrengthThresholds::default())
            .unwrap_err();
        assert!(matches!(err, AnalysisError::ColumnNotFound(_)));
    }

    #[test]
    fn test_matrix_symmetric_with_unit_diagonal() {
        let matrix = IncomeCorrelation::matrix(&sample()).unwrap();
        assert_eq!(matrix.features, vec!["age", "capital-loss", "hours-per-week"]);
        assert_eq!(matrix.get("age", "age"), Some(1.0));
        assert_eq!(
            matrix.get("age", "capital-loss"),
            matrix.get("capital-loss", "age")
        );
        let frame = matrix.to_dataframe().unwrap();
        assert_eq!(frame.shape(), (3, 4));
    }
}
