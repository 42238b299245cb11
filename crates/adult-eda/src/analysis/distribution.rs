//! Value counts and histograms: the tables behind the distribution charts.

use crate::error::{AnalysisError, Result};
use crate::utils::{numeric_values, sorted_finite};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Counts per distinct value of a text column, most frequent first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryDistribution {
    pub column: String,
    pub counts: Vec<(String, usize)>,
}

impl CategoryDistribution {
    /// Count every non-null value; ties are ordered by value.
    pub fn value_counts(df: &DataFrame, column: &str) -> Result<Self> {
        let series = df
            .column(column)
            .map_err(|_| AnalysisError::ColumnNotFound(column.to_string()))?
            .as_materialized_series()
            .cast(&DataType::String)?;

        let mut counts: HashMap<String, usize> = HashMap::new();
        for value in series.str()?.into_iter().flatten() {
            *counts.entry(value.to_string()).or_insert(0) += 1;
        }

        let mut counts: Vec<(String, usize)> = counts.into_iter().collect();
        counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

        Ok(Self {
            column: column.to_string(),
            counts,
        })
    }

    pub fn count_of(&self, value: &str) -> usize {
        self.counts
            .iter()
            .find(|(v, _)| v == value)
            .map_or(0, |(_, c)| *c)
    }

    pub fn to_dataframe(&self) -> Result<DataFrame> {
        let values: Vec<&str> = self.counts.iter().map(|(v, _)| v.as_str()).collect();
        let counts: Vec<u64> = self.counts.iter().map(|(_, c)| *c as u64).collect();
        Ok(df![
            self.column.as_str() => values,
            "count" => counts,
        ]?)
    }
}

/// One equal-width bin, `[lower, upper)`; the last bin is closed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Histogram {
    pub column: String,
    pub bins: Vec<HistogramBin>,
}

impl Histogram {
    /// Equal-width histogram of the non-null values of a numeric column.
    pub fn compute(df: &DataFrame, column: &str, bins: usize) -> Result<Self> {
        if bins == 0 {
            return Err(AnalysisError::InvalidInput(
                "histogram needs at least one bin".to_string(),
            ));
        }

        let values = numeric_values(df, column)?;
        let sorted = sorted_finite(values.into_iter().flatten());
        let (Some(&min), Some(&max)) = (sorted.first(), sorted.last()) else {
            return Ok(Self {
                column: column.to_string(),
                bins: Vec::new(),
            });
        };

        // a constant column gets a unit-wide range around its value
        let (low, high) = if min == max {
            (min - 0.5, max + 0.5)
        } else {
            (min, max)
        };
        let width = (high - low) / bins as f64;

        let mut counts = vec![0usize; bins];
        for value in &sorted {
            let index = (((value - low) / width) as usize).min(bins - 1);
            counts[index] += 1;
        }

        let bins = counts
            .into_iter()
            .enumerate()
            .map(|(i, count)| HistogramBin {
                lower: low + width * i as f64,
                upper: if i + 1 == bins { high } else { low + width * (i + 1) as f64 },
                count,
            })
            .collect();

        Ok(Self {
            column: column.to_string(),
            bins,
        })
    }

    pub fn total(&self) -> usize {
        self.bins.iter().map(|b| b.count).sum()
    }

    pub fn to_dataframe(&self) -> Result<DataFrame> {
        let lower: Vec<f64> = self.bins.iter().map(|b| b.lower).collect();
        let upper: Vec<f64> = self.bins.iter().map(|b| b.upper).collect();
        let counts: Vec<u64> = self.bins.iter().map(|b| b.count as u64).collect();
        Ok(df![
            "Lower" => lower,
            "Upper" => upper,
            "Count" => counts,
        ]?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_counts_sorted() {
        let df = df![
            "income" => [Some("<=50K"), Some(">50K"), Some("<=50K"), None, Some("<=50K")],
        ]
        .unwrap();
        let dist = CategoryDistribution::value_counts(&df, "income").unwrap();
        assert_eq!(
            dist.counts,
            vec![("<=50K".to_string(), 3), (">50K".to_string(), 1)]
        );
        assert_eq!(dist.count_of("missing"), 0);
    }

    #[test]
    fn test_value_counts_ties_by_value() {
        let df = df!["education" => ["HS-grad", "Bachelors", "HS-grad", "Bachelors"]].unwrap();
        let dist = CategoryDistribution::value_counts(&df, "education").unwrap();
        assert_eq!(dist.counts[0].0, "Bachelors");
    }

    #[test]
    fn test_histogram_bins() {
        let df = df!["age" => [Some(20i64), Some(25), Some(30), Some(40), None]].unwrap();
        let histogram = Histogram::compute(&df, "age", 2).unwrap();
        assert_eq!(histogram.bins.len(), 2);
        assert_eq!(histogram.bins[0].lower, 20.0);
        assert_eq!(histogram.bins[0].upper, 30.0);
        assert_eq!(histogram.bins[0].count, 2);
        // max lands in the closed last bin
        assert_eq!(histogram.bins[1].count, 2);
        assert_eq!(histogram.total(), 4);
    }

    #[test]
    fn test_histogram_constant_column() {
        let df = df!["age" => [30i64, 30, 30]].unwrap();
        let histogram = Histogram::compute(&df, "age", 3).unwrap();
        assert_eq!(histogram.total(), 3);
    }

    #[test]
    fn test_histogram_zero_bins() {
        let df = df!["age" => [1i64]].unwrap();
        assert!(Histogram::compute(&df, "age", 0).is_err());
    }
}
