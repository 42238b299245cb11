//! Configuration for the exploration runs.
//!
//! [`ExplorerConfig`] is built with a fluent builder and validated once on
//! [`ExplorerConfigBuilder::build`]; analyzers receive only the values they
//! need.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Placeholder the Adult data uses for missing text values.
pub const DEFAULT_MISSING_TOKEN: &str = "?";

/// Tukey fence multiplier.
pub const DEFAULT_IQR_MULTIPLIER: f64 = 1.5;

/// Income label treated as the positive class.
pub const DEFAULT_HIGH_INCOME_LABEL: &str = ">50K";

/// Income label treated as the negative class.
pub const DEFAULT_LOW_INCOME_LABEL: &str = "<=50K";

/// Configuration for an exploration run.
///
/// # Example
///
/// ```rust,ignore
/// use adult_eda::config::ExplorerConfig;
///
/// let config = ExplorerConfig::builder()
///     .input_path("Adult Dataset/adult.data")
///     .output_dir("output")
///     .iqr_multiplier(3.0)
///     .build()?;
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExplorerConfig {
    /// Path to the headerless Adult CSV file.
    /// Default: "Adult Dataset/adult.data"
    pub input_path: PathBuf,

    /// Output directory for generated reports.
    /// Default: "output"
    pub output_dir: PathBuf,

    /// Literal token counted as missing in text columns.
    /// Default: "?"
    pub missing_token: String,

    /// Multiplier applied to the IQR for the outlier fences.
    /// Default: 1.5
    pub iqr_multiplier: f64,

    /// Alpha for the hours-per-week t-test.
    /// Default: 0.05
    pub significance_level: f64,

    /// Absolute correlation above which a feature is labelled "Strong".
    /// Default: 0.3
    pub strong_correlation: f64,

    /// Absolute correlation above which a feature is labelled "Moderate".
    /// Default: 0.1
    pub moderate_correlation: f64,

    /// Number of rows shown in the exploration overview.
    /// Default: 10
    pub preview_rows: usize,

    /// Number of bins for numeric histograms.
    /// Default: 30
    pub histogram_bins: usize,

    /// Income value treated as the positive class.
    /// Default: ">50K"
    pub high_income_label: String,

    /// Income value treated as the negative class.
    /// Default: "<=50K"
    pub low_income_label: String,

    /// Whether to write reports to disk.
    /// Default: true
    pub save_to_disk: bool,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from("Adult Dataset/adult.data"),
            output_dir: PathBuf::from("output"),
            missing_token: DEFAULT_MISSING_TOKEN.to_string(),
            iqr_multiplier: DEFAULT_IQR_MULTIPLIER,
            significance_level: 0.05,
            strong_correlation: 0.3,
            moderate_correlation: 0.1,
            preview_rows: 10,
            histogram_bins: 30,
            high_income_label: DEFAULT_HIGH_INCOME_LABEL.to_string(),
            low_income_label: DEFAULT_LOW_INCOME_LABEL.to_string(),
            save_to_disk: true,
        }
    }
}

impl ExplorerConfig {
    /// Create a new configuration builder.
    pub fn builder() -> ExplorerConfigBuilder {
        ExplorerConfigBuilder::default()
    }

    /// Validate the configuration and return errors if invalid.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.missing_token.is_empty() {
            return Err(ConfigValidationError::EmptyMissingToken);
        }

        if !(self.iqr_multiplier.is_finite() && self.iqr_multiplier > 0.0) {
            return Err(ConfigValidationError::InvalidIqrMultiplier(
                self.iqr_multiplier,
            ));
        }

        if !(self.significance_level > 0.0 && self.significance_level < 1.0) {
            return Err(ConfigValidationError::InvalidSignificanceLevel(
                self.significance_level,
            ));
        }

        for (field, value) in [
            ("strong_correlation", self.strong_correlation),
            ("moderate_correlation", self.moderate_correlation),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigValidationError::InvalidThreshold {
                    field: field.to_string(),
                    value,
                });
            }
        }

        if self.moderate_correlation > self.strong_correlation {
            return Err(ConfigValidationError::ThresholdOrder {
                moderate: self.moderate_correlation,
                strong: self.strong_correlation,
            });
        }

        if self.histogram_bins == 0 {
            return Err(ConfigValidationError::InvalidHistogramBins(
                self.histogram_bins,
            ));
        }

        if self.high_income_label == self.low_income_label {
            return Err(ConfigValidationError::DuplicateIncomeLabels(
                self.high_income_label.clone(),
            ));
        }

        Ok(())
    }
}

/// Errors that can occur during configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Missing-value token must not be empty")]
    EmptyMissingToken,

    #[error("Invalid IQR multiplier: {0} (must be a positive number)")]
    InvalidIqrMultiplier(f64),

    #[error("Invalid significance level: {0} (must be between 0.0 and 1.0, exclusive)")]
    InvalidSignificanceLevel(f64),

    #[error("Invalid threshold for '{field}': {value} (must be between 0.0 and 1.0)")]
    InvalidThreshold { field: String, value: f64 },

    #[error("Moderate correlation threshold {moderate} exceeds strong threshold {strong}")]
    ThresholdOrder { moderate: f64, strong: f64 },

    #[error("Invalid histogram bins: {0} (must be at least 1)")]
    InvalidHistogramBins(usize),

    #[error("High and low income labels must differ (both are '{0}')")]
    DuplicateIncomeLabels(String),
}

/// Builder for [`ExplorerConfig`] with fluent API.
#[derive(Debug, Default)]
pub struct ExplorerConfigBuilder {
    input_path: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    missing_token: Option<String>,
    iqr_multiplier: Option<f64>,
    significance_level: Option<f64>,
    strong_correlation: Option<f64>,
    moderate_correlation: Option<f64>,
    preview_rows: Option<usize>,
    histogram_bins: Option<usize>,
    high_income_label: Option<String>,
    low_income_label: Option<String>,
    save_to_disk: Option<bool>,
}

impl ExplorerConfigBuilder {
    /// Set the path of the Adult CSV file.
    pub fn input_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.input_path = Some(path.into());
        self
    }

    /// Set the output directory for reports.
    pub fn output_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(path.into());
        self
    }

    /// Set the literal token counted as missing in text columns.
    pub fn missing_token(mut self, token: impl Into<String>) -> Self {
        self.missing_token = Some(token.into());
        self
    }

    /// Set the Tukey fence multiplier.
    pub fn iqr_multiplier(mut self, multiplier: f64) -> Self {
        self.iqr_multiplier = Some(multiplier);
        self
    }

    /// Set the alpha used by the t-test verdict.
    pub fn significance_level(mut self, alpha: f64) -> Self {
        self.significance_level = Some(alpha);
        self
    }

    /// Set the "Strong" and "Moderate" correlation thresholds.
    ///
    /// # Arguments
    /// * `strong` - absolute correlation above which a feature is Strong
    /// * `moderate` - absolute correlation above which a feature is Moderate
    pub fn correlation_thresholds(mut self, strong: f64, moderate: f64) -> Self {
        self.strong_correlation = Some(strong);
        self.moderate_correlation = Some(moderate);
        self
    }

    /// Set the number of preview rows in the overview.
    pub fn preview_rows(mut self, rows: usize) -> Self {
        self.preview_rows = Some(rows);
        self
    }

    /// Set the number of histogram bins.
    pub fn histogram_bins(mut self, bins: usize) -> Self {
        self.histogram_bins = Some(bins);
        self
    }

    /// Set the income labels for the positive and negative classes.
    pub fn income_labels(mut self, high: impl Into<String>, low: impl Into<String>) -> Self {
        self.high_income_label = Some(high.into());
        self.low_income_label = Some(low.into());
        self
    }

    /// Enable or disable writing reports to disk.
    pub fn save_to_disk(mut self, save: bool) -> Self {
        self.save_to_disk = Some(save);
        self
    }

    /// Build the configuration.
    ///
    /// Returns a validated `ExplorerConfig` or an error if validation fails.
    pub fn build(self) -> Result<ExplorerConfig, ConfigValidationError> {
        let defaults = ExplorerConfig::default();
        let config = ExplorerConfig {
            input_path: self.input_path.unwrap_or(defaults.input_path),
            output_dir: self.output_dir.unwrap_or(defaults.output_dir),
            missing_token: self.missing_token.unwrap_or(defaults.missing_token),
            iqr_multiplier: self.iqr_multiplier.unwrap_or(defaults.iqr_multiplier),
            significance_level: self
                .significance_level
                .unwrap_or(defaults.significance_level),
            strong_correlation: self
                .strong_correlation
                .unwrap_or(defaults.strong_correlation),
            moderate_correlation: self
                .moderate_correlation
                .unwrap_or(defaults.moderate_correlation),
            preview_rows: self.preview_rows.unwrap_or(defaults.preview_rows),
            histogram_bins: self.histogram_bins.unwrap_or(defaults.histogram_bins),
            high_income_label: self
                .high_income_label
                .unwrap_or(defaults.high_income_label),
            low_income_label: self.low_income_label.unwrap_or(defaults.low_income_label),
            save_to_disk: self.save_to_disk.unwrap_or(defaults.save_to_disk),
        };

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ExplorerConfig::default();
        assert_eq!(config.missing_token, "?");
        assert_eq!(config.iqr_multiplier, 1.5);
        assert_eq!(config.significance_level, 0.05);
        assert_eq!(config.preview_rows, 10);
        assert_eq!(config.histogram_bins, 30);
        assert!(config.save_to_disk);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_custom_values() {
        let config = ExplorerConfig::builder()
            .output_dir("reports")
            .iqr_multiplier(3.0)
            .correlation_thresholds(0.5, 0.2)
            .histogram_bins(10)
            .save_to_disk(false)
            .build()
            .unwrap();

        assert_eq!(config.output_dir.to_str().unwrap(), "reports");
        assert_eq!(config.iqr_multiplier, 3.0);
        assert_eq!(config.strong_correlation, 0.5);
        assert_eq!(config.moderate_correlation, 0.2);
        assert_eq!(config.histogram_bins, 10);
        assert!(!config.save_to_disk);
    }

    #[test]
    fn test_validation_invalid_multiplier() {
        let result = ExplorerConfig::builder().iqr_multiplier(0.0).build();
        assert!(matches!(
            result.unwrap_err(),
            ConfigValidationError::InvalidIqrMultiplier(_)
        ));
    }

    #[test]
    fn test_validation_threshold_order() {
        let result = ExplorerConfig::builder()
            .correlation_thresholds(0.1, 0.3)
            .build();
        assert!(matches!(
            result.unwrap_err(),
            ConfigValidationError::ThresholdOrder { .. }
        ));
    }

    #[test]
    fn test_validation_empty_token() {
        let result = ExplorerConfig::builder().missing_token("").build();
        assert!(matches!(
            result.unwrap_err(),
            ConfigValidationError::EmptyMissingToken
        ));
    }

    #[test]
    fn test_validation_same_income_labels() {
        let result = ExplorerConfig::builder()
            .income_labels(">50K", ">50K")
            .build();
        assert!(matches!(
            result.unwrap_err(),
            ConfigValidationError::DuplicateIncomeLabels(_)
        ));
    }

    #[test]
    fn test_config_from_json() {
        let json = r#"{
            "input_path": "data/adult.data",
            "output_dir": "out",
            "missing_token": "NA",
            "iqr_multiplier": 2.0,
            "significance_level": 0.01,
            "strong_correlation": 0.4,
            "moderate_correlation": 0.2,
            "preview_rows": 5,
            "histogram_bins": 20,
            "high_income_label": ">50K.",
            "low_income_label": "<=50K.",
            "save_to_disk": false
        }"#;

        let config: ExplorerConfig = serde_json::from_str(json).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.missing_token, "NA");
        assert_eq!(config.high_income_label, ">50K.");
        assert_eq!(config.preview_rows, 5);
    }
}
