//! Error types for the Adult dataset analyses.
//!
//! All library operations return [`Result`], whose error side is the
//! `thiserror`-derived [`AnalysisError`]. Errors serialize to a
//! `{ code, message }` pair so that `--json` output stays machine readable
//! even when an analysis fails.

use serde::Serialize;
use serde::ser::SerializeStruct;
use thiserror::Error;

/// The main error type for dataset analyses.
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// The dataset is empty, has the wrong schema, or lacks the columns an
    /// analysis needs.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A declared-numeric column could not be read as numbers.
    #[error("Failed to compute statistics for column '{column}': {reason}")]
    Computation { column: String, reason: String },

    /// Column was not found in the dataset.
    #[error("Column '{0}' not found in dataset")]
    ColumnNotFound(String),

    /// Invalid configuration provided.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Polars error wrapper.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with context.
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<AnalysisError>,
    },
}

impl AnalysisError {
    /// Shorthand for [`AnalysisError::Computation`].
    pub fn computation(column: impl Into<String>, reason: impl Into<String>) -> Self {
        AnalysisError::Computation {
            column: column.into(),
            reason: reason.into(),
        }
    }

    /// Add context to an error.
    pub fn with_context(self, context: impl Into<String>) -> Self {
        AnalysisError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Stable error code, used in JSON output and exit diagnostics.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidInput(_) => "INVALID_INPUT",
            Self::Computation { .. } => "COMPUTATION_ERROR",
            Self::ColumnNotFound(_) => "COLUMN_NOT_FOUND",
            Self::InvalidConfig(_) => "INVALID_CONFIG",
            Self::Io(_) => "IO_ERROR",
            Self::Polars(_) => "POLARS_ERROR",
            Self::Json(_) => "JSON_ERROR",
            Self::WithContext { source, .. } => source.error_code(),
        }
    }

    /// Check if this error was caused by the input data rather than the
    /// environment (file system, serialization).
    pub fn is_input_error(&self) -> bool {
        match self {
            Self::InvalidInput(_) | Self::Computation { .. } | Self::ColumnNotFound(_) => true,
            Self::WithContext { source, .. } => source.is_input_error(),
            _ => false,
        }
    }
}

/// Errors are serialized as a struct with `code` and `message` fields.
impl Serialize for AnalysisError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("AnalysisError", 2)?;
        state.serialize_field("code", &self.error_code())?;
        state.serialize_field("message", &self.to_string())?;
        state.end()
    }
}

impl From<crate::config::ConfigValidationError> for AnalysisError {
    fn from(err: crate::config::ConfigValidationError) -> Self {
        AnalysisError::InvalidConfig(err.to_string())
    }
}

/// Result type alias for analysis operations.
pub type Result<T> = std::result::Result<T, AnalysisError>;

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, polars::error::PolarsError> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| AnalysisError::Polars(e).with_context(context))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, std::io::Error> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| AnalysisError::Io(e).with_context(context))
    }
}
