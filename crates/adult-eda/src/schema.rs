//! The fixed Adult census schema.
//!
//! Column order matches `adult.data`, which ships without a header row.

use crate::error::{AnalysisError, Result};
use crate::utils::is_numeric_dtype;
use polars::prelude::*;
use serde::{Deserialize, Serialize};

/// Declared type of a column, which decides how missingness and numeric
/// statistics treat it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnKind {
    /// Integer or floating point values; missing means null.
    Numeric,
    /// Free text or categorical labels; missing means the placeholder token.
    Text,
}

/// Column names and declared kinds, in file order.
pub const ADULT_SCHEMA: [(&str, ColumnKind); 15] = [
    ("age", ColumnKind::Numeric),
    ("workclass", ColumnKind::Text),
    ("fnlwgt", ColumnKind::Numeric),
    ("education", ColumnKind::Text),
    ("education-num", ColumnKind::Numeric),
    ("marital-status", ColumnKind::Text),
    ("occupation", ColumnKind::Text),
    ("relationship", ColumnKind::Text),
    ("race", ColumnKind::Text),
    ("sex", ColumnKind::Text),
    ("capital-gain", ColumnKind::Numeric),
    ("capital-loss", ColumnKind::Numeric),
    ("hours-per-week", ColumnKind::Numeric),
    ("native-country", ColumnKind::Text),
    ("income", ColumnKind::Text),
];

pub const INCOME_COLUMN: &str = "income";
pub const HOURS_COLUMN: &str = "hours-per-week";
pub const AGE_COLUMN: &str = "age";
pub const EDUCATION_COLUMN: &str = "education";

/// Column names in file order.
pub fn column_names() -> impl Iterator<Item = &'static str> {
    ADULT_SCHEMA.iter().map(|(name, _)| *name)
}

/// Names of the declared-numeric Adult columns, in file order.
pub fn numeric_column_names() -> Vec<&'static str> {
    ADULT_SCHEMA
        .iter()
        .filter(|(_, kind)| *kind == ColumnKind::Numeric)
        .map(|(name, _)| *name)
        .collect()
}

/// Declared kind of an Adult column, if `name` belongs to the schema.
pub fn schema_kind(name: &str) -> Option<ColumnKind> {
    ADULT_SCHEMA
        .iter()
        .find(|(col, _)| *col == name)
        .map(|(_, kind)| *kind)
}

/// Declared kind of any column.
///
/// Adult columns use their schema kind regardless of how they were loaded;
/// other columns fall back to their dtype.
pub fn declared_kind(name: &str, dtype: &DataType) -> ColumnKind {
    schema_kind(name).unwrap_or(if is_numeric_dtype(dtype) {
        ColumnKind::Numeric
    } else {
        ColumnKind::Text
    })
}

/// Check that `df` has exactly the 15 Adult columns, in order, and at least
/// one row.
pub fn validate_adult_frame(df: &DataFrame) -> Result<()> {
    if df.height() == 0 {
        return Err(AnalysisError::InvalidInput(
            "dataset has no rows".to_string(),
        ));
    }

    let actual: Vec<&str> = df.get_column_names().iter().map(|s| s.as_str()).collect();
    let expected: Vec<&str> = column_names().collect();
    if actual != expected {
        return Err(AnalysisError::InvalidInput(format!(
            "expected columns {:?}, found {:?}",
            expected, actual
        )));
    }

    Ok(())
}
