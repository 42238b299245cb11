//! Loading the headerless Adult CSV into a typed `DataFrame`.
//!
//! Every cell is read as text first so that the leading space after each
//! comma can be stripped before numeric conversion. Declared-numeric columns
//! become `Int64` (or `Float64` when any value has a fraction); the missing
//! token and blank cells become null there. Text columns keep the token
//! verbatim, which is what the missing-value analysis counts.

use crate::error::{AnalysisError, Result, ResultExt};
use crate::schema::{ADULT_SCHEMA, ColumnKind};
use polars::io::csv::read::CsvReadOptions;
use polars::prelude::*;
use std::io::Cursor;
use std::path::Path;
use tracing::{debug, info, warn};

/// Loader for the Adult census file format.
pub struct AdultLoader;

impl AdultLoader {
    /// Load and type an Adult CSV file from disk.
    pub fn load(path: impl AsRef<Path>, missing_token: &str) -> Result<DataFrame> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(AnalysisError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("input file not found: {}", path.display()),
            )));
        }

        info!("Loading dataset from: {}", path.display());
        let raw = CsvReadOptions::default()
            .with_has_header(false)
            .with_infer_schema_length(Some(0))
            .try_into_reader_with_file_path(Some(path.to_path_buf()))?
            .finish()
            .context(format!("Failed to read {}", path.display()))?;

        let df = Self::prepare(raw, missing_token)?;
        info!("Dataset loaded with shape: {:?}", df.shape());
        Ok(df)
    }

    /// Parse Adult CSV content held in memory.
    pub fn from_csv_str(content: &str, missing_token: &str) -> Result<DataFrame> {
        let cursor = Cursor::new(content.to_string());
        let raw = CsvReadOptions::default()
            .with_has_header(false)
            .with_infer_schema_length(Some(0))
            .into_reader_with_file_handle(cursor)
            .finish()?;

        Self::prepare(raw, missing_token)
    }

    /// Name, trim and type the raw all-text frame.
    fn prepare(raw: DataFrame, missing_token: &str) -> Result<DataFrame> {
        if raw.width() != ADULT_SCHEMA.len() {
            return Err(AnalysisError::InvalidInput(format!(
                "expected {} columns, found {}",
                ADULT_SCHEMA.len(),
                raw.width()
            )));
        }

        let raw = Self::drop_blank_rows(raw)?;
        let mut columns = Vec::with_capacity(ADULT_SCHEMA.len());
        for (column, (name, kind)) in raw.get_columns().iter().zip(ADULT_SCHEMA) {
            let trimmed: Vec<Option<&str>> = column
                .str()?
                .into_iter()
                .map(|value| value.map(str::trim_start))
                .collect();

            let series = match kind {
                ColumnKind::Text => Series::new(name.into(), trimmed),
                ColumnKind::Numeric => Self::to_numeric(name, &trimmed, missing_token),
            };
            columns.push(series.into_column());
        }

        Ok(DataFrame::new(columns)?)
    }

    /// Drop rows where every cell is empty (the file ends with a blank line).
    fn drop_blank_rows(raw: DataFrame) -> Result<DataFrame> {
        let mut keep = vec![false; raw.height()];
        for column in raw.get_columns() {
            for (flag, value) in keep.iter_mut().zip(column.str()?.into_iter()) {
                if value.is_some_and(|v| !v.trim().is_empty()) {
                    *flag = true;
                }
            }
        }

        let blank = keep.iter().filter(|k| !**k).count();
        if blank == 0 {
            return Ok(raw);
        }

        debug!("Dropping {} blank rows", blank);
        let mask = BooleanChunked::from_slice("mask".into(), &keep);
        Ok(raw.filter(&mask)?)
    }

    /// Convert a declared-numeric column, falling back to text when a value
    /// cannot be parsed so the analyzers can report it.
    fn to_numeric(name: &str, values: &[Option<&str>], missing_token: &str) -> Series {
        let cells: Vec<Option<&str>> = values
            .iter()
            .map(|value| value.map(str::trim_end))
            .map(|value| {
                value.filter(|v| !v.is_empty() && *v != missing_token && !is_non_finite(v))
            })
            .collect();

        let as_ints: Option<Vec<Option<i64>>> = cells
            .iter()
            .map(|cell| match cell {
                None => Some(None),
                Some(text) => text.parse::<i64>().ok().map(Some),
            })
            .collect();
        if let Some(ints) = as_ints {
            return Series::new(name.into(), ints);
        }

        let as_floats: Option<Vec<Option<f64>>> = cells
            .iter()
            .map(|cell| match cell {
                None => Some(None),
                Some(text) => text.parse::<f64>().ok().map(Some),
            })
            .collect();
        if let Some(floats) = as_floats {
            debug!("Column '{}' parsed as floating point", name);
            return Series::new(name.into(), floats);
        }

        warn!(
            "Column '{}' is declared numeric but contains non-numeric values; keeping it as text",
            name
        );
        Series::new(name.into(), values.to_vec())
    }
}

/// `nan`, `inf` and friends parse as floats but carry no value.
fn is_non_finite(text: &str) -> bool {
    text.parse::<f64>().is_ok_and(|v| !v.is_finite())
}
