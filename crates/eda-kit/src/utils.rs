//! Shared utilities for EDA operations.
//!
//! Column selection by dtype, value extraction from polars series, and
//! small formatting helpers used by both the text output and the figures.

use once_cell::sync::Lazy;
use polars::prelude::*;
use regex::Regex;

// Runs of characters that cannot appear in a figure file name
static NON_SLUG_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-z0-9]+").expect("Invalid regex: slug separator"));

// =============================================================================
// Data Type Utilities
// =============================================================================

/// Category of a data type for EDA purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DtypeCategory {
    /// Integer or floating point numbers
    Numeric,
    /// Free text or categorical levels
    Categorical,
    /// Boolean type
    Boolean,
    /// Date or datetime types
    Datetime,
    /// Other/unknown types
    Other,
}

/// Check if a DataType is numeric (integer or float).
#[inline]
pub fn is_numeric_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float32
            | DataType::Float64
    )
}

/// Check if a DataType holds text or categorical levels.
#[inline]
pub fn is_categorical_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::String | DataType::Categorical(_, _) | DataType::Enum(_, _)
    )
}

/// Check if a DataType is a datetime type.
#[inline]
pub fn is_datetime_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Datetime(_, _) | DataType::Date | DataType::Time
    )
}

/// Get the category of a DataType.
pub fn get_dtype_category(dtype: &DataType) -> DtypeCategory {
    if is_numeric_dtype(dtype) {
        DtypeCategory::Numeric
    } else if is_categorical_dtype(dtype) {
        DtypeCategory::Categorical
    } else if matches!(dtype, DataType::Boolean) {
        DtypeCategory::Boolean
    } else if is_datetime_dtype(dtype) {
        DtypeCategory::Datetime
    } else {
        DtypeCategory::Other
    }
}

/// Names of the columns whose dtype falls in `category`, in frame order.
pub fn select_columns(df: &DataFrame, category: DtypeCategory) -> Vec<String> {
    df.get_columns()
        .iter()
        .filter(|col| get_dtype_category(col.dtype()) == category)
        .map(|col| col.name().to_string())
        .collect()
}

/// Names of the numeric columns, in frame order.
pub fn numeric_columns(df: &DataFrame) -> Vec<String> {
    select_columns(df, DtypeCategory::Numeric)
}

/// Names of the text/categorical columns, in frame order.
pub fn categorical_columns(df: &DataFrame) -> Vec<String> {
    select_columns(df, DtypeCategory::Categorical)
}

// =============================================================================
// Series Extraction Utilities
// =============================================================================

/// Look up a column and return it as a materialized series.
pub fn column_series<'a>(df: &'a DataFrame, name: &str) -> crate::Result<&'a Series> {
    df.column(name)
        .map(|col| col.as_materialized_series())
        .map_err(|_| crate::EdaError::ColumnNotFound(name.to_string()))
}

/// Finite values of a numeric series as `f64`. Nulls, NaN and infinities
/// are dropped.
pub fn numeric_values(series: &Series) -> PolarsResult<Vec<f64>> {
    Ok(numeric_values_with_nulls(series)?
        .into_iter()
        .flatten()
        .collect())
}

/// All values of a numeric series as `f64`, with nulls and non-finite values
/// as `None` in place.
pub fn numeric_values_with_nulls(series: &Series) -> PolarsResult<Vec<Option<f64>>> {
    let casted = series.cast(&DataType::Float64)?;
    Ok(casted
        .f64()?
        .into_iter()
        .map(|value| value.filter(|v| v.is_finite()))
        .collect())
}

/// Non-null values of a series rendered as strings.
pub fn string_values(series: &Series) -> PolarsResult<Vec<String>> {
    let casted = series.cast(&DataType::String)?;
    Ok(casted
        .str()?
        .into_iter()
        .flatten()
        .map(|value| value.to_string())
        .collect())
}

/// Missing mask of a series, `true` where the value is null or, for float
/// columns, NaN.
pub fn null_mask(series: &Series) -> Vec<bool> {
    if matches!(series.dtype(), DataType::Float32 | DataType::Float64)
        && let Ok(casted) = series.cast(&DataType::Float64)
        && let Ok(values) = casted.f64()
    {
        return values
            .into_iter()
            .map(|value| value.is_none_or(f64::is_nan))
            .collect();
    }

    series
        .is_null()
        .into_iter()
        .map(|value| value.unwrap_or(false))
        .collect()
}

/// Number of missing values in a series, counting NaN as missing.
pub fn missing_count(series: &Series) -> usize {
    null_mask(series).into_iter().filter(|missing| *missing).count()
}

// =============================================================================
// Formatting Utilities
// =============================================================================

/// Turn a column name into a file-name-safe slug.
///
/// ```rust,ignore
/// assert_eq!(slugify("Annual Income ($)"), "annual_income");
/// ```
pub fn slugify(name: &str) -> String {
    let lower = name.to_lowercase();
    let slug = NON_SLUG_CHARS.replace_all(&lower, "_");
    let slug = slug.trim_matches('_');
    if slug.is_empty() {
        "column".to_string()
    } else {
        slug.to_string()
    }
}

/// Truncate a string to max characters with ellipsis.
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Format a float the way summary tables show it (6 significant decimals, no noise).
pub fn format_stat(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else {
        let formatted = format!("{:.6}", value);
        let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
        if trimmed == "-0" {
            "0".to_string()
        } else {
            trimmed.to_string()
        }
    }
}
