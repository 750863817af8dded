//! Dataset overviews: shape, column types, missing counts and row previews.

use crate::error::Result;
use crate::stats::{MissingColumn, missing_counts};
use polars::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use std::fmt;
use tracing::debug;

/// Rows shown by [`dataset_overview`].
pub const DEFAULT_PREVIEW_ROWS: usize = 5;

/// Name and polars dtype of one column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnDtype {
    pub column: String,
    pub dtype: String,
}

/// Shape, column types and missing counts of a dataset.
#[derive(Debug, Clone, Serialize)]
pub struct DatasetOverview {
    pub rows: usize,
    pub columns: usize,
    pub dtypes: Vec<ColumnDtype>,
    pub missing: Vec<MissingColumn>,
}

/// Shape, column types and a few rows of a dataset.
#[derive(Debug, Clone, Serialize)]
pub struct DatasetPreview {
    pub rows: usize,
    pub columns: usize,
    pub dtypes: Vec<ColumnDtype>,
    /// Whether the preview rows are a random sample rather than the head.
    pub sampled: bool,
    /// Preview rows rendered as text, nulls as `null`.
    pub sample_rows: Vec<Vec<String>>,
    #[serde(skip)]
    frame: DataFrame,
}

impl DatasetPreview {
    /// The preview rows as a frame.
    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }
}

fn column_dtypes(df: &DataFrame) -> Vec<ColumnDtype> {
    df.get_columns()
        .iter()
        .map(|col| ColumnDtype {
            column: col.name().to_string(),
            dtype: col.dtype().to_string(),
        })
        .collect()
}

/// Build the overview of a dataset.
pub fn overview(df: &DataFrame) -> DatasetOverview {
    DatasetOverview {
        rows: df.height(),
        columns: df.width(),
        dtypes: column_dtypes(df),
        missing: missing_counts(df),
    }
}

/// Overview with the first [`DEFAULT_PREVIEW_ROWS`] rows.
pub fn dataset_overview(df: &DataFrame) -> Result<DatasetPreview> {
    dataset_overview_with_rows(df, DEFAULT_PREVIEW_ROWS)
}

/// Overview with the first `rows` rows.
pub fn dataset_overview_with_rows(df: &DataFrame, rows: usize) -> Result<DatasetPreview> {
    build_preview(df, df.head(Some(rows)), false)
}

/// Overview with a reproducible random sample of `rows` rows, kept in
/// their original order.
pub fn dataset_overview_sampled(df: &DataFrame, rows: usize, seed: u64) -> Result<DatasetPreview> {
    let height = df.height();
    let amount = rows.min(height);
    let mut rng = StdRng::seed_from_u64(seed);
    let picked = rand::seq::index::sample(&mut rng, height, amount);

    let mut mask = vec![false; height];
    for idx in picked.iter() {
        mask[idx] = true;
    }
    debug!("Sampled {} of {} rows with seed {}", amount, height, seed);

    let mask = BooleanChunked::from_slice("mask".into(), &mask);
    let sample = df.filter(&mask)?;
    build_preview(df, sample, true)
}

fn build_preview(df: &DataFrame, frame: DataFrame, sampled: bool) -> Result<DatasetPreview> {
    let mut rendered: Vec<Vec<String>> = Vec::with_capacity(frame.width());
    for col in frame.get_columns() {
        let as_text = col.as_materialized_series().cast(&DataType::String)?;
        let values = as_text
            .str()?
            .into_iter()
            .map(|v| v.unwrap_or("null").to_string())
            .collect();
        rendered.push(values);
    }

    // Column-major to row-major
    let sample_rows = (0..frame.height())
        .map(|row| rendered.iter().map(|col| col[row].clone()).collect())
        .collect();

    Ok(DatasetPreview {
        rows: df.height(),
        columns: df.width(),
        dtypes: column_dtypes(df),
        sampled,
        sample_rows,
        frame,
    })
}

fn write_shape(f: &mut fmt::Formatter<'_>, rows: usize, columns: usize) -> fmt::Result {
    writeln!(f, "\nDataset Overview:\n")?;
    writeln!(f, "Number of Rows: {}", rows)?;
    writeln!(f, "Number of Columns: {}", columns)
}

fn name_width<'a>(names: impl Iterator<Item = &'a str>) -> usize {
    names.map(|n| n.chars().count()).max().unwrap_or(0) + 4
}

fn write_dtypes(f: &mut fmt::Formatter<'_>, dtypes: &[ColumnDtype]) -> fmt::Result {
    let width = name_width(dtypes.iter().map(|d| d.column.as_str()));
    for entry in dtypes {
        writeln!(f, "{:<width$}{}", entry.column, entry.dtype, width = width)?;
    }
    Ok(())
}

impl fmt::Display for DatasetOverview {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_shape(f, self.rows, self.columns)?;

        writeln!(f, "\nColumn Data Types:\n")?;
        write_dtypes(f, &self.dtypes)?;

        writeln!(f, "\nMissing Values per Column:\n")?;
        let width = name_width(self.missing.iter().map(|m| m.column.as_str()));
        for entry in &self.missing {
            writeln!(
                f,
                "{:<width$}{}",
                entry.column,
                entry.missing_count,
                width = width
            )?;
        }
        Ok(())
    }
}

impl fmt::Display for DatasetPreview {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_shape(f, self.rows, self.columns)?;

        writeln!(f, "\nColumn Data Types:")?;
        write_dtypes(f, &self.dtypes)?;

        if self.sampled {
            writeln!(f, "\nSample Data (random):")?;
        } else {
            writeln!(f, "\nSample Data:")?;
        }
        writeln!(f, "{}", self.frame)
    }
}
