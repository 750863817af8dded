//! Missing-value counts and the null-mask matrix behind the missing heatmap.

use crate::utils::{missing_count, null_mask};
use polars::prelude::*;
use serde::{Deserialize, Serialize};

/// Missing values in one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissingColumn {
    pub column: String,
    pub missing_count: usize,
    pub missing_percentage: f64,
}

/// Null mask of a whole frame, possibly grouped into row bands.
///
/// `cells[band][column]` is the fraction of missing values of that column
/// within the band, so an ungrouped matrix holds only `0.0` and `1.0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissingMatrix {
    pub columns: Vec<String>,
    pub rows_per_band: usize,
    pub cells: Vec<Vec<f64>>,
}

impl MissingMatrix {
    pub fn band_count(&self) -> usize {
        self.cells.len()
    }
}

/// Per-column missing counts, in frame order. NaN counts as missing.
pub fn missing_counts(df: &DataFrame) -> Vec<MissingColumn> {
    let rows = df.height();
    df.get_columns()
        .iter()
        .map(|col| {
            let missing = missing_count(col.as_materialized_series());
            MissingColumn {
                column: col.name().to_string(),
                missing_count: missing,
                missing_percentage: if rows > 0 {
                    (missing as f64 / rows as f64) * 100.0
                } else {
                    0.0
                },
            }
        })
        .collect()
}

/// Build the missing-value matrix with at most `max_bands` row bands.
pub fn missing_matrix(df: &DataFrame, max_bands: usize) -> MissingMatrix {
    let rows = df.height();
    let rows_per_band = rows.div_ceil(max_bands.max(1)).max(1);
    let band_count = rows.div_ceil(rows_per_band);

    let columns: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect();
    let mut cells = vec![vec![0.0; columns.len()]; band_count];

    for (col_idx, col) in df.get_columns().iter().enumerate() {
        let mask = null_mask(col.as_materialized_series());
        for (band_idx, band) in mask.chunks(rows_per_band).enumerate() {
            let missing = band.iter().filter(|is_null| **is_null).count();
            cells[band_idx][col_idx] = missing as f64 / band.len() as f64;
        }
    }

    MissingMatrix {
        columns,
        rows_per_band,
        cells,
    }
}
