//! Loading datasets from disk.
//!
//! CSV files go through several parse strategies before giving up, since
//! real-world exports are often sloppy about quoting. Parquet is read as is.

use crate::error::{EdaError, Result, ResultExt};
use polars::io::csv::read::CsvReadOptions;
use polars::prelude::*;
use std::fs::File;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Rows scanned to infer CSV column types.
const INFER_SCHEMA_ROWS: usize = 100;

/// Load a CSV or Parquet file, chosen by extension.
pub fn load_dataset(path: impl AsRef<Path>) -> Result<DataFrame> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .unwrap_or_default();

    let df = match extension.as_str() {
        "csv" | "txt" => load_csv_with_fallbacks(path)?,
        "parquet" | "pq" => load_parquet(path)?,
        _ => return Err(EdaError::UnsupportedFormat(path.display().to_string())),
    };

    if df.width() == 0 {
        return Err(EdaError::EmptyDataset);
    }

    info!("Dataset loaded: {} rows x {} columns", df.height(), df.width());
    Ok(df)
}

/// Load CSV with multiple fallback strategies
pub fn load_csv_with_fallbacks(path: &Path) -> Result<DataFrame> {
    // Strategy 1: standard parse with quote handling
    match CsvReadOptions::default()
        .with_infer_schema_length(Some(INFER_SCHEMA_ROWS))
        .with_has_header(true)
        .with_parse_options(CsvParseOptions::default().with_quote_char(Some(b'"')))
        .try_into_reader_with_file_path(Some(PathBuf::from(path)))?
        .finish()
    {
        Ok(df) => return Ok(df),
        Err(e) => debug!("Standard CSV parse failed: {}", e),
    }

    // Strategy 2: no quote handling
    match CsvReadOptions::default()
        .with_infer_schema_length(Some(INFER_SCHEMA_ROWS))
        .with_has_header(true)
        .with_parse_options(CsvParseOptions::default().with_quote_char(None))
        .try_into_reader_with_file_path(Some(PathBuf::from(path)))?
        .finish()
    {
        Ok(df) => return Ok(df),
        Err(e) => debug!("CSV parse without quotes failed: {}", e),
    }

    // Strategy 3: pre-clean content
    let content = std::fs::read_to_string(path)?;
    CsvReadOptions::default()
        .with_infer_schema_length(Some(INFER_SCHEMA_ROWS))
        .with_has_header(true)
        .into_reader_with_file_handle(Cursor::new(clean_csv_content(&content)))
        .finish()
        .context(format!("Failed to parse CSV '{}'", path.display()))
}

fn load_parquet(path: &Path) -> Result<DataFrame> {
    let file = File::open(path)?;
    ParquetReader::new(file)
        .finish()
        .context(format!("Failed to read Parquet '{}'", path.display()))
}

/// Collapse doubled quotes and drop blank lines.
fn clean_csv_content(content: &str) -> String {
    content
        .replace("\"\"\"", "\"")
        .replace("\"\"", "\"")
        .lines()
        .filter(|line| !line.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
