//! Combined report of a full EDA run.
//!
//! The same struct backs `--json` output on stdout and the
//! `{name}_eda_report.json` file written by `--emit-report`.

use crate::error::Result;
use crate::overview::DatasetOverview;
use crate::types::{
    CorrelationReport, FigureSet, MissingValuesReport, OutlierReport, SummaryStatistics,
};
use serde::Serialize;
use std::fmt;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

/// Every result of [`Eda::run_all`](crate::Eda::run_all).
#[derive(Debug, Clone, Serialize)]
pub struct EdaReport {
    /// Timestamp when the report was generated
    pub generated_at: String,
    /// Path to the input file, when known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_file: Option<String>,
    /// Total execution time in milliseconds
    pub duration_ms: u64,

    pub overview: DatasetOverview,
    pub summary_statistics: SummaryStatistics,
    pub numerical_distributions: FigureSet,
    pub categorical_distributions: FigureSet,
    pub correlation: CorrelationReport,
    pub missing_values: MissingValuesReport,
    pub outliers: OutlierReport,
}

impl EdaReport {
    /// Record the file the dataset was loaded from.
    pub fn with_input_file(mut self, path: impl Into<String>) -> Self {
        self.input_file = Some(path.into());
        self
    }

    /// Number of figures written during the run.
    pub fn figure_count(&self) -> usize {
        self.numerical_distributions.len()
            + self.categorical_distributions.len()
            + usize::from(self.correlation.figure.is_some())
            + usize::from(self.missing_values.figure.is_some())
            + self.outliers.figures.len()
    }

    /// Write the report as pretty JSON to `{dir}/{base_name}_eda_report.json`.
    pub fn write_to_file(&self, dir: impl AsRef<Path>, base_name: &str) -> Result<PathBuf> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;

        let report_path = dir.join(format!("{}_eda_report.json", base_name));
        let mut file = File::create(&report_path)?;
        file.write_all(serde_json::to_string_pretty(self)?.as_bytes())?;

        info!("Report saved: {}", report_path.display());

        Ok(report_path)
    }
}

impl fmt::Display for EdaReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.overview)?;
        write!(f, "{}", self.summary_statistics)?;

        writeln!(f, "\nNumerical Distributions:")?;
        write!(f, "{}", self.numerical_distributions)?;
        writeln!(f, "\nCategorical Distributions:")?;
        write!(f, "{}", self.categorical_distributions)?;

        write!(f, "{}", self.correlation)?;
        write!(f, "{}", self.missing_values)?;
        write!(f, "{}", self.outliers)?;

        writeln!(
            f,
            "\n{} figures written in {}ms",
            self.figure_count(),
            self.duration_ms
        )
    }
}
