//! SVG figure rendering.
//!
//! Every figure is drawn with the plotters SVG backend and written to disk;
//! callers get back a [`Figure`] describing what was written and where.

pub mod colors;

mod boxplot;
mod countplot;
mod heatmap;
mod histogram;

pub use boxplot::draw_boxplot;
pub use countplot::draw_countplot;
pub use heatmap::{draw_correlation_heatmap, draw_missing_heatmap};
pub use histogram::draw_histogram;

use crate::error::{EdaError, Result};
use crate::utils::slugify;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Font family used for every caption and label.
pub(crate) const FONT: &str = "sans-serif";

/// What a figure shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FigureKind {
    Distribution,
    CategoryCounts,
    CorrelationHeatmap,
    MissingValuesHeatmap,
    Boxplot,
}

impl FigureKind {
    /// File name prefix for figures of this kind.
    pub fn file_prefix(&self) -> &'static str {
        match self {
            Self::Distribution => "distribution",
            Self::CategoryCounts => "counts",
            Self::CorrelationHeatmap => "correlation_heatmap",
            Self::MissingValuesHeatmap => "missing_values_heatmap",
            Self::Boxplot => "outliers",
        }
    }
}

/// A figure written to disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Figure {
    pub kind: FigureKind,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<String>,
    pub path: PathBuf,
}

impl std::fmt::Display for Figure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.title, self.path.display())
    }
}

/// Hands out unique SVG paths inside an output directory.
///
/// Two columns whose names slug to the same text get `_2`, `_3`, ...
/// suffixes instead of overwriting each other.
#[derive(Debug)]
pub struct FigureNamer {
    dir: PathBuf,
    used: HashSet<String>,
}

impl FigureNamer {
    /// Create the output directory if needed.
    pub fn new(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(Self {
            dir,
            used: HashSet::new(),
        })
    }

    pub fn path_for(&mut self, kind: FigureKind, column: Option<&str>) -> PathBuf {
        let stem = match column {
            Some(name) => format!("{}_{}", kind.file_prefix(), slugify(name)),
            None => kind.file_prefix().to_string(),
        };

        let mut candidate = stem.clone();
        let mut suffix = 2;
        while !self.used.insert(candidate.clone()) {
            candidate = format!("{}_{}", stem, suffix);
            suffix += 1;
        }

        self.dir.join(format!("{}.svg", candidate))
    }
}

/// Adapter turning any plotters error into an [`EdaError::Render`].
pub(crate) fn render_err<E: std::fmt::Display>(figure: &Path) -> impl Fn(E) -> EdaError + '_ {
    move |e| EdaError::render(figure.display().to_string(), e)
}

/// Reject an axis range plotters cannot lay out.
pub(crate) fn check_axis_range(figure: &Path, lo: f64, hi: f64) -> Result<()> {
    if lo.is_finite() && hi.is_finite() && lo < hi {
        Ok(())
    } else {
        Err(EdaError::render(
            figure.display().to_string(),
            format!("axis range {}..{} is not finite", lo, hi),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_axis_range() {
        let path = Path::new("figure.svg");
        assert!(check_axis_range(path, 0.0, 1.0).is_ok());
        assert!(check_axis_range(path, 0.0, f64::INFINITY).is_err());
        assert!(check_axis_range(path, f64::NAN, 1.0).is_err());
        assert!(check_axis_range(path, 1.0, 1.0).is_err());
    }

    #[test]
    fn test_namer_creates_dir_and_names() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("figs");
        let mut namer = FigureNamer::new(&dir).unwrap();

        assert!(dir.is_dir());
        assert_eq!(
            namer.path_for(FigureKind::Distribution, Some("Age")),
            dir.join("distribution_age.svg")
        );
        assert_eq!(
            namer.path_for(FigureKind::CorrelationHeatmap, None),
            dir.join("correlation_heatmap.svg")
        );
    }

    #[test]
    fn test_namer_deduplicates_slugs() {
        let tmp = tempfile::tempdir().unwrap();
        let mut namer = FigureNamer::new(tmp.path()).unwrap();

        let first = namer.path_for(FigureKind::Boxplot, Some("Fare (USD)"));
        let second = namer.path_for(FigureKind::Boxplot, Some("fare usd"));
        let third = namer.path_for(FigureKind::Boxplot, Some("FARE-USD"));

        assert_eq!(first, tmp.path().join("outliers_fare_usd.svg"));
        assert_eq!(second, tmp.path().join("outliers_fare_usd_2.svg"));
        assert_eq!(third, tmp.path().join("outliers_fare_usd_3.svg"));
    }

    #[test]
    fn test_figure_kind_serializes_snake_case() {
        let json = serde_json::to_string(&FigureKind::MissingValuesHeatmap).unwrap();
        assert_eq!(json, "\"missing_values_heatmap\"");
    }
}
