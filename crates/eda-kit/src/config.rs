//! Configuration types for the EDA helper.
//!
//! This module provides configuration options using the builder pattern.
//! A configuration can also be read from a JSON file; missing fields fall
//! back to their defaults.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Pixels per inch used when converting figure sizes given in inches.
pub const DPI: u32 = 100;

/// Size of a rendered figure in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FigureSize {
    pub width: u32,
    pub height: u32,
}

impl FigureSize {
    /// Build a size from inches at [`DPI`] pixels per inch.
    pub const fn from_inches(width: u32, height: u32) -> Self {
        Self {
            width: width * DPI,
            height: height * DPI,
        }
    }

    /// Size tuple as expected by the drawing backend.
    pub fn as_tuple(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

/// Configuration for EDA operations.
///
/// Use [`EdaConfig::builder()`] to create a new configuration with a fluent API.
///
/// # Example
///
/// ```rust,ignore
/// use eda_kit::config::EdaConfig;
///
/// let config = EdaConfig::builder()
///     .output_dir("figures")
///     .histogram_bins(20)
///     .build()?;
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EdaConfig {
    /// Directory where figures and reports are written.
    /// Default: "eda_output"
    pub output_dir: PathBuf,

    /// Number of equal-width bins in distribution histograms.
    /// Default: 30
    pub histogram_bins: usize,

    /// Whether to overlay a kernel density estimate on histograms.
    /// Default: true
    pub kde: bool,

    /// Number of rows shown by dataset previews.
    /// Default: 5
    pub preview_rows: usize,

    /// Maximum number of levels drawn in a count plot. The least frequent
    /// levels beyond this are folded into a single "(other)" bar.
    /// Default: 30
    pub max_category_levels: usize,

    /// Maximum number of row bands in the missing-value heatmap. Taller
    /// datasets are grouped so each band covers several rows.
    /// Default: 500
    pub missing_heatmap_max_rows: usize,

    /// Whether to print correlation values inside heatmap cells.
    /// Default: true
    pub annotate_correlations: bool,

    /// Size of per-column figures (distributions, count plots, boxplots).
    /// Default: 8x4 inches
    pub column_figure: FigureSize,

    /// Size of whole-dataset heatmaps.
    /// Default: 10x6 inches
    pub heatmap_figure: FigureSize,
}

impl Default for EdaConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("eda_output"),
            histogram_bins: 30,
            kde: true,
            preview_rows: 5,
            max_category_levels: 30,
            missing_heatmap_max_rows: 500,
            annotate_correlations: true,
            column_figure: FigureSize::from_inches(8, 4),
            heatmap_figure: FigureSize::from_inches(10, 6),
        }
    }
}

impl EdaConfig {
    /// Create a new configuration builder.
    pub fn builder() -> EdaConfigBuilder {
        EdaConfigBuilder::default()
    }

    /// Read a configuration from a JSON file and validate it.
    pub fn from_json_file(path: impl AsRef<Path>) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: Self = serde_json::from_str(&content)?;
        config
            .validate()
            .map_err(|e| crate::EdaError::InvalidConfig(e.to_string()))?;
        Ok(config)
    }

    /// Validate the configuration and return errors if invalid.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.histogram_bins == 0 {
            return Err(ConfigValidationError::ZeroValue("histogram_bins"));
        }

        if self.max_category_levels == 0 {
            return Err(ConfigValidationError::ZeroValue("max_category_levels"));
        }

        if self.missing_heatmap_max_rows == 0 {
            return Err(ConfigValidationError::ZeroValue("missing_heatmap_max_rows"));
        }

        for (field, size) in [
            ("column_figure", self.column_figure),
            ("heatmap_figure", self.heatmap_figure),
        ] {
            if size.width == 0 || size.height == 0 {
                return Err(ConfigValidationError::InvalidFigureSize {
                    field: field.to_string(),
                    width: size.width,
                    height: size.height,
                });
            }
        }

        Ok(())
    }
}

/// Errors that can occur during configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Invalid value for '{0}': must be at least 1")]
    ZeroValue(&'static str),

    #[error("Invalid figure size for '{field}': {width}x{height} (both sides must be non-zero)")]
    InvalidFigureSize {
        field: String,
        width: u32,
        height: u32,
    },
}

/// Builder for [`EdaConfig`] with fluent API.
#[derive(Debug, Default)]
pub struct EdaConfigBuilder {
    output_dir: Option<PathBuf>,
    histogram_bins: Option<usize>,
    kde: Option<bool>,
    preview_rows: Option<usize>,
    max_category_levels: Option<usize>,
    missing_heatmap_max_rows: Option<usize>,
    annotate_correlations: Option<bool>,
    column_figure: Option<FigureSize>,
    heatmap_figure: Option<FigureSize>,
}

impl EdaConfigBuilder {
    /// Start from an existing configuration; builder calls override its values.
    pub fn from_config(config: &EdaConfig) -> Self {
        Self {
            output_dir: Some(config.output_dir.clone()),
            histogram_bins: Some(config.histogram_bins),
            kde: Some(config.kde),
            preview_rows: Some(config.preview_rows),
            max_category_levels: Some(config.max_category_levels),
            missing_heatmap_max_rows: Some(config.missing_heatmap_max_rows),
            annotate_correlations: Some(config.annotate_correlations),
            column_figure: Some(config.column_figure),
            heatmap_figure: Some(config.heatmap_figure),
        }
    }

    /// Set the directory where figures are written.
    pub fn output_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(path.into());
        self
    }

    /// Set the number of histogram bins.
    pub fn histogram_bins(mut self, bins: usize) -> Self {
        self.histogram_bins = Some(bins);
        self
    }

    /// Enable or disable the KDE overlay on histograms.
    pub fn kde(mut self, enable: bool) -> Self {
        self.kde = Some(enable);
        self
    }

    /// Set the number of preview rows.
    pub fn preview_rows(mut self, rows: usize) -> Self {
        self.preview_rows = Some(rows);
        self
    }

    /// Set the maximum number of levels per count plot.
    pub fn max_category_levels(mut self, levels: usize) -> Self {
        self.max_category_levels = Some(levels);
        self
    }

    /// Set the maximum number of row bands in the missing-value heatmap.
    pub fn missing_heatmap_max_rows(mut self, rows: usize) -> Self {
        self.missing_heatmap_max_rows = Some(rows);
        self
    }

    /// Enable or disable value annotations on the correlation heatmap.
    pub fn annotate_correlations(mut self, annotate: bool) -> Self {
        self.annotate_correlations = Some(annotate);
        self
    }

    /// Set the size of per-column figures.
    pub fn column_figure(mut self, size: FigureSize) -> Self {
        self.column_figure = Some(size);
        self
    }

    /// Set the size of heatmap figures.
    pub fn heatmap_figure(mut self, size: FigureSize) -> Self {
        self.heatmap_figure = Some(size);
        self
    }

    /// Build the configuration.
    ///
    /// Returns a validated `EdaConfig` or an error if validation fails.
    pub fn build(self) -> Result<EdaConfig, ConfigValidationError> {
        let defaults = EdaConfig::default();
        let config = EdaConfig {
            output_dir: self.output_dir.unwrap_or(defaults.output_dir),
            histogram_bins: self.histogram_bins.unwrap_or(defaults.histogram_bins),
            kde: self.kde.unwrap_or(defaults.kde),
            preview_rows: self.preview_rows.unwrap_or(defaults.preview_rows),
            max_category_levels: self
                .max_category_levels
                .unwrap_or(defaults.max_category_levels),
            missing_heatmap_max_rows: self
                .missing_heatmap_max_rows
                .unwrap_or(defaults.missing_heatmap_max_rows),
            annotate_correlations: self
                .annotate_correlations
                .unwrap_or(defaults.annotate_correlations),
            column_figure: self.column_figure.unwrap_or(defaults.column_figure),
            heatmap_figure: self.heatmap_figure.unwrap_or(defaults.heatmap_figure),
        };

        config.validate()?;
        Ok(config)
    }
}
