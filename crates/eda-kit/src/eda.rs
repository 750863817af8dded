//! The [`Eda`] helper: one borrowed dataset, seven inspection operations.
//!
//! Text-producing operations return a result struct whose `Display` is the
//! console summary. Plotting operations write SVG files under
//! [`EdaConfig::output_dir`] and return what they wrote.

use crate::config::EdaConfig;
use crate::error::{EdaError, Result, ResultExt};
use crate::overview::{DatasetOverview, overview};
use crate::plot::{
    Figure, FigureKind, FigureNamer, draw_boxplot, draw_correlation_heatmap, draw_countplot,
    draw_histogram, draw_missing_heatmap,
};
use crate::report::EdaReport;
use crate::stats::{
    box_summary, correlation_matrix, describe_categorical, describe_numeric, fold_rare_levels,
    gaussian_kde, histogram, missing_counts, missing_matrix, value_counts_in_order,
};
use crate::types::{
    CorrelationReport, FigureSet, MissingValuesReport, OutlierReport, STRONGEST_PAIRS,
    SummaryStatistics,
};
use crate::utils::{
    categorical_columns, column_series, numeric_columns, numeric_values,
    numeric_values_with_nulls, string_values,
};
use chrono::Local;
use polars::prelude::*;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Exploratory analysis over a borrowed dataset.
///
/// The dataset is never mutated or copied.
///
/// # Example
///
/// ```rust,ignore
/// use eda_kit::Eda;
///
/// let eda = Eda::new(&df);
/// println!("{}", eda.overview());
/// println!("{}", eda.summary_statistics()?);
/// let figures = eda.plot_numerical_distribution()?;
/// ```
#[derive(Debug, Clone)]
pub struct Eda<'a> {
    data: &'a DataFrame,
    config: EdaConfig,
}

static_assertions::assert_impl_all!(Eda<'static>: Send, Sync);

impl<'a> Eda<'a> {
    /// Analyse `data` with the default configuration.
    pub fn new(data: &'a DataFrame) -> Self {
        Self {
            data,
            config: EdaConfig::default(),
        }
    }

    /// Analyse `data` with a custom configuration, validated first.
    pub fn with_config(data: &'a DataFrame, config: EdaConfig) -> Result<Self> {
        config
            .validate()
            .map_err(|e| EdaError::InvalidConfig(e.to_string()))?;
        Ok(Self { data, config })
    }

    pub fn data(&self) -> &DataFrame {
        self.data
    }

    pub fn config(&self) -> &EdaConfig {
        &self.config
    }

    /// Rows, columns, column types and missing counts.
    pub fn overview(&self) -> DatasetOverview {
        overview(self.data)
    }

    /// `describe()`-style statistics for numeric and categorical columns.
    pub fn summary_statistics(&self) -> Result<SummaryStatistics> {
        let mut numeric = Vec::new();
        for name in numeric_columns(self.data) {
            let series = column_series(self.data, &name)?;
            let values = numeric_values(series).context(format!("Reading column '{}'", name))?;
            numeric.push(describe_numeric(&name, &values));
        }

        let mut categorical = Vec::new();
        for name in categorical_columns(self.data) {
            let series = column_series(self.data, &name)?;
            let values = string_values(series).context(format!("Reading column '{}'", name))?;
            categorical.push(describe_categorical(&name, &values));
        }

        debug!(
            "Described {} numeric and {} categorical columns",
            numeric.len(),
            categorical.len()
        );
        Ok(SummaryStatistics {
            numeric,
            categorical,
        })
    }

    /// Histogram with a density overlay for each numeric column.
    pub fn plot_numerical_distribution(&self) -> Result<FigureSet> {
        let mut namer = FigureNamer::new(&self.config.output_dir)?;
        let mut figures = Vec::new();

        for name in numeric_columns(self.data) {
            let series = column_series(self.data, &name)?;
            let values = numeric_values(series).context(format!("Reading column '{}'", name))?;
            if values.is_empty() {
                warn!("Skipping distribution of '{}': no non-null values", name);
                continue;
            }

            let bins = histogram(&values, self.config.histogram_bins);
            let kde = if self.config.kde {
                let bin_width = bins.first().map(|b| b.end - b.start).unwrap_or(1.0);
                gaussian_kde(&values, values.len() as f64 * bin_width)
            } else {
                Vec::new()
            };
            debug!("Column '{}': {} bins, {} kde points", name, bins.len(), kde.len());

            let title = format!("Distribution of {}", name);
            let path = namer.path_for(FigureKind::Distribution, Some(&name));
            draw_histogram(&path, self.config.column_figure, &title, &name, &bins, &kde)?;
            info!("Figure written: {}", path.display());

            figures.push(Figure {
                kind: FigureKind::Distribution,
                title,
                column: Some(name),
                path,
            });
        }

        Ok(FigureSet(figures))
    }

    /// Count plot of the levels of each categorical column.
    pub fn plot_categorical_distribution(&self) -> Result<FigureSet> {
        let mut namer = FigureNamer::new(&self.config.output_dir)?;
        let mut figures = Vec::new();

        for name in categorical_columns(self.data) {
            let series = column_series(self.data, &name)?;
            let values = string_values(series).context(format!("Reading column '{}'", name))?;
            let counts = value_counts_in_order(&values);
            if counts.len() > self.config.max_category_levels {
                debug!(
                    "Column '{}': folding {} levels into {}",
                    name,
                    counts.len(),
                    self.config.max_category_levels
                );
            }
            let counts = fold_rare_levels(&counts, self.config.max_category_levels);

            let title = format!("Distribution of {}", name);
            let path = namer.path_for(FigureKind::CategoryCounts, Some(&name));
            draw_countplot(&path, self.config.column_figure, &title, &name, &counts)?;
            info!("Figure written: {}", path.display());

            figures.push(Figure {
                kind: FigureKind::CategoryCounts,
                title,
                column: Some(name),
                path,
            });
        }

        Ok(FigureSet(figures))
    }

    /// Pearson correlation of the numeric columns and its annotated heatmap.
    ///
    /// With no numeric columns the matrix is empty and nothing is drawn.
    pub fn correlation_analysis(&self) -> Result<CorrelationReport> {
        let columns = numeric_columns(self.data);
        let mut series = Vec::with_capacity(columns.len());
        for name in &columns {
            let values = numeric_values_with_nulls(column_series(self.data, name)?)
                .context(format!("Reading column '{}'", name))?;
            series.push(values);
        }

        let matrix = correlation_matrix(columns, &series);
        let strongest_pairs = matrix.strongest_pairs(STRONGEST_PAIRS);

        if matrix.is_empty() {
            warn!("No numeric columns, correlation heatmap skipped");
            return Ok(CorrelationReport {
                matrix,
                strongest_pairs,
                figure: None,
            });
        }

        let mut namer = FigureNamer::new(&self.config.output_dir)?;
        let path = namer.path_for(FigureKind::CorrelationHeatmap, None);
        draw_correlation_heatmap(
            &path,
            self.config.heatmap_figure,
            &matrix,
            self.config.annotate_correlations,
        )?;
        info!("Figure written: {}", path.display());

        Ok(CorrelationReport {
            matrix,
            strongest_pairs,
            figure: Some(Figure {
                kind: FigureKind::CorrelationHeatmap,
                title: "Correlation Heatmap".to_string(),
                column: None,
                path,
            }),
        })
    }

    /// Missing counts per column and a heatmap of the null mask.
    pub fn identify_missing_values(&self) -> Result<MissingValuesReport> {
        let columns = missing_counts(self.data);
        let total_missing: usize = columns.iter().map(|c| c.missing_count).sum();
        let cells = self.data.height() * self.data.width();
        let total_missing_percentage = if cells > 0 {
            (total_missing as f64 / cells as f64) * 100.0
        } else {
            0.0
        };

        if cells == 0 {
            warn!("Dataset has no cells, missing-value heatmap skipped");
            return Ok(MissingValuesReport {
                columns,
                total_missing,
                total_missing_percentage,
                rows_per_band: 1,
                figure: None,
            });
        }

        let matrix = missing_matrix(self.data, self.config.missing_heatmap_max_rows);
        if matrix.rows_per_band > 1 {
            debug!(
                "Grouping {} rows into {} bands",
                self.data.height(),
                matrix.band_count()
            );
        }

        let mut namer = FigureNamer::new(&self.config.output_dir)?;
        let path = namer.path_for(FigureKind::MissingValuesHeatmap, None);
        draw_missing_heatmap(&path, self.config.heatmap_figure, &matrix)?;
        info!("Figure written: {}", path.display());

        Ok(MissingValuesReport {
            columns,
            total_missing,
            total_missing_percentage,
            rows_per_band: matrix.rows_per_band,
            figure: Some(Figure {
                kind: FigureKind::MissingValuesHeatmap,
                title: "Missing Values Heatmap".to_string(),
                column: None,
                path,
            }),
        })
    }

    /// Boxplot of each numeric column, flagging values beyond 1.5 IQR.
    pub fn detect_outliers(&self) -> Result<OutlierReport> {
        let mut namer = FigureNamer::new(&self.config.output_dir)?;
        let mut columns = Vec::new();
        let mut figures = Vec::new();

        for name in numeric_columns(self.data) {
            let series = column_series(self.data, &name)?;
            let values = numeric_values(series).context(format!("Reading column '{}'", name))?;
            let Some(summary) = box_summary(&name, &values) else {
                warn!("Skipping outliers of '{}': no non-null values", name);
                continue;
            };

            let title = format!("Outliers in {}", name);
            let path = namer.path_for(FigureKind::Boxplot, Some(&name));
            draw_boxplot(&path, self.config.column_figure, &title, &name, &summary)?;
            info!(
                "Figure written: {} ({} outliers)",
                path.display(),
                summary.outlier_count()
            );

            columns.push(summary);
            figures.push(Figure {
                kind: FigureKind::Boxplot,
                title,
                column: Some(name),
                path,
            });
        }

        Ok(OutlierReport { columns, figures })
    }

    /// Run all seven operations in order and collect their results.
    pub fn run_all(&self) -> Result<EdaReport> {
        let start = Instant::now();
        info!(
            "Running full EDA on {} rows x {} columns",
            self.data.height(),
            self.data.width()
        );

        let overview = self.overview();
        let summary_statistics = self.summary_statistics().context("Summary statistics")?;
        let numerical_distributions = self
            .plot_numerical_distribution()
            .context("Numerical distributions")?;
        let categorical_distributions = self
            .plot_categorical_distribution()
            .context("Categorical distributions")?;
        let correlation = self.correlation_analysis().context("Correlation analysis")?;
        let missing_values = self.identify_missing_values().context("Missing values")?;
        let outliers = self.detect_outliers().context("Outlier detection")?;

        let duration_ms = start.elapsed().as_millis() as u64;
        info!("EDA finished in {}ms", duration_ms);

        Ok(EdaReport {
            generated_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            input_file: None,
            duration_ms,
            overview,
            summary_statistics,
            numerical_distributions,
            categorical_distributions,
            correlation,
            missing_values,
            outliers,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::path::Path;

    fn titanic() -> DataFrame {
        df![
            "Survived" => [0i64, 1, 1, 1, 0, 0, 0, 0, 1, 1],
            "Age" => [Some(22.0), Some(38.0), Some(26.0), Some(35.0), Some(35.0), None, Some(54.0), Some(2.0), Some(27.0), Some(14.0)],
            "Fare" => [7.25, 71.28, 7.92, 53.1, 8.05, 8.46, 51.86, 21.07, 11.13, 512.33],
            "Sex" => ["male", "female", "female", "female", "male", "male", "male", "male", "female", "female"],
            "Embarked" => [Some("S"), Some("C"), Some("S"), Some("S"), Some("S"), Some("Q"), Some("S"), Some("S"), None, Some("C")],
        ]
        .unwrap()
    }

    fn eda_in<'a>(df: &'a DataFrame, dir: &Path) -> Eda<'a> {
        let config = EdaConfig::builder().output_dir(dir).build().unwrap();
        Eda::with_config(df, config).unwrap()
    }

    #[test]
    fn test_with_config_rejects_invalid() {
        let df = titanic();
        let config = EdaConfig {
            histogram_bins: 0,
            ..EdaConfig::default()
        };
        let err = Eda::with_config(&df, config).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_CONFIG");
    }

    #[test]
    fn test_overview_matches_frame() {
        let df = titanic();
        let overview = Eda::new(&df).overview();

        assert_eq!(overview.rows, 10);
        assert_eq!(overview.columns, 5);
        assert_eq!(overview.missing[1].missing_count, 1);
        assert_eq!(overview.missing[4].missing_count, 1);
    }

    #[test]
    fn test_summary_statistics_splits_columns() {
        let df = titanic();
        let summary = Eda::new(&df).summary_statistics().unwrap();

        let names: Vec<&str> = summary.numeric.iter().map(|d| d.column.as_str()).collect();
        assert_eq!(names, vec!["Survived", "Age", "Fare"]);
        assert_eq!(summary.numeric[1].count, 9);

        assert_eq!(summary.categorical.len(), 2);
        assert_eq!(summary.categorical[0].unique, 2);
        assert_eq!(summary.categorical[1].count, 9);
        assert_eq!(summary.categorical[1].top.as_deref(), Some("S"));
    }

    #[test]
    fn test_plot_numerical_distribution_one_figure_per_column() {
        let tmp = tempfile::tempdir().unwrap();
        let df = titanic();
        let figures = eda_in(&df, tmp.path()).plot_numerical_distribution().unwrap();

        assert_eq!(figures.len(), 3);
        let first = figures.iter().next().unwrap();
        assert_eq!(first.title, "Distribution of Survived");
        assert_eq!(first.path, tmp.path().join("distribution_survived.svg"));
        assert!(figures.iter().all(|f| f.path.exists()));
    }

    #[test]
    fn test_plot_categorical_distribution() {
        let tmp = tempfile::tempdir().unwrap();
        let df = titanic();
        let figures = eda_in(&df, tmp.path()).plot_categorical_distribution().unwrap();

        let titles: Vec<&str> = figures.iter().map(|f| f.title.as_str()).collect();
        assert_eq!(titles, vec!["Distribution of Sex", "Distribution of Embarked"]);
        assert!(tmp.path().join("counts_embarked.svg").exists());
    }

    #[test]
    fn test_correlation_analysis() {
        let tmp = tempfile::tempdir().unwrap();
        let df = titanic();
        let report = eda_in(&df, tmp.path()).correlation_analysis().unwrap();

        assert_eq!(report.matrix.columns.len(), 3);
        assert!((report.matrix.get("Fare", "Fare").unwrap() - 1.0).abs() < 1e-12);
        assert_eq!(report.matrix.get("Age", "Fare"), report.matrix.get("Fare", "Age"));
        assert!(report.strongest_pairs.len() <= STRONGEST_PAIRS);
        let figure = report.figure.unwrap();
        assert_eq!(figure.path, tmp.path().join("correlation_heatmap.svg"));
        assert!(figure.path.exists());
    }

    #[test]
    fn test_correlation_without_numeric_columns_draws_nothing() {
        let tmp = tempfile::tempdir().unwrap();
        let df = df!["name" => ["a", "b"]].unwrap();
        let report = eda_in(&df, tmp.path()).correlation_analysis().unwrap();

        assert!(report.matrix.is_empty());
        assert!(report.figure.is_none());
        assert!(!tmp.path().join("correlation_heatmap.svg").exists());
    }

    #[test]
    fn test_identify_missing_values() {
        let tmp = tempfile::tempdir().unwrap();
        let df = titanic();
        let report = eda_in(&df, tmp.path()).identify_missing_values().unwrap();

        assert_eq!(report.total_missing, 2);
        assert!((report.total_missing_percentage - 4.0).abs() < 1e-9);
        assert_eq!(report.rows_per_band, 1);
        assert!(report.figure.unwrap().path.exists());
    }

    #[test]
    fn test_identify_missing_values_bands_tall_frames() {
        let tmp = tempfile::tempdir().unwrap();
        let df = titanic();
        let config = EdaConfig::builder()
            .output_dir(tmp.path())
            .missing_heatmap_max_rows(4)
            .build()
            .unwrap();
        let report = Eda::with_config(&df, config)
            .unwrap()
            .identify_missing_values()
            .unwrap();

        assert_eq!(report.rows_per_band, 3);
    }

    #[test]
    fn test_detect_outliers() {
        let tmp = tempfile::tempdir().unwrap();
        let df = titanic();
        let report = eda_in(&df, tmp.path()).detect_outliers().unwrap();

        assert_eq!(report.figures.len(), 3);
        let fare = report.columns.iter().find(|c| c.column == "Fare").unwrap();
        assert!(fare.outliers.contains(&512.33));
        assert_eq!(report.figures[2].title, "Outliers in Fare");
    }

    #[test]
    fn test_all_null_numeric_column_is_skipped() {
        let tmp = tempfile::tempdir().unwrap();
        let df = df![
            "empty" => [None::<f64>, None, None],
            "full" => [1.0, 2.0, 3.0],
        ]
        .unwrap();
        let eda = eda_in(&df, tmp.path());

        assert_eq!(eda.plot_numerical_distribution().unwrap().len(), 1);
        assert_eq!(eda.detect_outliers().unwrap().columns.len(), 1);
    }

    #[test]
    fn test_nan_and_infinity_are_left_out() {
        let tmp = tempfile::tempdir().unwrap();
        let df = df![
            "x" => [1.0, f64::NAN, 3.0, 4.0],
            "y" => [1.0, f64::INFINITY, 3.0, 4.0],
            "only_nan" => [f64::NAN, f64::NAN, f64::NAN, f64::NAN],
        ]
        .unwrap();
        let eda = eda_in(&df, tmp.path());

        let summary = eda.summary_statistics().unwrap();
        assert_eq!(summary.numeric[0].count, 3);
        assert_eq!(summary.numeric[1].count, 3);
        assert_eq!(summary.numeric[1].max, Some(4.0));
        assert_eq!(summary.numeric[2].count, 0);

        let missing: Vec<usize> = eda
            .overview()
            .missing
            .iter()
            .map(|m| m.missing_count)
            .collect();
        assert_eq!(missing, vec![1, 0, 4]);

        assert_eq!(eda.plot_numerical_distribution().unwrap().len(), 2);
        assert_eq!(eda.detect_outliers().unwrap().columns.len(), 2);

        let correlation = eda.correlation_analysis().unwrap();
        assert!((correlation.matrix.get("x", "y").unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_run_all_collects_everything() {
        let tmp = tempfile::tempdir().unwrap();
        let df = titanic();
        let report = eda_in(&df, tmp.path()).run_all().unwrap();

        assert_eq!(report.overview.rows, 10);
        assert_eq!(report.numerical_distributions.len(), 3);
        assert_eq!(report.categorical_distributions.len(), 2);
        assert!(report.correlation.figure.is_some());
        assert_eq!(report.figure_count(), 3 + 2 + 1 + 1 + 3);
    }
}
