//! Exploratory Data Analysis Helper
//!
//! A thin EDA layer over Polars: summary statistics printed as text and the
//! usual diagnostic figures rendered to SVG.
//!
//! # Overview
//!
//! - **Overview**: shape, column types, missing counts and a row preview
//! - **Summary Statistics**: `describe()`-style tables for numeric and categorical columns
//! - **Distributions**: histograms with a density curve, count plots of categorical levels
//! - **Correlation**: Pearson matrix with an annotated heatmap
//! - **Missing Values**: per-column counts with a null-mask heatmap
//! - **Outliers**: boxplots flagging values beyond 1.5 IQR
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use eda_kit::{Eda, EdaConfig, dataset_overview, load_dataset};
//!
//! let df = load_dataset("titanic.csv")?;
//! println!("{}", dataset_overview(&df)?);
//!
//! let config = EdaConfig::builder()
//!     .output_dir("figures")
//!     .histogram_bins(20)
//!     .build()?;
//! let eda = Eda::with_config(&df, config)?;
//!
//! println!("{}", eda.summary_statistics()?);
//! for figure in eda.plot_numerical_distribution()?.iter() {
//!     println!("{}", figure.path.display());
//! }
//!
//! // Or everything at once
//! let report = eda.run_all()?;
//! report.write_to_file("figures", "titanic")?;
//! ```

pub mod config;
pub mod eda;
pub mod error;
pub mod loader;
pub mod overview;
pub mod plot;
pub mod report;
pub mod stats;
pub mod types;
pub mod utils;

// Re-exports for convenient access
pub use config::{ConfigValidationError, EdaConfig, EdaConfigBuilder, FigureSize};
pub use eda::Eda;
pub use error::{EdaError, Result, ResultExt};
pub use loader::load_dataset;
pub use overview::{
    ColumnDtype, DatasetOverview, DatasetPreview, dataset_overview, dataset_overview_sampled,
    dataset_overview_with_rows,
};
pub use plot::{Figure, FigureKind};
pub use report::EdaReport;
pub use types::{
    CorrelationReport, FigureSet, MissingValuesReport, OutlierReport, SummaryStatistics,
};
pub use utils::{DtypeCategory, get_dtype_category, is_numeric_dtype};
