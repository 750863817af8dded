//! Integration tests for the EDA helper.
//!
//! These tests load the fixture datasets from disk and run every operation
//! end to end, checking both the returned results and the written figures.

use eda_kit::{
    Eda, EdaConfig, FigureKind, dataset_overview, dataset_overview_sampled, load_dataset,
};
use polars::prelude::*;
use pretty_assertions::assert_eq;
use std::path::{Path, PathBuf};
use std::process::Command;

// ============================================================================
// Helper Functions
// ============================================================================

fn fixtures_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn load(filename: &str) -> DataFrame {
    load_dataset(fixtures_path().join(filename)).expect("Failed to load fixture")
}

fn config_in(dir: &Path) -> EdaConfig {
    EdaConfig::builder()
        .output_dir(dir)
        .build()
        .expect("Invalid test config")
}

fn assert_svg(path: &Path) {
    let content = std::fs::read_to_string(path)
        .unwrap_or_else(|e| panic!("Missing figure {}: {}", path.display(), e));
    assert!(content.starts_with("<svg"), "{} is not an SVG", path.display());
}

// ============================================================================
// Overview Tests
// ============================================================================

#[test]
fn test_titanic_overview() {
    let df = load("titanic_subset.csv");
    let overview = Eda::new(&df).overview();

    assert_eq!(overview.rows, 20);
    assert_eq!(overview.columns, 11);

    let missing = |name: &str| {
        overview
            .missing
            .iter()
            .find(|m| m.column == name)
            .map(|m| m.missing_count)
            .unwrap()
    };
    assert_eq!(missing("Age"), 3);
    assert_eq!(missing("Cabin"), 15);
    assert_eq!(missing("Embarked"), 0);
    assert_eq!(missing("Name"), 0);
}

#[test]
fn test_dataset_overview_preview() {
    let df = load("titanic_subset.csv");
    let preview = dataset_overview(&df).unwrap();

    assert_eq!(preview.rows, 20);
    assert_eq!(preview.columns, 11);
    assert_eq!(preview.sample_rows.len(), 5);
    assert_eq!(preview.sample_rows[0][3], "Braund, Mr. Owen Harris");

    let text = preview.to_string();
    assert!(text.contains("Number of Rows: 20"));
    assert!(text.contains("Sample Data:"));
}

#[test]
fn test_dataset_overview_sampled_differs_by_seed_but_not_by_call() {
    let df = load("titanic_subset.csv");

    let a = dataset_overview_sampled(&df, 5, 1).unwrap();
    let b = dataset_overview_sampled(&df, 5, 1).unwrap();
    assert_eq!(a.sample_rows, b.sample_rows);
    assert_eq!(a.sample_rows.len(), 5);
}

// ============================================================================
// Summary Statistics Tests
// ============================================================================

#[test]
fn test_titanic_summary_statistics() {
    let df = load("titanic_subset.csv");
    let summary = Eda::new(&df).summary_statistics().unwrap();

    assert_eq!(summary.numeric.len(), 7);
    assert_eq!(summary.categorical.len(), 4);

    let age = summary.numeric.iter().find(|d| d.column == "Age").unwrap();
    assert_eq!(age.count, 17);
    assert_eq!(age.min, Some(2.0));
    assert_eq!(age.max, Some(58.0));

    let sex = summary
        .categorical
        .iter()
        .find(|d| d.column == "Sex")
        .unwrap();
    assert_eq!(sex.count, 20);
    assert_eq!(sex.unique, 2);
    assert_eq!(sex.top.as_deref(), Some("female"));
    assert_eq!(sex.freq, 11);

    let cabin = summary
        .categorical
        .iter()
        .find(|d| d.column == "Cabin")
        .unwrap();
    assert_eq!(cabin.count, 5);
}

#[test]
fn test_numeric_only_summary_has_no_categorical_section() {
    let df = load("numeric_only.csv");
    let summary = Eda::new(&df).summary_statistics().unwrap();

    assert_eq!(summary.numeric.len(), 3);
    assert!(summary.categorical.is_empty());
    let x = &summary.numeric[0];
    assert_eq!(x.median, Some(5.5));
}

#[test]
fn test_nan_and_infinity_in_csv() {
    let tmp = tempfile::tempdir().unwrap();
    let df = load("with_nan.csv");
    let eda = Eda::with_config(&df, config_in(tmp.path())).unwrap();

    let summary = eda.summary_statistics().unwrap();
    let value = summary.numeric.iter().find(|d| d.column == "value").unwrap();
    assert_eq!(value.count, 3);
    assert_eq!(value.max, Some(4.5));
    let score = summary.numeric.iter().find(|d| d.column == "score").unwrap();
    assert_eq!(score.count, 4);
    assert_eq!(score.max, Some(50.0));

    let missing = eda.identify_missing_values().unwrap();
    assert_eq!(missing.columns[1].missing_count, 2);
    assert_eq!(missing.columns[2].missing_count, 0);

    let figures = eda.plot_numerical_distribution().unwrap();
    assert_eq!(figures.len(), 3);
    figures.iter().for_each(|f| assert_svg(&f.path));
    assert_eq!(eda.detect_outliers().unwrap().columns.len(), 3);
}

// ============================================================================
// Plotting Tests
// ============================================================================

#[test]
fn test_titanic_plots_write_one_svg_per_column() {
    let tmp = tempfile::tempdir().unwrap();
    let df = load("titanic_subset.csv");
    let eda = Eda::with_config(&df, config_in(tmp.path())).unwrap();

    let numeric = eda.plot_numerical_distribution().unwrap();
    assert_eq!(numeric.len(), 7);
    numeric.iter().for_each(|f| assert_svg(&f.path));

    let categorical = eda.plot_categorical_distribution().unwrap();
    assert_eq!(categorical.len(), 4);
    assert!(
        categorical
            .iter()
            .all(|f| f.kind == FigureKind::CategoryCounts)
    );
    assert_svg(&tmp.path().join("counts_sex.svg"));
}

#[test]
fn test_categorical_only_dataset() {
    let tmp = tempfile::tempdir().unwrap();
    let df = load("categorical_only.csv");
    let eda = Eda::with_config(&df, config_in(tmp.path())).unwrap();

    assert!(eda.plot_numerical_distribution().unwrap().is_empty());
    assert!(eda.detect_outliers().unwrap().columns.is_empty());

    let correlation = eda.correlation_analysis().unwrap();
    assert!(correlation.matrix.is_empty());
    assert!(correlation.figure.is_none());

    assert_eq!(eda.plot_categorical_distribution().unwrap().len(), 2);
}

#[test]
fn test_category_cap_folds_rare_levels() {
    let tmp = tempfile::tempdir().unwrap();
    let df = load("titanic_subset.csv");
    let config = EdaConfig::builder()
        .output_dir(tmp.path())
        .max_category_levels(3)
        .build()
        .unwrap();

    let figures = Eda::with_config(&df, config)
        .unwrap()
        .plot_categorical_distribution()
        .unwrap();
    let name_plot = figures
        .iter()
        .find(|f| f.column.as_deref() == Some("Name"))
        .unwrap();

    let svg = std::fs::read_to_string(&name_plot.path).unwrap();
    assert!(svg.contains("(other)"));
}

// ============================================================================
// Correlation / Missing / Outlier Tests
// ============================================================================

#[test]
fn test_numeric_correlation() {
    let tmp = tempfile::tempdir().unwrap();
    let df = load("numeric_only.csv");
    let report = Eda::with_config(&df, config_in(tmp.path()))
        .unwrap()
        .correlation_analysis()
        .unwrap();

    let yz = report.matrix.get("y", "z").unwrap();
    assert!((yz + 1.0).abs() < 1e-12);
    assert_eq!(report.strongest_pairs[0].column_x, "y");
    assert_eq!(report.strongest_pairs[0].column_y, "z");
    assert_svg(&report.figure.unwrap().path);
}

#[test]
fn test_titanic_missing_values() {
    let tmp = tempfile::tempdir().unwrap();
    let df = load("titanic_subset.csv");
    let report = Eda::with_config(&df, config_in(tmp.path()))
        .unwrap()
        .identify_missing_values()
        .unwrap();

    assert_eq!(report.total_missing, 18);
    assert_eq!(report.columns.len(), 11);
    let figure = report.figure.unwrap();
    assert_eq!(
        figure.path,
        tmp.path().join("missing_values_heatmap.svg")
    );
    assert_svg(&figure.path);
}

#[test]
fn test_numeric_outliers() {
    let tmp = tempfile::tempdir().unwrap();
    let df = load("numeric_only.csv");
    let report = Eda::with_config(&df, config_in(tmp.path()))
        .unwrap()
        .detect_outliers()
        .unwrap();

    let x = &report.columns[0];
    assert_eq!(x.column, "x");
    assert_eq!(x.outliers, vec![100.0]);
    assert_eq!(x.upper_whisker, 9.0);
    assert!(report.columns[1].outliers.is_empty());
    assert_eq!(report.total_outliers(), 1);
    assert_svg(&tmp.path().join("outliers_x.svg"));
}

// ============================================================================
// Full Run Tests
// ============================================================================

#[test]
fn test_run_all_and_write_report() {
    let tmp = tempfile::tempdir().unwrap();
    let df = load("titanic_subset.csv");
    let report = Eda::with_config(&df, config_in(tmp.path()))
        .unwrap()
        .run_all()
        .unwrap()
        .with_input_file("titanic_subset.csv");

    // 7 distributions, 4 count plots, 2 heatmaps, 7 boxplots
    assert_eq!(report.figure_count(), 20);

    let path = report.write_to_file(tmp.path(), "titanic_subset").unwrap();
    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
    assert_eq!(json["overview"]["columns"], 11);
    assert_eq!(json["missing_values"]["total_missing"], 18);
}

#[test]
fn test_cli_summary_json() {
    let tmp = tempfile::tempdir().unwrap();
    let input = fixtures_path().join("numeric_only.csv");

    let output = Command::new(env!("CARGO_BIN_EXE_eda-kit"))
        .arg("-i")
        .arg(&input)
        .arg("-o")
        .arg(tmp.path())
        .arg("--json")
        .arg("summary")
        .output()
        .expect("Failed to run eda-kit");

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["numeric"][0]["column"], "x");
    assert_eq!(json["numeric"][0]["count"], 10);
}

#[test]
fn test_cli_missing_input_fails() {
    let output = Command::new(env!("CARGO_BIN_EXE_eda-kit"))
        .args(["-i", "does/not/exist.csv", "overview"])
        .output()
        .expect("Failed to run eda-kit");

    assert!(!output.status.success());
}
