//! CLI entry point for the EDA helper.

use anyhow::{Result, anyhow};
use clap::{Parser, Subcommand};
use dotenv::dotenv;
use eda_kit::{
    DatasetPreview, Eda, EdaConfig, EdaConfigBuilder, dataset_overview_sampled,
    dataset_overview_with_rows, load_dataset,
};
use serde::Serialize;
use std::fmt::Display;
use std::path::Path;
use tracing::{debug, info};

/// Which analysis to run
#[derive(Debug, Clone, Copy, Subcommand)]
enum Command {
    /// Rows, columns, column types and missing counts
    Overview,
    /// Rows, columns, column types and the first rows
    Preview,
    /// describe()-style statistics for numeric and categorical columns
    Summary,
    /// Histogram with density curve per numeric column
    Distributions,
    /// Count plot per categorical column
    Categories,
    /// Pearson correlation matrix and heatmap
    Correlation,
    /// Missing-value counts and heatmap
    Missing,
    /// Boxplots and outliers beyond 1.5 IQR per numeric column
    Outliers,
    /// Run every analysis in order
    All,
}

/// Exploratory data analysis for CSV and Parquet files
#[derive(Parser, Debug)]
#[command(name = "eda-kit")]
#[command(version)]
#[command(about = "Summary statistics and diagnostic plots for tabular data")]
#[command(
    long_about = "Exploratory data analysis for a CSV or Parquet file.\n\n\
                  Text results are printed to stdout; figures are written as SVG files\n\
                  to the output directory.\n\n\
                  ENVIRONMENT VARIABLES:\n  \
                  RUST_LOG              Overrides --log-level (tracing filter syntax)\n\n\
                  EXAMPLES:\n  \
                  # Everything, figures in ./eda_output\n  \
                  eda-kit -i titanic.csv all\n\n  \
                  # Random preview of 10 rows\n  \
                  eda-kit -i titanic.csv --rows 10 --sample preview\n\n  \
                  # Correlation matrix as JSON\n  \
                  eda-kit -i titanic.csv --json correlation | jq .strongest_pairs"
)]
struct Args {
    /// Path to the CSV or Parquet file to analyse
    #[arg(short, long)]
    input: String,

    #[command(subcommand)]
    command: Command,

    /// Directory for figures and reports
    ///
    /// Overrides the config file; defaults to "eda_output"
    #[arg(short, long)]
    output: Option<String>,

    /// JSON configuration file
    ///
    /// Any field left out keeps its default. Command-line flags win.
    #[arg(short, long)]
    config: Option<String>,

    /// Number of histogram bins
    #[arg(long)]
    bins: Option<usize>,

    /// Disable the density curve on histograms
    #[arg(long)]
    no_kde: bool,

    /// Number of rows shown by `preview`
    #[arg(long)]
    rows: Option<usize>,

    /// Preview a random sample instead of the first rows
    #[arg(long)]
    sample: bool,

    /// Seed for `--sample`
    #[arg(long, default_value = "42")]
    seed: u64,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Suppress progress output (only show errors and final result)
    #[arg(short, long)]
    quiet: bool,

    /// Output JSON to stdout instead of human-readable text
    ///
    /// Disables all logs; only the result is written to stdout.
    #[arg(long)]
    json: bool,

    /// Write a JSON report of an `all` run to the output directory
    ///
    /// The report will be saved as <input_name>_eda_report.json
    #[arg(short = 'r', long)]
    emit_report: bool,
}

/// Initialize the tracing subscriber for logging.
///
/// When `json_output` is true, logging is completely disabled to ensure
/// only JSON is written to stdout.
fn init_logging(level: &str, quiet: bool, json_output: bool) {
    if json_output {
        return;
    }

    use tracing_subscriber::EnvFilter;

    let effective_level = if quiet { "warn" } else { level };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(effective_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(&args.log_level, args.quiet, args.json);

    dotenv().ok();

    if !Path::new(&args.input).exists() {
        return Err(anyhow!("Input file not found: {}", args.input));
    }

    let config = build_config(&args)?;
    debug!("Configuration: {:?}", config);

    info!("Loading dataset from: {}", args.input);
    let data = load_dataset(&args.input)?;

    let eda = Eda::with_config(&data, config)?;
    run_command(&eda, &args)
}

/// Merge the optional config file with command-line overrides.
fn build_config(args: &Args) -> Result<EdaConfig> {
    let base = match &args.config {
        Some(path) => {
            info!("Reading configuration from: {}", path);
            EdaConfig::from_json_file(path)?
        }
        None => EdaConfig::default(),
    };

    let mut builder = EdaConfigBuilder::from_config(&base);

    if let Some(ref output) = args.output {
        builder = builder.output_dir(output);
    }
    if let Some(bins) = args.bins {
        builder = builder.histogram_bins(bins);
    }
    if let Some(rows) = args.rows {
        builder = builder.preview_rows(rows);
    }
    if args.no_kde {
        builder = builder.kde(false);
    }

    Ok(builder.build()?)
}

fn run_command(eda: &Eda<'_>, args: &Args) -> Result<()> {
    match args.command {
        Command::Overview => emit(&eda.overview(), args),
        Command::Preview => emit(&preview(eda, args)?, args),
        Command::Summary => emit(&eda.summary_statistics()?, args),
        Command::Distributions => emit(&eda.plot_numerical_distribution()?, args),
        Command::Categories => emit(&eda.plot_categorical_distribution()?, args),
        Command::Correlation => emit(&eda.correlation_analysis()?, args),
        Command::Missing => emit(&eda.identify_missing_values()?, args),
        Command::Outliers => emit(&eda.detect_outliers()?, args),
        Command::All => {
            let report = eda.run_all()?.with_input_file(&args.input);

            if args.emit_report {
                let stem = extract_file_stem(&args.input);
                let path = report.write_to_file(&eda.config().output_dir, &stem)?;
                info!("Report written to: {}", path.display());
            }

            emit(&report, args)
        }
    }
}

fn preview(eda: &Eda<'_>, args: &Args) -> Result<DatasetPreview> {
    let rows = eda.config().preview_rows;
    let preview = if args.sample {
        dataset_overview_sampled(eda.data(), rows, args.seed)?
    } else {
        dataset_overview_with_rows(eda.data(), rows)?
    };
    Ok(preview)
}

/// Print a result as pretty JSON under `--json`, as text otherwise.
///
/// Note: this uses `println!` intentionally; results are the primary output
/// and must show regardless of log level.
fn emit<T: Serialize + Display>(result: &T, args: &Args) -> Result<()> {
    if args.json {
        println!("{}", serde_json::to_string_pretty(result)?);
    } else {
        println!("{}", result);
    }
    Ok(())
}

/// Extract the file stem (name without extension) from a path.
fn extract_file_stem(path: &str) -> String {
    Path::new(path)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("dataset")
        .to_string()
}
