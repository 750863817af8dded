use crate::plot::Figure;
use crate::stats::{
    BoxSummary, CategoricalDescription, CorrelationMatrix, CorrelationPair, MissingColumn,
    NumericDescription,
};
use crate::utils::format_stat;
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Summary statistics
// ============================================================================

/// Descriptive statistics of every numeric and categorical column.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryStatistics {
    pub numeric: Vec<NumericDescription>,
    pub categorical: Vec<CategoricalDescription>,
}

impl SummaryStatistics {
    pub fn is_empty(&self) -> bool {
        self.numeric.is_empty() && self.categorical.is_empty()
    }
}

fn optional_stat(value: Option<f64>) -> String {
    value.map(format_stat).unwrap_or_else(|| "NaN".to_string())
}

/// Write a table whose first column holds row labels.
fn write_table(
    f: &mut fmt::Formatter<'_>,
    header: &[&str],
    rows: &[(&str, Vec<String>)],
) -> fmt::Result {
    let label_width = rows.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
    let widths: Vec<usize> = header
        .iter()
        .enumerate()
        .map(|(idx, name)| {
            rows.iter()
                .map(|(_, cells)| cells[idx].chars().count())
                .chain(std::iter::once(name.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    write!(f, "{:label_width$}", "", label_width = label_width)?;
    for (name, width) in header.iter().zip(&widths) {
        write!(f, "  {:>width$}", name, width = width)?;
    }
    writeln!(f)?;

    for (label, cells) in rows {
        write!(f, "{:<label_width$}", label, label_width = label_width)?;
        for (cell, width) in cells.iter().zip(&widths) {
            write!(f, "  {:>width$}", cell, width = width)?;
        }
        writeln!(f)?;
    }
    Ok(())
}

impl fmt::Display for SummaryStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.numeric.is_empty() {
            writeln!(f, "\nSummary Statistics for Numerical Features:\n")?;
            let header: Vec<&str> = self.numeric.iter().map(|d| d.column.as_str()).collect();
            let row = |pick: fn(&NumericDescription) -> Option<f64>| -> Vec<String> {
                self.numeric.iter().map(|d| optional_stat(pick(d))).collect()
            };
            let rows: [(&str, Vec<String>); 8] = [
                (
                    "count",
                    self.numeric.iter().map(|d| d.count.to_string()).collect(),
                ),
                ("mean", row(|d| d.mean)),
                ("std", row(|d| d.std)),
                ("min", row(|d| d.min)),
                ("25%", row(|d| d.q25)),
                ("50%", row(|d| d.median)),
                ("75%", row(|d| d.q75)),
                ("max", row(|d| d.max)),
            ];
            write_table(f, &header, &rows)?;
        }

        if !self.categorical.is_empty() {
            writeln!(f, "\nSummary Statistics for Categorical Features:\n")?;
            let header: Vec<&str> = self.categorical.iter().map(|d| d.column.as_str()).collect();
            let rows: [(&str, Vec<String>); 4] = [
                (
                    "count",
                    self.categorical.iter().map(|d| d.count.to_string()).collect(),
                ),
                (
                    "unique",
                    self.categorical.iter().map(|d| d.unique.to_string()).collect(),
                ),
                (
                    "top",
                    self.categorical
                        .iter()
                        .map(|d| d.top.clone().unwrap_or_else(|| "NaN".to_string()))
                        .collect(),
                ),
                (
                    "freq",
                    self.categorical.iter().map(|d| d.freq.to_string()).collect(),
                ),
            ];
            write_table(f, &header, &rows)?;
        }

        if self.is_empty() {
            writeln!(f, "No numeric or categorical columns.")?;
        }
        Ok(())
    }
}

// ============================================================================
// Correlation
// ============================================================================

/// Number of strongest pairs listed in a correlation report.
pub const STRONGEST_PAIRS: usize = 5;

/// Pearson matrix of the numeric columns and its heatmap.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorrelationReport {
    pub matrix: CorrelationMatrix,
    pub strongest_pairs: Vec<CorrelationPair>,
    /// `None` when there were no numeric columns to draw.
    pub figure: Option<Figure>,
}

impl fmt::Display for CorrelationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "\nCorrelation Matrix:\n")?;
        if self.matrix.is_empty() {
            writeln!(f, "No numeric columns.")?;
            return Ok(());
        }

        let header: Vec<&str> = self.matrix.columns.iter().map(|c| c.as_str()).collect();
        let rows: Vec<(&str, Vec<String>)> = self
            .matrix
            .columns
            .iter()
            .zip(&self.matrix.values)
            .map(|(name, values)| {
                let cells = values
                    .iter()
                    .map(|v| v.map(|v| format!("{:.2}", v)).unwrap_or_else(|| "NaN".to_string()))
                    .collect();
                (name.as_str(), cells)
            })
            .collect();
        write_table(f, &header, &rows)?;

        if !self.strongest_pairs.is_empty() {
            writeln!(f, "\nStrongest pairs:")?;
            for pair in &self.strongest_pairs {
                writeln!(
                    f,
                    "  {} ~ {}: {:.3}",
                    pair.column_x, pair.column_y, pair.estimate
                )?;
            }
        }

        if let Some(figure) = &self.figure {
            writeln!(f, "\n{}", figure)?;
        }
        Ok(())
    }
}

// ============================================================================
// Missing values
// ============================================================================

/// Per-column missing counts and the missing-value heatmap.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MissingValuesReport {
    pub columns: Vec<MissingColumn>,
    pub total_missing: usize,
    pub total_missing_percentage: f64,
    /// Dataset rows drawn per heatmap row.
    pub rows_per_band: usize,
    /// `None` for a dataset without rows or columns.
    pub figure: Option<Figure>,
}

impl fmt::Display for MissingValuesReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "\nMissing Values per Column:\n")?;
        let width = self
            .columns
            .iter()
            .map(|c| c.column.chars().count())
            .max()
            .unwrap_or(0);
        for entry in &self.columns {
            writeln!(
                f,
                "{:<width$}  {:>8}  ({:.2}%)",
                entry.column,
                entry.missing_count,
                entry.missing_percentage,
                width = width
            )?;
        }
        writeln!(
            f,
            "\nTotal missing cells: {} ({:.2}%)",
            self.total_missing, self.total_missing_percentage
        )?;

        if let Some(figure) = &self.figure {
            if self.rows_per_band > 1 {
                writeln!(f, "Heatmap rows cover {} dataset rows each", self.rows_per_band)?;
            }
            writeln!(f, "\n{}", figure)?;
        }
        Ok(())
    }
}

// ============================================================================
// Outliers
// ============================================================================

/// Box summaries of every numeric column and their boxplots.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutlierReport {
    pub columns: Vec<BoxSummary>,
    pub figures: Vec<Figure>,
}

impl OutlierReport {
    pub fn total_outliers(&self) -> usize {
        self.columns.iter().map(|c| c.outlier_count()).sum()
    }
}

impl fmt::Display for OutlierReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "\nOutliers (beyond 1.5 IQR):\n")?;
        if self.columns.is_empty() {
            writeln!(f, "No numeric columns.")?;
        }
        for summary in &self.columns {
            writeln!(
                f,
                "{}: {} outliers ({:.2}%) outside [{}, {}]",
                summary.column,
                summary.outlier_count(),
                summary.outlier_percentage(),
                format_stat(summary.lower_fence),
                format_stat(summary.upper_fence)
            )?;
        }
        write_figures(f, &self.figures)
    }
}

/// List written figures, one per line.
pub fn write_figures(f: &mut fmt::Formatter<'_>, figures: &[Figure]) -> fmt::Result {
    if figures.is_empty() {
        return Ok(());
    }
    writeln!(f)?;
    for figure in figures {
        writeln!(f, "{}", figure)?;
    }
    Ok(())
}

/// Figures written by a per-column plotting operation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FigureSet(pub Vec<Figure>);

impl FigureSet {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Figure> {
        self.0.iter()
    }
}

impl fmt::Display for FigureSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return writeln!(f, "No figures written.");
        }
        write_figures(f, &self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::{describe_categorical, describe_numeric};

    #[test]
    fn test_summary_display_has_pandas_rows() {
        let summary = SummaryStatistics {
            numeric: vec![describe_numeric("age", &[1.0, 2.0, 3.0, 4.0, 5.0])],
            categorical: vec![describe_categorical(
                "sex",
                &["male".to_string(), "female".to_string(), "male".to_string()],
            )],
        };
        let text = summary.to_string();

        for label in ["count", "mean", "std", "min", "25%", "50%", "75%", "max"] {
            assert!(text.contains(label), "missing row {label}");
        }
        assert!(text.contains("1.581139"));
        assert!(text.contains("unique"));
        assert!(text.contains("male"));

        let numeric_header = text
            .find("Summary Statistics for Numerical Features:")
            .unwrap();
        let categorical_header = text
            .find("Summary Statistics for Categorical Features:")
            .unwrap();
        assert!(numeric_header < text.find("mean").unwrap());
        assert!(categorical_header > text.find("mean").unwrap());
        assert!(categorical_header < text.find("unique").unwrap());
    }

    #[test]
    fn test_summary_display_empty() {
        let summary = SummaryStatistics {
            numeric: vec![],
            categorical: vec![],
        };
        assert!(summary.is_empty());
        assert!(summary.to_string().contains("No numeric or categorical columns."));
    }

    #[test]
    fn test_undefined_std_prints_nan() {
        let summary = SummaryStatistics {
            numeric: vec![describe_numeric("x", &[3.0])],
            categorical: vec![],
        };
        assert!(summary.to_string().contains("NaN"));
    }

    #[test]
    fn test_figure_set_serializes_as_list() {
        let json = serde_json::to_string(&FigureSet::default()).unwrap();
        assert_eq!(json, "[]");
    }
}
