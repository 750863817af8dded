//! Box-and-whisker summaries for outlier inspection.

use super::{finite_values, quantile_sorted, sorted_copy};
use serde::{Deserialize, Serialize};

/// Whisker reach as a multiple of the interquartile range.
pub const WHISKER_IQR: f64 = 1.5;

/// Everything needed to draw one boxplot.
///
/// Whiskers end at the most extreme data points inside the fences
/// `[q1 - 1.5 * iqr, q3 + 1.5 * iqr]`; every value outside the fences is an
/// outlier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxSummary {
    pub column: String,
    pub count: usize,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub iqr: f64,
    pub lower_fence: f64,
    pub upper_fence: f64,
    pub lower_whisker: f64,
    pub upper_whisker: f64,
    pub outliers: Vec<f64>,
}

impl BoxSummary {
    pub fn outlier_count(&self) -> usize {
        self.outliers.len()
    }

    /// Outliers as a percentage of the non-null values.
    pub fn outlier_percentage(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            (self.outliers.len() as f64 / self.count as f64) * 100.0
        }
    }
}

/// Summarise the finite values of a column. `None` when there are none.
pub fn box_summary(column: &str, values: &[f64]) -> Option<BoxSummary> {
    let values = finite_values(values);
    if values.is_empty() {
        return None;
    }

    let sorted = sorted_copy(&values);
    let q1 = quantile_sorted(&sorted, 0.25);
    let median = quantile_sorted(&sorted, 0.5);
    let q3 = quantile_sorted(&sorted, 0.75);
    let iqr = q3 - q1;
    let lower_fence = q1 - WHISKER_IQR * iqr;
    let upper_fence = q3 + WHISKER_IQR * iqr;

    let inside = |v: &&f64| **v >= lower_fence && **v <= upper_fence;
    // q1 and q3 always lie inside the fences, so both whiskers exist
    let lower_whisker = sorted.iter().find(inside).copied().unwrap_or(q1);
    let upper_whisker = sorted.iter().rev().find(inside).copied().unwrap_or(q3);

    let outliers = sorted
        .iter()
        .filter(|v| **v < lower_fence || **v > upper_fence)
        .copied()
        .collect();

    Some(BoxSummary {
        column: column.to_string(),
        count: sorted.len(),
        q1,
        median,
        q3,
        iqr,
        lower_fence,
        upper_fence,
        lower_whisker,
        upper_whisker,
        outliers,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_box_summary_with_outlier() {
        let values = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 100.0];
        let summary = box_summary("value", &values).unwrap();

        // q1 = 3.25, q3 = 7.75, iqr = 4.5, fences = [-3.5, 14.5]
        assert_eq!(summary.q1, 3.25);
        assert_eq!(summary.median, 5.5);
        assert_eq!(summary.q3, 7.75);
        assert_eq!(summary.upper_fence, 14.5);
        assert_eq!(summary.outliers, vec![100.0]);
        assert_eq!(summary.lower_whisker, 1.0);
        assert_eq!(summary.upper_whisker, 9.0);
        assert_eq!(summary.outlier_percentage(), 10.0);
    }

    #[test]
    fn test_box_summary_no_outliers() {
        let summary = box_summary("value", &[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        assert_eq!(summary.outlier_count(), 0);
        assert_eq!(summary.lower_whisker, 1.0);
        assert_eq!(summary.upper_whisker, 5.0);
    }

    #[test]
    fn test_box_summary_zero_iqr() {
        // Every value but one is identical; the odd one out is an outlier
        let summary = box_summary("value", &[5.0, 5.0, 5.0, 5.0, 6.0]).unwrap();
        assert_eq!(summary.iqr, 0.0);
        assert_eq!(summary.outliers, vec![6.0]);
        assert_eq!(summary.upper_whisker, 5.0);
    }

    #[test]
    fn test_box_summary_low_side_outliers() {
        let summary = box_summary("value", &[-50.0, 10.0, 11.0, 12.0, 13.0, 14.0]).unwrap();
        assert_eq!(summary.outliers, vec![-50.0]);
        assert_eq!(summary.lower_whisker, 10.0);
    }

    #[test]
    fn test_box_summary_empty() {
        assert!(box_summary("value", &[]).is_none());
        assert!(box_summary("value", &[f64::NAN, f64::INFINITY]).is_none());
    }

    #[test]
    fn test_box_summary_skips_non_finite() {
        let summary =
            box_summary("value", &[1.0, 2.0, f64::NAN, 3.0, f64::INFINITY, 4.0]).unwrap();

        assert_eq!(summary.count, 4);
        assert_eq!(summary.median, 2.5);
        assert_eq!(summary.upper_whisker, 4.0);
        assert!(summary.outliers.is_empty());
    }
}
