//! Descriptive statistics behind the printed summaries and the figures.
//!
//! Everything here works on plain slices or on a borrowed `DataFrame`; no
//! function mutates its input.

mod boxplot;
mod correlation;
mod describe;
mod distribution;
mod missing;

pub use boxplot::{BoxSummary, box_summary};
pub use correlation::{CorrelationMatrix, CorrelationPair, correlation_matrix, pearson};
pub use describe::{
    CategoricalDescription, NumericDescription, OTHER_LEVEL, describe_categorical,
    describe_numeric, fold_rare_levels, value_counts_in_order,
};
pub use distribution::{HistogramBin, gaussian_kde, histogram, scott_bandwidth};
pub use missing::{MissingColumn, MissingMatrix, missing_counts, missing_matrix};

/// Quantile of already sorted values using linear interpolation between
/// the closest ranks.
pub fn quantile_sorted(values: &[f64], quantile: f64) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    let pos = quantile.clamp(0.0, 1.0) * (values.len() as f64 - 1.0);
    let lower = pos.floor() as usize;
    let upper = pos.ceil() as usize;
    if lower == upper {
        return values[lower];
    }
    let weight = pos - lower as f64;
    values[lower] + (values[upper] - values[lower]) * weight
}

/// Copy of the values without NaN and infinities.
pub fn finite_values(values: &[f64]) -> Vec<f64> {
    values.iter().copied().filter(|v| v.is_finite()).collect()
}

/// Sort a copy of the values, NaN-safe.
pub fn sorted_copy(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    sorted
}

/// Arithmetic mean, `None` for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

/// Sample standard deviation (n - 1 denominator), `None` below two values.
pub fn sample_std(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let mean = mean(values)?;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>()
        / (values.len() as f64 - 1.0);
    Some(variance.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantile_sorted_interpolates() {
        let values = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(quantile_sorted(&values, 0.0), 1.0);
        assert_eq!(quantile_sorted(&values, 0.5), 2.5);
        assert_eq!(quantile_sorted(&values, 0.25), 1.75);
        assert_eq!(quantile_sorted(&values, 1.0), 4.0);
    }

    #[test]
    fn test_quantile_sorted_empty_is_nan() {
        assert!(quantile_sorted(&[], 0.5).is_nan());
    }

    #[test]
    fn test_sample_std() {
        // Mean = 3, variance = 10 / 4 = 2.5
        let std = sample_std(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        assert!((std - 2.5f64.sqrt()).abs() < 1e-12);
        assert_eq!(sample_std(&[5.0]), None);
    }

    #[test]
    fn test_finite_values() {
        let values = [1.0, f64::NAN, f64::NEG_INFINITY, 2.0, f64::INFINITY];
        assert_eq!(finite_values(&values), vec![1.0, 2.0]);
    }

    #[test]
    fn test_sorted_copy_leaves_input() {
        let values = [3.0, 1.0, 2.0];
        assert_eq!(sorted_copy(&values), vec![1.0, 2.0, 3.0]);
        assert_eq!(values, [3.0, 1.0, 2.0]);
    }
}
