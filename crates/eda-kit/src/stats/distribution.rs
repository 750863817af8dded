//! Histogram binning and kernel density estimation.

use super::{finite_values, sample_std, sorted_copy};
use serde::{Deserialize, Serialize};

/// Number of points at which a density curve is evaluated.
const KDE_GRID_POINTS: usize = 200;

/// How many bandwidths the density curve extends past the data range.
const KDE_CUT: f64 = 3.0;

/// One bar of a histogram, covering `[start, end)` (the last bar is closed).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

/// Bin values into `bins` equal-width bars spanning their range.
///
/// NaN and infinities are left out. A column holding a single distinct value
/// gets one bar of width 1 centred on it.
pub fn histogram(values: &[f64], bins: usize) -> Vec<HistogramBin> {
    let mut sorted = finite_values(values);
    if sorted.is_empty() || bins == 0 {
        return Vec::new();
    }

    sorted.sort_by(|a, b| a.total_cmp(b));
    let min = sorted[0];
    let max = sorted[sorted.len() - 1];
    if (max - min).abs() < f64::EPSILON {
        return vec![HistogramBin {
            start: min - 0.5,
            end: max + 0.5,
            count: sorted.len(),
        }];
    }

    let width = (max - min) / bins as f64;
    let mut counts = vec![0usize; bins];

    for value in &sorted {
        let mut index = ((value - min) / width) as usize;
        if index >= bins {
            index = bins - 1;
        }
        counts[index] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(idx, count)| HistogramBin {
            start: min + idx as f64 * width,
            end: min + (idx as f64 + 1.0) * width,
            count,
        })
        .collect()
}

/// Scott's rule bandwidth: `std * n^(-1/5)`.
pub fn scott_bandwidth(values: &[f64]) -> Option<f64> {
    let std = sample_std(values)?;
    if std <= 0.0 {
        return None;
    }
    Some(std * (values.len() as f64).powf(-0.2))
}

/// Gaussian kernel density estimate, scaled by `scale`.
///
/// Pass `n * bin_width` as `scale` to overlay the curve on a count
/// histogram. Returns `(x, y)` points over the data range extended by three
/// bandwidths on each side, or nothing when the bandwidth is undefined
/// (fewer than two values or zero spread).
pub fn gaussian_kde(values: &[f64], scale: f64) -> Vec<(f64, f64)> {
    let values = finite_values(values);
    let Some(bandwidth) = scott_bandwidth(&values) else {
        return Vec::new();
    };
    if !scale.is_finite() {
        return Vec::new();
    }

    let sorted = sorted_copy(&values);
    let lo = sorted[0] - KDE_CUT * bandwidth;
    let hi = sorted[sorted.len() - 1] + KDE_CUT * bandwidth;
    let step = (hi - lo) / (KDE_GRID_POINTS - 1) as f64;
    let norm = 1.0 / (values.len() as f64 * bandwidth * (2.0 * std::f64::consts::PI).sqrt());

    (0..KDE_GRID_POINTS)
        .map(|i| {
            let x = lo + i as f64 * step;
            let density: f64 = values
                .iter()
                .map(|v| {
                    let z = (x - v) / bandwidth;
                    (-0.5 * z * z).exp()
                })
                .sum::<f64>()
                * norm;
            (x, density * scale)
        })
        .collect()
}
