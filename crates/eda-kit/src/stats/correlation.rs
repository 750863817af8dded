//! Pearson correlation between numeric columns.

use serde::{Deserialize, Serialize};

/// Square correlation matrix over named columns.
///
/// A cell is `None` when the coefficient is undefined: fewer than two
/// complete pairs, or a column with no spread over those pairs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationMatrix {
    pub columns: Vec<String>,
    pub values: Vec<Vec<Option<f64>>>,
}

/// One off-diagonal cell of a [`CorrelationMatrix`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationPair {
    pub column_x: String,
    pub column_y: String,
    pub estimate: f64,
}

impl CorrelationMatrix {
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Coefficient between two named columns.
    pub fn get(&self, x: &str, y: &str) -> Option<f64> {
        let i = self.columns.iter().position(|c| c == x)?;
        let j = self.columns.iter().position(|c| c == y)?;
        self.values[i][j]
    }

    /// Defined off-diagonal pairs sorted by absolute strength, strongest first.
    pub fn strongest_pairs(&self, limit: usize) -> Vec<CorrelationPair> {
        let mut pairs = Vec::new();
        for i in 0..self.columns.len() {
            for j in (i + 1)..self.columns.len() {
                if let Some(estimate) = self.values[i][j] {
                    pairs.push(CorrelationPair {
                        column_x: self.columns[i].clone(),
                        column_y: self.columns[j].clone(),
                        estimate,
                    });
                }
            }
        }

        pairs.sort_by(|a, b| b.estimate.abs().total_cmp(&a.estimate.abs()));
        pairs.truncate(limit);
        pairs
    }
}

/// Pearson coefficient over the rows where both values are present.
pub fn pearson(x: &[Option<f64>], y: &[Option<f64>]) -> Option<f64> {
    let pairs: Vec<(f64, f64)> = x
        .iter()
        .zip(y.iter())
        .filter_map(|(a, b)| Some(((*a)?, (*b)?)))
        .collect();

    if pairs.len() < 2 {
        return None;
    }

    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|(a, _)| a).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|(_, b)| b).sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (a, b) in &pairs {
        let dx = a - mean_x;
        let dy = b - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x <= 0.0 || var_y <= 0.0 {
        return None;
    }

    Some((cov / (var_x.sqrt() * var_y.sqrt())).clamp(-1.0, 1.0))
}

/// Pairwise Pearson matrix. `series[i]` holds the values of `columns[i]`
/// with nulls in place, all of the same length.
pub fn correlation_matrix(columns: Vec<String>, series: &[Vec<Option<f64>>]) -> CorrelationMatrix {
    let size = columns.len();
    let mut values = vec![vec![None; size]; size];

    for i in 0..size {
        for j in i..size {
            let estimate = pearson(&series[i], &series[j]);
            values[i][j] = estimate;
            values[j][i] = estimate;
        }
    }

    CorrelationMatrix { columns, values }
}
