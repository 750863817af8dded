//! Column descriptions for the summary-statistics table.

use super::{finite_values, mean, quantile_sorted, sample_std, sorted_copy};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Count, moments and five-number summary of a numeric column.
///
/// Undefined statistics are `None`: everything on an empty column, and the
/// standard deviation below two values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericDescription {
    pub column: String,
    pub count: usize,
    pub mean: Option<f64>,
    pub std: Option<f64>,
    pub min: Option<f64>,
    pub q25: Option<f64>,
    pub median: Option<f64>,
    pub q75: Option<f64>,
    pub max: Option<f64>,
}

/// Count, cardinality and most frequent level of a text/categorical column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoricalDescription {
    pub column: String,
    pub count: usize,
    pub unique: usize,
    pub top: Option<String>,
    pub freq: usize,
}

/// Describe the finite values of a numeric column; NaN and infinities are
/// left out.
pub fn describe_numeric(column: &str, values: &[f64]) -> NumericDescription {
    let values = finite_values(values);
    let sorted = sorted_copy(&values);
    let quantile = |q: f64| (!sorted.is_empty()).then(|| quantile_sorted(&sorted, q));

    NumericDescription {
        column: column.to_string(),
        count: values.len(),
        mean: mean(&values),
        std: sample_std(&values),
        min: sorted.first().copied(),
        q25: quantile(0.25),
        median: quantile(0.5),
        q75: quantile(0.75),
        max: sorted.last().copied(),
    }
}

/// Describe the non-null values of a text/categorical column.
///
/// Ties for the most frequent level go to the level seen first.
pub fn describe_categorical(column: &str, values: &[String]) -> CategoricalDescription {
    let counts = value_counts_in_order(values);
    let mut top: Option<(&String, usize)> = None;
    for (value, count) in &counts {
        if top.is_none_or(|(_, best)| *count > best) {
            top = Some((value, *count));
        }
    }

    CategoricalDescription {
        column: column.to_string(),
        count: values.len(),
        unique: counts.len(),
        top: top.map(|(value, _)| value.clone()),
        freq: top.map(|(_, count)| count).unwrap_or(0),
    }
}

/// Count each distinct value, keeping the order of first appearance.
pub fn value_counts_in_order(values: &[String]) -> Vec<(String, usize)> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<(String, usize)> = Vec::new();

    for value in values {
        match index.get(value.as_str()) {
            Some(&slot) => counts[slot].1 += 1,
            None => {
                index.insert(value.as_str(), counts.len());
                counts.push((value.clone(), 1));
            }
        }
    }

    counts
}

/// Label of the bar that collects levels beyond the cap.
pub const OTHER_LEVEL: &str = "(other)";

/// Keep the `max_levels` most frequent levels in their original order and
/// fold the rest into a trailing [`OTHER_LEVEL`] entry.
pub fn fold_rare_levels(counts: &[(String, usize)], max_levels: usize) -> Vec<(String, usize)> {
    if counts.len() <= max_levels {
        return counts.to_vec();
    }

    let mut by_count: Vec<usize> = (0..counts.len()).collect();
    // Stable, so equal counts keep first-seen precedence
    by_count.sort_by(|a, b| counts[*b].1.cmp(&counts[*a].1));
    let mut keep = vec![false; counts.len()];
    for idx in by_count.into_iter().take(max_levels) {
        keep[idx] = true;
    }

    let mut folded = Vec::with_capacity(max_levels + 1);
    let mut other = 0;
    for (idx, (level, count)) in counts.iter().enumerate() {
        if keep[idx] {
            folded.push((level.clone(), *count));
        } else {
            other += count;
        }
    }
    folded.push((OTHER_LEVEL.to_string(), other));
    folded
}
