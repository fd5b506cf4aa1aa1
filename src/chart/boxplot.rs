//! Box-plot aggregation: grouped quartile and whisker statistics.
//!
//! Rows reduce to one [`BoxPlotStats`] per group: the box spans the first
//! and third quartiles around the median, and each whisker reaches the most
//! extreme value still within 1.5 interquartile ranges of its quartile.
//! Values beyond the whiskers are outliers and simply fall outside the
//! drawn range.

use serde::Serialize;

use crate::row::{ColumnGetter, Row};
use crate::Result;

/// The box: first quartile, median, third quartile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Quartiles {
    pub bottom: f64,
    pub middle: f64,
    pub top: f64,
}

/// Whisker ends: the most extreme in-range value on each side.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Whiskers {
    pub bottom: f64,
    pub top: f64,
}

/// Box-plot statistics for one group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoxPlotStats {
    pub name: String,
    #[serde(rename = "box")]
    pub quartiles: Quartiles,
    pub whiskers: Whiskers,
}

/// A complete box-plot dataset: one stats row per group, plus the value
/// domain across every retained value regardless of grouping.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct BoxPlotDataset {
    pub rows: Vec<BoxPlotStats>,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

/// Linear-interpolation quantile over ascending-sorted values:
/// `index = p * (n - 1)`, interpolating between the two bracketing values.
fn quantile(sorted: &[f64], p: f64) -> f64 {
    let position = p * (sorted.len() - 1) as f64;
    let index = position.floor() as usize;
    let lower = sorted[index];
    if position > index as f64 {
        lower + (sorted[index + 1] - lower) * (position - index as f64)
    } else {
        lower
    }
}

/// Smallest value at or above the lower whisker limit.
fn whisker_bottom(sorted: &[f64], limit: f64) -> Option<f64> {
    sorted.iter().copied().find(|value| *value >= limit)
}

/// Largest value at or below the upper whisker limit.
fn whisker_top(sorted: &[f64], limit: f64) -> Option<f64> {
    sorted.iter().rev().copied().find(|value| *value <= limit)
}

impl BoxPlotStats {
    /// Statistics for one non-empty group of ascending-sorted values.
    fn from_sorted_values(name: &str, values: &[f64]) -> Self {
        let bottom = quantile(values, 0.25);
        let middle = quantile(values, 0.5);
        let top = quantile(values, 0.75);
        let iqr = 1.5 * (top - bottom);

        Self {
            name: name.to_string(),
            quartiles: Quartiles { bottom, middle, top },
            whiskers: Whiskers {
                // The bracketing values used by the quantile guarantee an
                // in-range value exists on each side.
                bottom: whisker_bottom(values, bottom - iqr).unwrap_or(bottom),
                top: whisker_top(values, top + iqr).unwrap_or(top),
            },
        }
    }
}

/// Aggregate rows into a box-plot dataset.
///
/// Rows without a value are excluded up front; the dataset's `min`/`max`
/// cover every retained value before any grouping. Retained rows are
/// stable-sorted ascending by value, then partitioned by the group getter's
/// label in first-seen order, or gathered into a single bucket named
/// `fallback_name` when no grouping applies. Zero retained rows produce an
/// empty dataset, not an error; a present but non-numeric value fails with
/// the typed error from the getter.
pub fn build_box_plot_dataset(
    rows: &[Row],
    fallback_name: &str,
    group: Option<&ColumnGetter>,
    value: &ColumnGetter,
) -> Result<BoxPlotDataset> {
    let mut dataset = BoxPlotDataset::default();

    let mut kept: Vec<(&Row, f64)> = Vec::with_capacity(rows.len());
    for (index, row) in rows.iter().enumerate() {
        let Some(number) = value.number(row, index)? else {
            continue;
        };
        dataset.min = Some(dataset.min.map_or(number, |min: f64| min.min(number)));
        dataset.max = Some(dataset.max.map_or(number, |max: f64| max.max(number)));
        kept.push((row, number));
    }
    if kept.is_empty() {
        return Ok(dataset);
    }

    // Stable: ties keep their original relative order.
    kept.sort_by(|a, b| a.1.total_cmp(&b.1));

    match group {
        Some(group) => {
            let mut buckets: Vec<(String, Vec<f64>)> = Vec::new();
            for (row, number) in &kept {
                let name = group.label(row);
                match buckets.iter_mut().find(|(bucket, _)| *bucket == name) {
                    Some((_, values)) => values.push(*number),
                    None => buckets.push((name, vec![*number])),
                }
            }
            dataset.rows = buckets
                .iter()
                .map(|(name, values)| BoxPlotStats::from_sorted_values(name, values))
                .collect();
        }
        None => {
            let values: Vec<f64> = kept.iter().map(|(_, number)| *number).collect();
            dataset
                .rows
                .push(BoxPlotStats::from_sorted_values(fallback_name, &values));
        }
    }

    Ok(dataset)
}
