use std::f64::consts::{FRAC_PI_2, TAU};

use crate::data::filter::{item_indices, ItemSelection};
use crate::data::model::ShoppingDataset;
use crate::data::stats;

/// One donut slice. Angles are in radians, measured counter-clockwise from
/// the positive x axis; slices run clockwise from 12 o'clock, so
/// `end_angle < start_angle`.
#[derive(Debug, Clone, PartialEq)]
pub struct DonutSlice {
    pub label: String,
    pub count: usize,
    pub fraction: f64,
    pub start_angle: f64,
    pub end_angle: f64,
}

impl DonutSlice {
    pub fn mid_angle(&self) -> f64 {
        (self.start_angle + self.end_angle) / 2.0
    }
}

/// Everything the item panel shows for one selection.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemReport {
    /// Rows in the filtered view.
    pub rows: usize,
    /// Full frequency table, highest count first.
    pub item_counts: Vec<(String, usize)>,
    /// The `top_n` highest counts in chart order: smallest first, so the
    /// largest bar ends up at the top of a horizontal chart.
    pub top_items: Vec<(String, usize)>,
    pub slices: Vec<DonutSlice>,
}

impl ItemReport {
    pub fn build(dataset: &ShoppingDataset, selection: &ItemSelection, top_n: usize) -> Self {
        let indices = item_indices(dataset, selection);
        let item_counts = stats::value_counts(indices.iter().map(|&i| dataset.rows[i].item.as_str()));

        let mut top_items: Vec<(String, usize)> = item_counts.iter().take(top_n).cloned().collect();
        top_items.reverse();

        Self {
            rows: indices.len(),
            slices: donut_slices(&item_counts),
            item_counts,
            top_items,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    /// Share of the filtered view taken by an item count.
    pub fn share(&self, count: usize) -> f64 {
        if self.rows == 0 {
            0.0
        } else {
            count as f64 / self.rows as f64
        }
    }
}

/// Lay the frequency table out around the circle, in table order.
pub fn donut_slices(counts: &[(String, usize)]) -> Vec<DonutSlice> {
    let total: usize = counts.iter().map(|(_, n)| n).sum();
    if total == 0 {
        return Vec::new();
    }

    let mut start = FRAC_PI_2;
    counts
        .iter()
        .map(|(label, count)| {
            let fraction = *count as f64 / total as f64;
            let end = start - fraction * TAU;
            let slice = DonutSlice {
                label: label.clone(),
                count: *count,
                fraction,
                start_angle: start,
                end_angle: end,
            };
            start = end;
            slice
        })
        .collect()
}
