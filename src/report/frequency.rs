use crate::data::filter::{frequency_indices, FrequencySelection};
use crate::data::model::ShoppingDataset;
use crate::data::stats::{self, Bin, KDE_GRID_POINTS};

use super::format;

/// Everything the frequency panel shows for one selection.
#[derive(Debug, Clone, PartialEq)]
pub struct FrequencyReport {
    pub frequency: String,
    pub customers: usize,
    pub revenue: f64,
    pub avg_previous_purchases: Option<f64>,
    pub age_bins: Vec<Bin>,
    /// Density curve scaled to customer counts, so it overlays the bars.
    pub age_density: Vec<[f64; 2]>,
}

impl FrequencyReport {
    pub fn build(dataset: &ShoppingDataset, selection: &FrequencySelection, bins: usize) -> Self {
        let rows: Vec<_> = frequency_indices(dataset, selection)
            .into_iter()
            .map(|i| &dataset.rows[i])
            .collect();

        let amounts: Vec<f64> = rows.iter().map(|r| r.amount).collect();
        let previous: Vec<f64> = rows.iter().map(|r| r.previous_purchases).collect();
        let ages: Vec<f64> = rows.iter().map(|r| r.age).collect();

        let age_bins = stats::histogram(&ages, bins);
        let bin_width = age_bins.first().map(Bin::width).unwrap_or(0.0);
        let scale = ages.len() as f64 * bin_width;
        let age_density = stats::gaussian_kde(&ages, KDE_GRID_POINTS)
            .into_iter()
            .map(|(x, d)| [x, d * scale])
            .collect();

        Self {
            frequency: selection.frequency.clone(),
            customers: rows.len(),
            revenue: stats::sum(&amounts),
            avg_previous_purchases: stats::mean(&previous),
            age_bins,
            age_density,
        }
    }

    pub fn customers_label(&self) -> String {
        self.customers.to_string()
    }

    pub fn revenue_label(&self) -> String {
        format::currency(self.revenue)
    }

    pub fn avg_previous_purchases_label(&self) -> String {
        format::two_decimals(self.avg_previous_purchases)
    }
}
