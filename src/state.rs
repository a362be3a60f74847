use std::sync::Arc;

use crate::color::ColorMap;
use crate::config::DashboardConfig;
use crate::data::filter::{AgeRange, FrequencySelection, ItemSelection};
use crate::data::model::ShoppingDataset;
use crate::report::{FrequencyReport, ItemReport};

// ---------------------------------------------------------------------------
// View selection
// ---------------------------------------------------------------------------

/// The two mutually exclusive dashboard screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Frequency,
    Items,
}

impl View {
    pub const ALL: [View; 2] = [View::Frequency, View::Items];

    pub fn label(self) -> &'static str {
        match self {
            View::Frequency => "Purchase Frequency Analysis",
            View::Items => "Item Purchased Analysis",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            View::Frequency => "Shopping Trends Dashboard - Frequency Analysis",
            View::Items => "Shopping Trends Dashboard - Item Purchased Analysis",
        }
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Dataset loaded once at startup.
    pub dataset: Arc<ShoppingDataset>,

    pub config: DashboardConfig,

    /// Which panel is visible.
    pub view: View,

    pub frequency: FrequencySelection,
    pub items: ItemSelection,

    /// Reports for the current selections. Rebuilt by every setter, so they
    /// never lag behind the controls.
    pub frequency_report: FrequencyReport,
    pub item_report: ItemReport,

    /// Slice colours for the current item report.
    pub item_colors: ColorMap,
}

impl AppState {
    pub fn new(dataset: Arc<ShoppingDataset>, config: DashboardConfig) -> Self {
        let frequency = FrequencySelection::initial(&dataset);
        let items = ItemSelection::initial(&dataset);
        let frequency_report = FrequencyReport::build(&dataset, &frequency, config.histogram_bins);
        let item_report = ItemReport::build(&dataset, &items, config.top_items);
        let item_colors = item_color_map(&item_report);

        Self {
            dataset,
            config,
            view: View::default(),
            frequency,
            items,
            frequency_report,
            item_report,
            item_colors,
        }
    }

    /// Rows in the filtered view of the visible panel.
    pub fn visible_rows(&self) -> usize {
        match self.view {
            View::Frequency => self.frequency_report.customers,
            View::Items => self.item_report.rows,
        }
    }

    pub fn set_view(&mut self, view: View) {
        if self.view != view {
            log::debug!("Switching to {}", view.label());
            self.view = view;
        }
    }

    pub fn set_frequency(&mut self, frequency: String) {
        if self.frequency.frequency == frequency {
            return;
        }
        self.frequency.frequency = frequency;
        self.refresh_frequency();
    }

    /// Add or remove one gender from the item filter.
    pub fn toggle_gender(&mut self, gender: &str) {
        if !self.items.genders.remove(gender) {
            self.items.genders.insert(gender.to_string());
        }
        self.refresh_items();
    }

    /// Select all genders.
    pub fn select_all_genders(&mut self) {
        self.items.genders = self.dataset.genders.iter().cloned().collect();
        self.refresh_items();
    }

    /// Deselect all genders.
    pub fn select_no_genders(&mut self) {
        self.items.genders.clear();
        self.refresh_items();
    }

    /// Set the age range, clamped to the dataset bounds. If the ends cross,
    /// the one that did not move is pulled along.
    pub fn set_age_range(&mut self, low: i64, high: i64) {
        let (min, max) = self.dataset.age_bounds();
        let mut low = low.clamp(min, max);
        let mut high = high.clamp(min, max);
        if low > high {
            if low != self.items.age.low {
                high = low;
            } else {
                low = high;
            }
        }
        let age = AgeRange { low, high };
        if age != self.items.age {
            self.items.age = age;
            self.refresh_items();
        }
    }

    fn refresh_frequency(&mut self) {
        log::debug!("Frequency filter: {:?}", self.frequency);
        self.frequency_report =
            FrequencyReport::build(&self.dataset, &self.frequency, self.config.histogram_bins);
    }

    fn refresh_items(&mut self) {
        log::debug!("Item filter: {:?}", self.items);
        self.item_report = ItemReport::build(&self.dataset, &self.items, self.config.top_items);
        self.item_colors = item_color_map(&self.item_report);
    }
}

fn item_color_map(report: &ItemReport) -> ColorMap {
    ColorMap::new(report.item_counts.iter().map(|(label, _)| label.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::sample_dataset;
    use eframe::egui::Color32;

    fn state() -> AppState {
        AppState::new(Arc::new(sample_dataset()), DashboardConfig::default())
    }

    #[test]
    fn starts_on_frequency_view_with_defaults() {
        let s = state();
        assert_eq!(s.view, View::Frequency);
        assert_eq!(s.frequency.frequency, "Fortnightly");
        assert_eq!(s.frequency_report.customers, 2);
        assert_eq!(s.item_report.rows, s.dataset.len());
    }

    #[test]
    fn reports_follow_the_controls() {
        let mut s = state();
        s.set_frequency("Weekly".into());
        assert_eq!(s.frequency_report.customers, 4);
        assert_eq!(s.frequency_report.frequency, "Weekly");

        s.set_view(View::Items);
        s.toggle_gender("Male");
        assert_eq!(s.visible_rows(), 4);
        s.toggle_gender("Male");
        assert_eq!(s.visible_rows(), s.dataset.len());

        s.select_no_genders();
        assert!(s.item_report.is_empty());
        assert!(s.item_report.slices.is_empty());
        s.select_all_genders();
        assert_eq!(s.visible_rows(), s.dataset.len());
    }

    #[test]
    fn age_range_is_clamped_and_ordered() {
        let mut s = state();
        s.set_age_range(0, 200);
        assert_eq!(s.items.age, AgeRange { low: 19, high: 63 });

        // Moving low past high drags high along.
        s.set_age_range(50, 40);
        assert_eq!(s.items.age, AgeRange { low: 50, high: 50 });

        // Moving high below low drags low along.
        s.set_age_range(50, 30);
        assert_eq!(s.items.age, AgeRange { low: 30, high: 30 });
        assert_eq!(s.item_report.rows, 0);
    }

    #[test]
    fn item_colours_cover_every_slice() {
        let s = state();
        assert!(!s.item_report.slices.is_empty());
        for slice in &s.item_report.slices {
            assert_ne!(s.item_colors.color_for(&slice.label), Color32::GRAY);
        }
    }
}
