use std::collections::BTreeSet;

use super::model::ShoppingDataset;

// ---------------------------------------------------------------------------
// Filter selections: what the sidebar controls currently pick
// ---------------------------------------------------------------------------

/// Exact match on `Frequency of Purchases`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencySelection {
    pub frequency: String,
}

impl FrequencySelection {
    /// Default selection: the first frequency value in sheet order.
    pub fn initial(dataset: &ShoppingDataset) -> Self {
        Self {
            frequency: dataset.frequencies.first().cloned().unwrap_or_default(),
        }
    }
}

/// Closed integer interval over `Age`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgeRange {
    pub low: i64,
    pub high: i64,
}

impl AgeRange {
    pub fn contains(&self, age: f64) -> bool {
        self.low as f64 <= age && age <= self.high as f64
    }
}

/// Gender membership plus an age range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemSelection {
    /// Selected genders. An empty set selects nothing.
    pub genders: BTreeSet<String>,
    pub age: AgeRange,
}

impl ItemSelection {
    /// Default selection: every gender and the full observed age range.
    pub fn initial(dataset: &ShoppingDataset) -> Self {
        let (low, high) = dataset.age_bounds();
        Self {
            genders: dataset.genders.iter().cloned().collect(),
            age: AgeRange { low, high },
        }
    }
}

// ---------------------------------------------------------------------------
// Predicates → indices of matching rows
// ---------------------------------------------------------------------------

/// Return indices of rows whose purchase frequency equals the selection.
pub fn frequency_indices(dataset: &ShoppingDataset, selection: &FrequencySelection) -> Vec<usize> {
    dataset
        .rows
        .iter()
        .enumerate()
        .filter(|(_, row)| row.frequency == selection.frequency)
        .map(|(i, _)| i)
        .collect()
}

/// Return indices of rows passing both the gender and the age filter.
///
/// A row passes when:
/// * its gender is in the selected set (an empty set hides everything)
/// * `low <= age <= high`
pub fn item_indices(dataset: &ShoppingDataset, selection: &ItemSelection) -> Vec<usize> {
    dataset
        .rows
        .iter()
        .enumerate()
        .filter(|(_, row)| selection.genders.contains(&row.gender) && selection.age.contains(row.age))
        .map(|(i, _)| i)
        .collect()
}
