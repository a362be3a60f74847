//! Pure view models: `(dataset, selection) -> report`. The UI only draws
//! what a report holds, so everything shown on screen is testable here.

pub mod format;
pub mod frequency;
pub mod items;

pub use frequency::FrequencyReport;
pub use items::{DonutSlice, ItemReport};
