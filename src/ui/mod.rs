pub mod charts;
pub mod frequency;
pub mod items;
pub mod panels;
