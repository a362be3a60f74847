/// Data layer: core types, loading, filtering and aggregation.
///
/// Architecture:
/// ```text
///  .xlsx / .csv / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → RawTable
///   └──────────┘
///        │
///        ▼
///   ┌─────────────────┐
///   │ ShoppingDataset │  schema check, typed rows, distinct values
///   └─────────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  selection predicates → filtered indices
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  stats    │  sum / mean / value_counts / histogram / KDE
///   └──────────┘
/// ```

pub mod error;
pub mod filter;
pub mod loader;
pub mod model;
pub mod stats;
