use std::path::PathBuf;

use thiserror::Error;

use super::model::ColumnKind;

/// Everything that can go wrong while loading the dataset. All variants are
/// fatal: the dashboard is not shown without a dataset.
#[derive(Debug, Error)]
pub enum DataLoadError {
    #[error("dataset file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("unsupported file extension: .{0}")]
    UnsupportedFormat(String),

    #[error("reading workbook: {0}")]
    Workbook(#[from] calamine::Error),

    #[error("worksheet '{sheet}' not found (available: {})", .available.join(", "))]
    MissingSheet {
        sheet: String,
        available: Vec<String>,
    },

    #[error("the sheet has no header row")]
    NoHeader,

    #[error("the sheet has a header row but no data rows")]
    NoRows,

    #[error("missing required column '{0}'")]
    MissingColumn(String),

    #[error("row {row}: column '{column}' should hold {expected}, found {found}")]
    WrongType {
        row: usize,
        column: String,
        expected: ColumnKind,
        found: &'static str,
    },

    #[error("reading CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("reading parquet: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("reading arrow batch: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
