use std::collections::{BTreeMap, HashSet};
use std::fmt;

use super::error::DataLoadError;

// ---------------------------------------------------------------------------
// CellValue – a single cell of the source sheet
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value mirroring common spreadsheet types.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    /// ISO-8601 date string kept as text for simplicity.
    Date(String),
    Null,
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::String(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Date(d) => write!(f, "{d}"),
            CellValue::Null => write!(f, "<null>"),
        }
    }
}

impl CellValue {
    /// Interpret the value as an `f64` (numeric columns).
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Float(v) => Some(*v),
            CellValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Short type name used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            CellValue::String(_) => "text",
            CellValue::Integer(_) => "integer",
            CellValue::Float(v) if !v.is_finite() => "non-finite number",
            CellValue::Float(_) => "float",
            CellValue::Bool(_) => "bool",
            CellValue::Date(_) => "date",
            CellValue::Null => "empty cell",
        }
    }
}

// ---------------------------------------------------------------------------
// RawTable – header row plus untyped cells, as produced by every loader
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<RawRow>,
}

/// One data row and where it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRow {
    /// 1-based line in the source, counting the header as line 1.
    pub line: usize,
    pub cells: Vec<CellValue>,
}

impl RawRow {
    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(|c| *c == CellValue::Null)
    }
}

impl RawTable {
    fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }
}

// ---------------------------------------------------------------------------
// Schema
// ---------------------------------------------------------------------------

pub const AGE: &str = "Age";
pub const GENDER: &str = "Gender";
pub const ITEM_PURCHASED: &str = "Item Purchased";
pub const PURCHASE_AMOUNT: &str = "Purchase Amount (USD)";
pub const PREVIOUS_PURCHASES: &str = "Previous Purchases";
pub const FREQUENCY: &str = "Frequency of Purchases";

static NULL_CELL: CellValue = CellValue::Null;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Numeric,
    Categorical,
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnKind::Numeric => write!(f, "a number"),
            ColumnKind::Categorical => write!(f, "a category"),
        }
    }
}

/// Columns the dashboard cannot work without. Header names are matched
/// exactly (case and whitespace sensitive).
pub const SCHEMA: [(&str, ColumnKind); 6] = [
    (AGE, ColumnKind::Numeric),
    (GENDER, ColumnKind::Categorical),
    (ITEM_PURCHASED, ColumnKind::Categorical),
    (PURCHASE_AMOUNT, ColumnKind::Numeric),
    (PREVIOUS_PURCHASES, ColumnKind::Numeric),
    (FREQUENCY, ColumnKind::Categorical),
];

// ---------------------------------------------------------------------------
// Purchase – one typed row
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct Purchase {
    pub age: f64,
    pub gender: String,
    pub item: String,
    pub amount: f64,
    pub previous_purchases: f64,
    pub frequency: String,
    /// Columns outside the schema, kept as loaded.
    pub extra: BTreeMap<String, CellValue>,
}

// ---------------------------------------------------------------------------
// ShoppingDataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The validated dataset with pre-computed column summaries.
#[derive(Debug, Clone)]
pub struct ShoppingDataset {
    pub rows: Vec<Purchase>,
    /// All header names in sheet order.
    pub column_names: Vec<String>,
    /// Distinct `Frequency of Purchases` values, first-seen order.
    pub frequencies: Vec<String>,
    /// Distinct `Gender` values, first-seen order.
    pub genders: Vec<String>,
    pub age_min: f64,
    pub age_max: f64,
}

impl ShoppingDataset {
    /// Validate a raw table against [`SCHEMA`] and build the typed dataset.
    pub fn from_table(table: RawTable) -> Result<Self, DataLoadError> {
        let mut indices = [0usize; SCHEMA.len()];
        for (slot, (name, _)) in indices.iter_mut().zip(SCHEMA.iter()) {
            *slot = table
                .column_index(name)
                .ok_or_else(|| DataLoadError::MissingColumn((*name).to_string()))?;
        }
        if table.rows.is_empty() {
            return Err(DataLoadError::NoRows);
        }

        let mut rows = Vec::with_capacity(table.rows.len());
        for RawRow { line, cells } in &table.rows {
            let line = *line;
            let cell = |k: usize| cells.get(indices[k]).unwrap_or(&NULL_CELL);
            let numeric = |k: usize| -> Result<f64, DataLoadError> {
                let value = cell(k);
                value
                    .as_f64()
                    .filter(|v| v.is_finite())
                    .ok_or_else(|| wrong_type(line, k, value))
            };
            let category = |k: usize| -> Result<String, DataLoadError> {
                match cell(k) {
                    CellValue::Null => Err(wrong_type(line, k, &NULL_CELL)),
                    value => Ok(value.to_string()),
                }
            };

            let extra = table
                .headers
                .iter()
                .enumerate()
                .filter(|(i, _)| !indices.contains(i))
                .map(|(i, h)| (h.clone(), cells.get(i).cloned().unwrap_or(CellValue::Null)))
                .collect();

            rows.push(Purchase {
                age: numeric(0)?,
                gender: category(1)?,
                item: category(2)?,
                amount: numeric(3)?,
                previous_purchases: numeric(4)?,
                frequency: category(5)?,
                extra,
            });
        }

        Ok(Self::from_rows(rows, table.headers))
    }

    /// Build column summaries from already typed rows.
    pub fn from_rows(rows: Vec<Purchase>, column_names: Vec<String>) -> Self {
        let frequencies = distinct(rows.iter().map(|r| r.frequency.as_str()));
        let genders = distinct(rows.iter().map(|r| r.gender.as_str()));
        let (age_min, age_max) = rows
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), r| {
                (lo.min(r.age), hi.max(r.age))
            });

        ShoppingDataset {
            rows,
            column_names,
            frequencies,
            genders,
            age_min,
            age_max,
        }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Integer bounds for the age slider.
    pub fn age_bounds(&self) -> (i64, i64) {
        if self.is_empty() {
            return (0, 0);
        }
        (self.age_min.floor() as i64, self.age_max.ceil() as i64)
    }
}

fn wrong_type(line: usize, schema_index: usize, found: &CellValue) -> DataLoadError {
    let (column, expected) = SCHEMA[schema_index];
    DataLoadError::WrongType {
        row: line,
        column: column.to_string(),
        expected,
        found: found.type_name(),
    }
}

/// Distinct values in first-seen order.
pub fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .filter(|v| seen.insert(*v))
        .map(str::to_string)
        .collect()
}
