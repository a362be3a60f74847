use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{Array, AsArray};
use arrow::datatypes::{DataType, Float32Type, Float64Type, Int32Type, Int64Type};
use arrow::util::display::array_value_to_string;
use calamine::{open_workbook_auto, Data, Reader};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use super::error::DataLoadError;
use super::model::{CellValue, RawRow, RawTable, ShoppingDataset};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the shopping dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.xlsx` / `.xlsm` / `.xlsb` / `.xls` / `.ods` – workbook, rows read from `sheet`
/// * `.csv`     – header row followed by one row per customer
/// * `.parquet` – flat scalar columns, e.g. as written by `df.to_parquet()`
///
/// The first row (or the parquet schema) names the columns; the result is
/// validated against the dashboard schema before it is returned.
pub fn load_file(path: &Path, sheet: &str) -> Result<ShoppingDataset, DataLoadError> {
    if !path.is_file() {
        return Err(DataLoadError::NotFound(path.to_path_buf()));
    }

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let table = match ext.as_str() {
        "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => load_workbook(path, sheet)?,
        "csv" => read_csv(std::fs::File::open(path)?)?,
        "parquet" | "pq" => load_parquet(path)?,
        other => return Err(DataLoadError::UnsupportedFormat(other.to_string())),
    };

    log::debug!(
        "Read {} rows x {} columns from {}",
        table.rows.len(),
        table.headers.len(),
        path.display()
    );
    ShoppingDataset::from_table(table)
}

// ---------------------------------------------------------------------------
// Workbook loader
// ---------------------------------------------------------------------------

fn load_workbook(path: &Path, sheet: &str) -> Result<RawTable, DataLoadError> {
    let mut workbook = open_workbook_auto(path)?;
    let available = workbook.sheet_names();
    if !available.iter().any(|name| name == sheet) {
        return Err(DataLoadError::MissingSheet {
            sheet: sheet.to_string(),
            available,
        });
    }
    let range = workbook.worksheet_range(sheet)?;
    // The header sits on the first used row, which need not be row 1.
    let first_line = range.start().map_or(1, |(row, _)| row as usize + 1);

    let mut rows = range.rows().enumerate();
    let headers: Vec<String> = rows
        .next()
        .ok_or(DataLoadError::NoHeader)?
        .1
        .iter()
        .map(|c| c.to_string())
        .collect();

    let rows = rows
        .map(|(i, r)| RawRow {
            line: first_line + i,
            cells: r.iter().map(workbook_cell).collect(),
        })
        .filter(|row| !row.is_blank())
        .collect();

    Ok(RawTable { headers, rows })
}

fn workbook_cell(cell: &Data) -> CellValue {
    match cell {
        Data::Int(i) => CellValue::Integer(*i),
        Data::Float(f) => CellValue::Float(*f),
        Data::String(s) => CellValue::String(s.clone()),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(_) => CellValue::Date(cell.to_string()),
        Data::DateTimeIso(s) => CellValue::Date(s.clone()),
        Data::DurationIso(s) => CellValue::String(s.clone()),
        Data::Error(_) | Data::Empty => CellValue::Null,
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, then one record per row.
/// Cell types are guessed per cell.
pub fn read_csv<R: Read>(source: R) -> Result<RawTable, DataLoadError> {
    let mut reader = csv::Reader::from_reader(source);
    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.to_string())
        .collect();
    if headers.is_empty() {
        return Err(DataLoadError::NoHeader);
    }

    let mut rows = Vec::new();
    for (i, result) in reader.records().enumerate() {
        let record = result?;
        let row = RawRow {
            line: record.position().map_or(i + 2, |p| p.line() as usize),
            cells: record.iter().map(guess_cell_type).collect(),
        };
        if !row.is_blank() {
            rows.push(row);
        }
    }

    Ok(RawTable { headers, rows })
}

fn guess_cell_type(s: &str) -> CellValue {
    if s.is_empty() {
        return CellValue::Null;
    }
    if let Ok(i) = s.parse::<i64>() {
        return CellValue::Integer(i);
    }
    // "NaN" and "inf" parse as f64 but are not amounts.
    match s.parse::<f64>() {
        Ok(f) if f.is_finite() => return CellValue::Float(f),
        _ => {}
    }
    if s == "true" || s == "false" {
        return CellValue::Bool(s == "true");
    }
    CellValue::String(s.to_string())
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with one scalar column per dataset column.
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`), as well as `generate_sample`.
fn load_parquet(path: &Path) -> Result<RawTable, DataLoadError> {
    let file = std::fs::File::open(path)?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;
    let headers: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    let reader = builder.build()?;

    let mut rows = Vec::new();
    // Records are numbered as if the schema were line 1.
    let mut line = 1;
    for batch_result in reader {
        let batch = batch_result?;
        for row in 0..batch.num_rows() {
            line += 1;
            let cells = batch
                .columns()
                .iter()
                .map(|col| extract_cell(col, row))
                .collect::<Result<Vec<_>, _>>()?;
            let record = RawRow { line, cells };
            if !record.is_blank() {
                rows.push(record);
            }
        }
    }

    Ok(RawTable { headers, rows })
}

/// Extract a single cell from an Arrow column at a given row.
fn extract_cell(col: &Arc<dyn Array>, row: usize) -> Result<CellValue, DataLoadError> {
    if col.is_null(row) {
        return Ok(CellValue::Null);
    }
    let value = match col.data_type() {
        DataType::Utf8 => CellValue::String(col.as_string::<i32>().value(row).to_string()),
        DataType::LargeUtf8 => CellValue::String(col.as_string::<i64>().value(row).to_string()),
        DataType::Int32 => CellValue::Integer(col.as_primitive::<Int32Type>().value(row) as i64),
        DataType::Int64 => CellValue::Integer(col.as_primitive::<Int64Type>().value(row)),
        DataType::Float32 => CellValue::Float(col.as_primitive::<Float32Type>().value(row) as f64),
        DataType::Float64 => CellValue::Float(col.as_primitive::<Float64Type>().value(row)),
        DataType::Boolean => CellValue::Bool(col.as_boolean().value(row)),
        DataType::Date32 | DataType::Date64 | DataType::Timestamp(_, _) => {
            CellValue::Date(array_value_to_string(col.as_ref(), row)?)
        }
        _ => CellValue::String(array_value_to_string(col.as_ref(), row)?),
    };
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{AGE, FREQUENCY, PREVIOUS_PURCHASES, PURCHASE_AMOUNT};

    fn workbook_fixture() -> std::path::PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("testdata/shopping_trends.xlsx")
    }

    const CSV: &str = "\
Customer ID,Age,Gender,Item Purchased,Purchase Amount (USD),Previous Purchases,Frequency of Purchases
1,55,Male,Blouse,53,14,Fortnightly
2,19,Male,Sweater,64.5,2,Fortnightly
,,,,,,
3,50,Female,Jeans,73,23,Weekly
";

    #[test]
    fn csv_rows_are_typed_and_blank_rows_skipped() {
        let table = read_csv(CSV.as_bytes()).unwrap();
        assert_eq!(table.headers.len(), 7);
        assert_eq!(table.rows.len(), 3);
        assert_eq!(table.rows[1].cells[4], CellValue::Float(64.5));
        assert_eq!(table.rows[2].cells[2], CellValue::String("Female".into()));
        assert_eq!(
            table.rows.iter().map(|r| r.line).collect::<Vec<_>>(),
            vec![2, 3, 5]
        );

        let ds = ShoppingDataset::from_table(table).unwrap();
        assert_eq!(ds.frequencies, vec!["Fortnightly", "Weekly"]);
    }

    #[test]
    fn csv_without_required_column_fails() {
        let csv = "Age,Gender\n30,Male\n";
        let err = ShoppingDataset::from_table(read_csv(csv.as_bytes()).unwrap()).unwrap_err();
        assert!(matches!(err, DataLoadError::MissingColumn(_)));
    }

    #[test]
    fn csv_numeric_column_with_text_fails() {
        let csv = CSV.replace("1,55,Male", "1,old,Male");
        let err = ShoppingDataset::from_table(read_csv(csv.as_bytes()).unwrap()).unwrap_err();
        assert!(matches!(err, DataLoadError::WrongType { ref column, .. } if column == AGE));
    }

    #[test]
    fn csv_non_finite_numbers_fail() {
        for (from, to, bad_column) in [
            ("Blouse,53,14", "Blouse,NaN,14", PURCHASE_AMOUNT),
            ("Blouse,53,14", "Blouse,53,inf", PREVIOUS_PURCHASES),
            ("1,55,Male", "1,-inf,Male", AGE),
        ] {
            let csv = CSV.replace(from, to);
            let err = ShoppingDataset::from_table(read_csv(csv.as_bytes()).unwrap()).unwrap_err();
            match err {
                DataLoadError::WrongType { row, column, .. } => {
                    assert_eq!(row, 2);
                    assert_eq!(column, bad_column);
                }
                other => panic!("{to}: unexpected error {other:?}"),
            }
        }
    }

    #[test]
    fn csv_wrong_type_counts_skipped_blank_lines() {
        let csv = CSV.replace("3,50,Female", "3,fifty,Female");
        let err = ShoppingDataset::from_table(read_csv(csv.as_bytes()).unwrap()).unwrap_err();
        assert!(matches!(err, DataLoadError::WrongType { row: 5, ref column, .. } if column == AGE));
    }

    #[test]
    fn guessed_cell_types() {
        assert_eq!(guess_cell_type(""), CellValue::Null);
        assert_eq!(guess_cell_type("42"), CellValue::Integer(42));
        assert_eq!(guess_cell_type("4.2"), CellValue::Float(4.2));
        assert_eq!(guess_cell_type("true"), CellValue::Bool(true));
        assert_eq!(guess_cell_type("NaN"), CellValue::String("NaN".into()));
        assert_eq!(guess_cell_type("inf"), CellValue::String("inf".into()));
        assert_eq!(guess_cell_type("Every 3 Months"), CellValue::String("Every 3 Months".into()));
    }

    #[test]
    fn missing_file_is_not_found() {
        let err = load_file(Path::new("does/not/exist.xlsx"), "shopping_trends").unwrap_err();
        assert!(matches!(err, DataLoadError::NotFound(_)));
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let path = std::env::temp_dir().join("shopping_trends_loader_test.txt");
        std::fs::write(&path, "Age\n1\n").unwrap();
        let err = load_file(&path, "shopping_trends").unwrap_err();
        std::fs::remove_file(&path).ok();
        assert!(matches!(err, DataLoadError::UnsupportedFormat(ref e) if e == "txt"));
    }

    #[test]
    fn csv_file_loads_through_entry_point() {
        let path = std::env::temp_dir().join("shopping_trends_loader_test.csv");
        std::fs::write(&path, CSV).unwrap();
        let ds = load_file(&path, "ignored for csv").unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(ds.len(), 3);
        assert_eq!(ds.age_bounds(), (19, 55));
    }

    #[test]
    fn parquet_file_loads_through_entry_point() {
        use arrow::array::{Float64Array, Int64Array, StringArray};
        use arrow::datatypes::{Field, Schema};
        use arrow::record_batch::RecordBatch;
        use parquet::arrow::ArrowWriter;

        use crate::data::model::{GENDER, ITEM_PURCHASED};

        let schema = Arc::new(Schema::new(vec![
            Field::new(AGE, DataType::Int64, false),
            Field::new(GENDER, DataType::Utf8, false),
            Field::new(ITEM_PURCHASED, DataType::Utf8, false),
            Field::new(PURCHASE_AMOUNT, DataType::Float64, false),
            Field::new(PREVIOUS_PURCHASES, DataType::Int64, false),
            Field::new(FREQUENCY, DataType::Utf8, false),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(Int64Array::from(vec![30, 41])),
                Arc::new(StringArray::from(vec!["Male", "Female"])),
                Arc::new(StringArray::from(vec!["Hat", "Coat"])),
                Arc::new(Float64Array::from(vec![12.5, 80.0])),
                Arc::new(Int64Array::from(vec![3, 7])),
                Arc::new(StringArray::from(vec!["Weekly", "Monthly"])),
            ],
        )
        .unwrap();

        let path = std::env::temp_dir().join("shopping_trends_loader_test.parquet");
        let file = std::fs::File::create(&path).unwrap();
        let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let ds = load_file(&path, "ignored for parquet").unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.rows[1].item, "Coat");
        assert_eq!(ds.rows[0].amount, 12.5);
        assert_eq!(ds.genders, vec!["Male", "Female"]);
    }

    #[test]
    fn workbook_sheet_loads_through_entry_point() {
        let ds = load_file(&workbook_fixture(), "shopping_trends").unwrap();
        assert_eq!(ds.len(), 3);
        assert_eq!(ds.column_names.len(), 8);
        assert_eq!(ds.rows[1].item, "Sweater");
        assert_eq!(ds.rows[1].amount, 64.5);
        assert_eq!(ds.frequencies, vec!["Fortnightly", "Weekly"]);
        assert_eq!(ds.genders, vec!["Male", "Female"]);
        assert_eq!(ds.age_bounds(), (19, 55));
    }

    #[test]
    fn workbook_error_and_empty_cells_are_null() {
        let table = load_workbook(&workbook_fixture(), "shopping_trends").unwrap();
        assert_eq!(
            table.rows.iter().map(|r| r.line).collect::<Vec<_>>(),
            vec![2, 4, 5]
        );
        // Notes: #DIV/0!, never written, text.
        assert_eq!(table.rows[0].cells[7], CellValue::Null);
        assert_eq!(table.rows[1].cells[7], CellValue::Null);
        assert_eq!(table.rows[2].cells[7], CellValue::String("gift".into()));

        assert_eq!(workbook_cell(&Data::Empty), CellValue::Null);
        assert_eq!(
            workbook_cell(&Data::Error(calamine::CellErrorType::Div0)),
            CellValue::Null
        );
        assert_eq!(workbook_cell(&Data::Int(7)), CellValue::Integer(7));
    }

    #[test]
    fn workbook_missing_sheet_lists_available_sheets() {
        let err = load_file(&workbook_fixture(), "Sheet1").unwrap_err();
        match err {
            DataLoadError::MissingSheet { sheet, available } => {
                assert_eq!(sheet, "Sheet1");
                assert_eq!(available, vec!["shopping_trends", "header_only", "bad_row"]);
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn workbook_header_only_sheet_has_no_rows() {
        let err = load_file(&workbook_fixture(), "header_only").unwrap_err();
        assert!(matches!(err, DataLoadError::NoRows));
    }

    #[test]
    fn workbook_wrong_type_reports_sheet_row() {
        let err = load_file(&workbook_fixture(), "bad_row").unwrap_err();
        assert!(matches!(err, DataLoadError::WrongType { row: 4, ref column, .. } if column == AGE));
    }
}
