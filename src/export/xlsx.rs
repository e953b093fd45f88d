#![cfg(feature = "excel")]

use rust_xlsxwriter::{ColNum, Format, RowNum, Workbook, Worksheet};

use crate::error::{ExportError, ExportResult};
use crate::types::{Table, Value};

/// Worksheet row limit, header row included.
pub const MAX_SHEET_ROWS: usize = 1_048_576;

/// Worksheet column limit.
pub const MAX_SHEET_COLUMNS: usize = 16_384;

// Excel keeps 15 significant digits; larger integers (identifiers among them) are written as
// text so they are not rounded.
const MAX_EXACT_INT: u64 = 999_999_999_999_999;

/// Render a table as a single-sheet XLSX workbook.
///
/// The header row is bold. Text stays text, numbers that Excel can hold exactly become
/// numbers, booleans become booleans and missing values leave the cell blank.
pub fn to_xlsx_bytes(table: &Table, sheet_name: &str) -> ExportResult<Vec<u8>> {
    if table.row_count() + 1 > MAX_SHEET_ROWS || table.column_count() > MAX_SHEET_COLUMNS {
        return Err(ExportError::SheetTooLarge {
            rows: table.row_count(),
            columns: table.column_count(),
        });
    }

    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet_name)?;

    for (col, name) in table.columns.iter().enumerate() {
        worksheet.write_string_with_format(0, col as ColNum, name, &header)?;
    }
    for (row_idx, row) in table.rows.iter().enumerate() {
        let sheet_row = (row_idx + 1) as RowNum;
        for (col, value) in row.iter().enumerate() {
            write_cell(worksheet, sheet_row, col as ColNum, value)?;
        }
    }

    Ok(workbook.save_to_buffer()?)
}

fn write_cell(ws: &mut Worksheet, row: RowNum, col: ColNum, value: &Value) -> ExportResult<()> {
    match value {
        Value::Null => {}
        Value::Int64(i) if i.unsigned_abs() <= MAX_EXACT_INT => {
            ws.write_number(row, col, *i as f64)?;
        }
        Value::Int64(i) => {
            ws.write_string(row, col, i.to_string())?;
        }
        Value::Float64(f) if f.is_finite() => {
            ws.write_number(row, col, *f)?;
        }
        Value::Float64(_) => {}
        Value::Bool(b) => {
            ws.write_boolean(row, col, *b)?;
        }
        Value::Utf8(s) => {
            ws.write_string(row, col, s)?;
        }
    }
    Ok(())
}
