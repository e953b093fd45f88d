#![cfg(feature = "excel")]

use std::io::Cursor;

use calamine::{Data, ExcelDateTime, Range, Reader, Sheets, open_workbook_auto_from_rs};

use crate::error::{LoadError, LoadResult};
use crate::types::{Table, Value};

use super::header::{positional_names, unique_names};

fn open_workbook(bytes: &[u8]) -> LoadResult<Sheets<Cursor<&[u8]>>> {
    Ok(open_workbook_auto_from_rs(Cursor::new(bytes))?)
}

/// List the sheet names of a workbook (`.xlsx`, `.xls`, `.ods`, etc.) in workbook order.
///
/// Callers pick one of these and pass it to [`parse_sheet`].
pub fn list_sheets(bytes: &[u8]) -> LoadResult<Vec<String>> {
    let workbook = open_workbook(bytes)?;
    Ok(workbook.sheet_names())
}

/// Parse one sheet of a workbook into an in-memory [`Table`].
///
/// Behavior:
/// - With `has_header`, the first non-empty row names the columns and data starts below it
/// - Without it, columns are named `0`, `1`, `2`, ... and every row is data
/// - Cells are converted by [`cell_to_value`]
pub fn parse_sheet(bytes: &[u8], sheet: &str, has_header: bool) -> LoadResult<Table> {
    let mut workbook = open_workbook(bytes)?;
    let available = workbook.sheet_names();
    if !available.iter().any(|s| s == sheet) {
        return Err(LoadError::SheetNotFound {
            sheet: sheet.to_string(),
            available,
        });
    }

    let range = workbook.worksheet_range(sheet)?;
    let table = range_to_table(&range, has_header);
    tracing::debug!(
        sheet,
        rows = table.row_count(),
        columns = table.column_count(),
        "parsed sheet"
    );
    Ok(table)
}

/// Parse the first sheet of a workbook.
pub fn parse_first_sheet(bytes: &[u8], has_header: bool) -> LoadResult<Table> {
    let sheets = list_sheets(bytes)?;
    let first = sheets.first().ok_or_else(|| LoadError::UnsupportedFormat {
        message: "workbook has no sheets".to_string(),
    })?;
    parse_sheet(bytes, first, has_header)
}

fn range_to_table(range: &Range<Data>, has_header: bool) -> Table {
    let (_, width) = range.get_size();
    let mut rows = range.rows();

    let columns = if has_header {
        // Leading blank rows are skipped; the first row with any content is the header.
        let header = rows.by_ref().find(|row| row.iter().any(|c| !matches!(c, Data::Empty)));
        match header {
            Some(cells) => unique_names(cells.iter().map(cell_to_header_string)),
            None => return Table::empty(Vec::new()),
        }
    } else {
        positional_names(width)
    };

    let width = columns.len();
    let data = rows
        .map(|row| {
            let mut out: Vec<Value> = row.iter().take(width).map(cell_to_value).collect();
            out.resize(width, Value::Null);
            out
        })
        .collect();

    Table::new(columns, data)
}

fn cell_to_header_string(c: &Data) -> String {
    match c {
        Data::String(s) => s.clone(),
        Data::Empty => String::new(),
        other => cell_to_value(other).render().unwrap_or_default(),
    }
}

/// Convert a workbook cell into a [`Value`].
///
/// - Numbers and booleans keep their type
/// - Empty strings, empty cells and error cells (`#N/A`, `#DIV/0!`, ...) become [`Value::Null`]
/// - Dates become `YYYY-MM-DD`, timestamps `YYYY-MM-DD HH:MM:SS`, times of day `HH:MM:SS` and
///   durations `H:MM:SS`
pub fn cell_to_value(c: &Data) -> Value {
    match c {
        Data::Int(i) => Value::Int64(*i),
        Data::Float(f) => Value::Float64(*f),
        Data::Bool(b) => Value::Bool(*b),
        Data::String(s) if s.is_empty() => Value::Null,
        Data::String(s) => Value::Utf8(s.clone()),
        Data::DateTime(dt) => Value::Utf8(datetime_text(dt)),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Value::Utf8(s.clone()),
        Data::Error(_) | Data::Empty => Value::Null,
    }
}

fn datetime_text(dt: &ExcelDateTime) -> String {
    if dt.is_duration() {
        if let Some(d) = dt.as_duration() {
            let secs = d.num_seconds();
            let sign = if secs < 0 { "-" } else { "" };
            let secs = secs.unsigned_abs();
            return format!("{sign}{}:{:02}:{:02}", secs / 3600, secs / 60 % 60, secs % 60);
        }
    } else if let Some(naive) = dt.as_datetime() {
        // Serials below one day carry only a time of day.
        if (0.0..1.0).contains(&dt.as_f64()) {
            return naive.format("%H:%M:%S").to_string();
        }
        let text = naive.format("%Y-%m-%d %H:%M:%S").to_string();
        return match text.strip_suffix(" 00:00:00") {
            Some(date) => date.to_string(),
            None => text,
        };
    }
    dt.as_f64().to_string()
}
