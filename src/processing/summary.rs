//! Shape and content summary of a loaded table.

use std::mem::size_of;

use serde::Serialize;

use crate::types::{Table, Value};

/// The kind of values a column holds, ignoring missing cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    /// Every cell is missing.
    Empty,
    /// Integers only.
    Int64,
    /// Floats, possibly mixed with integers.
    Float64,
    /// Booleans only.
    Bool,
    /// Text only.
    Text,
    /// More than one of the above.
    Mixed,
}

/// Summary shown next to an upload preview.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableSummary {
    /// Number of rows.
    pub rows: usize,
    /// Number of columns.
    pub columns: usize,
    /// `(column name, kind)` in column order.
    pub column_kinds: Vec<(String, ColumnKind)>,
    /// Rough in-memory size of the cell storage, in bytes.
    pub approx_bytes: usize,
}

/// Summarize a table.
pub fn summarize(table: &Table) -> TableSummary {
    let column_kinds = table
        .columns
        .iter()
        .enumerate()
        .map(|(idx, name)| (name.clone(), column_kind(table, idx)))
        .collect();

    let approx_bytes = table
        .rows
        .iter()
        .flatten()
        .map(|v| {
            size_of::<Value>()
                + match v {
                    Value::Utf8(s) => s.capacity(),
                    _ => 0,
                }
        })
        .sum::<usize>()
        + table.columns.iter().map(String::capacity).sum::<usize>();

    TableSummary {
        rows: table.row_count(),
        columns: table.column_count(),
        column_kinds,
        approx_bytes,
    }
}

fn column_kind(table: &Table, idx: usize) -> ColumnKind {
    table
        .rows
        .iter()
        .filter_map(|row| row.get(idx))
        .filter(|v| !v.is_null())
        .fold(ColumnKind::Empty, |acc, v| {
            let kind = match v {
                Value::Int64(_) => ColumnKind::Int64,
                Value::Float64(_) => ColumnKind::Float64,
                Value::Bool(_) => ColumnKind::Bool,
                Value::Utf8(_) => ColumnKind::Text,
                Value::Null => return acc,
            };
            match (acc, kind) {
                (ColumnKind::Empty, k) => k,
                (a, k) if a == k => a,
                (ColumnKind::Int64, ColumnKind::Float64) | (ColumnKind::Float64, ColumnKind::Int64) => {
                    ColumnKind::Float64
                }
                _ => ColumnKind::Mixed,
            }
        })
}
