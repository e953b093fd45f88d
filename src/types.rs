//! Core data model types.
//!
//! Loading produces an in-memory [`Table`]: an ordered list of column names plus row-major
//! [`Value`] storage. There is no schema inference; CSV cells arrive as text and spreadsheet
//! cells keep the scalar type the workbook stored.

use serde::{Deserialize, Serialize};

/// A single scalar cell value in a [`Table`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Missing/empty value.
    Null,
    /// 64-bit signed integer.
    Int64(i64),
    /// 64-bit float.
    Float64(f64),
    /// Boolean.
    Bool(bool),
    /// UTF-8 string.
    Utf8(String),
}

impl Value {
    /// Returns `true` for [`Value::Null`] and for a `NaN` float, the two shapes a missing cell
    /// can take after loading.
    pub fn is_null(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Float64(f) => f.is_nan(),
            _ => false,
        }
    }

    /// Render the value as text, or `None` for a missing value.
    ///
    /// Floats with no fractional part render without a trailing `.0`, so a spreadsheet cell
    /// holding `3201234567890123` renders the same as the string `"3201234567890123"`.
    pub fn render(&self) -> Option<String> {
        match self {
            Value::Null => None,
            Value::Int64(i) => Some(i.to_string()),
            Value::Float64(f) if f.is_nan() => None,
            Value::Float64(f) if f.is_finite() && f.fract() == 0.0 => Some(format!("{f:.0}")),
            Value::Float64(f) => Some(f.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            Value::Utf8(s) => Some(s.clone()),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Utf8(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Utf8(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int64(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float64(f)
    }
}

/// In-memory tabular data.
///
/// Rows are stored as `Vec<Vec<Value>>` in the same order as [`Table::columns`]. Every row has
/// exactly one value per column; deserialization rejects input that breaks this.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawTable")]
pub struct Table {
    /// Ordered, unique column names.
    pub columns: Vec<String>,
    /// Row-major value storage.
    pub rows: Vec<Vec<Value>>,
}

impl Table {
    /// Create a table from column names and rows.
    ///
    /// # Panics
    ///
    /// Panics if any row has a different length than `columns`.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Value>>) -> Self {
        match Self::try_new(columns, rows) {
            Ok(table) => table,
            Err(e) => panic!("{e}"),
        }
    }

    /// Create a table, rejecting rows whose length differs from `columns`.
    pub fn try_new(columns: Vec<String>, rows: Vec<Vec<Value>>) -> Result<Self, RaggedRow> {
        let width = columns.len();
        if let Some((row, r)) = rows.iter().enumerate().find(|(_, r)| r.len() != width) {
            return Err(RaggedRow {
                row,
                len: r.len(),
                width,
            });
        }
        Ok(Self { columns, rows })
    }

    /// A table with the given columns and no rows.
    pub fn empty(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Number of rows in the table.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns in the table.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Returns the index of a column by exact name, if present.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Iterate column names in order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(String::as_str)
    }

    /// Cell at `row`/`column`, if both are in range.
    pub fn cell(&self, row: usize, column: usize) -> Option<&Value> {
        self.rows.get(row).and_then(|r| r.get(column))
    }

    /// The first `n` rows, for previews.
    pub fn head(&self, n: usize) -> Self {
        Self {
            columns: self.columns.clone(),
            rows: self.rows.iter().take(n).cloned().collect(),
        }
    }

    /// Create a new table containing only rows that match `predicate`.
    ///
    /// The returned table keeps the original columns and row order.
    pub fn filter_rows<F>(&self, mut predicate: F) -> Self
    where
        F: FnMut(&[Value]) -> bool,
    {
        let rows = self
            .rows
            .iter()
            .filter(|row| predicate(row.as_slice()))
            .cloned()
            .collect();
        Self {
            columns: self.columns.clone(),
            rows,
        }
    }
}

/// A row whose length does not match the table's column count.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("row {row} has {len} values but the table has {width} columns")]
pub struct RaggedRow {
    /// Zero-based row index.
    pub row: usize,
    /// Values in that row.
    pub len: usize,
    /// Number of columns.
    pub width: usize,
}

#[derive(Deserialize)]
struct RawTable {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl TryFrom<RawTable> for Table {
    type Error = RaggedRow;

    fn try_from(raw: RawTable) -> Result<Self, Self::Error> {
        Table::try_new(raw.columns, raw.rows)
    }
}
