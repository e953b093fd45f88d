//! Equality filtering for previews.

use serde::{Deserialize, Serialize};

use crate::types::{Table, Value};

/// What a filtered column must hold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expected {
    /// The cell is missing.
    Empty,
    /// The cell equals this value.
    Value(Value),
}

/// One `column == expected` condition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EqualsFilter {
    /// Column to test.
    pub column: String,
    /// Required cell content.
    pub expected: Expected,
}

impl EqualsFilter {
    /// Require `column` to equal `value`.
    pub fn equals(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            column: column.into(),
            expected: Expected::Value(value.into()),
        }
    }

    /// Require `column` to be missing.
    pub fn is_empty(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            expected: Expected::Empty,
        }
    }
}

/// Returns a new [`Table`] containing only rows that satisfy every filter.
///
/// Returns `None` if a filter names a column the table does not have.
pub fn filter_equals(table: &Table, filters: &[EqualsFilter]) -> Option<Table> {
    let resolved: Vec<(usize, &Expected)> = filters
        .iter()
        .map(|f| table.index_of(&f.column).map(|idx| (idx, &f.expected)))
        .collect::<Option<_>>()?;

    Some(table.filter_rows(|row| {
        resolved.iter().all(|(idx, expected)| match expected {
            Expected::Empty => row.get(*idx).is_none_or(Value::is_null),
            Expected::Value(v) => row.get(*idx) == Some(v),
        })
    }))
}

/// Distinct non-missing values of `column`, in first-seen order.
///
/// Returns `None` if the column does not exist.
pub fn distinct_values(table: &Table, column: &str) -> Option<Vec<Value>> {
    let idx = table.index_of(column)?;
    let mut out: Vec<Value> = Vec::new();
    for v in table.rows.iter().filter_map(|row| row.get(idx)) {
        if !v.is_null() && !out.contains(v) {
            out.push(v.clone());
        }
    }
    Some(out)
}
