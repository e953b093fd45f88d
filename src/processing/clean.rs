//! Identifier extraction: turn a loaded [`Table`] into a [`CleanedTable`].

use serde::{Deserialize, Serialize};

use crate::error::{CleanError, CleanResult};
use crate::identifier::{Identifier, normalize};
use crate::types::{Table, Value};

use super::cleaned::CleanedTable;
use super::dedup::dedup_by_identifier;

/// The columns an identifier may be read from.
///
/// When both are set and both hold a valid identifier, the member column wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnSelection {
    /// Primary source column.
    pub member: Option<String>,
    /// Fallback source column.
    pub identity: Option<String>,
}

impl ColumnSelection {
    /// Select only a member column.
    pub fn member(column: impl Into<String>) -> Self {
        Self {
            member: Some(column.into()),
            identity: None,
        }
    }

    /// Select only an identity column.
    pub fn identity(column: impl Into<String>) -> Self {
        Self {
            member: None,
            identity: Some(column.into()),
        }
    }

    /// Select both columns.
    pub fn both(member: impl Into<String>, identity: impl Into<String>) -> Self {
        Self {
            member: Some(member.into()),
            identity: Some(identity.into()),
        }
    }

    /// Returns `true` if neither column is selected.
    pub fn is_empty(&self) -> bool {
        self.member.is_none() && self.identity.is_none()
    }
}

/// Row counts reported by [`clean`]. Informational only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CleanStats {
    /// Rows in the input table.
    pub total_rows: usize,
    /// Rows in the output.
    pub kept_rows: usize,
    /// Rows where no selected column held a valid identifier.
    pub invalid_rows: usize,
    /// Rows removed by deduplication.
    pub duplicate_rows: usize,
}

impl CleanStats {
    /// All rows that did not make it into the output.
    pub fn dropped_rows(&self) -> usize {
        self.invalid_rows + self.duplicate_rows
    }
}

/// Output of [`clean`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CleanOutcome {
    /// The surviving rows.
    pub table: CleanedTable,
    /// Counts for display.
    pub stats: CleanStats,
}

/// Extract a canonical identifier for every row and drop rows that have none.
///
/// - For each row, the member column and the identity column (whichever are selected) are
///   normalized with [`normalize`].
/// - A row survives if either produced an identifier; the member result takes priority.
/// - Original columns are kept unchanged.
/// - With `dedup`, only the first row per identifier is kept.
///
/// Errors if neither column is selected, or a selected column does not exist.
///
/// ```
/// use nik_reconcile::processing::{clean, ColumnSelection};
/// use nik_reconcile::types::{Table, Value};
///
/// let table = Table::new(
///     vec!["MemberNo".to_string()],
///     vec![
///         vec![Value::from("3201234567890123")],
///         vec![Value::from("not an id")],
///     ],
/// );
/// let out = clean(&table, &ColumnSelection::member("MemberNo"), true).unwrap();
/// assert_eq!(out.stats.kept_rows, 1);
/// assert_eq!(out.stats.invalid_rows, 1);
/// ```
pub fn clean(table: &Table, selection: &ColumnSelection, dedup: bool) -> CleanResult<CleanOutcome> {
    if selection.is_empty() {
        return Err(CleanError::EmptySelection);
    }
    let member_idx = resolve_column(table, selection.member.as_deref())?;
    let identity_idx = resolve_column(table, selection.identity.as_deref())?;

    let mut rows: Vec<Vec<Value>> = Vec::new();
    let mut identifiers: Vec<Identifier> = Vec::new();
    let width = table.column_count();
    for (row_idx, row) in table.rows.iter().enumerate() {
        // A cell missing from a short row counts as empty.
        let id_at = |col: Option<usize>| col.and_then(|c| table.cell(row_idx, c)).and_then(normalize);
        if let Some(id) = id_at(member_idx).or_else(|| id_at(identity_idx)) {
            let mut row = row.clone();
            row.resize(width, Value::Null);
            rows.push(row);
            identifiers.push(id);
        }
    }

    let valid = CleanedTable::new(
        Table {
            columns: table.columns.clone(),
            rows,
        },
        identifiers,
    );
    let invalid_rows = table.row_count() - valid.row_count();

    let (cleaned, duplicate_rows) = if dedup {
        dedup_by_identifier(&valid)
    } else {
        (valid, 0)
    };

    let stats = CleanStats {
        total_rows: table.row_count(),
        kept_rows: cleaned.row_count(),
        invalid_rows,
        duplicate_rows,
    };
    tracing::info!(
        total = stats.total_rows,
        kept = stats.kept_rows,
        invalid = stats.invalid_rows,
        duplicates = stats.duplicate_rows,
        "cleaned table"
    );

    Ok(CleanOutcome {
        table: cleaned,
        stats,
    })
}

fn resolve_column(table: &Table, name: Option<&str>) -> CleanResult<Option<usize>> {
    match name {
        None => Ok(None),
        Some(name) => table
            .index_of(name)
            .map(Some)
            .ok_or_else(|| CleanError::UnknownColumn {
                column: name.to_string(),
                available: table.columns.clone(),
            }),
    }
}

#[cfg(test)]
mod tests {
    use super::{ColumnSelection, clean};
    use crate::error::CleanError;
    use crate::types::{Table, Value};

    fn two_column_table() -> Table {
        Table::new(
            vec!["MemberNo".to_string(), "IdentityNo".to_string(), "Name".to_string()],
            vec![
                // both valid: member wins
                vec![
                    Value::from("3201234567890123"),
                    Value::from("3209999999999999"),
                    Value::from("a"),
                ],
                // member invalid, identity valid
                vec![Value::Null, Value::from("3208888888888888"), Value::from("b")],
                // neither valid
                vec![Value::from("123"), Value::from("4201234567890123"), Value::from("c")],
                // duplicate of the first row's identifier via identity
                vec![Value::Null, Value::from("3201-2345-6789-0123"), Value::from("d")],
            ],
        )
    }

    #[test]
    fn empty_selection_is_an_error() {
        let err = clean(&two_column_table(), &ColumnSelection::default(), true).unwrap_err();
        assert_eq!(err, CleanError::EmptySelection);
    }

    #[test]
    fn unknown_column_is_an_error() {
        let err = clean(&two_column_table(), &ColumnSelection::member("Nope"), false).unwrap_err();
        assert!(matches!(err, CleanError::UnknownColumn { ref column, .. } if column == "Nope"));
    }

    #[test]
    fn member_column_takes_priority() {
        let out = clean(
            &two_column_table(),
            &ColumnSelection::both("MemberNo", "IdentityNo"),
            false,
        )
        .unwrap();
        let ids: Vec<&str> = out.table.identifiers().iter().map(|i| i.as_str()).collect();
        assert_eq!(
            ids,
            vec!["3201234567890123", "3208888888888888", "3201234567890123"]
        );
        assert_eq!(out.stats.invalid_rows, 1);
        assert_eq!(out.stats.duplicate_rows, 0);
        // original columns untouched
        assert_eq!(out.table.table().columns, two_column_table().columns);
        assert_eq!(out.table.table().rows[1][1], Value::from("3208888888888888"));
    }

    #[test]
    fn dedup_keeps_first_occurrence() {
        let out = clean(
            &two_column_table(),
            &ColumnSelection::both("MemberNo", "IdentityNo"),
            true,
        )
        .unwrap();
        assert_eq!(out.stats.total_rows, 4);
        assert_eq!(out.stats.kept_rows, 2);
        assert_eq!(out.stats.duplicate_rows, 1);
        assert_eq!(out.stats.dropped_rows(), 2);
        assert_eq!(out.table.table().rows[0][2], Value::from("a"));
    }

    #[test]
    fn identity_only_selection() {
        let out = clean(&two_column_table(), &ColumnSelection::identity("IdentityNo"), false).unwrap();
        let ids: Vec<&str> = out.table.identifiers().iter().map(|i| i.as_str()).collect();
        assert_eq!(
            ids,
            vec!["3209999999999999", "3208888888888888", "3201234567890123"]
        );
    }

    #[test]
    fn short_rows_are_read_as_missing_cells() {
        // Public fields allow building a table that bypasses `Table::new`.
        let table = Table {
            columns: vec!["MemberNo".to_string(), "IdentityNo".to_string()],
            rows: vec![vec![Value::from("3201234567890123")], vec![Value::from("junk")]],
        };
        let out = clean(&table, &ColumnSelection::both("MemberNo", "IdentityNo"), true).unwrap();
        assert_eq!(out.stats.kept_rows, 1);
        assert_eq!(out.stats.invalid_rows, 1);
        assert_eq!(
            out.table.to_table().rows[0],
            vec![Value::from("3201234567890123"), Value::from("3201234567890123"), Value::Null]
        );
    }

    #[test]
    fn empty_table_cleans_to_empty() {
        let table = Table::empty(vec!["MemberNo".to_string()]);
        let out = clean(&table, &ColumnSelection::member("MemberNo"), true).unwrap();
        assert!(out.table.is_empty());
        assert_eq!(out.stats, Default::default());
    }
}
