//! [`CleanedTable`]: surviving rows paired with their canonical identifier.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::identifier::{IDENTIFIER_COLUMN, Identifier};
use crate::types::{Table, Value};

/// Rows that produced a valid identifier, each paired with that identifier.
///
/// The original columns are kept unchanged in [`CleanedTable::table`]; the identifier lives
/// alongside them and is materialized as the `NIK` column by [`CleanedTable::to_table`].
/// Only the cleaner, dedup and reconciler build values of this type, so every row always has
/// exactly one identifier.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CleanedTable {
    table: Table,
    identifiers: Vec<Identifier>,
}

impl CleanedTable {
    pub(crate) fn new(table: Table, identifiers: Vec<Identifier>) -> Self {
        debug_assert_eq!(table.row_count(), identifiers.len());
        Self { table, identifiers }
    }

    /// The surviving rows with their original columns.
    pub fn table(&self) -> &Table {
        &self.table
    }

    /// One identifier per row, in row order.
    pub fn identifiers(&self) -> &[Identifier] {
        &self.identifiers
    }

    /// Number of rows.
    pub fn row_count(&self) -> usize {
        self.identifiers.len()
    }

    /// Returns `true` if no row survived.
    pub fn is_empty(&self) -> bool {
        self.identifiers.is_empty()
    }

    /// Iterate `(identifier, row)` pairs in row order.
    pub fn iter(&self) -> impl Iterator<Item = (&Identifier, &[Value])> {
        self.identifiers
            .iter()
            .zip(self.table.rows.iter().map(Vec::as_slice))
    }

    /// The distinct identifiers, ordered.
    pub fn identifier_set(&self) -> BTreeSet<Identifier> {
        self.identifiers.iter().cloned().collect()
    }

    /// Keep the rows whose identifier matches `predicate`, preserving order.
    pub fn retain_by_identifier<F>(&self, mut predicate: F) -> Self
    where
        F: FnMut(&Identifier) -> bool,
    {
        let mut rows = Vec::new();
        let mut identifiers = Vec::new();
        for (id, row) in self.iter() {
            if predicate(id) {
                rows.push(row.to_vec());
                identifiers.push(id.clone());
            }
        }
        Self::new(
            Table {
                columns: self.table.columns.clone(),
                rows,
            },
            identifiers,
        )
    }

    /// Materialize the export shape: `NIK` first, then the original columns.
    ///
    /// An original column that is itself named `NIK` is replaced by the canonical one.
    pub fn to_table(&self) -> Table {
        let keep: Vec<usize> = (0..self.table.column_count())
            .filter(|&idx| self.table.columns[idx] != IDENTIFIER_COLUMN)
            .collect();

        let mut columns = Vec::with_capacity(keep.len() + 1);
        columns.push(IDENTIFIER_COLUMN.to_string());
        columns.extend(keep.iter().map(|&idx| self.table.columns[idx].clone()));

        let rows = self
            .iter()
            .map(|(id, row)| {
                let mut out = Vec::with_capacity(keep.len() + 1);
                out.push(Value::Utf8(id.as_str().to_string()));
                out.extend(keep.iter().map(|&idx| row.get(idx).cloned().unwrap_or(Value::Null)));
                out
            })
            .collect();

        Table::new(columns, rows)
    }
}
