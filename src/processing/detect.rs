//! Default column proposal for column selectors.

use crate::types::Table;

use super::clean::ColumnSelection;

/// Header name proposed as the member column.
pub const MEMBER_COLUMN_HINT: &str = "memberno";

/// Header name proposed as the identity column.
pub const IDENTITY_COLUMN_HINT: &str = "identityno";

/// Propose a [`ColumnSelection`] from the table's column names.
///
/// Picks the first column whose name equals `memberno` / `identityno`, ignoring ASCII case.
/// This is a selector default only; [`super::clean`] never calls it.
pub fn detect_default_columns(table: &Table) -> ColumnSelection {
    ColumnSelection {
        member: find_column(table, MEMBER_COLUMN_HINT),
        identity: find_column(table, IDENTITY_COLUMN_HINT),
    }
}

fn find_column(table: &Table, hint: &str) -> Option<String> {
    table
        .column_names()
        .find(|name| name.eq_ignore_ascii_case(hint))
        .map(str::to_string)
}
