//! Deduplication by identifier.

use std::collections::HashSet;

use super::cleaned::CleanedTable;

/// Keep the first row per identifier, in original row order.
///
/// Returns the deduplicated table and the number of rows removed.
pub fn dedup_by_identifier(cleaned: &CleanedTable) -> (CleanedTable, usize) {
    let mut seen = HashSet::with_capacity(cleaned.row_count());
    let out = cleaned.retain_by_identifier(|id| seen.insert(id.clone()));
    let removed = cleaned.row_count() - out.row_count();
    (out, removed)
}
