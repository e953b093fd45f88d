//! Two-way reconciliation of cleaned tables by identifier.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::identifier::Identifier;

use super::cleaned::CleanedTable;

/// Identifiers found on only one side, and the rows carrying them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReconciliationResult {
    /// Identifiers present in the left table but not the right.
    pub only_left: BTreeSet<Identifier>,
    /// Identifiers present in the right table but not the left.
    pub only_right: BTreeSet<Identifier>,
    /// Identifiers present on both sides.
    pub intersection: BTreeSet<Identifier>,
    /// Every left row whose identifier is in `only_left`.
    pub only_left_rows: CleanedTable,
    /// Every right row whose identifier is in `only_right`.
    pub only_right_rows: CleanedTable,
}

impl ReconciliationResult {
    /// Number of identifiers present on both sides.
    pub fn intersection_count(&self) -> usize {
        self.intersection.len()
    }
}

/// Compare the identifier sets of two cleaned tables.
///
/// The row subsets keep every matching row, so when deduplication was skipped upstream they
/// can hold several rows with the same identifier.
pub fn reconcile(left: &CleanedTable, right: &CleanedTable) -> ReconciliationResult {
    let ids_left = left.identifier_set();
    let ids_right = right.identifier_set();

    let only_left: BTreeSet<Identifier> = ids_left.difference(&ids_right).cloned().collect();
    let only_right: BTreeSet<Identifier> = ids_right.difference(&ids_left).cloned().collect();
    let intersection: BTreeSet<Identifier> = ids_left.intersection(&ids_right).cloned().collect();

    let only_left_rows = left.retain_by_identifier(|id| only_left.contains(id));
    let only_right_rows = right.retain_by_identifier(|id| only_right.contains(id));

    tracing::info!(
        only_left = only_left.len(),
        only_right = only_right.len(),
        intersection = intersection.len(),
        "reconciled identifiers"
    );

    ReconciliationResult {
        only_left,
        only_right,
        intersection,
        only_left_rows,
        only_right_rows,
    }
}

#[cfg(test)]
mod tests {
    use super::reconcile;
    use crate::processing::{CleanedTable, ColumnSelection, clean};
    use crate::types::{Table, Value};

    fn cleaned(ids: &[&str], dedup: bool) -> CleanedTable {
        let table = Table::new(
            vec!["id".to_string()],
            ids.iter().map(|s| vec![Value::from(*s)]).collect(),
        );
        clean(&table, &ColumnSelection::member("id"), dedup).unwrap().table
    }

    fn strs(set: &std::collections::BTreeSet<crate::identifier::Identifier>) -> Vec<&str> {
        set.iter().map(|i| i.as_str()).collect()
    }

    #[test]
    fn set_differences_and_intersection() {
        let left = cleaned(&["3200000000000001", "3200000000000002"], true);
        let right = cleaned(&["3200000000000002", "3200000000000003"], true);

        let r = reconcile(&left, &right);
        assert_eq!(strs(&r.only_left), vec!["3200000000000001"]);
        assert_eq!(strs(&r.only_right), vec!["3200000000000003"]);
        assert_eq!(strs(&r.intersection), vec!["3200000000000002"]);
        assert_eq!(r.only_left_rows.row_count(), 1);
        assert_eq!(r.only_right_rows.row_count(), 1);
    }

    #[test]
    fn duplicate_rows_survive_without_dedup() {
        let left = cleaned(
            &["3200000000000001", "3200000000000001", "3200000000000002"],
            false,
        );
        let right = cleaned(&["3200000000000002"], false);

        let r = reconcile(&left, &right);
        assert_eq!(r.only_left.len(), 1);
        assert_eq!(r.only_left_rows.row_count(), 2);
        assert!(r.only_right_rows.is_empty());
    }

    #[test]
    fn swapping_sides_swaps_results() {
        let a = cleaned(&["3200000000000001", "3200000000000002"], true);
        let b = cleaned(&["3200000000000002", "3200000000000003"], true);

        let ab = reconcile(&a, &b);
        let ba = reconcile(&b, &a);
        assert_eq!(ab.only_left, ba.only_right);
        assert_eq!(ab.only_right, ba.only_left);
        assert_eq!(ab.intersection_count(), ba.intersection_count());
    }

    #[test]
    fn empty_sides() {
        let a = cleaned(&[], true);
        let b = cleaned(&["3200000000000003"], true);
        let r = reconcile(&a, &b);
        assert!(r.only_left.is_empty());
        assert_eq!(r.only_right.len(), 1);
        assert_eq!(r.intersection_count(), 0);
    }
}
