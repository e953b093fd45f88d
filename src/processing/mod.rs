//! In-memory table transformations.
//!
//! The processing layer operates on [`crate::types::Table`] values produced by loading.
//! Everything here is pure and single-threaded; every call recomputes from its inputs.
//!
//! Implemented:
//!
//! - [`clean()`]: identifier extraction with member/identity priority and optional dedup
//! - [`dedup_by_identifier()`]: first-seen deduplication of a [`CleanedTable`]
//! - [`reconcile()`]: identifier set differences between two cleaned tables
//! - [`detect_default_columns()`]: default column proposal for selectors
//! - [`filter_equals()`] / [`distinct_values()`] / [`summarize()`]: preview helpers
//!
//! ## Example: clean → reconcile
//!
//! ```rust
//! use nik_reconcile::processing::{clean, reconcile, ColumnSelection};
//! use nik_reconcile::types::{Table, Value};
//!
//! let left = Table::new(
//!     vec!["MemberNo".to_string()],
//!     vec![
//!         vec![Value::from("3201234567890123")],
//!         vec![Value::from("3209999999999999")],
//!     ],
//! );
//! let right = Table::new(
//!     vec!["IdentityNo".to_string()],
//!     vec![
//!         vec![Value::from("3209999999999999")],
//!         vec![Value::from("1112223334445556")],
//!     ],
//! );
//!
//! let left = clean(&left, &ColumnSelection::member("MemberNo"), true).unwrap();
//! let right = clean(&right, &ColumnSelection::identity("IdentityNo"), true).unwrap();
//! assert_eq!(right.stats.invalid_rows, 1);
//!
//! let result = reconcile(&left.table, &right.table);
//! assert_eq!(result.only_left.len(), 1);
//! assert!(result.only_right.is_empty());
//! assert_eq!(result.intersection_count(), 1);
//! ```

pub mod clean;
pub mod cleaned;
pub mod dedup;
pub mod detect;
pub mod filter;
pub mod reconcile;
pub mod summary;

pub use clean::{CleanOutcome, CleanStats, ColumnSelection, clean};
pub use cleaned::CleanedTable;
pub use dedup::dedup_by_identifier;
pub use detect::detect_default_columns;
pub use filter::{EqualsFilter, Expected, distinct_values, filter_equals};
pub use reconcile::{ReconciliationResult, reconcile};
pub use summary::{ColumnKind, TableSummary, summarize};
