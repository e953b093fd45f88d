//! `nik-reconcile` loads one or two uploaded tables (CSV or spreadsheet), extracts a canonical
//! 16-digit NIK identifier from a member and/or identity column, deduplicates rows by it, and
//! reconciles the two uploads by identifier.
//!
//! The primary entrypoint is [`pipeline::run`], which takes the uploads and an explicit
//! [`config::PipelineConfig`] and returns every intermediate result, so a caller can preview
//! each side, show counts, and offer the result sets for download.
//!
//! ## Stages
//!
//! 1. **Load** ([`ingestion`]): CSV with a chosen delimiter, decoded through the fixed fallback
//!    list UTF-8 → UTF-8 with BOM → Windows-1252 → Latin-1; or one sheet of a workbook
//!    (`.xlsx`, `.xls`, `.xlsm`, `.xlsb`, `.ods`, feature `excel`).
//! 2. **Normalize** ([`identifier`]): strip everything but ASCII digits; keep exactly 16 digits
//!    starting with `3`.
//! 3. **Clean** ([`processing::clean`]): member column first, identity column as fallback; rows
//!    with neither are dropped; optional first-seen dedup.
//! 4. **Reconcile** ([`processing::reconcile`]): identifiers only in the left upload, only in
//!    the right, and in both.
//! 5. **Export** ([`export`]): CSV (UTF-8 with BOM, `NIK` first) and single-sheet XLSX.
//!
//! ## Quick example
//!
//! ```rust
//! use nik_reconcile::config::{CleanOptions, PipelineConfig};
//! use nik_reconcile::pipeline::{run, Upload};
//! use nik_reconcile::processing::ColumnSelection;
//!
//! let left = Upload::new("members.csv", "MemberNo\n3201234567890123\n3209999999999999\n");
//! let right = Upload::new("census.csv", "IdentityNo\n3209999999999999\n1112223334445556\n");
//!
//! let mut cfg = PipelineConfig::default();
//! cfg.left.clean = CleanOptions::default().with_selection(ColumnSelection::member("MemberNo"));
//! cfg.right.clean = CleanOptions::default().with_selection(ColumnSelection::identity("IdentityNo"));
//!
//! let out = run(&left, Some(&right), &cfg);
//! let rec = out.reconciliation.as_ref().unwrap();
//! assert_eq!(rec.only_left.len(), 1);
//! assert!(rec.only_right.is_empty());
//! assert_eq!(out.exports().len(), 4);
//! ```
//!
//! ## Modules
//!
//! - [`ingestion`]: loading entrypoints, encodings and format-specific implementations
//! - [`identifier`]: the [`identifier::Identifier`] type and normalization
//! - [`processing`]: cleaning, dedup, reconciliation and preview helpers
//! - [`export`]: download renderings
//! - [`config`]: serde-backed parameter structs
//! - [`pipeline`]: the end-to-end driver
//! - [`types`]: [`types::Table`] and [`types::Value`]
//! - [`error`]: error types for each stage
//!
//! ## Logging
//!
//! The crate emits `tracing` events (encoding attempts at `debug`, clean and reconcile counts at
//! `info`) and never installs a subscriber. Load outcomes can also be routed to a
//! [`ingestion::LoadObserver`].

pub mod config;
pub mod error;
pub mod export;
pub mod identifier;
pub mod ingestion;
pub mod pipeline;
pub mod processing;
pub mod types;

pub use error::{CleanError, CleanResult, ExportError, ExportResult, LoadError, LoadResult};
pub use identifier::{Identifier, normalize};
