//! Table loading entrypoints and implementations.
//!
//! Most callers should use [`load`] or [`load_path`] (from [`unified`]) which:
//!
//! - picks CSV or spreadsheet loading from the declared format or the file extension
//! - decodes CSV through a fixed encoding fallback list ([`encoding::ENCODING_FALLBACKS`])
//! - optionally reports success/failure/alerts to a [`LoadObserver`]
//!
//! Format-specific functions are also available under:
//! - [`csv`]
//! - `excel` (feature `excel`)

pub mod csv;
pub mod encoding;
#[cfg(feature = "excel")]
pub mod excel;
pub mod header;
pub mod observability;
pub mod unified;

pub use self::csv::{Delimiter, DecodedCsv};
pub use encoding::{ENCODING_FALLBACKS, TextEncoding};
pub use observability::{
    CompositeObserver, LoadContext, LoadObserver, LoadSeverity, LoadStats, TracingObserver,
};
pub use unified::{LoadOptions, TableFormat, list_sheets, load, load_path, severity_for_error};
