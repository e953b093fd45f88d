use thiserror::Error;

use crate::ingestion::encoding::TextEncoding;

/// Convenience result type for loading operations.
pub type LoadResult<T> = Result<T, LoadError>;

/// Convenience result type for cleaning operations.
pub type CleanResult<T> = Result<T, CleanError>;

/// Convenience result type for export operations.
pub type ExportResult<T> = Result<T, ExportError>;

/// Error type returned by the table loader.
///
/// This is a single error enum shared across CSV and (optional) spreadsheet loading.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Underlying I/O error (e.g. file not found, permission denied).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "excel")]
    /// Spreadsheet error (feature-gated behind `excel`).
    #[error("excel error: {0}")]
    Excel(#[from] calamine::Error),

    /// CSV tokenizer error.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// The bytes are not valid text in the attempted encoding.
    #[error("input is not valid {encoding}")]
    Decode { encoding: TextEncoding },

    /// A record does not fit the table shape fixed by the first record.
    #[error("malformed table at line {line}: {message}")]
    Malformed { line: u64, message: String },

    /// The input holds no records at all.
    #[error("no columns to parse from input")]
    Empty,

    /// The requested sheet does not exist in the workbook.
    #[error("sheet '{sheet}' not found (available: {available:?})")]
    SheetNotFound {
        sheet: String,
        available: Vec<String>,
    },

    /// The format is unknown or not enabled in this build.
    #[error("unsupported format: {message}")]
    UnsupportedFormat { message: String },

    /// Every candidate text encoding failed; `last` is the failure of the final candidate.
    #[error("failed to read csv with any of {tried} encodings; last error: {last}")]
    EncodingsExhausted { tried: usize, last: Box<LoadError> },
}

/// Error type returned by the row cleaner.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CleanError {
    /// Neither a member column nor an identity column was selected.
    #[error("select at least one identifier column (member or identity)")]
    EmptySelection,

    /// A selected column is not present in the table.
    #[error("column '{column}' not found (available: {available:?})")]
    UnknownColumn {
        column: String,
        available: Vec<String>,
    },
}

/// Error type returned when rendering tables for download.
#[derive(Debug, Error)]
pub enum ExportError {
    /// CSV writer error.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// Underlying I/O error while flushing a writer.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "excel")]
    /// XLSX writer error (feature-gated behind `excel`).
    #[error("xlsx error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    /// The table does not fit in a single worksheet.
    #[error("table too large for one worksheet: {rows} rows x {columns} columns")]
    SheetTooLarge { rows: usize, columns: usize },
}
