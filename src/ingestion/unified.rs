//! Unified loading entrypoint.
//!
//! Most callers should use [`load`] (bytes already in memory, e.g. an upload) or [`load_path`]
//! (a file on disk).
//!
//! - If [`LoadOptions::format`] is `None`, [`load_path`] infers the format from the file
//!   extension; [`load`] takes the format as an argument.
//! - If a [`super::observability::LoadObserver`] is configured, success/failure/alerts are
//!   reported to it.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{LoadError, LoadResult};
use crate::types::Table;

use super::csv::{self, Delimiter};
use super::encoding::TextEncoding;
use super::observability::{LoadContext, LoadObserver, LoadSeverity, LoadStats};

/// Supported input formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableFormat {
    /// Delimited text.
    Csv,
    /// Spreadsheet/workbook formats (feature-gated behind `excel`).
    Spreadsheet,
}

impl TableFormat {
    /// Parse a format from a file extension (case-insensitive).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "csv" => Some(Self::Csv),
            "xlsx" | "xls" | "xlsm" | "xlsb" | "ods" => Some(Self::Spreadsheet),
            _ => None,
        }
    }

    /// Infer the format from a file name or path.
    pub fn infer(path: impl AsRef<Path>) -> LoadResult<Self> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|s| s.to_str())
            .ok_or_else(|| LoadError::UnsupportedFormat {
                message: format!(
                    "cannot infer format: path has no extension ({})",
                    path.display()
                ),
            })?;

        Self::from_extension(ext).ok_or_else(|| LoadError::UnsupportedFormat {
            message: format!(
                "cannot infer format from extension '{ext}' for path ({})",
                path.display()
            ),
        })
    }
}

/// Options controlling how one upload is turned into a [`Table`].
///
/// Use [`Default`] for common cases: comma-separated, first row is the header, first sheet.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadOptions {
    /// If `None`, infer the format from the file extension.
    pub format: Option<TableFormat>,
    /// CSV field separator.
    pub delimiter: Delimiter,
    /// Whether the first row names the columns.
    pub has_header: bool,
    /// Spreadsheet sheet to parse. `None` parses the first sheet.
    pub sheet: Option<String>,
    /// Optional observer for logging/alerts.
    #[serde(skip)]
    pub observer: Option<Arc<dyn LoadObserver>>,
    /// Severity threshold at which `on_alert` is invoked.
    pub alert_at_or_above: LoadSeverity,
}

impl fmt::Debug for LoadOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadOptions")
            .field("format", &self.format)
            .field("delimiter", &self.delimiter)
            .field("has_header", &self.has_header)
            .field("sheet", &self.sheet)
            .field("observer_set", &self.observer.is_some())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .finish()
    }
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            format: None,
            delimiter: Delimiter::Comma,
            has_header: true,
            sheet: None,
            observer: None,
            alert_at_or_above: LoadSeverity::Critical,
        }
    }
}

/// Load a file from disk into a [`Table`].
///
/// The format comes from `options.format`, or from the file extension when that is `None`.
/// Missing files are reported as [`LoadError::Io`] (and to the observer as
/// [`LoadSeverity::Critical`]).
pub fn load_path(path: impl AsRef<Path>, options: &LoadOptions) -> LoadResult<Table> {
    let path = path.as_ref();
    let format = match options.format {
        Some(f) => f,
        None => TableFormat::infer(path)?,
    };
    let ctx = LoadContext {
        source: path.display().to_string(),
        format,
    };

    match std::fs::read(path) {
        Ok(bytes) => load_with_context(&bytes, &ctx, options),
        Err(e) => {
            let err = LoadError::Io(e);
            report_failure(&ctx, options, &err);
            Err(err)
        }
    }
}

/// Load in-memory bytes (an upload) into a [`Table`].
///
/// `source` is only used to label observer events.
///
/// When an observer is configured, this function reports:
///
/// - `on_success` on success, with row/column counts and the CSV encoding used
/// - `on_failure` on failure, with a computed severity
/// - `on_alert` on failure when the computed severity is >= `options.alert_at_or_above`
///
/// # Examples
///
/// ```
/// use nik_reconcile::ingestion::{load, Delimiter, LoadOptions, TableFormat};
///
/// # fn main() -> Result<(), nik_reconcile::LoadError> {
/// let opts = LoadOptions {
///     delimiter: Delimiter::Semicolon,
///     ..Default::default()
/// };
/// let table = load(b"MemberNo;Name\n3201234567890123;Ada\n", "members.csv", TableFormat::Csv, &opts)?;
/// assert_eq!(table.row_count(), 1);
/// # Ok(())
/// # }
/// ```
pub fn load(
    bytes: &[u8],
    source: &str,
    format: TableFormat,
    options: &LoadOptions,
) -> LoadResult<Table> {
    let ctx = LoadContext {
        source: source.to_string(),
        format,
    };
    load_with_context(bytes, &ctx, options)
}

fn load_with_context(bytes: &[u8], ctx: &LoadContext, options: &LoadOptions) -> LoadResult<Table> {
    let result = match ctx.format {
        TableFormat::Csv => csv::load_csv(bytes, options.delimiter, options.has_header)
            .map(|decoded| (decoded.table, Some(decoded.encoding))),
        TableFormat::Spreadsheet => {
            load_spreadsheet_dispatch(bytes, options.sheet.as_deref(), options.has_header)
                .map(|table| (table, None))
        }
    };

    match result {
        Ok((table, encoding)) => {
            report_success(ctx, options, &table, encoding);
            Ok(table)
        }
        Err(err) => {
            report_failure(ctx, options, &err);
            Err(err)
        }
    }
}

fn report_success(
    ctx: &LoadContext,
    options: &LoadOptions,
    table: &Table,
    encoding: Option<TextEncoding>,
) {
    if let Some(obs) = options.observer.as_ref() {
        obs.on_success(
            ctx,
            LoadStats {
                rows: table.row_count(),
                columns: table.column_count(),
                encoding,
            },
        );
    }
}

fn report_failure(ctx: &LoadContext, options: &LoadOptions, err: &LoadError) {
    if let Some(obs) = options.observer.as_ref() {
        let sev = severity_for_error(err);
        obs.on_failure(ctx, sev, err);
        if sev >= options.alert_at_or_above {
            obs.on_alert(ctx, sev, err);
        }
    }
}

/// Severity assigned to a load failure.
///
/// I/O problems are [`LoadSeverity::Critical`]; content the user can fix by choosing a different
/// delimiter, sheet or file is [`LoadSeverity::Error`].
pub fn severity_for_error(e: &LoadError) -> LoadSeverity {
    match e {
        LoadError::Io(_) => LoadSeverity::Critical,
        LoadError::Csv(err) => match err.kind() {
            ::csv::ErrorKind::Io(_) => LoadSeverity::Critical,
            _ => LoadSeverity::Error,
        },
        #[cfg(feature = "excel")]
        LoadError::Excel(_) => LoadSeverity::Error,
        LoadError::EncodingsExhausted { last, .. } => severity_for_error(last),
        LoadError::Decode { .. }
        | LoadError::Malformed { .. }
        | LoadError::Empty
        | LoadError::SheetNotFound { .. }
        | LoadError::UnsupportedFormat { .. } => LoadSeverity::Error,
    }
}

/// List the sheets of a spreadsheet upload so the caller can choose one.
pub fn list_sheets(bytes: &[u8]) -> LoadResult<Vec<String>> {
    // Avoid unused warnings when the feature is off.
    let _ = bytes;

    #[cfg(feature = "excel")]
    {
        super::excel::list_sheets(bytes)
    }

    #[cfg(not(feature = "excel"))]
    {
        Err(excel_disabled())
    }
}

fn load_spreadsheet_dispatch(bytes: &[u8], sheet: Option<&str>, has_header: bool) -> LoadResult<Table> {
    // Avoid unused warnings when the feature is off.
    let _ = (bytes, sheet, has_header);

    #[cfg(feature = "excel")]
    {
        use super::excel;

        match sheet {
            Some(name) => excel::parse_sheet(bytes, name, has_header),
            None => excel::parse_first_sheet(bytes, has_header),
        }
    }

    #[cfg(not(feature = "excel"))]
    {
        Err(excel_disabled())
    }
}

#[cfg(not(feature = "excel"))]
fn excel_disabled() -> LoadError {
    LoadError::UnsupportedFormat {
        message: "spreadsheet loading not enabled (enable cargo feature 'excel')".to_string(),
    }
}
