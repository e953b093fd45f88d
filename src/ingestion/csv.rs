//! CSV loading with a selectable delimiter and encoding fallback.

use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{LoadError, LoadResult};
use crate::types::{Table, Value};

use super::encoding::{ENCODING_FALLBACKS, TextEncoding};
use super::header::{positional_names, unique_names};

/// Field separator for CSV input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Delimiter {
    /// `,`
    #[default]
    Comma,
    /// `;`
    Semicolon,
    /// `\t`
    Tab,
    /// `|`
    Pipe,
}

impl Delimiter {
    /// All supported delimiters, in the order a selector would offer them.
    pub const ALL: [Delimiter; 4] = [
        Delimiter::Comma,
        Delimiter::Semicolon,
        Delimiter::Tab,
        Delimiter::Pipe,
    ];

    /// Parse a delimiter from its character.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            ',' => Some(Self::Comma),
            ';' => Some(Self::Semicolon),
            '\t' => Some(Self::Tab),
            '|' => Some(Self::Pipe),
            _ => None,
        }
    }

    /// The separator byte handed to the CSV reader.
    pub fn as_byte(self) -> u8 {
        match self {
            Self::Comma => b',',
            Self::Semicolon => b';',
            Self::Tab => b'\t',
            Self::Pipe => b'|',
        }
    }
}

/// A CSV table together with the encoding that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedCsv {
    /// The parsed table.
    pub table: Table,
    /// The first encoding in [`ENCODING_FALLBACKS`] that decoded and parsed.
    pub encoding: TextEncoding,
}

/// Load a CSV file from disk. See [`load_csv`].
pub fn load_csv_from_path(
    path: impl AsRef<Path>,
    delimiter: Delimiter,
    has_header: bool,
) -> LoadResult<DecodedCsv> {
    let bytes = std::fs::read(path)?;
    load_csv(&bytes, delimiter, has_header)
}

/// Load CSV bytes into an in-memory [`Table`].
///
/// Encodings are tried in [`ENCODING_FALLBACKS`] order. A candidate fails either because the
/// bytes do not decode or because the decoded text does not parse into a table; both move on
/// to the next candidate. If every candidate fails, the last failure is returned inside
/// [`LoadError::EncodingsExhausted`].
///
/// Rules:
///
/// - The first record fixes the column count. Later records with more fields are an error,
///   shorter ones are padded with [`Value::Null`].
/// - With `has_header`, the first record names the columns; otherwise columns are named
///   `0`, `1`, `2`, ... and every record is data.
/// - Empty fields become [`Value::Null`]; everything else is kept as [`Value::Utf8`].
pub fn load_csv(bytes: &[u8], delimiter: Delimiter, has_header: bool) -> LoadResult<DecodedCsv> {
    let mut last_err: Option<LoadError> = None;

    for encoding in ENCODING_FALLBACKS {
        let attempt = match encoding.decode(bytes) {
            Some(text) => parse_csv_text(&text, delimiter, has_header),
            None => Err(LoadError::Decode { encoding }),
        };

        match attempt {
            Ok(table) => {
                tracing::debug!(
                    encoding = %encoding,
                    rows = table.row_count(),
                    columns = table.column_count(),
                    "decoded csv"
                );
                return Ok(DecodedCsv { table, encoding });
            }
            Err(err) => {
                tracing::debug!(encoding = %encoding, error = %err, "csv attempt failed");
                last_err = Some(err);
            }
        }
    }

    Err(LoadError::EncodingsExhausted {
        tried: ENCODING_FALLBACKS.len(),
        last: Box::new(last_err.unwrap_or(LoadError::Empty)),
    })
}

/// Parse already-decoded CSV text.
///
/// A leading byte-order mark is dropped.
pub fn parse_csv_text(text: &str, delimiter: Delimiter, has_header: bool) -> LoadResult<Table> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(delimiter.as_byte())
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());
    load_csv_from_reader(&mut rdr, has_header)
}

/// Load CSV data from an existing CSV reader.
///
/// The reader should be built with `has_headers(false)` and `flexible(true)`; header handling
/// and ragged-row checks happen here.
pub fn load_csv_from_reader<R: Read>(rdr: &mut csv::Reader<R>, has_header: bool) -> LoadResult<Table> {
    let mut records = rdr.records();
    let first = match records.next() {
        Some(result) => result?,
        None => return Err(LoadError::Empty),
    };
    let width = first.len();

    let (columns, mut rows) = if has_header {
        (unique_names(first.iter()), Vec::new())
    } else {
        (positional_names(width), vec![record_to_row(&first, width)])
    };

    for result in records {
        let record = result?;
        if record.len() > width {
            let line = record.position().map(|p| p.line()).unwrap_or_default();
            return Err(LoadError::Malformed {
                line,
                message: format!("expected {width} fields, saw {}", record.len()),
            });
        }
        rows.push(record_to_row(&record, width));
    }

    Ok(Table::new(columns, rows))
}

fn record_to_row(record: &csv::StringRecord, width: usize) -> Vec<Value> {
    let mut row: Vec<Value> = record
        .iter()
        .map(|field| {
            if field.is_empty() {
                Value::Null
            } else {
                Value::Utf8(field.to_owned())
            }
        })
        .collect();
    row.resize(width, Value::Null);
    row
}
