//! CSV rendering for downloads.

use crate::error::{ExportError, ExportResult};
use crate::types::Table;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Render a table as comma-separated UTF-8 with a byte-order mark.
///
/// The BOM lets spreadsheet applications pick the right encoding when the file is opened
/// directly. Missing values are written as empty fields.
pub fn to_csv_bytes(table: &Table) -> ExportResult<Vec<u8>> {
    let mut buf = UTF8_BOM.to_vec();
    {
        let mut writer = csv::WriterBuilder::new()
            .delimiter(b',')
            .from_writer(&mut buf);

        writer.write_record(&table.columns)?;
        for row in &table.rows {
            writer.write_record(row.iter().map(|v| v.render().unwrap_or_default()))?;
        }
        writer.flush().map_err(ExportError::Io)?;
    }
    Ok(buf)
}
