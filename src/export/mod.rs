//! Download renderings of result tables.
//!
//! - [`to_csv_bytes`]: UTF-8 with BOM, comma-separated
//! - `to_xlsx_bytes` (feature `excel`): single-sheet workbook
//!
//! [`ExportBundle`] names the (up to) four result sets of a two-file comparison.

pub mod csv;
#[cfg(feature = "excel")]
pub mod xlsx;

use serde::Serialize;

use crate::error::ExportResult;
use crate::processing::{CleanedTable, ReconciliationResult};
use crate::types::Table;

pub use self::csv::to_csv_bytes;
#[cfg(feature = "excel")]
pub use self::xlsx::to_xlsx_bytes;

/// Which result set a [`NamedDataset`] holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DatasetKind {
    /// The cleaned first upload.
    CleanedLeft,
    /// The cleaned second upload.
    CleanedRight,
    /// Rows of the second upload whose identifier the first lacks.
    OnlyInRight,
    /// Rows of the first upload whose identifier the second lacks.
    OnlyInLeft,
}

impl DatasetKind {
    /// Stable name, also used as file stem and sheet name.
    pub fn name(self) -> &'static str {
        match self {
            DatasetKind::CleanedLeft => "cleaned-left",
            DatasetKind::CleanedRight => "cleaned-right",
            DatasetKind::OnlyInRight => "only-in-right",
            DatasetKind::OnlyInLeft => "only-in-left",
        }
    }
}

/// A result table ready for download, in export shape (`NIK` first).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NamedDataset {
    /// Which result set this is.
    pub kind: DatasetKind,
    /// The table to render.
    pub table: Table,
}

impl NamedDataset {
    /// Wrap a cleaned table in export shape.
    pub fn from_cleaned(kind: DatasetKind, cleaned: &CleanedTable) -> Self {
        Self {
            kind,
            table: cleaned.to_table(),
        }
    }

    /// Dataset name.
    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    /// Suggested CSV download file name.
    pub fn csv_file_name(&self) -> String {
        format!("{}.csv", self.name())
    }

    /// Suggested XLSX download file name.
    pub fn xlsx_file_name(&self) -> String {
        format!("{}.xlsx", self.name())
    }

    /// CSV rendering.
    pub fn to_csv_bytes(&self) -> ExportResult<Vec<u8>> {
        to_csv_bytes(&self.table)
    }

    /// XLSX rendering; the sheet is named after the dataset.
    #[cfg(feature = "excel")]
    pub fn to_xlsx_bytes(&self) -> ExportResult<Vec<u8>> {
        to_xlsx_bytes(&self.table, self.name())
    }
}

/// The downloadable result sets of one pipeline run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ExportBundle {
    /// Datasets in display order: cleaned-left, cleaned-right, only-in-right, only-in-left.
    pub datasets: Vec<NamedDataset>,
}

impl ExportBundle {
    /// Collect whichever result sets exist.
    pub fn new(
        left: Option<&CleanedTable>,
        right: Option<&CleanedTable>,
        reconciliation: Option<&ReconciliationResult>,
    ) -> Self {
        let mut datasets = Vec::with_capacity(4);
        if let Some(left) = left {
            datasets.push(NamedDataset::from_cleaned(DatasetKind::CleanedLeft, left));
        }
        if let Some(right) = right {
            datasets.push(NamedDataset::from_cleaned(DatasetKind::CleanedRight, right));
        }
        if let Some(r) = reconciliation {
            datasets.push(NamedDataset::from_cleaned(DatasetKind::OnlyInRight, &r.only_right_rows));
            datasets.push(NamedDataset::from_cleaned(DatasetKind::OnlyInLeft, &r.only_left_rows));
        }
        Self { datasets }
    }

    /// Look up a dataset by kind.
    pub fn get(&self, kind: DatasetKind) -> Option<&NamedDataset> {
        self.datasets.iter().find(|d| d.kind == kind)
    }

    /// Number of datasets present.
    pub fn len(&self) -> usize {
        self.datasets.len()
    }

    /// Returns `true` if there is nothing to download.
    pub fn is_empty(&self) -> bool {
        self.datasets.is_empty()
    }
}
