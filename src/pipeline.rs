//! One full run: load → clean → (optional) reconcile → export.
//!
//! Each upload is processed independently, so a bad file or a bad column choice on one side
//! never hides the other side's preview. Reconciliation only runs when both sides cleaned.

use crate::config::{PipelineConfig, SideConfig};
use crate::error::{CleanResult, LoadResult};
use crate::export::ExportBundle;
use crate::ingestion::{self, TableFormat};
use crate::processing::{CleanOutcome, ReconciliationResult, clean, reconcile};
use crate::types::Table;

/// An uploaded file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upload {
    /// Original file name; its extension selects the format unless the config forces one.
    pub name: String,
    /// Raw file contents.
    pub bytes: Vec<u8>,
}

impl Upload {
    /// Create an upload from a file name and its bytes.
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }
}

/// What happened to one upload.
#[derive(Debug)]
pub struct SideRun {
    /// The loaded table, for previews.
    pub load: LoadResult<Table>,
    /// The cleaning result; `None` when loading failed.
    pub clean: Option<CleanResult<CleanOutcome>>,
}

impl SideRun {
    /// The cleaning outcome, if loading and cleaning both succeeded.
    pub fn outcome(&self) -> Option<&CleanOutcome> {
        self.clean.as_ref().and_then(|r| r.as_ref().ok())
    }
}

/// The result of [`run`].
#[derive(Debug)]
pub struct PipelineRun {
    /// First upload.
    pub left: SideRun,
    /// Second upload, if one was supplied.
    pub right: Option<SideRun>,
    /// Set when both sides cleaned successfully.
    pub reconciliation: Option<ReconciliationResult>,
}

impl PipelineRun {
    /// The downloadable result sets that exist for this run.
    pub fn exports(&self) -> ExportBundle {
        ExportBundle::new(
            self.left.outcome().map(|o| &o.table),
            self.right.as_ref().and_then(SideRun::outcome).map(|o| &o.table),
            self.reconciliation.as_ref(),
        )
    }
}

/// Run the whole pipeline from the current parameters.
///
/// Nothing is cached between calls; any parameter change means calling this again.
pub fn run(left: &Upload, right: Option<&Upload>, config: &PipelineConfig) -> PipelineRun {
    let left_run = run_side(left, &config.left);
    let right_run = right.map(|upload| run_side(upload, &config.right));

    let reconciliation = match (left_run.outcome(), right_run.as_ref().and_then(SideRun::outcome)) {
        (Some(l), Some(r)) => Some(reconcile(&l.table, &r.table)),
        _ => {
            if right_run.is_some() {
                tracing::warn!("skipping reconciliation: both uploads must load and clean first");
            }
            None
        }
    };

    PipelineRun {
        left: left_run,
        right: right_run,
        reconciliation,
    }
}

/// Load and clean a single upload.
pub fn run_side(upload: &Upload, config: &SideConfig) -> SideRun {
    let load = load_upload(upload, config);
    let cleaned = match &load {
        Ok(table) => {
            let result = clean(table, &config.clean.selection(), config.clean.dedup);
            if let Err(e) = &result {
                tracing::warn!(upload = %upload.name, error = %e, "cleaning skipped");
            }
            Some(result)
        }
        Err(e) => {
            tracing::warn!(upload = %upload.name, error = %e, "load failed");
            None
        }
    };
    SideRun {
        load,
        clean: cleaned,
    }
}

fn load_upload(upload: &Upload, config: &SideConfig) -> LoadResult<Table> {
    let format = match config.load.format {
        Some(f) => f,
        None => TableFormat::infer(&upload.name)?,
    };
    ingestion::load(&upload.bytes, &upload.name, format, &config.load)
}

#[cfg(test)]
mod tests {
    use super::{Upload, run};
    use crate::config::{CleanOptions, PipelineConfig};
    use crate::error::{CleanError, LoadError};
    use crate::processing::ColumnSelection;

    fn config(left: ColumnSelection, right: ColumnSelection) -> PipelineConfig {
        let mut cfg = PipelineConfig::default();
        cfg.left.clean = CleanOptions::default().with_selection(left);
        cfg.right.clean = CleanOptions::default().with_selection(right);
        cfg
    }

    #[test]
    fn single_upload_has_no_reconciliation() {
        let left = Upload::new("a.csv", "MemberNo\n3201234567890123\n");
        let out = run(&left, None, &config(ColumnSelection::member("MemberNo"), ColumnSelection::default()));
        assert!(out.right.is_none());
        assert!(out.reconciliation.is_none());
        assert_eq!(out.left.outcome().unwrap().stats.kept_rows, 1);
        assert_eq!(out.exports().len(), 1);
    }

    #[test]
    fn failed_load_on_one_side_keeps_the_other() {
        let left = Upload::new("a.csv", "MemberNo\n3201234567890123\n");
        let right = Upload::new("b.pdf", "whatever");
        let out = run(
            &left,
            Some(&right),
            &config(ColumnSelection::member("MemberNo"), ColumnSelection::member("MemberNo")),
        );
        let right = out.right.as_ref().unwrap();
        assert!(matches!(right.load, Err(LoadError::UnsupportedFormat { .. })));
        assert!(right.clean.is_none());
        assert!(out.left.outcome().is_some());
        assert!(out.reconciliation.is_none());
    }

    #[test]
    fn empty_selection_is_scoped_to_its_side() {
        let left = Upload::new("a.csv", "MemberNo\n3201234567890123\n");
        let right = Upload::new("b.csv", "IdentityNo\n3201234567890123\n");
        let out = run(
            &left,
            Some(&right),
            &config(ColumnSelection::member("MemberNo"), ColumnSelection::default()),
        );
        let right = out.right.as_ref().unwrap();
        assert!(right.load.is_ok());
        assert_eq!(right.clean, Some(Err(CleanError::EmptySelection)));
        assert!(out.reconciliation.is_none());
        assert_eq!(out.exports().len(), 1);
    }
}
