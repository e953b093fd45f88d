//! Pipeline parameters.
//!
//! Every parameter a user can change (delimiter, header flag, sheet, source columns, dedup)
//! lives in a [`PipelineConfig`] that is passed into [`crate::pipeline::run`]. All structs
//! deserialize from JSON with defaults for missing fields.

use serde::{Deserialize, Serialize};

use crate::ingestion::LoadOptions;
use crate::processing::ColumnSelection;

/// How one side's table is cleaned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CleanOptions {
    /// Primary identifier column. `None` means "no column".
    pub member_column: Option<String>,
    /// Fallback identifier column. `None` means "no column".
    pub identity_column: Option<String>,
    /// Keep only the first row per identifier.
    pub dedup: bool,
}

impl Default for CleanOptions {
    fn default() -> Self {
        Self {
            member_column: None,
            identity_column: None,
            dedup: true,
        }
    }
}

impl CleanOptions {
    /// The source columns as a [`ColumnSelection`].
    pub fn selection(&self) -> ColumnSelection {
        ColumnSelection {
            member: self.member_column.clone(),
            identity: self.identity_column.clone(),
        }
    }

    /// Replace the source columns with `selection`.
    pub fn with_selection(mut self, selection: ColumnSelection) -> Self {
        self.member_column = selection.member;
        self.identity_column = selection.identity;
        self
    }
}

/// Parameters for one upload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SideConfig {
    /// How the upload is parsed.
    pub load: LoadOptions,
    /// How the parsed table is cleaned.
    pub clean: CleanOptions,
}

/// Parameters for a full run over one or two uploads.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// First upload.
    pub left: SideConfig,
    /// Second upload; ignored when only one file is supplied.
    pub right: SideConfig,
}

impl PipelineConfig {
    /// Parse a config from JSON. Missing fields take their defaults.
    ///
    /// ```
    /// use nik_reconcile::config::PipelineConfig;
    /// use nik_reconcile::ingestion::Delimiter;
    ///
    /// let cfg = PipelineConfig::from_json_str(
    ///     r#"{ "left": { "load": { "delimiter": "semicolon" }, "clean": { "member_column": "MemberNo" } } }"#,
    /// )
    /// .unwrap();
    /// assert_eq!(cfg.left.load.delimiter, Delimiter::Semicolon);
    /// assert!(cfg.left.clean.dedup);
    /// assert!(cfg.right.load.has_header);
    /// ```
    pub fn from_json_str(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Serialize the config to pretty JSON.
    pub fn to_json_string(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::{CleanOptions, PipelineConfig};
    use crate::ingestion::{Delimiter, TableFormat};
    use crate::processing::ColumnSelection;

    #[test]
    fn empty_json_is_all_defaults() {
        let cfg = PipelineConfig::from_json_str("{}").unwrap();
        assert_eq!(cfg.left.load.delimiter, Delimiter::Comma);
        assert!(cfg.left.load.has_header);
        assert_eq!(cfg.left.load.format, None);
        assert_eq!(cfg.left.clean, CleanOptions::default());
        assert!(cfg.left.clean.selection().is_empty());
    }

    #[test]
    fn round_trips_through_json() {
        let mut cfg = PipelineConfig::default();
        cfg.right.load.format = Some(TableFormat::Spreadsheet);
        cfg.right.load.sheet = Some("Data".to_string());
        cfg.right.clean = CleanOptions::default().with_selection(ColumnSelection::identity("IdentityNo"));
        cfg.right.clean.dedup = false;

        let json = cfg.to_json_string().unwrap();
        let back = PipelineConfig::from_json_str(&json).unwrap();
        assert_eq!(back.right.load.format, Some(TableFormat::Spreadsheet));
        assert_eq!(back.right.load.sheet.as_deref(), Some("Data"));
        assert_eq!(back.right.clean, cfg.right.clean);
    }

    #[test]
    fn unknown_delimiter_is_rejected() {
        let err = PipelineConfig::from_json_str(r#"{"left":{"load":{"delimiter":"colon"}}}"#).unwrap_err();
        assert!(err.to_string().contains("unknown variant"), "{err}");
    }
}
