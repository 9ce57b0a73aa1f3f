//! Row-level ingestion warnings.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Why a row was skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
    /// No geometry column had a value.
    EmptyGeometry,
    /// Geometry text could not be parsed into a ring.
    InvalidGeometry,
}

impl WarningKind {
    /// Get a human-readable label for the warning kind.
    pub fn label(&self) -> &'static str {
        match self {
            WarningKind::EmptyGeometry => "Empty Geometry",
            WarningKind::InvalidGeometry => "Invalid Geometry",
        }
    }
}

/// A skipped row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngestWarning {
    #[serde(rename = "type")]
    pub kind: WarningKind,
    /// Zero-based row index in the source (header excluded).
    pub row: usize,
    /// Resolved or placeholder name of the row.
    pub name: String,
    /// Parser message for invalid geometry.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl IngestWarning {
    pub fn empty_geometry(row: usize, name: impl Into<String>) -> Self {
        Self {
            kind: WarningKind::EmptyGeometry,
            row,
            name: name.into(),
            detail: None,
        }
    }

    pub fn invalid_geometry(row: usize, name: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            kind: WarningKind::InvalidGeometry,
            row,
            name: name.into(),
            detail: Some(detail.into()),
        }
    }
}

impl fmt::Display for IngestWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Row {} ({}): {}", self.row + 1, self.name, self.kind.label())?;
        if let Some(detail) = &self.detail {
            write!(f, ": {}", detail)?;
        }
        Ok(())
    }
}
