//! Column resolution over loosely named spreadsheet headers.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::config::ColumnConfig;
use crate::input::{CellValue, RawRow};

/// Header normalization: trimmed and lower-cased.
pub fn normalize_label(label: &str) -> String {
    label.trim().to_lowercase()
}

/// A row keyed by normalized labels.
///
/// When two labels normalize to the same key, the first one in source order wins.
#[derive(Debug, Clone)]
pub struct NormalizedRow<'a> {
    cells: HashMap<String, &'a CellValue>,
}

impl<'a> NormalizedRow<'a> {
    pub fn new(row: &'a RawRow) -> Self {
        let mut cells = HashMap::with_capacity(row.len());
        for (label, value) in row.cells() {
            cells.entry(normalize_label(label)).or_insert(value);
        }
        Self { cells }
    }

    /// First non-empty cell among `candidates`, tried in order.
    pub fn resolve<S: AsRef<str>>(&self, candidates: &[S]) -> Option<String> {
        candidates.iter().find_map(|candidate| {
            self.cells
                .get(&normalize_label(candidate.as_ref()))
                .filter(|cell| !cell.is_empty())
                .map(|cell| cell.as_text())
        })
    }

    /// Whether any candidate is present as a header, empty or not.
    pub fn has_any<S: AsRef<str>>(&self, candidates: &[S]) -> bool {
        candidates
            .iter()
            .any(|c| self.cells.contains_key(&normalize_label(c.as_ref())))
    }
}

/// Resolve one field from a raw row.
pub fn resolve<S: AsRef<str>>(row: &RawRow, candidates: &[S]) -> Option<String> {
    NormalizedRow::new(row).resolve(candidates)
}

/// Values pulled out of one row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResolvedFields {
    pub name: Option<String>,
    pub geometry: Option<String>,
}

/// Resolves the name and geometry fields using configured candidate lists.
#[derive(Debug, Clone)]
pub struct ColumnResolver {
    name: Vec<String>,
    geometry: Vec<String>,
}

impl ColumnResolver {
    pub fn new(columns: &ColumnConfig) -> Self {
        Self {
            name: columns.name.iter().map(|c| normalize_label(c)).collect(),
            geometry: columns.geometry.iter().map(|c| normalize_label(c)).collect(),
        }
    }

    /// Accepted geometry headers, in precedence order.
    pub fn geometry_candidates(&self) -> &[String] {
        &self.geometry
    }

    /// Structural precheck against the header row.
    pub fn has_geometry_column(&self, header_row: &RawRow) -> bool {
        NormalizedRow::new(header_row).has_any(&self.geometry)
    }

    pub fn resolve(&self, row: &RawRow) -> ResolvedFields {
        let normalized = NormalizedRow::new(row);
        ResolvedFields {
            name: normalized.resolve(&self.name),
            geometry: normalized.resolve(&self.geometry),
        }
    }
}

impl Default for ColumnResolver {
    fn default() -> Self {
        Self::new(&ColumnConfig::default())
    }
}
