//! Spreadsheet column resolution.

mod column;

pub use column::{normalize_label, resolve, ColumnResolver, NormalizedRow, ResolvedFields};
