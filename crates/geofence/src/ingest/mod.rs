//! Geofence ingestion: column resolution, WKT parsing and row-level warnings.

mod pipeline;
mod template;
mod warning;

pub use pipeline::{ingest, IngestPipeline, Ingestion};
pub use template::{save_template, template_rows, write_template, TEMPLATE_HEADERS, TEMPLATE_ROWS};
pub use warning::{IngestWarning, WarningKind};
