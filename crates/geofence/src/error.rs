//! Error types for the geofence library.

use std::path::PathBuf;
use thiserror::Error;

use crate::config::Messages;

/// Main error type for geofence operations.
#[derive(Debug, Error)]
pub enum GeofenceError {
    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// File format not supported.
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Source decoded but has no header or no lines at all.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for geofence operations.
pub type Result<T> = std::result::Result<T, GeofenceError>;

/// A fatal outcome for one load attempt.
///
/// Row-level problems are never reported here; they become
/// [`IngestWarning`](crate::ingest::IngestWarning)s instead.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The tabular source could not be decoded at all.
    #[error("could not read source: {0}")]
    SourceRead(String),

    /// The source decoded but contained zero rows.
    #[error("source contains no rows")]
    EmptyDataset,

    /// None of the accepted geometry headers is present.
    #[error("missing geometry column (expected one of: {})", .accepted.join(", "))]
    MissingGeometryColumn { accepted: Vec<String> },

    /// Every row was rejected.
    #[error("no valid geofences among {rows} rows")]
    NoValidGeofences { rows: usize },
}

impl LoadError {
    /// The single short string shown to the user.
    pub fn user_message(&self, messages: &Messages) -> String {
        match self {
            LoadError::SourceRead(detail) => format!("{}{}", messages.read_error, detail),
            LoadError::EmptyDataset => messages.no_data.clone(),
            LoadError::MissingGeometryColumn { accepted } => {
                format!("{}{}", messages.missing_columns, accepted.join(", "))
            }
            LoadError::NoValidGeofences { .. } => messages.no_valid_geofences.clone(),
        }
    }
}

impl From<GeofenceError> for LoadError {
    fn from(err: GeofenceError) -> Self {
        LoadError::SourceRead(err.to_string())
    }
}
