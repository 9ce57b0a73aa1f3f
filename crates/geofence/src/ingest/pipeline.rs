//! Rows in, geofences and warnings out.

use serde::Serialize;
use tracing::{debug, warn};

use super::warning::IngestWarning;
use crate::config::MapperConfig;
use crate::error::LoadError;
use crate::geometry::parse_wkt;
use crate::input::RawRow;
use crate::registry::{Geofence, GeofenceId};
use crate::schema::ColumnResolver;

/// Output of one ingestion pass.
#[derive(Debug, Clone, Serialize)]
pub struct Ingestion {
    /// Accepted geofences, in row order, all hidden.
    pub geofences: Vec<Geofence>,
    /// One entry per skipped row.
    pub warnings: Vec<IngestWarning>,
    /// Rows examined.
    pub rows: usize,
}

impl Ingestion {
    pub fn is_empty(&self) -> bool {
        self.geofences.is_empty()
    }
}

/// Builds geofences from spreadsheet rows.
#[derive(Debug, Clone)]
pub struct IngestPipeline {
    resolver: ColumnResolver,
    palette_size: usize,
}

impl IngestPipeline {
    pub fn new(config: &MapperConfig) -> Self {
        Self {
            resolver: ColumnResolver::new(&config.columns),
            palette_size: config.palette.len().max(1),
        }
    }

    /// Run the pipeline.
    ///
    /// Only an empty source or a missing geometry header fails the call;
    /// bad rows become warnings.
    pub fn ingest(&self, rows: &[RawRow]) -> Result<Ingestion, LoadError> {
        let Some(header_row) = rows.first() else {
            return Err(LoadError::EmptyDataset);
        };
        if !self.resolver.has_geometry_column(header_row) {
            return Err(LoadError::MissingGeometryColumn {
                accepted: self.resolver.geometry_candidates().to_vec(),
            });
        }

        let mut geofences = Vec::new();
        let mut warnings = Vec::new();

        for (index, row) in rows.iter().enumerate() {
            let fields = self.resolver.resolve(row);
            let name = fields
                .name
                .unwrap_or_else(|| format!("Geofence {}", index + 1));

            let Some(text) = fields.geometry else {
                let warning = IngestWarning::empty_geometry(index, name);
                warn!(row = index + 1, name = %warning.name, "skipping row with empty geometry");
                warnings.push(warning);
                continue;
            };

            match parse_wkt(&text) {
                Ok(ring) => {
                    let position = geofences.len();
                    debug!(row = index + 1, %name, points = ring.len(), "geometry accepted");
                    geofences.push(Geofence::new(
                        GeofenceId::new(position),
                        name,
                        ring,
                        position % self.palette_size,
                    ));
                }
                Err(err) => {
                    warn!(row = index + 1, %name, error = %err, "skipping row with invalid geometry");
                    warnings.push(IngestWarning::invalid_geometry(index, name, err.to_string()));
                }
            }
        }

        debug!(
            rows = rows.len(),
            accepted = geofences.len(),
            skipped = warnings.len(),
            "ingestion finished"
        );

        Ok(Ingestion {
            geofences,
            warnings,
            rows: rows.len(),
        })
    }
}

impl Default for IngestPipeline {
    fn default() -> Self {
        Self::new(&MapperConfig::default())
    }
}

/// Ingest with the default configuration.
pub fn ingest(rows: &[RawRow]) -> Result<Ingestion, LoadError> {
    IngestPipeline::default().ingest(rows)
}
