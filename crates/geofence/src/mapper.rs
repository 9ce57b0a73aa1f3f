//! Main `GeofenceMapper` struct and public API.

use std::path::Path;

use serde::Serialize;
use tracing::info;

use crate::config::MapperConfig;
use crate::controller::{LoadOutcome, Session, VisibilityController};
use crate::error::{LoadError, Result};
use crate::ingest::{IngestPipeline, Ingestion};
use crate::input::{Parser, RawRow, SourceMetadata};
use crate::view::{ListAdapter, MapAdapter};

/// Result of reading and ingesting a file without a session.
#[derive(Debug, Clone, Serialize)]
pub struct Inspection {
    pub source: SourceMetadata,
    #[serde(flatten)]
    pub ingestion: Ingestion,
}

/// Ties the reader, the ingestion pipeline and the controller together.
pub struct GeofenceMapper {
    config: MapperConfig,
    parser: Parser,
    pipeline: IngestPipeline,
    controller: VisibilityController,
}

impl GeofenceMapper {
    /// Create a mapper with default configuration.
    pub fn new() -> Self {
        Self::with_config(MapperConfig::default())
    }

    /// Create a mapper with custom configuration.
    pub fn with_config(config: MapperConfig) -> Self {
        let parser = Parser::with_config(config.parser.clone());
        let pipeline = IngestPipeline::new(&config);
        let controller = VisibilityController::new(config.clone());

        Self {
            config,
            parser,
            pipeline,
            controller,
        }
    }

    pub fn config(&self) -> &MapperConfig {
        &self.config
    }

    pub fn controller(&self) -> &VisibilityController {
        &self.controller
    }

    /// Decode a spreadsheet export into rows.
    pub fn read(&self, path: impl AsRef<Path>) -> Result<(Vec<RawRow>, SourceMetadata)> {
        let (table, source) = self.parser.parse_file(path)?;
        Ok((table.to_raw_rows(), source))
    }

    /// Read and ingest a file, reporting geofences and warnings.
    ///
    /// A file in which every row is rejected is not an error here; the
    /// result simply has no geofences.
    pub fn inspect(&self, path: impl AsRef<Path>) -> std::result::Result<Inspection, LoadError> {
        let (rows, source) = self.read(path)?;
        let ingestion = self.pipeline.ingest(&rows)?;
        info!(
            file = %source.file,
            geofences = ingestion.geofences.len(),
            warnings = ingestion.warnings.len(),
            "inspected"
        );
        Ok(Inspection { source, ingestion })
    }

    /// Read a file and install it in `session`.
    pub fn load_file<M, L>(
        &self,
        session: &mut Session,
        path: impl AsRef<Path>,
        map: &mut M,
        list: &mut L,
    ) -> std::result::Result<LoadOutcome, LoadError>
    where
        M: MapAdapter + ?Sized,
        L: ListAdapter + ?Sized,
    {
        let ticket = session.begin_load();
        let read = self.read(path);
        let (rows, source) = match read {
            Ok((rows, source)) => (Ok(rows), Some(source)),
            Err(e) => (Err(e), None),
        };

        let outcome = self
            .controller
            .complete_load(session, ticket, rows, map, list)?;
        if let (LoadOutcome::Loaded(_), Some(source)) = (&outcome, source) {
            list.set_file_name(&source.file);
            session.set_source(source);
        }
        Ok(outcome)
    }
}

impl Default for GeofenceMapper {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::{RecordingList, RecordingMap};
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_test_file(content: &str, suffix: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_inspect_csv() {
        let content = "Name,WKT\nA,\"POLYGON ((0 0, 1 0, 1 1, 0 0))\"\nB,\n";
        let file = create_test_file(content, ".csv");

        let result = GeofenceMapper::new().inspect(file.path()).unwrap();
        assert_eq!(result.source.format, "csv");
        assert_eq!(result.ingestion.geofences.len(), 1);
        assert_eq!(result.ingestion.warnings.len(), 1);
    }

    #[test]
    fn test_load_file_records_source() {
        let content = r#"[{"name": "A", "polygon": "POLYGON ((0 0, 1 0, 1 1))"}]"#;
        let file = create_test_file(content, ".json");

        let mapper = GeofenceMapper::new();
        let mut session = Session::new();
        let (mut map, mut list) = (RecordingMap::new(), RecordingList::new());

        let outcome = mapper
            .load_file(&mut session, file.path(), &mut map, &mut list)
            .unwrap();
        assert!(matches!(outcome, LoadOutcome::Loaded(_)));
        assert_eq!(session.source().unwrap().format, "json");
        assert!(session.source().unwrap().hash.starts_with("sha256:"));
        assert_eq!(list.file_name.as_deref(), Some(session.source().unwrap().file.as_str()));
    }

    #[test]
    fn test_load_missing_file_is_source_read() {
        let mapper = GeofenceMapper::new();
        let mut session = Session::new();
        let (mut map, mut list) = (RecordingMap::new(), RecordingList::new());

        let err = mapper
            .load_file(&mut session, "/nonexistent/fences.csv", &mut map, &mut list)
            .unwrap_err();
        assert!(matches!(err, LoadError::SourceRead(_)));
        assert!(list.error.is_some());
    }

    #[test]
    fn test_header_only_csv_is_empty_dataset() {
        let file = create_test_file("name,wkt\n", ".csv");
        let err = GeofenceMapper::new().inspect(file.path()).unwrap_err();
        assert!(matches!(err, LoadError::EmptyDataset));
    }
}
