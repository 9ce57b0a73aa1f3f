//! Geofence: WKT polygon spreadsheets in, toggleable map overlays out.
//!
//! The crate covers the ingestion-and-state pipeline of a geofence viewer:
//! tolerant WKT parsing, spreadsheet column resolution, and the visibility
//! state machine that keeps a checkbox list, a text filter and the rendered
//! map layers consistent. Rendering itself happens behind the
//! [`MapAdapter`] and [`ListAdapter`] traits.
//!
//! # Example
//!
//! ```no_run
//! use geofence::{Action, GeofenceMapper, RecordingList, RecordingMap, Session};
//!
//! let mapper = GeofenceMapper::new();
//! let mut session = Session::new();
//! let (mut map, mut list) = (RecordingMap::new(), RecordingList::new());
//!
//! mapper.load_file(&mut session, "geofences.csv", &mut map, &mut list).unwrap();
//! mapper.controller().dispatch(&mut session, Action::SelectAll, &mut map, &mut list);
//!
//! println!("Visible: {}", session.selected_count());
//! ```

pub mod config;
pub mod controller;
pub mod error;
pub mod geometry;
pub mod ingest;
pub mod input;
pub mod registry;
pub mod schema;
pub mod view;

mod mapper;

pub use crate::mapper::{GeofenceMapper, Inspection};
pub use config::MapperConfig;
pub use controller::{Action, LoadOutcome, Session, Transition, VisibilityController};
pub use error::{GeofenceError, LoadError, Result};
pub use geometry::{parse_wkt, BoundingBox, GeometryRing, LatLng, WktError};
pub use ingest::{ingest, IngestWarning, Ingestion, WarningKind};
pub use input::{CellValue, DataTable, Parser, RawRow, SourceMetadata};
pub use registry::{Geofence, GeofenceId, Registry};
pub use schema::ColumnResolver;
pub use view::{ListAdapter, MapAdapter, RecordingList, RecordingMap};
