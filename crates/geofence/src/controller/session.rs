//! Session state owned by the UI thread.

use serde::Serialize;

use crate::ingest::IngestWarning;
use crate::input::SourceMetadata;
use crate::registry::{Geofence, GeofenceId, Registry};

/// Identifies one requested file read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LoadTicket(u64);

/// Everything that lives for the duration of one mapping session.
///
/// There is no global state: the controller borrows a `Session` for each
/// transition.
#[derive(Debug, Default)]
pub struct Session {
    pub(crate) registry: Registry,
    /// Lower-cased, trimmed search term.
    pub(crate) filter: String,
    pub(crate) warnings: Vec<IngestWarning>,
    pub(crate) source: Option<SourceMetadata>,
    generation: u64,
    pending: Option<LoadTicket>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    /// Number of visible geofences.
    pub fn selected_count(&self) -> usize {
        self.registry.visible_count()
    }

    /// Warnings from the most recent successful load.
    pub fn warnings(&self) -> &[IngestWarning] {
        &self.warnings
    }

    /// Metadata of the file currently displayed, when loaded from disk.
    pub fn source(&self) -> Option<&SourceMetadata> {
        self.source.as_ref()
    }

    pub fn set_source(&mut self, source: SourceMetadata) {
        self.source = Some(source);
    }

    /// Whether the active filter hides this geofence's list row.
    pub fn is_filtered_out(&self, geofence: &Geofence) -> bool {
        !self.filter.is_empty() && !geofence.matches(&self.filter)
    }

    /// Start a new read. Earlier tickets become stale.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.generation += 1;
        let ticket = LoadTicket(self.generation);
        self.pending = Some(ticket);
        ticket
    }

    /// Whether `ticket` belongs to the most recent read and has not completed yet.
    pub fn is_current(&self, ticket: LoadTicket) -> bool {
        self.pending == Some(ticket)
    }

    /// Retire `ticket` if it is current. A ticket settles at most once.
    pub(crate) fn settle(&mut self, ticket: LoadTicket) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.pending = None;
        true
    }

    /// Serializable view of the current state.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            filter: self.filter.clone(),
            selected_count: self.selected_count(),
            geofences: self
                .registry
                .all()
                .iter()
                .map(|g| GeofenceState {
                    id: g.id,
                    name: g.name.clone(),
                    visible: g.visible,
                    filtered_out: self.is_filtered_out(g),
                })
                .collect(),
        }
    }
}

/// Per-geofence state in a snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeofenceState {
    pub id: GeofenceId,
    pub name: String,
    pub visible: bool,
    pub filtered_out: bool,
}

/// Point-in-time copy of session state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSnapshot {
    pub filter: String,
    pub selected_count: usize,
    pub geofences: Vec<GeofenceState>,
}
