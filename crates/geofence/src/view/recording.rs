//! In-memory adapters that record every call, for tests and dry runs.

use std::collections::BTreeSet;

use serde::Serialize;

use super::adapter::{FitRequest, InfoPanel, LayerSpec, ListAdapter, ListItem, MapAdapter};
use crate::config::FlyToOptions;
use crate::geometry::{BoundingBox, LatLng};
use crate::registry::GeofenceId;

/// A call made on the map.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "call", rename_all = "snake_case")]
pub enum MapCall {
    SetView { center: LatLng, zoom: u8, max_zoom: u8 },
    AddLayer { id: GeofenceId, color: String, vertices: usize },
    RemoveLayer { id: GeofenceId },
    FitBounds { request: FitRequest },
    FlyTo { bounds: BoundingBox, max_zoom: u8 },
}

/// Map adapter that tracks rendered layers and logs calls.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RecordingMap {
    pub calls: Vec<MapCall>,
    pub layers: BTreeSet<GeofenceId>,
}

impl RecordingMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fit_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, MapCall::FitBounds { .. }))
            .count()
    }

    pub fn fly_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, MapCall::FlyTo { .. }))
            .count()
    }

    /// Most recent fit, if any.
    pub fn last_fit(&self) -> Option<&FitRequest> {
        self.calls.iter().rev().find_map(|c| match c {
            MapCall::FitBounds { request } => Some(request),
            _ => None,
        })
    }
}

impl MapAdapter for RecordingMap {
    fn set_view(&mut self, center: LatLng, zoom: u8, max_zoom: u8) {
        self.calls.push(MapCall::SetView {
            center,
            zoom,
            max_zoom,
        });
    }

    fn add_layer(&mut self, layer: &LayerSpec<'_>) {
        self.layers.insert(layer.id);
        self.calls.push(MapCall::AddLayer {
            id: layer.id,
            color: layer.color.to_string(),
            vertices: layer.ring.len(),
        });
    }

    fn remove_layer(&mut self, id: GeofenceId) {
        self.layers.remove(&id);
        self.calls.push(MapCall::RemoveLayer { id });
    }

    fn fit_bounds(&mut self, request: &FitRequest) {
        self.calls.push(MapCall::FitBounds {
            request: request.clone(),
        });
    }

    fn fly_to(&mut self, bounds: BoundingBox, options: &FlyToOptions) {
        self.calls.push(MapCall::FlyTo {
            bounds,
            max_zoom: options.max_zoom,
        });
    }
}

/// List adapter holding the state a real list would display.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RecordingList {
    pub file_name: Option<String>,
    pub items: Vec<ListItem>,
    pub list_shown: bool,
    pub checked: BTreeSet<GeofenceId>,
    pub hidden_rows: BTreeSet<GeofenceId>,
    pub selected_count: usize,
    pub info: Option<InfoPanel>,
    pub error: Option<String>,
}

impl RecordingList {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ListAdapter for RecordingList {
    fn set_file_name(&mut self, name: &str) {
        self.file_name = Some(name.to_string());
    }

    fn render_list(&mut self, items: &[ListItem]) {
        self.items = items.to_vec();
        self.list_shown = true;
        self.checked.clear();
        self.hidden_rows.clear();
    }

    fn hide_list(&mut self) {
        self.list_shown = false;
    }

    fn set_checked(&mut self, id: GeofenceId, checked: bool) {
        if checked {
            self.checked.insert(id);
        } else {
            self.checked.remove(&id);
        }
    }

    fn set_row_hidden(&mut self, id: GeofenceId, hidden: bool) {
        if hidden {
            self.hidden_rows.insert(id);
        } else {
            self.hidden_rows.remove(&id);
        }
    }

    fn set_selected_count(&mut self, count: usize) {
        self.selected_count = count;
    }

    fn show_info(&mut self, panel: &InfoPanel) {
        self.info = Some(panel.clone());
    }

    fn hide_info(&mut self) {
        self.info = None;
    }

    fn show_error(&mut self, message: &str) {
        self.error = Some(message.to_string());
    }

    fn clear_error(&mut self) {
        self.error = None;
    }
}
