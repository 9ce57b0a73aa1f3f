//! The visibility state machine and dataset load lifecycle.

use std::fmt::Display;

use serde::Serialize;
use tracing::{debug, info, warn};

use super::action::Action;
use super::session::{LoadTicket, Session};
use crate::config::MapperConfig;
use crate::error::LoadError;
use crate::geometry::{BoundingBox, LatLng};
use crate::ingest::{IngestPipeline, IngestWarning};
use crate::input::RawRow;
use crate::registry::GeofenceId;
use crate::view::{FitRequest, InfoPanel, LayerSpec, ListAdapter, ListItem, MapAdapter};

/// Camera movement requested by a transition.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CameraMove {
    Fit { request: FitRequest },
    FlyTo { bounds: BoundingBox },
}

/// What one transition changed.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Transition {
    pub shown: Vec<GeofenceId>,
    pub hidden: Vec<GeofenceId>,
    pub selected_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub camera: Option<CameraMove>,
}

impl Transition {
    /// Whether the visible set changed.
    pub fn changed(&self) -> bool {
        !self.shown.is_empty() || !self.hidden.is_empty()
    }
}

/// Result of a successful load.
#[derive(Debug, Clone, Serialize)]
pub struct LoadSummary {
    pub rows: usize,
    pub geofences: usize,
    pub warnings: Vec<IngestWarning>,
}

/// How a load completion was handled.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum LoadOutcome {
    Loaded(LoadSummary),
    /// A newer read was requested; this completion was ignored.
    Superseded,
}

/// Translates actions into registry mutations and adapter calls.
#[derive(Debug, Clone)]
pub struct VisibilityController {
    config: MapperConfig,
    pipeline: IngestPipeline,
}

impl VisibilityController {
    pub fn new(config: MapperConfig) -> Self {
        let pipeline = IngestPipeline::new(&config);
        Self { config, pipeline }
    }

    pub fn config(&self) -> &MapperConfig {
        &self.config
    }

    /// Bring fresh surfaces to the idle state: initial camera, no file chosen.
    pub fn attach<M, L>(&self, map: &mut M, list: &mut L)
    where
        M: MapAdapter + ?Sized,
        L: ListAdapter + ?Sized,
    {
        let view = &self.config.map;
        map.set_view(LatLng::from(view.center), view.zoom, view.max_zoom);
        list.set_file_name(&self.config.messages.no_file);
        list.hide_list();
        list.hide_info();
    }

    /// Apply one user action.
    pub fn dispatch<M, L>(
        &self,
        session: &mut Session,
        action: Action,
        map: &mut M,
        list: &mut L,
    ) -> Transition
    where
        M: MapAdapter + ?Sized,
        L: ListAdapter + ?Sized,
    {
        match action {
            Action::ToggleOn(id) => self.toggle_on(session, id, true, map, list),
            Action::ToggleOff(id) => self.toggle_off(session, id, map, list),
            Action::SelectAll => self.select_all(session, map, list),
            Action::ClearAll => self.clear_all(session, map, list),
            Action::Filter(term) => self.apply_filter(session, &term, list),
        }
    }

    /// Show one geofence. `fly` moves the camera to it when it was hidden.
    pub fn toggle_on<M, L>(
        &self,
        session: &mut Session,
        id: GeofenceId,
        fly: bool,
        map: &mut M,
        list: &mut L,
    ) -> Transition
    where
        M: MapAdapter + ?Sized,
        L: ListAdapter + ?Sized,
    {
        let mut transition = Transition::default();
        if !self.show(session, id, map) {
            transition.selected_count = session.selected_count();
            return transition;
        }
        list.set_checked(id, true);
        transition.shown.push(id);

        if fly {
            if let Some(geofence) = session.registry.get(id) {
                let bounds = geofence.bounds();
                map.fly_to(bounds, &self.config.fly_to);
                transition.camera = Some(CameraMove::FlyTo { bounds });
            }
        }

        transition.selected_count = self.refresh_selection(session, list);
        transition
    }

    /// Hide one geofence.
    pub fn toggle_off<M, L>(
        &self,
        session: &mut Session,
        id: GeofenceId,
        map: &mut M,
        list: &mut L,
    ) -> Transition
    where
        M: MapAdapter + ?Sized,
        L: ListAdapter + ?Sized,
    {
        let mut transition = Transition::default();
        if self.hide(session, id, map) {
            list.set_checked(id, false);
            transition.hidden.push(id);
            transition.selected_count = self.refresh_selection(session, list);
        } else {
            transition.selected_count = session.selected_count();
        }
        transition
    }

    /// Show every geofence whose row passes the filter, then fit to all visible.
    pub fn select_all<M, L>(&self, session: &mut Session, map: &mut M, list: &mut L) -> Transition
    where
        M: MapAdapter + ?Sized,
        L: ListAdapter + ?Sized,
    {
        let candidates: Vec<GeofenceId> = session
            .registry
            .all()
            .iter()
            .filter(|g| !g.visible && !session.is_filtered_out(g))
            .map(|g| g.id)
            .collect();

        let mut transition = Transition::default();
        for id in candidates {
            if self.show(session, id, map) {
                list.set_checked(id, true);
                transition.shown.push(id);
            }
        }

        transition.camera = self
            .fit_visible(session, map)
            .map(|request| CameraMove::Fit { request });
        transition.selected_count = self.refresh_selection(session, list);

        info!(
            shown = transition.shown.len(),
            visible = transition.selected_count,
            "selected all"
        );
        transition
    }

    /// Hide every geofence regardless of the filter.
    pub fn clear_all<M, L>(&self, session: &mut Session, map: &mut M, list: &mut L) -> Transition
    where
        M: MapAdapter + ?Sized,
        L: ListAdapter + ?Sized,
    {
        let visible: Vec<GeofenceId> = session.registry.visible().iter().map(|g| g.id).collect();

        let mut transition = Transition::default();
        for id in visible {
            if self.hide(session, id, map) {
                list.set_checked(id, false);
                transition.hidden.push(id);
            }
        }

        list.set_selected_count(0);
        list.hide_info();

        info!(hidden = transition.hidden.len(), "cleared all");
        transition
    }

    /// Change which list rows are shown. Never touches visibility.
    pub fn apply_filter<L>(&self, session: &mut Session, term: &str, list: &mut L) -> Transition
    where
        L: ListAdapter + ?Sized,
    {
        session.filter = term.trim().to_lowercase();
        for geofence in session.registry.all() {
            list.set_row_hidden(geofence.id, session.is_filtered_out(geofence));
        }
        debug!(filter = %session.filter, "filter applied");

        Transition {
            selected_count: session.selected_count(),
            ..Transition::default()
        }
    }

    /// Fit the camera to every visible geofence. No call when none are visible.
    pub fn fit_visible<M>(&self, session: &Session, map: &mut M) -> Option<FitRequest>
    where
        M: MapAdapter + ?Sized,
    {
        let boxes: Vec<BoundingBox> = session
            .registry
            .visible()
            .iter()
            .map(|g| g.bounds())
            .collect();
        let request = FitRequest::new(boxes, self.config.bounds_padding)?;
        map.fit_bounds(&request);
        debug!(geofences = request.boxes.len(), "fitted bounds to visible");
        Some(request)
    }

    /// Finish a file read started with [`Session::begin_load`].
    ///
    /// Stale or repeated completions are ignored. Read failures, empty sources and a
    /// missing geometry header leave the current dataset on screen; once
    /// ingestion has run, the previous dataset is torn down even if no row
    /// survived.
    pub fn complete_load<M, L, E>(
        &self,
        session: &mut Session,
        ticket: LoadTicket,
        source: Result<Vec<RawRow>, E>,
        map: &mut M,
        list: &mut L,
    ) -> Result<LoadOutcome, LoadError>
    where
        M: MapAdapter + ?Sized,
        L: ListAdapter + ?Sized,
        E: Display,
    {
        if !session.settle(ticket) {
            debug!(?ticket, "ignoring superseded load");
            return Ok(LoadOutcome::Superseded);
        }
        list.clear_error();

        let ingestion = source
            .map_err(|e| LoadError::SourceRead(e.to_string()))
            .and_then(|rows| self.pipeline.ingest(&rows));
        let ingestion = match ingestion {
            Ok(ingestion) => ingestion,
            Err(err) => return Err(self.report(err, list)),
        };

        self.teardown(session, map, list);

        if ingestion.is_empty() {
            let err = LoadError::NoValidGeofences {
                rows: ingestion.rows,
            };
            return Err(self.report(err, list));
        }

        let items: Vec<ListItem> = ingestion
            .geofences
            .iter()
            .map(|g| ListItem {
                id: g.id,
                name: g.name.clone(),
                color: self.config.color(g.color_index).to_string(),
            })
            .collect();

        let summary = LoadSummary {
            rows: ingestion.rows,
            geofences: ingestion.geofences.len(),
            warnings: ingestion.warnings.clone(),
        };

        session.registry.replace_all(ingestion.geofences);
        session.warnings = ingestion.warnings;
        list.render_list(&items);
        list.set_selected_count(0);

        info!(
            rows = summary.rows,
            geofences = summary.geofences,
            warnings = summary.warnings.len(),
            "dataset loaded"
        );
        Ok(LoadOutcome::Loaded(summary))
    }

    /// Drop the current dataset entirely.
    pub fn unload<M, L>(&self, session: &mut Session, map: &mut M, list: &mut L)
    where
        M: MapAdapter + ?Sized,
        L: ListAdapter + ?Sized,
    {
        self.teardown(session, map, list);
        list.set_file_name(&self.config.messages.no_file);
        info!("dataset cleared");
    }

    fn show<M>(&self, session: &mut Session, id: GeofenceId, map: &mut M) -> bool
    where
        M: MapAdapter + ?Sized,
    {
        let Some(geofence) = session.registry.get_mut(id) else {
            warn!(%id, "unknown geofence");
            return false;
        };
        if geofence.visible {
            return false;
        }
        geofence.visible = true;

        let layer = LayerSpec {
            id,
            ring: &geofence.ring,
            color: self.config.color(geofence.color_index),
            style: &self.config.style,
            popup: geofence.popup(),
        };
        map.add_layer(&layer);
        debug!(%id, name = %geofence.name, "showed geofence");
        true
    }

    fn hide<M>(&self, session: &mut Session, id: GeofenceId, map: &mut M) -> bool
    where
        M: MapAdapter + ?Sized,
    {
        let Some(geofence) = session.registry.get_mut(id) else {
            warn!(%id, "unknown geofence");
            return false;
        };
        if !geofence.visible {
            return false;
        }
        geofence.visible = false;
        map.remove_layer(id);
        debug!(%id, name = %geofence.name, "hid geofence");
        true
    }

    /// Push the selected count and info panel for the current visible set.
    fn refresh_selection<L>(&self, session: &Session, list: &mut L) -> usize
    where
        L: ListAdapter + ?Sized,
    {
        let visible = session.registry.visible();
        list.set_selected_count(visible.len());
        if visible.is_empty() {
            list.hide_info();
        } else {
            list.show_info(&InfoPanel::from_visible(&visible, |i| self.config.color(i)));
        }
        visible.len()
    }

    /// Remove every rendered layer and reset per-dataset state.
    fn teardown<M, L>(&self, session: &mut Session, map: &mut M, list: &mut L)
    where
        M: MapAdapter + ?Sized,
        L: ListAdapter + ?Sized,
    {
        for geofence in session.registry.iter_mut().filter(|g| g.visible) {
            geofence.visible = false;
            map.remove_layer(geofence.id);
        }
        session.registry.clear();
        session.warnings.clear();
        session.source = None;
        session.filter.clear();
        list.hide_info();
        list.hide_list();
    }

    fn report<L>(&self, err: LoadError, list: &mut L) -> LoadError
    where
        L: ListAdapter + ?Sized,
    {
        let message = err.user_message(&self.config.messages);
        warn!(error = %err, "load failed");
        list.show_error(&message);
        err
    }
}

impl Default for VisibilityController {
    fn default() -> Self {
        Self::new(MapperConfig::default())
    }
}
