//! Geofences and the session registry that owns them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::geometry::{BoundingBox, GeometryRing, LatLng};

const ID_PREFIX: &str = "geofence-";

/// Positional identifier, rendered as `geofence-<n>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct GeofenceId(usize);

impl GeofenceId {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    /// Zero-based position in the registry.
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for GeofenceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", ID_PREFIX, self.0)
    }
}

impl FromStr for GeofenceId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .strip_prefix(ID_PREFIX)
            .and_then(|n| n.parse().ok())
            .map(GeofenceId)
            .ok_or_else(|| format!("invalid geofence id '{}' (expected {}<n>)", s, ID_PREFIX))
    }
}

impl From<GeofenceId> for String {
    fn from(id: GeofenceId) -> Self {
        id.to_string()
    }
}

impl TryFrom<String> for GeofenceId {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// A named, colored region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Geofence {
    pub id: GeofenceId,
    pub name: String,
    pub ring: GeometryRing,
    /// Output position modulo the palette size.
    pub color_index: usize,
    pub visible: bool,
}

impl Geofence {
    /// A hidden geofence.
    pub fn new(id: GeofenceId, name: impl Into<String>, ring: GeometryRing, color_index: usize) -> Self {
        Self {
            id,
            name: name.into(),
            ring,
            color_index,
            visible: false,
        }
    }

    pub fn bounds(&self) -> BoundingBox {
        self.ring.bounds()
    }

    /// Case-insensitive substring match; `term` must already be lower-cased.
    pub fn matches(&self, term: &str) -> bool {
        self.name.to_lowercase().contains(term)
    }

    /// Popup details for the rendered layer.
    pub fn popup(&self) -> Popup {
        Popup {
            name: self.name.clone(),
            center: self.ring.centroid(),
            vertices: self.ring.len(),
        }
    }
}

/// What a layer shows when clicked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Popup {
    pub name: String,
    pub center: LatLng,
    pub vertices: usize,
}

impl fmt::Display for Popup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\nCenter: {:.6}, {:.6}\nVertices: {}",
            self.name, self.center.lat, self.center.lng, self.vertices
        )
    }
}

/// Ordered geofences of the currently loaded dataset.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    geofences: Vec<Geofence>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a new dataset, dropping the previous one.
    ///
    /// Callers must have removed every rendered layer of the previous set.
    pub fn replace_all(&mut self, geofences: Vec<Geofence>) {
        debug_assert!(
            geofences.iter().enumerate().all(|(i, g)| g.id.index() == i),
            "geofence ids must be dense and zero-based"
        );
        self.geofences = geofences;
    }

    pub fn clear(&mut self) {
        self.geofences.clear();
    }

    pub fn get(&self, id: GeofenceId) -> Option<&Geofence> {
        self.geofences.get(id.index()).filter(|g| g.id == id)
    }

    pub(crate) fn get_mut(&mut self, id: GeofenceId) -> Option<&mut Geofence> {
        self.geofences.get_mut(id.index()).filter(|g| g.id == id)
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Geofence> {
        self.geofences.iter_mut()
    }

    pub fn all(&self) -> &[Geofence] {
        &self.geofences
    }

    /// Visible geofences in registry order.
    pub fn visible(&self) -> Vec<&Geofence> {
        self.geofences.iter().filter(|g| g.visible).collect()
    }

    pub fn visible_count(&self) -> usize {
        self.geofences.iter().filter(|g| g.visible).count()
    }

    pub fn len(&self) -> usize {
        self.geofences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.geofences.is_empty()
    }
}
