//! Render adapter traits and the values passed across them.

use serde::{Deserialize, Serialize};

use crate::config::{FlyToOptions, LayerStyle};
use crate::geometry::{BoundingBox, GeometryRing, LatLng};
use crate::registry::{Geofence, GeofenceId, Popup};

/// Everything the map needs to draw one geofence.
#[derive(Debug, Clone)]
pub struct LayerSpec<'a> {
    pub id: GeofenceId,
    pub ring: &'a GeometryRing,
    pub color: &'a str,
    pub style: &'a LayerStyle,
    pub popup: Popup,
}

/// A camera fit over several geofences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitRequest {
    /// Bounds of each included ring.
    pub boxes: Vec<BoundingBox>,
    /// Fraction of the span added on every side.
    pub padding: f64,
    /// Union of `boxes` expanded by `padding`.
    pub target: BoundingBox,
}

impl FitRequest {
    /// `None` when there is nothing to fit.
    pub fn new(boxes: Vec<BoundingBox>, padding: f64) -> Option<Self> {
        let target = BoundingBox::union_all(&boxes)?.pad(padding);
        Some(Self {
            boxes,
            padding,
            target,
        })
    }
}

/// The map surface. Calls are fire-and-forget.
pub trait MapAdapter {
    /// Position the camera before any dataset is shown.
    fn set_view(&mut self, center: LatLng, zoom: u8, max_zoom: u8);

    fn add_layer(&mut self, layer: &LayerSpec<'_>);

    fn remove_layer(&mut self, id: GeofenceId);

    fn fit_bounds(&mut self, request: &FitRequest);

    fn fly_to(&mut self, bounds: BoundingBox, options: &FlyToOptions);
}

/// One checkbox row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListItem {
    pub id: GeofenceId,
    pub name: String,
    pub color: String,
}

/// One line of the info panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InfoEntry {
    pub id: GeofenceId,
    pub name: String,
    pub color: String,
    /// `"i of n"`, empty when only one geofence is visible.
    pub count_label: String,
}

/// Details of the visible geofences.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InfoPanel {
    pub entries: Vec<InfoEntry>,
}

impl InfoPanel {
    /// Build from visible geofences in registry order. `color` maps a palette slot.
    pub fn from_visible<F, S>(visible: &[&Geofence], color: F) -> Self
    where
        F: Fn(usize) -> S,
        S: AsRef<str>,
    {
        let total = visible.len();
        let entries = visible
            .iter()
            .enumerate()
            .map(|(i, g)| InfoEntry {
                id: g.id,
                name: g.name.clone(),
                color: color(g.color_index).as_ref().to_string(),
                count_label: if total > 1 {
                    format!("{} of {}", i + 1, total)
                } else {
                    String::new()
                },
            })
            .collect();
        Self { entries }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The checkbox list, filter box, counters, info panel and error line.
pub trait ListAdapter {
    /// Name of the chosen file, or the placeholder when there is none.
    fn set_file_name(&mut self, name: &str);

    /// Replace all rows; every checkbox starts unchecked and shown.
    fn render_list(&mut self, items: &[ListItem]);

    fn hide_list(&mut self);

    fn set_checked(&mut self, id: GeofenceId, checked: bool);

    /// Show or hide a row in response to the text filter.
    fn set_row_hidden(&mut self, id: GeofenceId, hidden: bool);

    fn set_selected_count(&mut self, count: usize);

    fn show_info(&mut self, panel: &InfoPanel);

    fn hide_info(&mut self);

    fn show_error(&mut self, message: &str);

    fn clear_error(&mut self);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geofence(index: usize, name: &str) -> Geofence {
        let ring = GeometryRing::new(vec![
            LatLng::new(index as f64, 0.0),
            LatLng::new(index as f64, 1.0),
            LatLng::new(index as f64 + 1.0, 1.0),
        ])
        .unwrap();
        Geofence::new(GeofenceId::new(index), name, ring, index)
    }

    #[test]
    fn test_fit_request_pads_union() {
        let a = geofence(0, "A").bounds();
        let b = geofence(9, "B").bounds();
        let request = FitRequest::new(vec![a, b], 0.1).unwrap();
        assert_eq!(request.target.south, -1.0);
        assert_eq!(request.target.north, 11.0);
        assert!((request.target.west + 0.1).abs() < 1e-12);
        assert!((request.target.east - 1.1).abs() < 1e-12);
    }

    #[test]
    fn test_fit_request_empty() {
        assert!(FitRequest::new(Vec::new(), 0.1).is_none());
    }

    #[test]
    fn test_info_panel_count_labels() {
        let a = geofence(0, "A");
        let b = geofence(1, "B");
        let panel = InfoPanel::from_visible(&[&a, &b], |_| "#000");
        assert_eq!(panel.entries[0].count_label, "1 of 2");
        assert_eq!(panel.entries[1].count_label, "2 of 2");

        let single = InfoPanel::from_visible(&[&a], |_| "#000");
        assert_eq!(single.entries[0].count_label, "");
    }
}
