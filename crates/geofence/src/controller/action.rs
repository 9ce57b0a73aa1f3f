//! User actions the controller consumes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::registry::GeofenceId;

/// One discrete user event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", content = "target", rename_all = "snake_case")]
pub enum Action {
    /// Checkbox checked by the user; flies the camera to the geofence.
    ToggleOn(GeofenceId),
    /// Checkbox unchecked by the user.
    ToggleOff(GeofenceId),
    /// Show every row not hidden by the filter.
    SelectAll,
    /// Hide everything, filter or not.
    ClearAll,
    /// Search box text changed.
    Filter(String),
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::ToggleOn(id) => write!(f, "toggle-on={}", id),
            Action::ToggleOff(id) => write!(f, "toggle-off={}", id),
            Action::SelectAll => f.write_str("select-all"),
            Action::ClearAll => f.write_str("clear-all"),
            Action::Filter(term) => write!(f, "filter={}", term),
        }
    }
}

impl FromStr for Action {
    type Err = String;

    /// Parses `toggle-on=<id>`, `toggle-off=<id>`, `select-all`, `clear-all`
    /// and `filter=<term>`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (verb, arg) = match s.split_once('=') {
            Some((verb, arg)) => (verb.trim(), Some(arg)),
            None => (s.trim(), None),
        };

        match (verb.to_ascii_lowercase().as_str(), arg) {
            ("toggle-on", Some(id)) => Ok(Action::ToggleOn(id.parse()?)),
            ("toggle-off", Some(id)) => Ok(Action::ToggleOff(id.parse()?)),
            ("select-all", None) => Ok(Action::SelectAll),
            ("clear-all", None) => Ok(Action::ClearAll),
            ("filter", Some(term)) => Ok(Action::Filter(term.to_string())),
            ("filter", None) => Ok(Action::Filter(String::new())),
            _ => Err(format!(
                "unknown action '{}' (expected toggle-on=<id>, toggle-off=<id>, select-all, clear-all, filter=<term>)",
                s
            )),
        }
    }
}
