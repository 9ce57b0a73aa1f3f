//! Boundary to the map and list surfaces.
//!
//! The controller never touches rendering primitives; it calls a
//! [`MapAdapter`] and a [`ListAdapter`]. The recording adapters keep the
//! resulting state in memory so the state machine can run headless.

mod adapter;
mod recording;

pub use adapter::{FitRequest, InfoEntry, InfoPanel, LayerSpec, ListAdapter, ListItem, MapAdapter};
pub use recording::{MapCall, RecordingList, RecordingMap};
