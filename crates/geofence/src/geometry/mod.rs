//! Geometry types and WKT parsing.

mod ring;
pub mod wkt;

pub use ring::{BoundingBox, GeometryRing, LatLng, MIN_RING_POINTS};
pub use wkt::{parse as parse_wkt, WktError};
