//! Coordinate, ring and bounding-box types.

use serde::{Deserialize, Serialize};

/// A point in map order: latitude first.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl From<(f64, f64)> for LatLng {
    fn from((lat, lng): (f64, f64)) -> Self {
        Self { lat, lng }
    }
}

/// Minimum number of vertices in a ring.
pub const MIN_RING_POINTS: usize = 3;

/// An open ring of at least three vertices.
///
/// The first and last vertex may coincide; the renderer closes the ring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<LatLng>", into = "Vec<LatLng>")]
pub struct GeometryRing {
    points: Vec<LatLng>,
}

impl GeometryRing {
    /// Build a ring, or `None` with fewer than three points.
    pub fn new(points: Vec<LatLng>) -> Option<Self> {
        if points.len() < MIN_RING_POINTS {
            return None;
        }
        Some(Self { points })
    }

    pub fn points(&self) -> &[LatLng] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Never true for a constructed ring.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> LatLng {
        self.points[0]
    }

    /// Smallest box containing every vertex.
    pub fn bounds(&self) -> BoundingBox {
        let mut bounds = BoundingBox::from_point(self.points[0]);
        for p in &self.points[1..] {
            bounds.extend(*p);
        }
        bounds
    }

    /// Vertex average, used for popup display only.
    pub fn centroid(&self) -> LatLng {
        let n = self.points.len() as f64;
        let (lat, lng) = self
            .points
            .iter()
            .fold((0.0, 0.0), |(lat, lng), p| (lat + p.lat, lng + p.lng));
        LatLng::new(lat / n, lng / n)
    }
}

impl TryFrom<Vec<LatLng>> for GeometryRing {
    type Error = String;

    fn try_from(points: Vec<LatLng>) -> Result<Self, Self::Error> {
        let found = points.len();
        GeometryRing::new(points)
            .ok_or_else(|| format!("ring needs at least {} points, found {}", MIN_RING_POINTS, found))
    }
}

impl From<GeometryRing> for Vec<LatLng> {
    fn from(ring: GeometryRing) -> Self {
        ring.points
    }
}

/// Axis-aligned latitude/longitude box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl BoundingBox {
    /// Degenerate box around a single point.
    pub fn from_point(p: LatLng) -> Self {
        Self {
            south: p.lat,
            west: p.lng,
            north: p.lat,
            east: p.lng,
        }
    }

    /// Grow to include a point.
    pub fn extend(&mut self, p: LatLng) {
        self.south = self.south.min(p.lat);
        self.north = self.north.max(p.lat);
        self.west = self.west.min(p.lng);
        self.east = self.east.max(p.lng);
    }

    /// Smallest box containing both.
    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        BoundingBox {
            south: self.south.min(other.south),
            west: self.west.min(other.west),
            north: self.north.max(other.north),
            east: self.east.max(other.east),
        }
    }

    /// Union of many boxes; `None` for an empty input.
    pub fn union_all<'a>(boxes: impl IntoIterator<Item = &'a BoundingBox>) -> Option<BoundingBox> {
        boxes.into_iter().fold(None, |acc, b| match acc {
            None => Some(*b),
            Some(a) => Some(a.union(b)),
        })
    }

    /// Expand every side by `ratio` times the span on that axis.
    pub fn pad(&self, ratio: f64) -> BoundingBox {
        let lat_buffer = (self.north - self.south).abs() * ratio;
        let lng_buffer = (self.east - self.west).abs() * ratio;
        BoundingBox {
            south: self.south - lat_buffer,
            west: self.west - lng_buffer,
            north: self.north + lat_buffer,
            east: self.east + lng_buffer,
        }
    }

    pub fn contains(&self, p: LatLng) -> bool {
        p.lat >= self.south && p.lat <= self.north && p.lng >= self.west && p.lng <= self.east
    }
}
