//! Tolerant WKT polygon reader.
//!
//! Only the outer ring of the first polygon is kept: holes and further
//! polygons of a `MULTIPOLYGON` are dropped. Coordinates are read as
//! `X Y` (longitude, latitude) and returned in map order, latitude first.

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use super::ring::{GeometryRing, LatLng, MIN_RING_POINTS};

/// First parenthesis group with no parentheses inside it.
static INNERMOST_GROUP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\(([^()]*)\)").expect("static regex"));

/// Geometry type prefixes that are accepted.
const ACCEPTED_TYPES: &[&str] = &["POLYGON", "MULTIPOLYGON"];

/// Why a geometry string was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WktError {
    #[error("geometry text is empty")]
    Empty,

    #[error("unsupported geometry type (expected POLYGON or MULTIPOLYGON)")]
    UnsupportedType,

    #[error("no coordinate ring found")]
    NoRing,

    #[error("ring has {found} valid points, at least {MIN_RING_POINTS} required")]
    TooFewPoints { found: usize },
}

/// Parse `POLYGON`/`MULTIPOLYGON` text into its first ring.
pub fn parse(text: &str) -> Result<GeometryRing, WktError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(WktError::Empty);
    }

    let upper = trimmed.to_ascii_uppercase();
    if !ACCEPTED_TYPES.iter().any(|t| upper.starts_with(t)) {
        return Err(WktError::UnsupportedType);
    }

    let body = INNERMOST_GROUP
        .captures(trimmed)
        .and_then(|c| c.get(1))
        .ok_or(WktError::NoRing)?
        .as_str();

    let points: Vec<LatLng> = body.split(',').filter_map(parse_pair).collect();
    let found = points.len();
    GeometryRing::new(points).ok_or(WktError::TooFewPoints { found })
}

/// One `X Y [Z [M]]` token, swapped to (lat, lng). `None` skips the token.
fn parse_pair(token: &str) -> Option<LatLng> {
    let mut components = Vec::with_capacity(2);
    for part in token.split_whitespace() {
        let value: f64 = part.parse().ok()?;
        if !value.is_finite() {
            return None;
        }
        components.push(value);
    }
    match components.as_slice() {
        [x, y, ..] => Some(LatLng::new(*y, *x)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_polygon_axis_swap() {
        let ring = parse(
            "POLYGON ((54.35 24.46, 54.38 24.46, 54.38 24.48, 54.35 24.48, 54.35 24.46))",
        )
        .unwrap();
        assert_eq!(ring.len(), 5);
        assert_eq!(ring.first(), LatLng::new(24.46, 54.35));
    }

    #[test]
    fn test_multipolygon_takes_first_ring() {
        let ring = parse("MULTIPOLYGON (((0 0, 1 0, 1 1, 0 1, 0 0)), ((5 5, 6 5, 6 6, 5 6, 5 5)))")
            .unwrap();
        assert_eq!(ring.len(), 5);
        assert_eq!(ring.first(), LatLng::new(0.0, 0.0));
        assert!(ring.points().iter().all(|p| p.lat <= 1.0 && p.lng <= 1.0));
    }

    #[test]
    fn test_polygon_hole_is_dropped() {
        let ring = parse("POLYGON ((0 0, 10 0, 10 10, 0 10, 0 0), (2 2, 3 2, 3 3, 2 2))").unwrap();
        assert_eq!(ring.len(), 5);
        assert_eq!(ring.bounds().north, 10.0);
    }

    #[test]
    fn test_linestring_rejected() {
        assert_eq!(parse("LINESTRING (0 0, 1 1)"), Err(WktError::UnsupportedType));
    }

    #[test]
    fn test_two_points_rejected() {
        assert_eq!(
            parse("POLYGON ((1 1, 2 2))"),
            Err(WktError::TooFewPoints { found: 2 })
        );
    }

    #[test]
    fn test_empty_rejected() {
        assert_eq!(parse(""), Err(WktError::Empty));
        assert_eq!(parse("   \n"), Err(WktError::Empty));
    }

    #[test]
    fn test_polygon_empty_has_no_ring() {
        assert_eq!(parse("POLYGON EMPTY"), Err(WktError::NoRing));
    }

    #[test]
    fn test_case_and_whitespace_tolerated() {
        let ring = parse("  polygon((0 0,1 0,\n1   1,0 1))  ").unwrap();
        assert_eq!(ring.len(), 4);
        assert_eq!(ring.points()[2], LatLng::new(1.0, 1.0));
    }

    #[test]
    fn test_noisy_pairs_skipped() {
        let ring = parse("POLYGON ((0 0, abc 1, 1 0, 7, 1 1, 0 x, 0 1))").unwrap();
        assert_eq!(ring.len(), 4);
    }

    #[test]
    fn test_non_finite_pairs_skipped() {
        let result = parse("POLYGON ((0 0, NaN 1, inf 2, 1 1))");
        assert_eq!(result, Err(WktError::TooFewPoints { found: 2 }));
    }

    #[test]
    fn test_z_values_ignored() {
        let ring = parse("POLYGON Z ((1 2 100, 3 4 100, 5 6 100))").unwrap();
        assert_eq!(ring.first(), LatLng::new(2.0, 1.0));
    }
}
