//! Fuzz target for the WKT parser.
//!
//! Any string must either parse into a ring of at least three points with
//! finite coordinates or be rejected with an error.

#![no_main]

use libfuzzer_sys::fuzz_target;
use geofence::{parse_wkt, GeometryRing};

fuzz_target!(|data: &[u8]| {
    if data.len() > 100_000 {
        return;
    }

    if let Ok(text) = std::str::from_utf8(data) {
        if let Ok(ring) = parse_wkt(text) {
            check_ring(&ring);
        }
    }
});

fn check_ring(ring: &GeometryRing) {
    assert!(ring.len() >= 3);
    for p in ring.points() {
        assert!(p.lat.is_finite() && p.lng.is_finite());
    }
}
