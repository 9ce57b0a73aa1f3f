//! Property-based tests for WKT parsing, ingestion and the visibility state machine.
//!
//! # Running Property Tests
//!
//! ```bash
//! cargo test -p geofence --test property_tests
//!
//! # Run with more cases (slower but more thorough)
//! PROPTEST_CASES=10000 cargo test -p geofence --test property_tests
//! ```

use proptest::prelude::*;

use geofence::{
    ingest, parse_wkt, Action, GeofenceId, LatLng, RawRow, RecordingList, RecordingMap, Session,
    VisibilityController,
};

// =============================================================================
// Test Strategies
// =============================================================================

/// Generate arbitrary ASCII strings (common case)
fn ascii_string() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_\\-\\.\\s(),]{0,100}"
}

/// Strings that look like WKT but may be malformed.
fn wkt_like() -> impl Strategy<Value = String> {
    prop_oneof![
        "POLYGON \\(\\(([0-9. -]{1,12},){0,8}[0-9. -]{1,12}\\)\\)",
        "MULTIPOLYGON \\(\\(\\(([0-9. -]{1,12},){0,8}[0-9. -]{1,12}\\)\\)\\)",
        "(LINESTRING|POINT|polygon) \\([0-9 ,]{0,30}\\)",
        "POLYGON[ (]{0,4}[a-z0-9 ,]{0,30}[) ]{0,4}",
    ]
}

/// Finite coordinate pairs within geographic range.
fn coordinates(min: usize) -> impl Strategy<Value = Vec<(f64, f64)>> {
    prop::collection::vec((-180.0f64..180.0, -90.0f64..90.0), min..40)
}

fn polygon_text(pairs: &[(f64, f64)]) -> String {
    let body: Vec<String> = pairs.iter().map(|(x, y)| format!("{} {}", x, y)).collect();
    format!("POLYGON (({}))", body.join(", "))
}

/// A row is either a valid square, an empty cell or garbage.
fn row_strategy() -> impl Strategy<Value = Option<bool>> {
    prop_oneof![
        3 => Just(Some(true)),
        1 => Just(Some(false)),
        1 => Just(None),
    ]
}

fn build_rows(kinds: &[Option<bool>]) -> Vec<RawRow> {
    kinds
        .iter()
        .enumerate()
        .map(|(i, kind)| {
            let wkt = match kind {
                Some(true) => format!("POLYGON (({i} 0, {} 0, {} 1, {i} 1, {i} 0))", i + 1, i + 1),
                Some(false) => "not a polygon".to_string(),
                None => String::new(),
            };
            RawRow::new().with("name", format!("Area {}", i)).with("wkt", wkt)
        })
        .collect()
}

/// Actions over a dataset of `n` geofences; ids may point past the end.
fn action_strategy(n: usize) -> impl Strategy<Value = Action> {
    let max_id = n + 2;
    prop_oneof![
        (0..max_id).prop_map(|i| Action::ToggleOn(GeofenceId::new(i))),
        (0..max_id).prop_map(|i| Action::ToggleOff(GeofenceId::new(i))),
        Just(Action::SelectAll),
        Just(Action::ClearAll),
        "(area [0-9]|AREA|yas| )".prop_map(Action::Filter),
    ]
}

struct Fixture {
    controller: VisibilityController,
    session: Session,
    map: RecordingMap,
    list: RecordingList,
}

impl Fixture {
    fn loaded(n: usize) -> Self {
        let controller = VisibilityController::default();
        let mut session = Session::new();
        let (mut map, mut list) = (RecordingMap::new(), RecordingList::new());
        let ticket = session.begin_load();
        let rows = build_rows(&vec![Some(true); n]);
        controller
            .complete_load(&mut session, ticket, Ok::<_, String>(rows), &mut map, &mut list)
            .unwrap();
        Self {
            controller,
            session,
            map,
            list,
        }
    }

    fn apply(&mut self, action: Action) -> geofence::Transition {
        self.controller
            .dispatch(&mut self.session, action, &mut self.map, &mut self.list)
    }

    fn visible(&self) -> Vec<GeofenceId> {
        self.session.registry().visible().iter().map(|g| g.id).collect()
    }

    /// Rendered layers, checked boxes and registry flags must agree.
    fn assert_consistent(&self) {
        let visible = self.visible();
        let layers: Vec<GeofenceId> = self.map.layers.iter().copied().collect();
        let checked: Vec<GeofenceId> = self.list.checked.iter().copied().collect();
        assert_eq!(layers, visible);
        assert_eq!(checked, visible);
        assert_eq!(self.session.selected_count(), visible.len());
    }
}

// =============================================================================
// WKT Parser Properties
// =============================================================================

mod wkt_properties {
    use super::*;

    proptest! {
        /// Parser never panics on any ASCII input.
        #[test]
        fn never_panics_on_ascii(input in ascii_string()) {
            let _ = parse_wkt(&input);
        }

        /// Parser never panics on WKT-like input.
        #[test]
        fn never_panics_on_wkt_like(input in wkt_like()) {
            let _ = parse_wkt(&input);
        }

        /// Parser never panics on random UTF-8.
        #[test]
        fn never_panics_on_random_utf8(input in "\\PC{0,200}") {
            let _ = parse_wkt(&input);
        }

        /// Parsing is deterministic.
        #[test]
        fn parsing_is_deterministic(input in wkt_like()) {
            prop_assert_eq!(parse_wkt(&input), parse_wkt(&input));
        }

        /// Accepted rings always have at least three finite points.
        #[test]
        fn accepted_rings_are_well_formed(input in wkt_like()) {
            if let Ok(ring) = parse_wkt(&input) {
                prop_assert!(ring.len() >= 3);
                prop_assert!(ring.points().iter().all(|p| p.lat.is_finite() && p.lng.is_finite()));
            }
        }

        /// Ring length equals pair count and axes are swapped.
        #[test]
        fn ring_matches_pairs(pairs in coordinates(3)) {
            let ring = parse_wkt(&polygon_text(&pairs)).unwrap();
            prop_assert_eq!(ring.len(), pairs.len());
            let (x, y) = pairs[0];
            prop_assert_eq!(ring.first(), LatLng::new(y, x));
        }

        /// Fewer than three pairs is always rejected.
        #[test]
        fn short_rings_rejected(pairs in prop::collection::vec((-180.0f64..180.0, -90.0f64..90.0), 0..3)) {
            prop_assert!(parse_wkt(&polygon_text(&pairs)).is_err());
        }

        /// The ring's bounding box contains every point.
        #[test]
        fn bounds_contain_ring(pairs in coordinates(3)) {
            let ring = parse_wkt(&polygon_text(&pairs)).unwrap();
            let bounds = ring.bounds();
            prop_assert!(ring.points().iter().all(|p| bounds.contains(*p)));
        }
    }
}

// =============================================================================
// Ingestion Properties
// =============================================================================

mod ingest_properties {
    use super::*;

    proptest! {
        /// Every row becomes exactly one geofence or one warning, ids are dense.
        #[test]
        fn rows_are_accounted_for(kinds in prop::collection::vec(row_strategy(), 1..30)) {
            let rows = build_rows(&kinds);
            let ingestion = ingest(&rows).unwrap();

            let valid = kinds.iter().filter(|k| **k == Some(true)).count();
            prop_assert_eq!(ingestion.geofences.len(), valid);
            prop_assert_eq!(ingestion.warnings.len(), kinds.len() - valid);
            prop_assert_eq!(ingestion.rows, kinds.len());

            for (i, geofence) in ingestion.geofences.iter().enumerate() {
                prop_assert_eq!(geofence.id.index(), i);
                prop_assert!(!geofence.visible);
            }
        }

        /// Warnings are reported in row order.
        #[test]
        fn warnings_in_row_order(kinds in prop::collection::vec(row_strategy(), 1..30)) {
            let ingestion = ingest(&build_rows(&kinds)).unwrap();
            let rows: Vec<usize> = ingestion.warnings.iter().map(|w| w.row).collect();
            let mut sorted = rows.clone();
            sorted.sort_unstable();
            prop_assert_eq!(rows, sorted);
        }
    }
}

// =============================================================================
// Visibility Controller Properties
// =============================================================================

mod controller_properties {
    use super::*;

    proptest! {
        /// Any action sequence keeps map, list and registry in agreement.
        #[test]
        fn adapters_stay_consistent(actions in prop::collection::vec(action_strategy(6), 0..40)) {
            let mut fixture = Fixture::loaded(6);
            for action in actions {
                let transition = fixture.apply(action);
                prop_assert_eq!(transition.selected_count, fixture.session.selected_count());
                fixture.assert_consistent();
            }
        }

        /// Clear-all always ends with nothing visible.
        #[test]
        fn clear_all_empties(actions in prop::collection::vec(action_strategy(6), 0..30)) {
            let mut fixture = Fixture::loaded(6);
            for action in actions {
                fixture.apply(action);
            }
            let transition = fixture.apply(Action::ClearAll);
            prop_assert_eq!(transition.selected_count, 0);
            prop_assert!(fixture.visible().is_empty());
            prop_assert!(fixture.map.layers.is_empty());
            prop_assert!(fixture.list.info.is_none());
        }

        /// Filtering never changes visibility.
        #[test]
        fn filter_preserves_visibility(
            actions in prop::collection::vec(action_strategy(6), 0..20),
            term in "[a-zA-Z0-9 ]{0,10}",
        ) {
            let mut fixture = Fixture::loaded(6);
            for action in actions {
                fixture.apply(action);
            }
            let before = fixture.visible();
            let calls = fixture.map.calls.len();
            fixture.apply(Action::Filter(term));
            prop_assert_eq!(fixture.visible(), before);
            prop_assert_eq!(fixture.map.calls.len(), calls);
        }

        /// Select-all twice leaves the visible set unchanged.
        #[test]
        fn select_all_is_idempotent(actions in prop::collection::vec(action_strategy(6), 0..20)) {
            let mut fixture = Fixture::loaded(6);
            for action in actions {
                fixture.apply(action);
            }
            let first = fixture.apply(Action::SelectAll);
            let visible = fixture.visible();
            let second = fixture.apply(Action::SelectAll);

            prop_assert!(second.shown.is_empty());
            prop_assert_eq!(first.selected_count, second.selected_count);
            prop_assert_eq!(fixture.visible(), visible);
        }

        /// Direct toggles fly the camera, nothing else does.
        #[test]
        fn only_toggle_on_flies(actions in prop::collection::vec(action_strategy(6), 0..30)) {
            let mut fixture = Fixture::loaded(6);
            let mut expected = 0;
            for action in actions {
                let transition = fixture.apply(action.clone());
                if matches!(action, Action::ToggleOn(_)) && !transition.shown.is_empty() {
                    expected += 1;
                }
            }
            prop_assert_eq!(fixture.map.fly_count(), expected);
        }
    }
}
