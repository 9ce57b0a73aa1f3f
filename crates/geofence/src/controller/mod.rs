//! Visibility controller: user actions in, registry mutations and adapter calls out.
//!
//! # Usage
//!
//! ```
//! use geofence::controller::{Action, Session, VisibilityController};
//! use geofence::ingest::template_rows;
//! use geofence::view::{RecordingList, RecordingMap};
//!
//! let controller = VisibilityController::default();
//! let mut session = Session::new();
//! let (mut map, mut list) = (RecordingMap::new(), RecordingList::new());
//! controller.attach(&mut map, &mut list);
//!
//! let ticket = session.begin_load();
//! controller
//!     .complete_load(&mut session, ticket, Ok::<_, String>(template_rows()), &mut map, &mut list)
//!     .unwrap();
//!
//! controller.dispatch(&mut session, Action::SelectAll, &mut map, &mut list);
//! assert_eq!(session.selected_count(), 3);
//! ```

mod action;
mod session;
mod visibility;

pub use action::Action;
pub use session::{GeofenceState, LoadTicket, Session, SessionSnapshot};
pub use visibility::{CameraMove, LoadOutcome, LoadSummary, Transition, VisibilityController};
