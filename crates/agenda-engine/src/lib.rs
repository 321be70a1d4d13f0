//! # agenda-engine
//!
//! Pure timeline engine for a single-day timed agenda: an ordered list of
//! events, each owning an ordered list of timed sub-items. Every mutation
//! — retiming, insertion, removal, drag-and-drop reordering — is a pure
//! function from the current agenda to a new one, and each re-establishes
//! the chronological ordering invariants by cascading time shifts.
//!
//! The engine has no hidden state: callers hold the current [`Agenda`]
//! value, apply one operation at a time, and replace it wholesale with the
//! result. Persistence and rendering sit at the boundary as plain
//! functions over the same value.
//!
//! ## Modules
//!
//! - [`timeline`] — the mutation operations and their cascade rules
//! - [`clock`] — "HH:MM" parsing, formatting, and shifting arithmetic
//! - [`model`] — [`Agenda`], [`Event`], [`SubItem`], identity allocation
//! - [`export`] — plain-text and iCalendar renderers
//! - [`store`] — single-slot JSON persistence with log-and-fallback loading
//! - [`error`] — error types

pub mod clock;
pub mod error;
pub mod export;
pub mod model;
pub mod store;
pub mod timeline;

pub use clock::{DEFAULT_START_TIME, STEP_MINUTES};
pub use error::AgendaError;
pub use export::{render_ics, render_plain_text};
pub use model::{Agenda, EntryId, Event, IdAllocator, SubItem};
pub use store::{default_agenda, load, save};
pub use timeline::{
    add_sub_to, append_event, change_event_time, change_sub_time, move_event, move_sub,
    remove_event, remove_sub,
};
