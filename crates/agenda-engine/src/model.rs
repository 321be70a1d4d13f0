//! Agenda data model: events, sub-items, and identity allocation.
//!
//! The serde shape matches the persisted JSON slot exactly: the agenda
//! serializes as a bare array of events, each `{id, time, title, subs}`.
//! Times are stored as "HH:MM" strings (see [`crate::clock`]); an empty
//! string means "not set yet" and is replaced with an explicit computed
//! value the first time an operation touches it.

use serde::{Deserialize, Serialize};

/// Stable identity of an event or sub-item. Unique within an agenda,
/// never reused, never mutated across reorders.
pub type EntryId = u64;

/// Monotonic [`EntryId`] source.
///
/// Ids only ever go up, so an allocator re-seeded from a loaded agenda
/// (see [`IdAllocator::seeded_from`]) can never collide with an id already
/// in use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdAllocator {
    next: EntryId,
}

impl IdAllocator {
    /// Allocator for a brand-new agenda; the first id handed out is 1.
    pub fn new() -> Self {
        Self { next: 1 }
    }

    /// Allocator that continues after every id present in `agenda`.
    pub fn seeded_from(agenda: &Agenda) -> Self {
        let max = agenda
            .events
            .iter()
            .flat_map(|ev| std::iter::once(ev.id).chain(ev.subs.iter().map(|s| s.id)))
            .max()
            .unwrap_or(0);
        Self { next: max + 1 }
    }

    /// Hand out the next unused id.
    pub fn next_id(&mut self) -> EntryId {
        let id = self.next;
        self.next += 1;
        id
    }
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new()
    }
}

/// A timed entry owned by exactly one [`Event`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubItem {
    pub id: EntryId,
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub title: String,
}

impl SubItem {
    pub fn new(id: EntryId, time: impl Into<String>) -> Self {
        Self {
            id,
            time: time.into(),
            title: String::new(),
        }
    }
}

/// A main agenda entry: its own wall-clock time plus an ordered list of
/// sub-items whose times are kept non-decreasing by the timeline engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: EntryId,
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub subs: Vec<SubItem>,
}

impl Event {
    pub fn new(id: EntryId, time: impl Into<String>) -> Self {
        Self {
            id,
            time: time.into(),
            title: String::new(),
            subs: Vec::new(),
        }
    }
}

/// Ordered sequence of events in intended presentation order.
///
/// Serializes transparently as the event array itself, so the on-disk slot
/// is `[{"id":1,"time":"08:00","title":"","subs":[]}, …]`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Agenda {
    pub events: Vec<Event>,
}

impl Agenda {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Position of the event with the given id, if present.
    pub fn position_of(&self, id: EntryId) -> Option<usize> {
        self.events.iter().position(|ev| ev.id == id)
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────
