//! The Agenda Timeline Engine: pure mutation operations over an [`Agenda`].
//!
//! Every operation takes the current agenda (plus arguments) and returns a
//! new agenda; nothing outside the returned value is mutated. The engine
//! keeps two ordering invariants alive across mutations by cascading time
//! shifts:
//!
//! - within one event, sub-item times are non-decreasing in stored order;
//! - across events, main-event times are non-decreasing in agenda order.
//!
//! Soft edge conditions — a missing index or id, reordering an entry onto
//! itself, reordering with fewer than two siblings, or setting a time to
//! its current value — all return the input agenda unchanged. The one hard
//! error is a malformed "HH:MM" string, which is rejected rather than
//! guessed at.
//!
//! # Operations
//!
//! - [`append_event`] — append a new event after the last scheduled time
//! - [`change_event_time`] — retime one event, cascading to all later events
//! - [`change_sub_time`] — retime one sub-item, cascading through the rest of the day
//! - [`add_sub_to`] — append a sub-item, nudging the next event on collision
//! - [`remove_event`] / [`remove_sub`] — positional delete, no re-timing
//! - [`move_event`] / [`move_sub`] — drag-and-drop reorder with chronological re-assignment

use crate::clock::{self, DEFAULT_START_TIME, STEP_MINUTES};
use crate::error::Result;
use crate::model::{Agenda, EntryId, Event, IdAllocator, SubItem};

// ── Shifting ────────────────────────────────────────────────────────────────

/// Shift a time string by `delta` minutes, substituting `fallback` when the
/// stored time is blank.
fn shift_with_fallback(time: &str, fallback: &str, delta: i64) -> Result<String> {
    let base = if time.is_empty() { fallback } else { time };
    clock::shift_clock(base, delta)
}

/// Shift an event's own time and all of its sub-items by `delta` minutes.
///
/// A blank event time falls back to [`DEFAULT_START_TIME`]; a blank
/// sub-item time falls back to the event's (pre-shift) time. A zero delta
/// returns the event unchanged, blank times included.
fn shift_event(event: &Event, delta: i64) -> Result<Event> {
    if delta == 0 {
        return Ok(event.clone());
    }
    let sub_fallback = if event.time.is_empty() {
        DEFAULT_START_TIME.to_string()
    } else {
        event.time.clone()
    };
    let time = shift_with_fallback(&event.time, DEFAULT_START_TIME, delta)?;
    let subs = event
        .subs
        .iter()
        .map(|sub| {
            Ok(SubItem {
                time: shift_with_fallback(&sub.time, &sub_fallback, delta)?,
                ..sub.clone()
            })
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(Event {
        time,
        subs,
        ..event.clone()
    })
}

// ── Default times ───────────────────────────────────────────────────────────

/// Default time for a newly appended event: [`DEFAULT_START_TIME`] on an
/// empty agenda, otherwise 15 minutes after the last sub-item of the last
/// event (if it has a timed sub-item), else 15 minutes after the last
/// event's own time.
fn next_event_time(agenda: &Agenda) -> Result<String> {
    let Some(last) = agenda.events.last() else {
        return Ok(DEFAULT_START_TIME.to_string());
    };
    let mut base = if last.time.is_empty() {
        DEFAULT_START_TIME
    } else {
        last.time.as_str()
    };
    if let Some(sub) = last.subs.last() {
        if !sub.time.is_empty() {
            base = sub.time.as_str();
        }
    }
    clock::shift_clock(base, STEP_MINUTES)
}

/// Default time for a new sub-item: 15 minutes after the parent's last
/// sub-item, or 15 minutes after the parent's own time if none exist yet.
fn next_sub_time(event: &Event) -> Result<String> {
    let base = match event.subs.last() {
        Some(last) if !last.time.is_empty() => last.time.as_str(),
        _ if event.time.is_empty() => DEFAULT_START_TIME,
        _ => event.time.as_str(),
    };
    clock::shift_clock(base, STEP_MINUTES)
}

// ── Append / insert ─────────────────────────────────────────────────────────

/// Append a new empty event to the agenda.
///
/// The new event's time is computed so that, on an already-consistent
/// agenda, it is ≥ every existing time (see [`next_event_time`]).
///
/// # Errors
///
/// Returns [`crate::AgendaError::InvalidClock`] if the last event carries a
/// malformed stored time.
pub fn append_event(agenda: &Agenda, ids: &mut IdAllocator) -> Result<Agenda> {
    let time = next_event_time(agenda)?;
    let mut events = agenda.events.clone();
    events.push(Event::new(ids.next_id(), time));
    Ok(Agenda { events })
}

/// Append a new sub-item to the event at `event_index`.
///
/// Collision rule: if the computed sub-item time is ≥ the next event's
/// time, the next event and every event after it (with their sub-items)
/// shift forward by a fixed 15 minutes. The nudge is applied at most once
/// per insertion; if the new sub-item lands more than 15 minutes past the
/// next event, the overlap is knowingly left unresolved.
///
/// No-op if `event_index` is out of range.
///
/// # Errors
///
/// Returns [`crate::AgendaError::InvalidClock`] if a stored time involved
/// in the computation is malformed.
pub fn add_sub_to(agenda: &Agenda, event_index: usize, ids: &mut IdAllocator) -> Result<Agenda> {
    let Some(event) = agenda.events.get(event_index) else {
        return Ok(agenda.clone());
    };
    let new_time = next_sub_time(event)?;

    let mut events = agenda.events.clone();
    events[event_index]
        .subs
        .push(SubItem::new(ids.next_id(), new_time.clone()));

    let next_index = event_index + 1;
    let collides = match events.get(next_index) {
        Some(next) if !next.time.is_empty() => {
            clock::parse_clock(&new_time)? >= clock::parse_clock(&next.time)?
        }
        _ => false,
    };
    if collides {
        for ev in events.iter_mut().skip(next_index) {
            *ev = shift_event(ev, STEP_MINUTES)?;
        }
    }

    Ok(Agenda { events })
}

// ── Retiming ────────────────────────────────────────────────────────────────

/// Set the event at `index` to `new_time`, shifting it and every later
/// event (each with its sub-items) by the signed delta between new and old
/// time. Earlier events are untouched, so the relative spacing of
/// everything scheduled after the edited slot is preserved.
///
/// No-op if `index` is out of range or `new_time` equals the current time.
///
/// # Errors
///
/// Returns [`crate::AgendaError::InvalidClock`] if `new_time` or a stored
/// time in the cascade is malformed.
pub fn change_event_time(agenda: &Agenda, index: usize, new_time: &str) -> Result<Agenda> {
    let Some(event) = agenda.events.get(index) else {
        return Ok(agenda.clone());
    };
    if event.time == new_time {
        return Ok(agenda.clone());
    }
    let old = if event.time.is_empty() {
        DEFAULT_START_TIME
    } else {
        event.time.as_str()
    };
    let delta = clock::diff_minutes(new_time, old)?;

    let events = agenda
        .events
        .iter()
        .enumerate()
        .map(|(i, ev)| {
            if i < index {
                Ok(ev.clone())
            } else {
                shift_event(ev, delta)
            }
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(Agenda { events })
}

/// Set the sub-item at `(event_index, sub_index)` to `new_time`.
///
/// The target sub-item receives `new_time` directly (not by shift, to
/// avoid compounding). Later sub-items within the same event shift by the
/// delta, each from its own time with `new_time` as the fallback for a
/// blank one. Every later event (with its sub-items) then shifts by the
/// same delta: a sub-item slip ripples forward through the rest of the day
/// exactly like a main-event slip.
///
/// No-op if either index is out of range or `new_time` equals the current
/// time.
///
/// # Errors
///
/// Returns [`crate::AgendaError::InvalidClock`] if `new_time` or a stored
/// time in the cascade is malformed.
pub fn change_sub_time(
    agenda: &Agenda,
    event_index: usize,
    sub_index: usize,
    new_time: &str,
) -> Result<Agenda> {
    let Some(event) = agenda.events.get(event_index) else {
        return Ok(agenda.clone());
    };
    let Some(sub) = event.subs.get(sub_index) else {
        return Ok(agenda.clone());
    };
    if sub.time == new_time {
        return Ok(agenda.clone());
    }
    // A blank target time contributes no delta; the edit just makes the
    // time explicit.
    let old = if sub.time.is_empty() {
        new_time
    } else {
        sub.time.as_str()
    };
    let delta = clock::diff_minutes(new_time, old)?;

    let mut events = agenda.events.clone();
    let subs = &mut events[event_index].subs;
    subs[sub_index].time = new_time.to_string();
    for later in subs.iter_mut().skip(sub_index + 1) {
        later.time = shift_with_fallback(&later.time, new_time, delta)?;
    }
    for ev in events.iter_mut().skip(event_index + 1) {
        *ev = shift_event(ev, delta)?;
    }
    Ok(Agenda { events })
}

// ── Removal ─────────────────────────────────────────────────────────────────

/// Delete the event at `index`. No cascading re-time; the gap it leaves is
/// allowed to remain. No-op if `index` is out of range.
pub fn remove_event(agenda: &Agenda, index: usize) -> Agenda {
    if index >= agenda.events.len() {
        return agenda.clone();
    }
    let mut events = agenda.events.clone();
    events.remove(index);
    Agenda { events }
}

/// Delete the sub-item at `(event_index, sub_index)`. No cascading
/// re-time. No-op if either index is out of range.
pub fn remove_sub(agenda: &Agenda, event_index: usize, sub_index: usize) -> Agenda {
    let Some(event) = agenda.events.get(event_index) else {
        return agenda.clone();
    };
    if sub_index >= event.subs.len() {
        return agenda.clone();
    }
    let mut events = agenda.events.clone();
    events[event_index].subs.remove(sub_index);
    Agenda { events }
}

// ── Reordering ──────────────────────────────────────────────────────────────

/// Relocate the event `from_id` to the position currently occupied by
/// `to_id` (splice semantics: remove then insert, so everything between
/// shifts by one slot).
///
/// After the splice, the multiset of original main-event times is sorted
/// chronologically and reassigned positionally: the earliest original time
/// goes to whatever event now sits at position 0, and so on. Each event is
/// shifted (itself and its sub-items) by the delta between its assigned
/// and previous time, so reordering re-labels events with the same time
/// slots — now in increasing order — while preserving each event's
/// internal sub-item spacing.
///
/// No-op if the ids are equal or either is not found.
///
/// # Errors
///
/// Returns [`crate::AgendaError::InvalidClock`] if a stored event time is
/// malformed.
pub fn move_event(agenda: &Agenda, from_id: EntryId, to_id: EntryId) -> Result<Agenda> {
    if from_id == to_id {
        return Ok(agenda.clone());
    }
    let (Some(from), Some(to)) = (agenda.position_of(from_id), agenda.position_of(to_id)) else {
        return Ok(agenda.clone());
    };

    let mut slots = agenda
        .events
        .iter()
        .map(|ev| {
            let time = if ev.time.is_empty() {
                DEFAULT_START_TIME
            } else {
                ev.time.as_str()
            };
            clock::parse_clock(time)
        })
        .collect::<Result<Vec<_>>>()?;
    slots.sort();

    let mut events = agenda.events.clone();
    let moved = events.remove(from);
    events.insert(to, moved);

    let events = events
        .iter()
        .zip(slots)
        .map(|(ev, assigned)| {
            let current = if ev.time.is_empty() {
                assigned
            } else {
                clock::parse_clock(&ev.time)?
            };
            let delta = assigned.signed_duration_since(current).num_minutes();
            shift_event(ev, delta)
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(Agenda { events })
}

/// Same algorithm as [`move_event`], scoped to the sub-item list of the
/// event `event_id`: splice `from_sub_id` to the slot of `to_sub_id`, then
/// reassign the sorted original sub-time multiset positionally.
///
/// No-op if the event is not found, the sub ids are equal or not found, or
/// the event has fewer than two sub-items.
///
/// # Errors
///
/// Returns [`crate::AgendaError::InvalidClock`] if a stored time is
/// malformed.
pub fn move_sub(
    agenda: &Agenda,
    event_id: EntryId,
    from_sub_id: EntryId,
    to_sub_id: EntryId,
) -> Result<Agenda> {
    if from_sub_id == to_sub_id {
        return Ok(agenda.clone());
    }
    let Some(event_index) = agenda.position_of(event_id) else {
        return Ok(agenda.clone());
    };
    let event = &agenda.events[event_index];
    if event.subs.len() < 2 {
        return Ok(agenda.clone());
    }
    let find = |id: EntryId| event.subs.iter().position(|s| s.id == id);
    let (Some(from), Some(to)) = (find(from_sub_id), find(to_sub_id)) else {
        return Ok(agenda.clone());
    };

    let fallback = if event.time.is_empty() {
        DEFAULT_START_TIME
    } else {
        event.time.as_str()
    };
    let mut slots = event
        .subs
        .iter()
        .map(|sub| {
            let time = if sub.time.is_empty() {
                fallback
            } else {
                sub.time.as_str()
            };
            clock::parse_clock(time)
        })
        .collect::<Result<Vec<_>>>()?;
    slots.sort();

    let mut subs = event.subs.clone();
    let moved = subs.remove(from);
    subs.insert(to, moved);

    // Sub-items own no children, so the assigned time is written directly
    // instead of going through a shift.
    let subs = subs
        .into_iter()
        .zip(slots)
        .map(|(sub, assigned)| SubItem {
            time: clock::format_clock(assigned),
            ..sub
        })
        .collect();

    let mut events = agenda.events.clone();
    events[event_index].subs = subs;
    Ok(Agenda { events })
}

// ── Tests ───────────────────────────────────────────────────────────────────
