//! Single-slot JSON persistence for the agenda.
//!
//! The agenda lives in one named file as the bare JSON event array. Loading
//! never fails: an absent file, unreadable content, malformed JSON, or an
//! empty array all degrade to the default one-event agenda with a log line,
//! so a corrupted slot can never take the tool down. Saving reports I/O
//! failures to the caller.

use std::fs;
use std::path::Path;

use log::{debug, warn};

use crate::clock::DEFAULT_START_TIME;
use crate::error::{AgendaError, Result};
use crate::model::{Agenda, Event};

/// The agenda a fresh install starts with: a single untitled event at the
/// default start time.
pub fn default_agenda() -> Agenda {
    Agenda {
        events: vec![Event::new(1, DEFAULT_START_TIME)],
    }
}

/// Load the agenda from `path`, falling back to [`default_agenda`] on any
/// problem. Seed an [`crate::IdAllocator`] from the result before
/// allocating new entries.
pub fn load(path: &Path) -> Agenda {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) => {
            debug!("no saved agenda at {}: {err}", path.display());
            return default_agenda();
        }
    };
    match serde_json::from_str::<Agenda>(&raw) {
        Ok(agenda) if !agenda.is_empty() => agenda,
        Ok(_) => {
            debug!("saved agenda at {} is empty, starting fresh", path.display());
            default_agenda()
        }
        Err(err) => {
            warn!(
                "discarding malformed agenda at {}: {err}",
                path.display()
            );
            default_agenda()
        }
    }
}

/// Save the agenda to `path` as pretty-printed JSON.
///
/// # Errors
///
/// Returns [`AgendaError::Storage`] if serialization or the write fails.
pub fn save(path: &Path, agenda: &Agenda) -> Result<()> {
    let json = serde_json::to_string_pretty(agenda)
        .map_err(|err| AgendaError::Storage(format!("serialize agenda: {err}")))?;
    fs::write(path, json)
        .map_err(|err| AgendaError::Storage(format!("write {}: {err}", path.display())))
}

// ── Tests ───────────────────────────────────────────────────────────────────
