//! Minute-resolution wall-clock arithmetic over "HH:MM" strings.
//!
//! The agenda stores times as zero-padded 24-hour strings at minute
//! resolution; this module is the single place they are parsed, shifted,
//! compared, and formatted. All functions are pure and reject malformed
//! input with an error rather than guessing.

use chrono::{Duration, NaiveTime, Timelike};

use crate::error::AgendaError;

/// Time assigned to the first event of an otherwise empty agenda, and the
/// fallback base for entries whose time has not been set yet.
pub const DEFAULT_START_TIME: &str = "08:00";

/// Default spacing between consecutive agenda entries, and the size of the
/// fixed collision nudge applied when a new sub-item grows into the next
/// event's slot.
pub const STEP_MINUTES: i64 = 15;

/// Parse a 24-hour "HH:MM" string into a [`NaiveTime`].
///
/// # Errors
///
/// Returns [`AgendaError::InvalidClock`] if the string is not a valid
/// hour:minute pair (seconds, 12-hour suffixes, and out-of-range values
/// are all rejected).
pub fn parse_clock(s: &str) -> Result<NaiveTime, AgendaError> {
    NaiveTime::parse_from_str(s, "%H:%M")
        .map_err(|e| AgendaError::InvalidClock(format!("'{}': {}", s, e)))
}

/// Format a [`NaiveTime`] back to a zero-padded "HH:MM" string.
pub fn format_clock(t: NaiveTime) -> String {
    format!("{:02}:{:02}", t.hour(), t.minute())
}

/// Shift an "HH:MM" string by a signed number of minutes.
///
/// Arithmetic wraps modulo 24 hours: `shift_clock("23:50", 30)` yields
/// `"00:20"` and `shift_clock("00:10", -30)` yields `"23:40"`. The agenda
/// models a single day, so wrapping keeps every stored value a valid
/// minute-of-day string instead of rejecting late-evening edits.
///
/// # Errors
///
/// Returns [`AgendaError::InvalidClock`] if the input string cannot be parsed.
pub fn shift_clock(s: &str, minutes: i64) -> Result<String, AgendaError> {
    let t = parse_clock(s)?;
    let (shifted, _wrapped_days) = t.overflowing_add_signed(Duration::minutes(minutes));
    Ok(format_clock(shifted))
}

/// Signed minute difference `new - old` between two "HH:MM" strings.
///
/// # Errors
///
/// Returns [`AgendaError::InvalidClock`] if either string cannot be parsed.
pub fn diff_minutes(new: &str, old: &str) -> Result<i64, AgendaError> {
    let new_t = parse_clock(new)?;
    let old_t = parse_clock(old)?;
    Ok(new_t.signed_duration_since(old_t).num_minutes())
}

// ── Tests ───────────────────────────────────────────────────────────────────
