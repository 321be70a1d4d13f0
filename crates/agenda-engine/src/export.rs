//! Read-only renderers over a finished agenda.
//!
//! Both renderers are one-way formatters: they never mutate the agenda and
//! never re-time anything. The iCalendar renderer takes the calendar date
//! as an explicit argument (no system clock access), keeping it
//! deterministic and testable — the caller passes "today".

use chrono::{Datelike, NaiveDate};

use crate::clock::{self, DEFAULT_START_TIME, STEP_MINUTES};
use crate::error::Result;
use crate::model::Agenda;

/// Render the agenda as plain text: a heading, one `HH:MM - Title` line
/// per event, and an indented bullet per sub-item.
pub fn render_plain_text(agenda: &Agenda) -> String {
    let mut lines = vec!["Agenda".to_string(), String::new()];
    for event in &agenda.events {
        lines.push(format!("{} - {}", event.time, event.title));
        for sub in &event.subs {
            lines.push(format!("  \u{2022} {} - {}", sub.time, sub.title));
        }
    }
    lines.join("\n")
}

/// Render the agenda as an iCalendar (RFC 5545) document.
///
/// One VEVENT per event with a fixed 15-minute duration, anchored to the
/// supplied `date`; sub-items are joined into the DESCRIPTION field. Text
/// values are escaped per RFC 5545 and lines are CRLF-terminated.
///
/// # Errors
///
/// Returns [`crate::AgendaError::InvalidClock`] if a stored event time is
/// malformed.
pub fn render_ics(agenda: &Agenda, date: NaiveDate) -> Result<String> {
    let stamp = format!("{:04}{:02}{:02}", date.year(), date.month(), date.day());

    let mut lines = vec![
        "BEGIN:VCALENDAR".to_string(),
        "VERSION:2.0".to_string(),
        "PRODID:-//AgendaTimeline//EN".to_string(),
    ];

    for event in &agenda.events {
        let start = if event.time.is_empty() {
            DEFAULT_START_TIME.to_string()
        } else {
            event.time.clone()
        };
        let end = clock::shift_clock(&start, STEP_MINUTES)?;

        lines.push("BEGIN:VEVENT".to_string());
        lines.push(format!("UID:{}-{}@agenda-timeline", stamp, event.id));
        lines.push(format!("DTSTAMP:{}T000000Z", stamp));
        lines.push(format!("DTSTART:{}T{}00", stamp, compact(&start)));
        lines.push(format!("DTEND:{}T{}00", stamp, compact(&end)));
        lines.push(format!("SUMMARY:{}", escape_text(&event.title)));
        if !event.subs.is_empty() {
            let desc = event
                .subs
                .iter()
                .map(|s| format!("{} - {}", s.time, s.title))
                .collect::<Vec<_>>()
                .join("\n");
            lines.push(format!("DESCRIPTION:{}", escape_text(&desc)));
        }
        lines.push("END:VEVENT".to_string());
    }

    lines.push("END:VCALENDAR".to_string());
    Ok(lines.join("\r\n"))
}

/// "HH:MM" → "HHMM" for DTSTART/DTEND values.
fn compact(time: &str) -> String {
    time.replace(':', "")
}

/// Escape TEXT values per RFC 5545 §3.3.11: backslash, semicolon, comma,
/// and newline.
fn escape_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            ';' => out.push_str("\\;"),
            ',' => out.push_str("\\,"),
            '\n' => out.push_str("\\n"),
            '\r' => {}
            _ => out.push(ch),
        }
    }
    out
}

// ── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Event, SubItem};

    fn sample_agenda() -> Agenda {
        let mut a = Event::new(1, "08:00");
        a.title = "Welcome".to_string();
        let mut s = SubItem::new(2, "08:15");
        s.title = "Coffee".to_string();
        a.subs.push(s);
        let mut b = Event::new(3, "09:00");
        b.title = "Planning".to_string();
        Agenda {
            events: vec![a, b],
        }
    }

    #[test]
    fn test_plain_text_layout() {
        let text = render_plain_text(&sample_agenda());
        let expected = "Agenda\n\n08:00 - Welcome\n  \u{2022} 08:15 - Coffee\n09:00 - Planning";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_plain_text_empty_agenda() {
        assert_eq!(render_plain_text(&Agenda::new()), "Agenda\n");
    }

    #[test]
    fn test_ics_structure() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 16).unwrap();
        let ics = render_ics(&sample_agenda(), date).unwrap();

        assert!(ics.starts_with("BEGIN:VCALENDAR\r\nVERSION:2.0"));
        assert!(ics.ends_with("END:VCALENDAR"));
        assert_eq!(ics.matches("BEGIN:VEVENT").count(), 2);
        assert!(ics.contains("DTSTART:20260316T080000"));
        assert!(ics.contains("DTEND:20260316T081500"));
        assert!(ics.contains("SUMMARY:Welcome"));
        assert!(ics.contains("UID:20260316-1@agenda-timeline"));
    }

    #[test]
    fn test_ics_description_joins_subs() {
        let mut agenda = sample_agenda();
        let mut extra = SubItem::new(4, "08:30");
        extra.title = "Intros".to_string();
        agenda.events[0].subs.push(extra);

        let date = NaiveDate::from_ymd_opt(2026, 3, 16).unwrap();
        let ics = render_ics(&agenda, date).unwrap();
        assert!(ics.contains("DESCRIPTION:08:15 - Coffee\\n08:30 - Intros"));
    }

    #[test]
    fn test_ics_event_without_subs_has_no_description() {
        let agenda = Agenda {
            events: vec![Event::new(1, "09:00")],
        };
        let date = NaiveDate::from_ymd_opt(2026, 3, 16).unwrap();
        let ics = render_ics(&agenda, date).unwrap();
        assert!(!ics.contains("DESCRIPTION"));
    }

    #[test]
    fn test_ics_escapes_text() {
        let mut event = Event::new(1, "09:00");
        event.title = "Lunch; soup, bread\nand butter".to_string();
        let agenda = Agenda {
            events: vec![event],
        };
        let date = NaiveDate::from_ymd_opt(2026, 3, 16).unwrap();
        let ics = render_ics(&agenda, date).unwrap();
        assert!(ics.contains("SUMMARY:Lunch\\; soup\\, bread\\nand butter"));
    }

    #[test]
    fn test_ics_blank_event_time_uses_default() {
        let agenda = Agenda {
            events: vec![Event::new(1, "")],
        };
        let date = NaiveDate::from_ymd_opt(2026, 3, 16).unwrap();
        let ics = render_ics(&agenda, date).unwrap();
        assert!(ics.contains("DTSTART:20260316T080000"));
    }
}
