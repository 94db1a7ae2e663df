//! Line-oriented VEVENT scanner.

use chrono::{DateTime, Local, TimeZone, Utc};

use super::datetime::IcsDateTime;
use crate::event::BusyInterval;

const BEGIN_EVENT: &str = "BEGIN:VEVENT";
const END_EVENT: &str = "END:VEVENT";
const SUMMARY_PREFIX_LEN: usize = "SUMMARY:".len();

/// Extract busy intervals from .ics text, reading floating and all-day
/// values in the system time zone.
pub fn extract(content: &str) -> Vec<BusyInterval> {
    extract_in(content, &Local)
}

/// Extract busy intervals from .ics text, reading floating and all-day
/// values in `tz`.
///
/// Events come back in source order. Blocks with a missing or unreadable
/// DTSTART/DTEND, or with `start >= end`, are dropped. Unterminated blocks
/// never produce an event.
pub fn extract_in<Tz: TimeZone>(content: &str, tz: &Tz) -> Vec<BusyInterval> {
    let mut events = Vec::new();
    let mut dropped = 0usize;

    let mut in_event = false;
    let mut pending = PendingEvent::default();

    for line in content.split(['\r', '\n']).map(str::trim) {
        if line == BEGIN_EVENT {
            in_event = true;
            pending = PendingEvent::new();
            continue;
        }

        if line == END_EVENT && in_event {
            in_event = false;
            match std::mem::take(&mut pending).finish() {
                Some(event) => events.push(event),
                None => dropped += 1,
            }
            continue;
        }

        if !in_event {
            continue;
        }

        if line.starts_with("DTSTART") {
            pending.start = date_property(line, tz);
        } else if line.starts_with("DTEND") {
            pending.end = date_property(line, tz);
        } else if line.starts_with("SUMMARY") {
            pending.summary = line.get(SUMMARY_PREFIX_LEN..).unwrap_or_default().to_string();
        }
    }

    log::debug!("Extracted {} events ({} blocks dropped)", events.len(), dropped);
    events
}

/// Event fields collected between BEGIN:VEVENT and END:VEVENT.
#[derive(Default)]
struct PendingEvent {
    id: String,
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
    summary: String,
}

impl PendingEvent {
    fn new() -> Self {
        PendingEvent {
            id: uuid::Uuid::new_v4().to_string(),
            ..Default::default()
        }
    }

    fn finish(self) -> Option<BusyInterval> {
        BusyInterval::with_id(self.id, self.start?, self.end?, self.summary)
    }
}

/// Value of a DTSTART/DTEND line: whatever follows the last colon, so that
/// parameters like `;TZID=Europe/Berlin` are skipped over.
fn date_property<Tz: TimeZone>(line: &str, tz: &Tz) -> Option<DateTime<Utc>> {
    let (_, value) = line.rsplit_once(':')?;
    IcsDateTime::parse(value).map(|dt| dt.resolve(tz))
}
