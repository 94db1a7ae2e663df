//! Calendars: a named set of busy intervals.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::CALENDAR_COLORS;
use crate::event::BusyInterval;
use crate::ics::extract;

/// Identifier of a calendar within a session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CalendarId(String);

impl CalendarId {
    pub fn generate() -> Self {
        CalendarId(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for CalendarId {
    fn from(s: &str) -> Self {
        CalendarId(s.to_string())
    }
}

impl From<String> for CalendarId {
    fn from(s: String) -> Self {
        CalendarId(s)
    }
}

impl fmt::Display for CalendarId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One attendee's calendar.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Calendar {
    pub id: CalendarId,
    pub name: String,
    /// Hex colour used when presenting this calendar.
    pub color: String,
    pub events: Vec<BusyInterval>,
}

impl Calendar {
    pub fn new(name: impl Into<String>, events: Vec<BusyInterval>) -> Self {
        Self::with_id(CalendarId::generate(), name, events)
    }

    pub fn with_id(id: impl Into<CalendarId>, name: impl Into<String>, events: Vec<BusyInterval>) -> Self {
        Calendar {
            id: id.into(),
            name: name.into(),
            color: CALENDAR_COLORS[0].to_string(),
            events,
        }
    }

    /// Wrap the events extracted from `.ics` text.
    pub fn from_ics(name: impl Into<String>, content: &str) -> Self {
        Self::new(name, extract(content))
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    /// First two characters of the name, uppercased.
    pub fn initials(&self) -> String {
        self.name.chars().take(2).collect::<String>().to_uppercase()
    }

    /// Whether any busy interval overlaps `[start, end)`.
    pub fn is_busy_during(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        self.events.iter().any(|event| event.overlaps(start, end))
    }

    /// The busy intervals overlapping `[start, end)`.
    pub fn conflicts(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Vec<&BusyInterval> {
        self.events
            .iter()
            .filter(|event| event.overlaps(start, end))
            .collect()
    }
}

impl fmt::Display for Calendar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 15, h, 0, 0).unwrap()
    }

    #[test]
    fn test_initials() {
        assert_eq!(Calendar::new("alice", vec![]).initials(), "AL");
        assert_eq!(Calendar::new("b", vec![]).initials(), "B");
        assert_eq!(Calendar::new("", vec![]).initials(), "");
    }

    #[test]
    fn test_busy_during() {
        let cal = Calendar::new(
            "alice",
            vec![
                BusyInterval::new(at(9), at(10), "standup").unwrap(),
                BusyInterval::new(at(13), at(14), "1:1").unwrap(),
            ],
        );

        assert!(cal.is_busy_during(at(9), at(11)));
        assert!(!cal.is_busy_during(at(10), at(13)));
        assert_eq!(cal.conflicts(at(8), at(15)).len(), 2);
    }

    #[test]
    fn test_from_ics() {
        let cal = Calendar::from_ics(
            "work",
            "BEGIN:VEVENT\nDTSTART:20240101T090000Z\nDTEND:20240101T100000Z\nEND:VEVENT",
        );
        assert_eq!(cal.name, "work");
        assert_eq!(cal.events.len(), 1);
    }

    #[test]
    fn test_calendar_id_serializes_as_plain_string() {
        let id = CalendarId::from("abc");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"abc\"");
    }
}
