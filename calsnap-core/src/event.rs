//! Busy intervals.
//!
//! A busy interval is the only thing calsnap keeps from a calendar event:
//! when it starts, when it ends and what it was called.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A half-open span `[start, end)` during which a calendar's owner is busy.
///
/// `start < end` always holds; the constructors refuse anything else.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusyInterval {
    id: String,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    label: String,
}

impl BusyInterval {
    /// Create an interval with a freshly generated id.
    /// Returns `None` unless `start < end`.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>, label: impl Into<String>) -> Option<Self> {
        Self::with_id(uuid::Uuid::new_v4().to_string(), start, end, label)
    }

    pub fn with_id(
        id: impl Into<String>,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        label: impl Into<String>,
    ) -> Option<Self> {
        if start >= end {
            return None;
        }

        Some(BusyInterval {
            id: id.into(),
            start,
            end,
            label: label.into(),
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Whether this interval shares any time with `[start, end)`.
    /// Touching endpoints do not count.
    pub fn overlaps(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        overlaps(self.start, self.end, start, end)
    }
}

impl fmt::Display for BusyInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = if self.label.is_empty() { "(No title)" } else { self.label.as_str() };
        write!(f, "{} ({} - {})", label, self.start, self.end)
    }
}

/// Half-open overlap test: `a_start < b_end && a_end > b_start`.
pub fn overlaps<T: PartialOrd>(a_start: T, a_end: T, b_start: T, b_end: T) -> bool {
    a_start < b_end && a_end > b_start
}
