use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::calendar::CalendarId;
use crate::constants::GOOD_MATCH_THRESHOLD;

/// A candidate meeting time and who can make it.
///
/// Every input calendar appears in exactly one of the two id lists, in
/// input order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slot {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub available_calendar_ids: Vec<CalendarId>,
    pub busy_calendar_ids: Vec<CalendarId>,
    /// Share of calendars that are free, in `[0, 1]`.
    pub score: f64,
}

/// How good a slot is, bucketed by score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchQuality {
    /// Everyone is free
    Perfect,
    Good,
    Partial,
}

impl Slot {
    pub fn new(
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        available_calendar_ids: Vec<CalendarId>,
        busy_calendar_ids: Vec<CalendarId>,
    ) -> Self {
        let total = available_calendar_ids.len() + busy_calendar_ids.len();
        let score = if total == 0 {
            0.0
        } else {
            available_calendar_ids.len() as f64 / total as f64
        };

        Slot {
            start,
            end,
            available_calendar_ids,
            busy_calendar_ids,
            score,
        }
    }

    pub fn available_count(&self) -> usize {
        self.available_calendar_ids.len()
    }

    pub fn busy_count(&self) -> usize {
        self.busy_calendar_ids.len()
    }

    pub fn is_unanimous(&self) -> bool {
        self.busy_calendar_ids.is_empty() && !self.available_calendar_ids.is_empty()
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    pub fn quality(&self) -> MatchQuality {
        if self.is_unanimous() {
            MatchQuality::Perfect
        } else if self.score > GOOD_MATCH_THRESHOLD {
            MatchQuality::Good
        } else {
            MatchQuality::Partial
        }
    }
}

/// Order slots best first: highest score, then earliest start.
/// The sort is stable.
pub fn rank(slots: &mut [Slot]) {
    slots.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then_with(|| a.start.cmp(&b.start))
    });
}
