//! Parameters for a slot search.

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_DURATION_MINUTES, DEFAULT_LUNCH_END, DEFAULT_LUNCH_START, DEFAULT_SEARCH_DAYS,
    DEFAULT_WORK_HOUR_END, DEFAULT_WORK_HOUR_START, MAX_SEARCH_DAYS,
};
use crate::error::{CalSnapError, CalSnapResult};

/// An optional daily break during which no meeting may be proposed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LunchConfig {
    pub enabled: bool,
    pub start_hour: u32,
    pub end_hour: u32,
}

impl Default for LunchConfig {
    fn default() -> Self {
        LunchConfig {
            enabled: false,
            start_hour: DEFAULT_LUNCH_START,
            end_hour: DEFAULT_LUNCH_END,
        }
    }
}

/// What kind of slot to look for, and where.
///
/// Hours are wall-clock hours in the search's time zone. Closing bounds
/// (`work_hour_end`, `lunch.end_hour`) may be 24, meaning midnight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulingConfig {
    pub duration_minutes: u32,
    pub search_range_days: u32,
    pub work_hour_start: u32,
    pub work_hour_end: u32,
    pub lunch: LunchConfig,
}

impl Default for SchedulingConfig {
    fn default() -> Self {
        SchedulingConfig {
            duration_minutes: DEFAULT_DURATION_MINUTES,
            search_range_days: DEFAULT_SEARCH_DAYS,
            work_hour_start: DEFAULT_WORK_HOUR_START,
            work_hour_end: DEFAULT_WORK_HOUR_END,
            lunch: LunchConfig::default(),
        }
    }
}

impl SchedulingConfig {
    pub fn duration(&self) -> Duration {
        Duration::minutes(i64::from(self.duration_minutes))
    }

    /// Check the bounds the slot search relies on.
    ///
    /// A zero-day search range is allowed; it simply finds nothing.
    pub fn validate(&self) -> CalSnapResult<()> {
        if self.duration_minutes == 0 {
            return Err(CalSnapError::Config("Meeting duration must be positive".into()));
        }

        if self.search_range_days > MAX_SEARCH_DAYS {
            return Err(CalSnapError::Config(format!(
                "Search range must be at most {MAX_SEARCH_DAYS} days, got {}",
                self.search_range_days
            )));
        }

        check_hours("Work hours", self.work_hour_start, self.work_hour_end)?;

        if self.lunch.enabled {
            check_hours("Lunch", self.lunch.start_hour, self.lunch.end_hour)?;
        }

        Ok(())
    }

    /// Fix inverted bounds the way the settings form does: an end that is
    /// not after its start becomes one hour after it.
    pub fn repaired(&self) -> Self {
        let mut config = self.clone();
        config.work_hour_end = repair_end(config.work_hour_start, config.work_hour_end);
        config.lunch.end_hour = repair_end(config.lunch.start_hour, config.lunch.end_hour);
        config
    }
}

fn repair_end(start: u32, end: u32) -> u32 {
    if end > start { end } else { start + 1 }
}

fn check_hours(what: &str, start: u32, end: u32) -> CalSnapResult<()> {
    if start > 23 {
        return Err(CalSnapError::Config(format!(
            "{what} start hour must be between 0 and 23, got {start}"
        )));
    }
    if end > 24 {
        return Err(CalSnapError::Config(format!(
            "{what} end hour must be between 1 and 24, got {end}"
        )));
    }
    if end <= start {
        return Err(CalSnapError::Config(format!(
            "{what} end ({end}:00) must be after start ({start}:00)"
        )));
    }
    Ok(())
}
