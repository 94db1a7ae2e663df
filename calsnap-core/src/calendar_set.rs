//! The set of calendars taking part in a scheduling session.

use chrono::{DateTime, TimeZone};

use crate::calendar::{Calendar, CalendarId};
use crate::constants::CALENDAR_COLORS;
use crate::error::{CalSnapError, CalSnapResult};
use crate::scheduling_config::SchedulingConfig;
use crate::search::{Slot, search};

/// Calendars in the order they were added.
#[derive(Debug, Clone, Default)]
pub struct CalendarSet {
    calendars: Vec<Calendar>,
}

impl CalendarSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a calendar, colouring it by its position in the roster.
    pub fn add(&mut self, calendar: Calendar) -> &Calendar {
        let index = self.calendars.len();
        let color = CALENDAR_COLORS[index % CALENDAR_COLORS.len()];

        self.calendars.push(calendar.with_color(color));
        &self.calendars[index]
    }

    /// Extract `content` and add the result as a calendar named `name`.
    pub fn add_ics(&mut self, name: impl Into<String>, content: &str) -> CalendarId {
        self.add(Calendar::from_ics(name, content)).id.clone()
    }

    pub fn remove(&mut self, id: &CalendarId) -> CalSnapResult<Calendar> {
        let index = self
            .calendars
            .iter()
            .position(|c| &c.id == id)
            .ok_or_else(|| CalSnapError::CalendarNotFound(id.to_string()))?;

        Ok(self.calendars.remove(index))
    }

    pub fn get(&self, id: &CalendarId) -> Option<&Calendar> {
        self.calendars.iter().find(|c| &c.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Calendar> {
        self.calendars.iter()
    }

    pub fn calendars(&self) -> &[Calendar] {
        &self.calendars
    }

    pub fn len(&self) -> usize {
        self.calendars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.calendars.is_empty()
    }

    /// Names of the calendars in `ids`, in roster order. Unknown ids are skipped.
    pub fn display_names(&self, ids: &[CalendarId]) -> Vec<&str> {
        self.calendars
            .iter()
            .filter(|c| ids.contains(&c.id))
            .map(|c| c.name.as_str())
            .collect()
    }

    /// Run the slot search over every calendar in the set.
    pub fn find_slots<Tz: TimeZone>(&self, config: &SchedulingConfig, now: &DateTime<Tz>) -> Vec<Slot> {
        search(&self.calendars, config, now)
    }
}

impl<'a> IntoIterator for &'a CalendarSet {
    type Item = &'a Calendar;
    type IntoIter = std::slice::Iter<'a, Calendar>;

    fn into_iter(self) -> Self::IntoIter {
        self.calendars.iter()
    }
}
