use chrono::{DateTime, Duration, NaiveTime, TimeZone, Timelike};

use crate::constants::SLOT_STEP_MINUTES;
use crate::time::resolve_local;

/// The span of time a search covers.
///
/// Starts at the top of the first whole hour after "now" and runs for a
/// number of calendar days. The end is exclusive for slot starts.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchWindow<Tz: TimeZone> {
    start: DateTime<Tz>,
    end: DateTime<Tz>,
}

impl<Tz: TimeZone> SearchWindow<Tz> {
    pub fn starting_after(now: &DateTime<Tz>, days: u32) -> Self {
        let tz = now.timezone();
        let local = now.naive_local();

        let hour_start = local.date().and_time(NaiveTime::MIN) + Duration::hours(i64::from(local.hour()));
        let start = hour_start
            .checked_add_signed(Duration::hours(1))
            .unwrap_or(hour_start);
        // Past the end of representable time the window is empty
        let end = start
            .checked_add_signed(Duration::days(i64::from(days)))
            .unwrap_or(start);

        SearchWindow {
            start: resolve_local(&tz, start),
            end: resolve_local(&tz, end),
        }
    }

    pub fn start(&self) -> &DateTime<Tz> {
        &self.start
    }

    pub fn end(&self) -> &DateTime<Tz> {
        &self.end
    }

    pub fn contains(&self, dt: &DateTime<Tz>) -> bool {
        *dt >= self.start && *dt < self.end
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

/// Snap forward to the next :00 or :30. Already-aligned times are kept.
pub(crate) fn align_to_half_hour<Tz: TimeZone>(dt: &DateTime<Tz>) -> DateTime<Tz> {
    let minute = i64::from(dt.minute());
    if minute % SLOT_STEP_MINUTES == 0 && dt.second() == 0 && dt.nanosecond() == 0 {
        return dt.clone();
    }

    let local = dt.naive_local();
    let hour_start = local.date().and_time(NaiveTime::MIN) + Duration::hours(i64::from(local.hour()));
    let steps = minute / SLOT_STEP_MINUTES + 1;

    resolve_local(&dt.timezone(), hour_start + Duration::minutes(steps * SLOT_STEP_MINUTES))
}
