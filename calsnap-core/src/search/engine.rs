use chrono::{DateTime, Datelike, Duration, TimeZone, Timelike, Utc, Weekday};

use super::slot::{Slot, rank};
use super::window::{SearchWindow, align_to_half_hour};
use crate::calendar::{Calendar, CalendarId};
use crate::constants::SLOT_STEP_MINUTES;
use crate::event::overlaps;
use crate::scheduling_config::SchedulingConfig;
use crate::time::{at_hour, next_day_at_hour};

/// Find meeting slots across `calendars`, best first.
///
/// Day boundaries, working hours, lunch and weekends are taken in the time
/// zone of `now`. Slots nobody can attend are left out. Returns nothing for
/// an empty calendar list, an empty window, or a config that fails
/// [`SchedulingConfig::validate`].
pub fn search<Tz: TimeZone>(
    calendars: &[Calendar],
    config: &SchedulingConfig,
    now: &DateTime<Tz>,
) -> Vec<Slot> {
    if calendars.is_empty() {
        return Vec::new();
    }

    if let Err(e) = config.validate() {
        log::warn!("Skipping slot search: {e}");
        return Vec::new();
    }

    let tz = now.timezone();
    let window = SearchWindow::starting_after(now, config.search_range_days);
    let duration = config.duration();
    let step = Duration::minutes(SLOT_STEP_MINUTES);

    let mut slots = Vec::new();
    let mut evaluated = 0usize;
    let mut cursor = clamp_to_work_hours(align_to_half_hour(window.start()), config);

    while cursor < *window.end() {
        let start = cursor.clone();
        let end = start.clone() + duration;
        let date = start.date_naive();

        let day_start = at_hour(&tz, date, config.work_hour_start);
        if start < day_start {
            cursor = day_start;
            continue;
        }

        // Meetings never spill past closing time; try tomorrow instead
        let day_end = at_hour(&tz, date, config.work_hour_end);
        if end > day_end {
            cursor = next_day_at_hour(&tz, date, config.work_hour_start);
            continue;
        }

        if config.lunch.enabled {
            let lunch_start = at_hour(&tz, date, config.lunch.start_hour);
            let lunch_end = at_hour(&tz, date, config.lunch.end_hour);

            // Step rather than jump past lunch, so every half hour is tried
            if overlaps(&start, &end, &lunch_start, &lunch_end) {
                cursor += step;
                continue;
            }
        }

        if matches!(start.weekday(), Weekday::Sat | Weekday::Sun) {
            cursor = next_day_at_hour(&tz, date, config.work_hour_start);
            continue;
        }

        evaluated += 1;
        let start = start.with_timezone(&Utc);
        let end = end.with_timezone(&Utc);

        let (available, busy): (Vec<&Calendar>, Vec<&Calendar>) = calendars
            .iter()
            .partition(|calendar| !calendar.is_busy_during(start, end));

        if !available.is_empty() {
            slots.push(Slot::new(start, end, ids(&available), ids(&busy)));
        }

        cursor += step;
    }

    log::debug!(
        "Evaluated {} candidate slots across {} calendars, kept {}",
        evaluated,
        calendars.len(),
        slots.len()
    );

    rank(&mut slots);
    slots
}

/// Move a cursor that sits outside working hours to the next opening time.
fn clamp_to_work_hours<Tz: TimeZone>(cursor: DateTime<Tz>, config: &SchedulingConfig) -> DateTime<Tz> {
    let tz = cursor.timezone();
    let date = cursor.date_naive();
    let hour = cursor.hour();

    if hour < config.work_hour_start {
        at_hour(&tz, date, config.work_hour_start)
    } else if hour >= config.work_hour_end {
        next_day_at_hour(&tz, date, config.work_hour_start)
    } else {
        cursor
    }
}

fn ids(calendars: &[&Calendar]) -> Vec<CalendarId> {
    calendars.iter().map(|c| c.id.clone()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::BusyInterval;
    use crate::scheduling_config::LunchConfig;
    use chrono_tz::Europe::Berlin;

    /// A time in the week of Monday 2024-01-15 (UTC).
    fn at(day: u32, h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, day, h, m, 0).unwrap()
    }

    fn busy(day: u32, from: (u32, u32), to: (u32, u32)) -> BusyInterval {
        BusyInterval::new(at(day, from.0, from.1), at(day, to.0, to.1), "busy").unwrap()
    }

    fn one_day(work_hour_start: u32, work_hour_end: u32) -> SchedulingConfig {
        SchedulingConfig {
            duration_minutes: 60,
            search_range_days: 1,
            work_hour_start,
            work_hour_end,
            lunch: LunchConfig::default(),
        }
    }

    fn hhmm(slot: &Slot) -> String {
        slot.start.format("%H:%M").to_string()
    }

    #[test]
    fn test_no_calendars_no_slots() {
        assert!(search(&[], &SchedulingConfig::default(), &at(15, 7, 10)).is_empty());
    }

    #[test]
    fn test_free_day_yields_every_half_hour() {
        let calendars = [Calendar::with_id("alice", "Alice", vec![])];

        let slots = search(&calendars, &one_day(9, 17), &at(15, 7, 10));

        assert_eq!(slots.len(), 15);
        assert_eq!(slots.first().map(hhmm).as_deref(), Some("09:00"));
        assert_eq!(slots.last().map(hhmm).as_deref(), Some("16:00"));
        assert!(slots.windows(2).all(|w| w[0].start < w[1].start));
        assert!(slots.iter().all(|s| s.end - s.start == Duration::hours(1)));
        assert!(slots.iter().all(|s| s.end <= at(15, 17, 0)));
    }

    #[test]
    fn test_partially_busy_slot_is_scored() {
        let calendars = [
            Calendar::with_id("alice", "Alice", vec![]),
            Calendar::with_id("bob", "Bob", vec![busy(15, (10, 0), (11, 0))]),
            Calendar::with_id("carol", "Carol", vec![]),
        ];

        let slots = search(&calendars, &one_day(9, 17), &at(15, 7, 10));
        let ten = slots.iter().find(|s| s.start == at(15, 10, 0)).unwrap();

        assert!((ten.score - 2.0 / 3.0).abs() < 1e-9);
        assert_eq!(ten.busy_calendar_ids, vec![CalendarId::from("bob")]);
        assert_eq!(
            ten.available_calendar_ids,
            vec![CalendarId::from("alice"), CalendarId::from("carol")]
        );

        // Full matches outrank every partial one
        let first_partial = slots.iter().position(|s| s.score < 1.0).unwrap();
        assert!(slots[..first_partial].iter().all(|s| s.score == 1.0));
        assert!(slots[first_partial..].iter().all(|s| s.score < 1.0));

        // Partial matches are ordered by start among themselves
        let partial: Vec<_> = slots[first_partial..].iter().map(hhmm).collect();
        assert_eq!(partial, vec!["09:30", "10:00", "10:30"]);
    }

    #[test]
    fn test_every_calendar_is_partitioned() {
        let calendars = [
            Calendar::with_id("a", "A", vec![busy(15, (9, 0), (12, 0))]),
            Calendar::with_id("b", "B", vec![busy(15, (11, 0), (15, 0))]),
            Calendar::with_id("c", "C", vec![]),
        ];

        for slot in search(&calendars, &one_day(9, 17), &at(15, 7, 10)) {
            let mut all: Vec<_> = slot
                .available_calendar_ids
                .iter()
                .chain(&slot.busy_calendar_ids)
                .map(|id| id.to_string())
                .collect();
            all.sort();
            assert_eq!(all, vec!["a", "b", "c"]);
        }
    }

    #[test]
    fn test_adjacent_event_does_not_block() {
        let calendars = [Calendar::with_id(
            "alice",
            "Alice",
            vec![busy(15, (9, 0), (10, 0)), busy(15, (12, 0), (13, 0))],
        )];

        let slots = search(&calendars, &one_day(9, 17), &at(15, 7, 10));
        let starts: Vec<_> = slots.iter().map(hhmm).collect();

        // Ends exactly when a meeting starts, or starts exactly when one ends
        assert!(starts.contains(&"10:00".to_string()));
        assert!(starts.contains(&"11:00".to_string()));
        assert!(starts.contains(&"13:00".to_string()));

        for blocked in ["09:00", "09:30", "11:30", "12:00", "12:30"] {
            assert!(!starts.contains(&blocked.to_string()), "{blocked} should be busy");
        }
    }

    #[test]
    fn test_all_busy_slots_are_dropped() {
        let calendars = [
            Calendar::with_id("a", "A", vec![busy(15, (9, 0), (13, 0))]),
            Calendar::with_id("b", "B", vec![busy(15, (8, 0), (12, 0))]),
        ];

        let slots = search(&calendars, &one_day(9, 17), &at(15, 7, 10));

        assert!(slots.iter().all(|s| !s.available_calendar_ids.is_empty()));
        assert!(slots.iter().all(|s| s.score > 0.0));
        // Every start up to 11:30 overlaps both calendars
        assert_eq!(slots.iter().map(|s| s.start).min(), Some(at(15, 12, 0)));
    }

    #[test]
    fn test_lunch_is_never_overlapped() {
        let calendars = [Calendar::with_id("alice", "Alice", vec![])];
        let config = SchedulingConfig {
            duration_minutes: 90,
            search_range_days: 1,
            work_hour_start: 9,
            work_hour_end: 17,
            lunch: LunchConfig {
                enabled: true,
                start_hour: 12,
                end_hour: 13,
            },
        };

        let slots = search(&calendars, &config, &at(15, 7, 10));

        for slot in &slots {
            assert!(
                !(slot.start < at(15, 13, 0) && slot.end > at(15, 12, 0)),
                "{} overlaps lunch",
                hhmm(slot)
            );
        }

        let mut starts: Vec<_> = slots.iter().map(hhmm).collect();
        starts.sort();
        assert_eq!(
            starts,
            vec!["09:00", "09:30", "10:00", "10:30", "13:00", "13:30", "14:00", "14:30", "15:00", "15:30"]
        );
    }

    #[test]
    fn test_weekends_are_skipped() {
        let calendars = [Calendar::with_id("alice", "Alice", vec![])];
        let config = SchedulingConfig {
            search_range_days: 4,
            ..one_day(9, 17)
        };

        // Friday afternoon, window runs into Tuesday
        let slots = search(&calendars, &config, &at(19, 16, 30));

        assert_eq!(slots.len(), 30);
        for slot in &slots {
            assert!(
                !matches!(slot.start.weekday(), Weekday::Sat | Weekday::Sun),
                "{} is on a weekend",
                slot.start
            );
        }
        assert_eq!(slots[0].start, at(22, 9, 0));
    }

    #[test]
    fn test_search_after_hours_starts_next_morning() {
        let calendars = [Calendar::with_id("alice", "Alice", vec![])];

        let slots = search(&calendars, &one_day(9, 17), &at(15, 18, 20));

        assert_eq!(slots[0].start, at(16, 9, 0));
        assert!(slots.iter().all(|s| s.start.day() == 16));
    }

    #[test]
    fn test_meeting_longer_than_working_day_finds_nothing() {
        let calendars = [Calendar::with_id("alice", "Alice", vec![])];
        let config = SchedulingConfig {
            duration_minutes: 9 * 60,
            search_range_days: 7,
            ..one_day(9, 17)
        };

        assert!(search(&calendars, &config, &at(15, 7, 10)).is_empty());
    }

    #[test]
    fn test_zero_day_window_finds_nothing() {
        let calendars = [Calendar::with_id("alice", "Alice", vec![])];
        let config = SchedulingConfig {
            search_range_days: 0,
            ..one_day(9, 17)
        };

        assert!(search(&calendars, &config, &at(15, 7, 10)).is_empty());
    }

    #[test]
    fn test_invalid_config_finds_nothing() {
        let calendars = [Calendar::with_id("alice", "Alice", vec![])];

        assert!(search(&calendars, &one_day(17, 9), &at(15, 7, 10)).is_empty());
    }

    #[test]
    fn test_absurd_search_range_finds_nothing() {
        let calendars = [Calendar::with_id("alice", "Alice", vec![])];
        let config = SchedulingConfig {
            search_range_days: u32::MAX,
            ..one_day(9, 17)
        };

        assert_eq!(search(&calendars, &config, &at(15, 7, 10)), Vec::new());
    }

    #[test]
    fn test_working_day_may_end_at_midnight() {
        let calendars = [Calendar::with_id("alice", "Alice", vec![])];

        let slots = search(&calendars, &one_day(20, 24), &at(15, 7, 10));
        let starts: Vec<_> = slots.iter().map(hhmm).collect();

        assert_eq!(starts, vec!["20:00", "20:30", "21:00", "21:30", "22:00", "22:30", "23:00"]);
    }

    #[test]
    fn test_hours_follow_the_time_zone_of_now() {
        let calendars = [Calendar::with_id("alice", "Alice", vec![])];
        let now = Berlin.with_ymd_and_hms(2024, 1, 15, 7, 10, 0).unwrap();

        let slots = search(&calendars, &one_day(9, 17), &now);

        // 09:00 in Berlin is 08:00 UTC in winter
        assert_eq!(slots[0].start, at(15, 8, 0));
        assert_eq!(slots.last().map(|s| s.start), Some(at(15, 15, 0)));
    }

    #[test]
    fn test_floating_events_block_in_the_search_zone() {
        let ics = "BEGIN:VEVENT\nDTSTART:20240115T090000\nDTEND:20240115T100000\nEND:VEVENT";
        let calendars = [Calendar::new("alice", crate::ics::extract_in(ics, &Berlin))];
        let now = Berlin.with_ymd_and_hms(2024, 1, 15, 7, 10, 0).unwrap();

        let slots = search(&calendars, &one_day(9, 17), &now);

        // The first free hour in Berlin is 10:00, i.e. 09:00 UTC
        assert_eq!(slots[0].start, at(15, 9, 0));
    }

    #[test]
    fn test_same_inputs_same_output() {
        let calendars = [
            Calendar::with_id("a", "A", vec![busy(16, (10, 0), (12, 0))]),
            Calendar::with_id("b", "B", vec![busy(17, (14, 0), (15, 0))]),
        ];
        let config = SchedulingConfig {
            search_range_days: 5,
            ..one_day(9, 17)
        };

        let now = at(15, 7, 10);
        assert_eq!(search(&calendars, &config, &now), search(&calendars, &config, &now));
    }

    #[test]
    fn test_clamp_to_work_hours() {
        let config = one_day(9, 17);

        assert_eq!(clamp_to_work_hours(at(15, 7, 0), &config), at(15, 9, 0));
        assert_eq!(clamp_to_work_hours(at(15, 12, 30), &config), at(15, 12, 30));
        assert_eq!(clamp_to_work_hours(at(15, 17, 0), &config), at(16, 9, 0));
    }
}
