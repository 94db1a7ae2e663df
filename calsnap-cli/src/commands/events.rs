use anyhow::Result;
use calsnap_core::BusyInterval;
use chrono::{DateTime, Duration, Utc};
use chrono_tz::Tz;
use owo_colors::OwoColorize;

use crate::config::CalsnapConfig;
use crate::render::{Render, format_date_label, pluralize};
use crate::source::{Source, load_calendars};

pub async fn run(sources: Vec<Source>, config: CalsnapConfig, all: bool) -> Result<()> {
    let tz = config.timezone()?;
    let calendars = load_calendars(&sources, &tz).await?;

    let now = Utc::now();
    let horizon = listing_horizon(now, config.search_days);
    let today = now.with_timezone(&tz).date_naive();

    for (i, calendar) in calendars.iter().enumerate() {
        if i > 0 {
            println!();
        }

        let count = format!(
            "{} {}",
            calendar.events.len(),
            pluralize("event", calendar.events.len())
        );
        println!("{} {}", calendar.render(), count.dimmed());

        let mut upcoming: Vec<&BusyInterval> = calendar
            .events
            .iter()
            .filter(|e| all || (e.end() > now && e.start() < horizon))
            .collect();
        upcoming.sort_by_key(|e| e.start());

        if upcoming.is_empty() {
            println!("   {}", "No upcoming events".dimmed());
            continue;
        }

        print_by_day(&upcoming, &tz, today);
    }

    Ok(())
}

/// End of the listed range, `days` after `now`. Saturates at the last
/// representable instant.
fn listing_horizon(now: DateTime<Utc>, days: u32) -> DateTime<Utc> {
    now.checked_add_signed(Duration::days(i64::from(days)))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

/// Group events by day and print
fn print_by_day(events: &[&BusyInterval], tz: &Tz, today: chrono::NaiveDate) {
    let mut current_date: Option<String> = None;

    for event in events {
        let start = event.start().with_timezone(tz);
        let end = event.end().with_timezone(tz);
        let date_label = format_date_label(start.date_naive(), today);

        if current_date.as_ref() != Some(&date_label) {
            println!("   {}", date_label.bold());
            current_date = Some(date_label);
        }

        let label = if event.label().is_empty() { "(No title)" } else { event.label() };
        let time = format!("{} - {}", start.format("%H:%M"), end.format("%H:%M"));
        println!("     {} {}", time, label);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_listing_horizon() {
        let now = Utc.with_ymd_and_hms(2024, 1, 15, 7, 10, 0).unwrap();

        assert_eq!(
            listing_horizon(now, 5),
            Utc.with_ymd_and_hms(2024, 1, 20, 7, 10, 0).unwrap()
        );
        assert_eq!(listing_horizon(now, u32::MAX), DateTime::<Utc>::MAX_UTC);
    }
}
