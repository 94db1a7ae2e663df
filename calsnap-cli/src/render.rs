//! TUI rendering for calsnap types.
//!
//! Extension traits and helpers that add colored terminal output to
//! calsnap-core types using owo_colors.

use calsnap_core::{Calendar, CalendarSet, MatchQuality, Slot};
use chrono::NaiveDate;
use chrono_tz::Tz;
use owo_colors::OwoColorize;

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for MatchQuality {
    fn render(&self) -> String {
        match self {
            MatchQuality::Perfect => "Perfect match".green().bold().to_string(),
            MatchQuality::Good => "Good match".yellow().to_string(),
            MatchQuality::Partial => "Partial match".yellow().dimmed().to_string(),
        }
    }
}

impl Render for Calendar {
    fn render(&self) -> String {
        let dot = match hex_to_rgb(&self.color) {
            Some((r, g, b)) => "●".truecolor(r, g, b).to_string(),
            None => "●".to_string(),
        };
        let initials = format!("({})", self.initials());

        format!("{} {} {}", dot, self.name.bold(), initials.dimmed())
    }
}

/// Two lines per slot: when and how good, then who is missing.
pub fn render_slot(slot: &Slot, calendars: &CalendarSet, tz: &Tz, today: NaiveDate) -> String {
    let start = slot.start.with_timezone(tz);
    let end = slot.end.with_timezone(tz);

    let date = format_date_label(start.date_naive(), today);
    let time = format!("{} - {}", start.format("%H:%M"), end.format("%H:%M"));

    let header = format!(
        "{:<10} {}  {}  {}",
        date.bold(),
        time.cyan(),
        format_percent(slot.score),
        slot.quality().render()
    );

    let detail = if slot.busy_calendar_ids.is_empty() {
        "Everyone is available".green().to_string()
    } else {
        let missing = calendars.display_names(&slot.busy_calendar_ids).join(", ");
        format!("Missing: {}", missing).red().to_string()
    };

    format!("{}\n   {}", header, detail)
}

/// Availability as a whole percentage, e.g. " 67%".
pub fn format_percent(score: f64) -> String {
    format!("{:>3}%", (score * 100.0).round() as u32)
}

/// Format a date as a human-readable label (e.g. "Today", "Tomorrow", "Wed Feb 25")
pub fn format_date_label(date: NaiveDate, today: NaiveDate) -> String {
    match (date - today).num_days() {
        0 => "Today".to_string(),
        1 => "Tomorrow".to_string(),
        _ => date.format("%a %b %-d").to_string(),
    }
}

/// Parse `#RRGGBB`.
pub fn hex_to_rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }

    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}

/// Simple pluralization helper
pub fn pluralize(word: &str, count: usize) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{}s", word)
    }
}
