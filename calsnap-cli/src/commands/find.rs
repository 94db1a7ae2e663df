use anyhow::Result;
use calsnap_core::{CalendarSet, MatchQuality, Slot};
use chrono::{DateTime, FixedOffset, Utc};
use chrono_tz::Tz;
use owo_colors::OwoColorize;
use serde::Serialize;

use crate::config::CalsnapConfig;
use crate::render::{Render, pluralize, render_slot};
use crate::source::{Source, load_calendars};

pub async fn run(sources: Vec<Source>, config: CalsnapConfig, json: bool) -> Result<()> {
    let tz = config.timezone()?;
    let calendars = load_calendars(&sources, &tz).await?;
    let scheduling = config.scheduling_config();

    let now = Utc::now().with_timezone(&tz);
    let slots = calendars.find_slots(&scheduling, &now);
    let shown = &slots[..slots.len().min(config.limit)];

    if json {
        let views: Vec<SlotView> = shown
            .iter()
            .map(|slot| SlotView::new(slot, &calendars, &tz))
            .collect();
        println!("{}", serde_json::to_string_pretty(&views)?);
        return Ok(());
    }

    for calendar in &calendars {
        println!("{}", calendar.render());
    }
    println!();

    if slots.is_empty() {
        println!("{}", "No common slots found".dimmed());
        return Ok(());
    }

    let header = format!("{} {} found", slots.len(), pluralize("option", slots.len()));
    println!("{}", header.bold());
    if shown.len() < slots.len() {
        println!("{}", format!("Showing the best {}", shown.len()).dimmed());
    }
    println!();

    let today = now.date_naive();
    for slot in shown {
        println!("{}", render_slot(slot, &calendars, &tz, today));
    }

    Ok(())
}

/// A slot with calendar ids resolved to names, for JSON output.
#[derive(Serialize)]
struct SlotView<'a> {
    start: DateTime<FixedOffset>,
    end: DateTime<FixedOffset>,
    score: f64,
    quality: MatchQuality,
    available: Vec<&'a str>,
    missing: Vec<&'a str>,
}

impl<'a> SlotView<'a> {
    fn new(slot: &Slot, calendars: &'a CalendarSet, tz: &Tz) -> Self {
        SlotView {
            start: slot.start.with_timezone(tz).fixed_offset(),
            end: slot.end.with_timezone(tz).fixed_offset(),
            score: slot.score,
            quality: slot.quality(),
            available: calendars.display_names(&slot.available_calendar_ids),
            missing: calendars.display_names(&slot.busy_calendar_ids),
        }
    }
}
