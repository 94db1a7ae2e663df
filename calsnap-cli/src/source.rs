//! Where calendar text comes from: local .ics files or http(s) URLs.

use std::fmt;
use std::path::PathBuf;

use anyhow::{Context, Result};
use calsnap_core::ics::extract_in;
use calsnap_core::{Calendar, CalendarSet};
use chrono::TimeZone;
use url::Url;

use crate::utils::tui::with_spinner;

const FALLBACK_WEB_NAME: &str = "Web Calendar";

#[derive(Debug, Clone, PartialEq)]
pub enum Source {
    File(PathBuf),
    Url(Url),
}

impl Source {
    /// Treat http(s) URLs as remote calendars and anything else as a path.
    pub fn parse(s: &str) -> Self {
        match Url::parse(s) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => Source::Url(url),
            _ => Source::File(PathBuf::from(shellexpand::tilde(s).into_owned())),
        }
    }

    /// Name shown for the calendar loaded from this source.
    pub fn display_name(&self) -> String {
        match self {
            Source::File(path) => path
                .file_name()
                .map(|n| strip_ics(&n.to_string_lossy()).to_string())
                .unwrap_or_else(|| path.display().to_string()),
            Source::Url(url) => {
                let last = url
                    .path_segments()
                    .and_then(|mut segments| segments.rfind(|s| !s.is_empty()))
                    .unwrap_or_default();

                if last.chars().count() > 2 {
                    strip_ics(last).to_string()
                } else {
                    url.host_str()
                        .map(str::to_string)
                        .unwrap_or_else(|| FALLBACK_WEB_NAME.to_string())
                }
            }
        }
    }

    pub async fn read(&self, client: &reqwest::Client) -> Result<String> {
        match self {
            Source::File(path) => tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("Could not read calendar file {}", path.display())),
            Source::Url(url) => with_spinner(format!("Fetching {}", url), fetch(client, url)).await,
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::File(path) => write!(f, "{}", path.display()),
            Source::Url(url) => write!(f, "{}", url),
        }
    }
}

async fn fetch(client: &reqwest::Client, url: &Url) -> Result<String> {
    let response = client
        .get(url.clone())
        .send()
        .await
        .with_context(|| format!("Could not fetch calendar from {}", url))?
        .error_for_status()
        .with_context(|| format!("Calendar server rejected request for {}", url))?;

    response
        .text()
        .await
        .with_context(|| format!("Could not read calendar body from {}", url))
}

fn strip_ics(name: &str) -> &str {
    name.strip_suffix(".ics").unwrap_or(name)
}

/// Read every source and extract it into a calendar, in order.
/// Floating and all-day times are read in `tz`.
pub async fn load_calendars<Tz: TimeZone>(sources: &[Source], tz: &Tz) -> Result<CalendarSet> {
    let client = reqwest::Client::new();
    let mut calendars = CalendarSet::new();

    for source in sources {
        let content = source.read(&client).await?;
        let events = extract_in(&content, tz);
        log::info!("Loaded {} events from {}", events.len(), source);

        calendars.add(Calendar::new(source.display_name(), events));
    }

    Ok(calendars)
}
