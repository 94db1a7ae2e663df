//! User configuration at ~/.config/calsnap/config.toml

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use calsnap_core::constants::{
    DEFAULT_DURATION_MINUTES, DEFAULT_LUNCH_END, DEFAULT_LUNCH_START, DEFAULT_SEARCH_DAYS,
    DEFAULT_WORK_HOUR_END, DEFAULT_WORK_HOUR_START,
};
use calsnap_core::{LunchConfig, SchedulingConfig};
use chrono_tz::Tz;
use config::{Config, File};
use serde::{Deserialize, Serialize};

const DEFAULT_LIMIT: usize = 10;

/// Settings read from the config file. Every key is optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalsnapConfig {
    pub duration_minutes: u32,
    pub search_days: u32,
    pub day_start_hour: u32,
    pub day_end_hour: u32,
    pub lunch_enabled: bool,
    pub lunch_start_hour: u32,
    pub lunch_end_hour: u32,

    /// IANA zone name; the system zone when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,

    /// How many slots to print
    pub limit: usize,

    /// Calendars to use when none are given on the command line
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub calendars: Vec<String>,
}

impl Default for CalsnapConfig {
    fn default() -> Self {
        CalsnapConfig {
            duration_minutes: DEFAULT_DURATION_MINUTES,
            search_days: DEFAULT_SEARCH_DAYS,
            day_start_hour: DEFAULT_WORK_HOUR_START,
            day_end_hour: DEFAULT_WORK_HOUR_END,
            lunch_enabled: false,
            lunch_start_hour: DEFAULT_LUNCH_START,
            lunch_end_hour: DEFAULT_LUNCH_END,
            timezone: None,
            limit: DEFAULT_LIMIT,
            calendars: Vec::new(),
        }
    }
}

/// Command-line values that take precedence over the config file.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub duration_minutes: Option<u32>,
    pub search_days: Option<u32>,
    pub day_start_hour: Option<u32>,
    pub day_end_hour: Option<u32>,
    pub lunch_enabled: Option<bool>,
    pub lunch_start_hour: Option<u32>,
    pub lunch_end_hour: Option<u32>,
    pub timezone: Option<String>,
    pub limit: Option<usize>,
}

impl CalsnapConfig {
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?
            .join("calsnap");

        Ok(config_dir.join("config.toml"))
    }

    /// Load the config file, falling back to defaults when it does not exist.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        Config::builder()
            .add_source(File::from(path.to_path_buf()).required(false))
            .build()
            .and_then(|c| c.try_deserialize())
            .with_context(|| format!("Could not read config file {}", path.display()))
    }

    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Self {
        let ConfigOverrides {
            duration_minutes,
            search_days,
            day_start_hour,
            day_end_hour,
            lunch_enabled,
            lunch_start_hour,
            lunch_end_hour,
            timezone,
            limit,
        } = overrides;

        self.duration_minutes = duration_minutes.unwrap_or(self.duration_minutes);
        self.search_days = search_days.unwrap_or(self.search_days);
        self.day_start_hour = day_start_hour.unwrap_or(self.day_start_hour);
        self.day_end_hour = day_end_hour.unwrap_or(self.day_end_hour);
        self.lunch_enabled = lunch_enabled.unwrap_or(self.lunch_enabled);
        self.lunch_start_hour = lunch_start_hour.unwrap_or(self.lunch_start_hour);
        self.lunch_end_hour = lunch_end_hour.unwrap_or(self.lunch_end_hour);
        self.limit = limit.unwrap_or(self.limit);
        if timezone.is_some() {
            self.timezone = timezone;
        }
        self
    }

    /// The engine's view of these settings, with inverted hour ranges repaired.
    pub fn scheduling_config(&self) -> SchedulingConfig {
        let config = SchedulingConfig {
            duration_minutes: self.duration_minutes,
            search_range_days: self.search_days,
            work_hour_start: self.day_start_hour,
            work_hour_end: self.day_end_hour,
            lunch: LunchConfig {
                enabled: self.lunch_enabled,
                start_hour: self.lunch_start_hour,
                end_hour: self.lunch_end_hour,
            },
        };

        let repaired = config.repaired();
        if repaired != config {
            log::info!(
                "Adjusted inverted hours: working day {}-{}, lunch {}-{}",
                repaired.work_hour_start,
                repaired.work_hour_end,
                repaired.lunch.start_hour,
                repaired.lunch.end_hour
            );
        }
        repaired
    }

    /// The configured time zone, or the system one.
    pub fn timezone(&self) -> Result<Tz> {
        match &self.timezone {
            Some(name) => parse_timezone(name),
            None => Ok(system_timezone()),
        }
    }

    /// Create a config file with every option commented out.
    pub fn create_default_config(path: &Path) -> Result<()> {
        if path.exists() {
            anyhow::bail!("Config file already exists at {}", path.display());
        }

        let defaults = CalsnapConfig::default();
        let contents = format!(
            "\
# calsnap configuration

# Meeting length in minutes:
# duration_minutes = {}

# How many days ahead to look:
# search_days = {}

# Working hours (24h clock, end may be 24):
# day_start_hour = {}
# day_end_hour = {}

# Keep a lunch break free:
# lunch_enabled = true
# lunch_start_hour = {}
# lunch_end_hour = {}

# Time zone for working hours and floating event times (defaults to the system zone):
# timezone = \"Europe/Berlin\"

# Number of options to show:
# limit = {}

# Calendars to use when none are passed on the command line (files or URLs):
# calendars = [\"~/calendars/alice.ics\", \"https://example.com/bob.ics\"]
",
            defaults.duration_minutes,
            defaults.search_days,
            defaults.day_start_hour,
            defaults.day_end_hour,
            defaults.lunch_start_hour,
            defaults.lunch_end_hour,
            defaults.limit,
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Could not create config directory")?;
        }

        std::fs::write(path, contents).context("Could not write config file")?;

        Ok(())
    }
}

pub fn parse_timezone(name: &str) -> Result<Tz> {
    name.parse::<Tz>()
        .map_err(|e| anyhow::anyhow!("Unknown time zone '{}': {}", name, e))
}

fn system_timezone() -> Tz {
    iana_time_zone::get_timezone()
        .ok()
        .and_then(|name| name.parse::<Tz>().ok())
        .unwrap_or_else(|| {
            log::warn!("Could not determine the system time zone, using UTC");
            Tz::UTC
        })
}
