//! Core types for calsnap.
//!
//! This crate turns raw calendar exports into busy intervals and searches a
//! window of upcoming working days for meeting slots that suit everyone:
//! - `ics` extracts [`BusyInterval`]s from `.ics` text
//! - `search` sweeps the window and ranks candidate [`Slot`]s
//!
//! Nothing in here performs I/O. Callers hand in already-fetched text and
//! an explicit "now".

pub mod calendar;
pub mod calendar_set;
pub mod constants;
pub mod error;
pub mod event;
pub mod ics;
pub mod scheduling_config;
pub mod search;
mod time;

pub use calendar::{Calendar, CalendarId};
pub use calendar_set::CalendarSet;
pub use error::{CalSnapError, CalSnapResult};
pub use event::BusyInterval;
pub use ics::{extract, extract_in};
pub use scheduling_config::{LunchConfig, SchedulingConfig};
pub use search::{MatchQuality, SearchWindow, Slot, rank, search};
