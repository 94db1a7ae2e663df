//! Common free-slot search.
//!
//! The engine sweeps a window of upcoming days in 30-minute steps, keeps
//! candidates that fit inside working hours (and clear lunch and weekends),
//! and scores each one by the share of calendars that are free.

mod engine;
mod slot;
mod window;

pub use engine::search;
pub use slot::{MatchQuality, Slot, rank};
pub use window::SearchWindow;
