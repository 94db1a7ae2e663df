//! Busy-interval extraction from .ics text.
//!
//! This is a lenient single-pass scan, not a validating RFC 5545 parser:
//! anything it does not understand is skipped.

mod datetime;
mod parse;

pub use datetime::IcsDateTime;
pub use parse::{extract, extract_in};
