//! Error types for calsnap.

use thiserror::Error;

/// Errors that can occur in calsnap operations.
///
/// Extraction and slot search never fail; these cover configuration checks
/// and roster bookkeeping.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalSnapError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Calendar not found: {0}")]
    CalendarNotFound(String),
}

/// Result type alias for calsnap operations.
pub type CalSnapResult<T> = Result<T, CalSnapError>;
