//! SQL engine error types
//!
//! Defines all error conditions from rendering, binding, and execution.
//! Message texts for the client-facing variants are part of the wire
//! contract and asserted by tests.

use thiserror::Error;

/// Errors that can occur while rendering, binding, or executing SQL
#[derive(Error, Debug)]
pub enum SqlError {
    /// Template path referenced a column outside the whitelist
    #[error("Column not allowed: {0}")]
    InvalidColumn(String),

    /// A named placeholder has no matching parameter
    #[error("Missing parameter: {0}")]
    MissingParameter(String),

    /// date_hint is not a valid YYYY-MM-DD date
    #[error("Invalid date hint: {0}")]
    InvalidDateHint(String),

    /// time_hint is not a valid HH:MM:SS time of day
    #[error("Invalid time hint: {0}")]
    InvalidTimeHint(String),

    /// Row limit outside the accepted range
    #[error("Invalid limit: {0}")]
    InvalidLimit(u32),

    /// Driver-level failure: connect, execute, or fetch
    #[error("Execution error: {0}")]
    Execution(#[from] rusqlite::Error),
}

impl SqlError {
    /// Client errors are caused by the request; everything else is a
    /// fault of this process or the database.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, SqlError::Execution(_))
    }
}

/// Result type for SQL engine operations
pub type SqlResult<T> = Result<T, SqlError>;
