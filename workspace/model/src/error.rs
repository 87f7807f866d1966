use chrono::NaiveDate;
use thiserror::Error;

/// Errors raised while building domain values from user input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Department label outside the closed set
    #[error("Unknown department: {0}")]
    UnknownDepartment(String),

    /// Business type label outside the closed set
    #[error("Unknown business type: {0}")]
    UnknownBusinessType(String),

    /// Range whose start lies after its end
    #[error("Invalid date range: {from} is after {to}")]
    InvalidDateRange { from: NaiveDate, to: NaiveDate },

    /// Window length other than 7, 14 or 28 days
    #[error("Unsupported forecast window: {0} days")]
    InvalidWindow(u32),

    /// Window that would end past the last representable calendar day
    #[error("A {days} day window starting on {start} ends outside the calendar")]
    WindowOutOfCalendar { start: NaiveDate, days: u32 },
}
