use chrono::NaiveDate;
use model::ParseError;
use thiserror::Error;
use tracing::error;

/// Error types for the compute module
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ComputeError {
    /// Calendar range whose start lies after its end
    #[error("Invalid range: {from} is after {to}")]
    InvalidRange { from: NaiveDate, to: NaiveDate },

    /// Lookup of an item (or other keyed entity) that does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Settings that would break the generators (negative weights, inverted bands, ...)
    #[error("Invalid settings: {0}")]
    InvalidSettings(String),

    /// Caller supplied a value outside the accepted domain
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl From<ParseError> for ComputeError {
    fn from(error: ParseError) -> Self {
        let compute_error = match error {
            ParseError::InvalidDateRange { from, to } => ComputeError::InvalidRange { from, to },
            other => ComputeError::InvalidInput(other.to_string()),
        };
        error!(?compute_error, "Rejected domain input");
        compute_error
    }
}

/// Type alias for Result with ComputeError
pub type Result<T> = std::result::Result<T, ComputeError>;
