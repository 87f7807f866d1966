//! Domain types of the demand-forecasting dashboard.
//!
//! Everything here is plain data: departments, business types, catalog items,
//! filter selections and date ranges. The algorithms operating on them live in
//! the `compute` crate.

pub mod business;
pub mod department;
pub mod error;
pub mod filter;
pub mod item;
pub mod range;

pub use business::BusinessType;
pub use department::Department;
pub use error::ParseError;
pub use filter::{ALL_SENTINEL, FilterSelection, Selection};
pub use item::Item;
pub use range::{DateRange, ForecastWindow};

use serde::{Deserialize, Serialize};
use std::fmt;

// Re-export tracing for use in this crate
pub use tracing;

/// The two quantities the dashboard charts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    /// Money coming in, in whole currency units.
    Revenue,
    /// Units sold, in whole items.
    Units,
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Metric::Revenue => write!(f, "revenue"),
            Metric::Units => write!(f, "units"),
        }
    }
}
