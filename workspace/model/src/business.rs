use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ParseError;

/// Kind of business the dashboard is configured for.
///
/// Each variant selects a business profile (baseline magnitudes and KPI
/// constants) and its own widget configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BusinessType {
    #[default]
    Convenience,
    Grocery,
    Liquor,
    Restaurant,
}

impl BusinessType {
    pub const ALL: [BusinessType; 4] = [
        BusinessType::Convenience,
        BusinessType::Grocery,
        BusinessType::Liquor,
        BusinessType::Restaurant,
    ];

    /// Machine key, as used in configuration and query strings.
    pub fn key(self) -> &'static str {
        match self {
            BusinessType::Convenience => "convenience",
            BusinessType::Grocery => "grocery",
            BusinessType::Liquor => "liquor",
            BusinessType::Restaurant => "restaurant",
        }
    }

    /// Name shown in the business type pill.
    pub fn display_name(self) -> &'static str {
        match self {
            BusinessType::Convenience => "Convenience Store",
            BusinessType::Grocery => "Grocery Store",
            BusinessType::Liquor => "Liquor Store",
            BusinessType::Restaurant => "Restaurant",
        }
    }
}

impl fmt::Display for BusinessType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for BusinessType {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        BusinessType::ALL
            .into_iter()
            .find(|business| {
                business.key().eq_ignore_ascii_case(s) || business.display_name().eq_ignore_ascii_case(s)
            })
            .ok_or_else(|| ParseError::UnknownBusinessType(s.to_string()))
    }
}
