use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ParseError;

/// Store department an item belongs to. The set is closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Department {
    Grocery,
    Snacks,
    Beverages,
    Household,
    #[serde(rename = "Personal Care")]
    PersonalCare,
}

impl Department {
    /// Every department, in display order.
    pub const ALL: [Department; 5] = [
        Department::Grocery,
        Department::Snacks,
        Department::Beverages,
        Department::Household,
        Department::PersonalCare,
    ];

    /// Human readable label, also used as the filter and weight-table key.
    pub fn label(self) -> &'static str {
        match self {
            Department::Grocery => "Grocery",
            Department::Snacks => "Snacks",
            Department::Beverages => "Beverages",
            Department::Household => "Household",
            Department::PersonalCare => "Personal Care",
        }
    }

    /// Whether a free-form filter label names this department.
    pub fn matches(self, label: &str) -> bool {
        let label = label.trim();
        self.label().eq_ignore_ascii_case(label)
            || (self == Department::PersonalCare && label.eq_ignore_ascii_case("personal_care"))
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Department {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Department::ALL
            .into_iter()
            .find(|department| department.matches(s))
            .ok_or_else(|| ParseError::UnknownDepartment(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("snacks".parse::<Department>().unwrap(), Department::Snacks);
        assert_eq!(
            "personal care".parse::<Department>().unwrap(),
            Department::PersonalCare
        );
        assert_eq!(
            "Personal_Care".parse::<Department>().unwrap(),
            Department::PersonalCare
        );
    }

    #[test]
    fn test_parse_unknown_department() {
        let err = "Garden".parse::<Department>().unwrap_err();
        assert_eq!(err, ParseError::UnknownDepartment("Garden".to_string()));
    }

    #[test]
    fn test_serde_uses_labels() {
        let json = serde_json::to_string(&Department::PersonalCare).unwrap();
        assert_eq!(json, "\"Personal Care\"");
        let parsed: Department = serde_json::from_str("\"Beverages\"").unwrap();
        assert_eq!(parsed, Department::Beverages);
    }
}
