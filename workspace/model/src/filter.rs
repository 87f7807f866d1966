use std::collections::BTreeSet;

use crate::range::DateRange;

/// Label that selects every value of a filter dimension.
pub const ALL_SENTINEL: &str = "all";

/// Selection on one filter dimension (stores or departments).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection<T: Ord> {
    /// The sentinel: no restriction, no weighting.
    All,
    /// An explicit, non-empty set of values.
    Only(BTreeSet<T>),
}

impl<T: Ord> Default for Selection<T> {
    fn default() -> Self {
        Selection::All
    }
}

impl<T: Ord> Selection<T> {
    /// Explicit selection; an empty input selects everything.
    pub fn only(values: impl IntoIterator<Item = T>) -> Self {
        let values: BTreeSet<T> = values.into_iter().collect();
        if values.is_empty() {
            Selection::All
        } else {
            Selection::Only(values)
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Selection::All)
    }

    /// Selected values; empty for [`Selection::All`].
    pub fn values(&self) -> impl Iterator<Item = &T> {
        let values = match self {
            Selection::All => None,
            Selection::Only(values) => Some(values.iter()),
        };
        values.into_iter().flatten()
    }
}

impl Selection<String> {
    /// Builds a selection from raw labels.
    ///
    /// Labels are trimmed and blank ones dropped. The `all` sentinel anywhere
    /// in the input, or no labels at all, selects everything.
    pub fn from_labels<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut selected = BTreeSet::new();
        for label in labels {
            let label = label.as_ref().trim();
            if label.is_empty() {
                continue;
            }
            if label.eq_ignore_ascii_case(ALL_SENTINEL) {
                return Selection::All;
            }
            selected.insert(label.to_string());
        }
        Selection::only(selected)
    }

    /// Parses a comma separated label list such as `Snacks,Beverages`.
    pub fn parse_csv(raw: Option<&str>) -> Self {
        match raw {
            Some(raw) => Self::from_labels(raw.split(',')),
            None => Selection::All,
        }
    }
}

/// Everything the user picked in the dashboard controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSelection {
    pub stores: Selection<String>,
    pub departments: Selection<String>,
    pub search_term: String,
    pub date_range: DateRange,
    /// "Explain changes" toggle; enables annotations and the promo bonus.
    pub explain: bool,
}

impl FilterSelection {
    /// Unfiltered selection over `date_range`.
    pub fn new(date_range: DateRange) -> Self {
        Self {
            stores: Selection::All,
            departments: Selection::All,
            search_term: String::new(),
            date_range,
            explain: false,
        }
    }

    pub fn with_stores(mut self, stores: Selection<String>) -> Self {
        self.stores = stores;
        self
    }

    pub fn with_departments(mut self, departments: Selection<String>) -> Self {
        self.departments = departments;
        self
    }

    pub fn with_search(mut self, search_term: impl Into<String>) -> Self {
        self.search_term = search_term.into();
        self
    }

    pub fn with_explain(mut self, explain: bool) -> Self {
        self.explain = explain;
        self
    }

    /// Whether a non-blank search term is applied.
    pub fn has_search(&self) -> bool {
        !self.search_term.trim().is_empty()
    }
}
