use chrono::{Duration, NaiveDate};
use compute::ComputeError;
use model::{BusinessType, DateRange, FilterSelection, ForecastWindow, Selection};

use crate::helpers::errors::{HandlerError, compute_error};
use crate::schemas::{ForecastQuery, ItemsQuery};

/// Days before "today" the default range starts.
const DEFAULT_LOOKBACK_DAYS: i64 = 7;

/// Turns query parameters into a filter selection.
///
/// Without `from` the range starts a week before `today`; without `to` it
/// spans `window` days (14 by default).
pub fn filter_selection(query: &ForecastQuery, today: NaiveDate) -> Result<FilterSelection, HandlerError> {
    let window = match query.window {
        Some(days) => ForecastWindow::try_from(days).map_err(|e| compute_error(e.into()))?,
        None => ForecastWindow::default(),
    };
    let from = query.from.unwrap_or(today - Duration::days(DEFAULT_LOOKBACK_DAYS));
    let to = match query.to {
        Some(to) => to,
        None => window.end_for(from).map_err(|e| compute_error(e.into()))?,
    };
    let date_range = DateRange::new(from, to).map_err(|e| compute_error(ComputeError::from(e)))?;

    Ok(FilterSelection::new(date_range)
        .with_stores(Selection::parse_csv(query.stores.as_deref()))
        .with_departments(Selection::parse_csv(query.departments.as_deref()))
        .with_search(query.search.as_deref().unwrap_or_default().trim())
        .with_explain(query.explain.unwrap_or(false)))
}

/// Filter selection of the item table; the date range plays no part there.
pub fn item_selection(query: &ItemsQuery, today: NaiveDate) -> FilterSelection {
    FilterSelection::new(DateRange::single(today))
        .with_departments(Selection::parse_csv(query.departments.as_deref()))
        .with_search(query.search.as_deref().unwrap_or_default().trim())
}

fn labels(selection: &Selection<String>) -> String {
    match selection {
        Selection::All => "all".to_string(),
        Selection::Only(values) => values
            .iter()
            .map(|value| value.to_lowercase())
            .collect::<Vec<_>>()
            .join(","),
    }
}

/// Cache key of a normalized query; equal selections give equal keys.
pub fn cache_key(kind: &str, business_type: BusinessType, filters: &FilterSelection) -> String {
    format!(
        "{}|{}|{}|{}|{}|{}|{}|{}",
        kind,
        business_type.key(),
        filters.date_range.from(),
        filters.date_range.to(),
        labels(&filters.stores),
        labels(&filters.departments),
        filters.search_term.trim().to_lowercase(),
        filters.explain
    )
}
