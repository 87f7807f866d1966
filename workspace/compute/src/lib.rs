pub mod calendar;
pub mod dashboard;
pub mod error;
pub mod items;
pub mod kpi;
pub mod profile;
pub mod rng;
pub mod scenario;
pub mod series;
pub mod settings;
pub mod weights;

pub use dashboard::ForecastDashboard;
pub use error::{ComputeError, Result};
pub use items::{ItemPage, ItemSort};
pub use kpi::{KpiFactors, KpiSnapshot};
pub use profile::{BusinessWidgets, InsightEvent, InsightKind, MetricCard, MetricValue};
pub use rng::SeededSequence;
pub use scenario::{MAX_LIFT_PERCENT, ScenarioPreview};
pub use series::SeriesPoint;
pub use settings::{ContinuityPolicy, ForecastSettings};

use chrono::{NaiveDate, Utc};
use model::BusinessType;

/// Returns a dashboard with the default settings, used most of the time.
///
/// This function uses the provided date as "today" or the current date if none is provided.
/// The default business type is a convenience store.
pub fn default_dashboard(today: Option<NaiveDate>) -> Result<ForecastDashboard> {
    let today = today.unwrap_or_else(|| Utc::now().date_naive());
    ForecastDashboard::new(ForecastSettings::default(), BusinessType::default(), today)
}

#[cfg(test)]
mod tests {
    use super::*;
    use model::{DateRange, FilterSelection, ForecastWindow};

    /// The default dashboard reproduces the demo data: 100 items and a
    /// two week window starting on the first of January.
    #[test]
    fn test_default_dashboard() {
        let today = NaiveDate::from_ymd_opt(2026, 1, 8).unwrap();
        let dashboard = default_dashboard(Some(today)).unwrap();

        assert_eq!(dashboard.business_type(), BusinessType::Convenience);
        assert_eq!(dashboard.catalog().len(), 100);

        let start = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let filters = FilterSelection::new(DateRange::from_window(start, ForecastWindow::Fortnight).unwrap());
        let series = dashboard.revenue_series(&filters).expect("Failed to build revenue series");
        assert_eq!(series.len(), 14);
        assert_eq!(series.last().map(|point| point.date), NaiveDate::from_ymd_opt(2026, 1, 14));
    }

    #[test]
    fn test_default_dashboard_without_date() {
        let dashboard = default_dashboard(None).unwrap();
        assert_eq!(dashboard.today(), Utc::now().date_naive());
    }
}
