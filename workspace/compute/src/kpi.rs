use model::FilterSelection;
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde::Serialize;
use tracing::{debug, instrument};

use crate::series::SeriesPoint;
use crate::settings::{BusinessProfile, ForecastSettings};

/// Headline numbers of the KPI cards row. Derived, never stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KpiSnapshot {
    pub revenue_forecast: Decimal,
    pub promo_boost: f64,
    pub units_forecast: u64,
    pub weather_impact: f64,
    pub today_vs_typical: f64,
    pub data_health_score: u8,
}

/// Filter-dependent adjustments applied on top of the summed series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KpiFactors {
    /// Totals are scaled by this while a search term is applied.
    pub search_factor: f64,
    /// Percentage points added to the promo boost in "explain changes" mode.
    pub explain_promo_bonus: f64,
}

impl KpiFactors {
    pub fn from_settings(settings: &ForecastSettings) -> Self {
        Self {
            search_factor: settings.search_kpi_factor,
            explain_promo_bonus: settings.explain_promo_bonus_pct,
        }
    }
}

/// Builds the snapshot from already weighted series.
///
/// Totals sum each point's projected value over the range. The filter
/// multiplier is already part of the points, so it is not applied again;
/// an active search term narrows the totals by the search factor.
#[instrument(skip_all, fields(revenue_points = revenue.len(), units_points = units.len()))]
pub fn aggregate(
    revenue: &[SeriesPoint],
    units: &[SeriesPoint],
    filters: &FilterSelection,
    profile: &BusinessProfile,
    factors: KpiFactors,
) -> KpiSnapshot {
    let narrowing = if filters.has_search() { factors.search_factor } else { 1.0 };
    let promo_bonus = if filters.explain { factors.explain_promo_bonus } else { 0.0 };

    let revenue_total: f64 = revenue.iter().map(SeriesPoint::projected).sum::<f64>() * narrowing;
    let units_total: f64 = units.iter().map(SeriesPoint::projected).sum::<f64>() * narrowing;

    let snapshot = KpiSnapshot {
        revenue_forecast: Decimal::from_f64(revenue_total)
            .map(|value| value.round_dp(2))
            .unwrap_or(Decimal::ZERO),
        promo_boost: profile.promo_boost_pct + promo_bonus,
        units_forecast: units_total.max(0.0).floor() as u64,
        weather_impact: profile.weather_impact_pct,
        today_vs_typical: profile.today_vs_typical_pct,
        data_health_score: profile.data_health_score,
    };
    debug!(?snapshot, "Aggregated KPI snapshot");
    snapshot
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use model::DateRange;

    fn point(day: u32, actual: Option<f64>, forecast: Option<f64>) -> SeriesPoint {
        SeriesPoint {
            date: NaiveDate::from_ymd_opt(2026, 1, day).unwrap(),
            is_future: forecast.is_some() && actual.is_none(),
            actual,
            forecast,
            annotation: None,
        }
    }

    fn profile() -> BusinessProfile {
        BusinessProfile {
            base_revenue: 3500.0,
            base_units: 850.0,
            promo_boost_pct: 8.4,
            weather_impact_pct: 2.1,
            today_vs_typical_pct: 1.2,
            data_health_score: 98,
        }
    }

    fn factors() -> KpiFactors {
        KpiFactors {
            search_factor: 0.4,
            explain_promo_bonus: 0.5,
        }
    }

    fn filters() -> FilterSelection {
        let day = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        FilterSelection::new(DateRange::single(day))
    }

    #[test]
    fn test_totals_mix_actuals_and_forecasts() {
        let revenue = vec![point(1, Some(1000.0), None), point(2, None, Some(1500.0))];
        let units = vec![point(1, Some(200.0), None), point(2, None, Some(250.0))];

        let snapshot = aggregate(&revenue, &units, &filters(), &profile(), factors());

        assert_eq!(snapshot.revenue_forecast, Decimal::new(2500, 0));
        assert_eq!(snapshot.units_forecast, 450);
        assert_eq!(snapshot.promo_boost, 8.4);
        assert_eq!(snapshot.data_health_score, 98);
    }

    #[test]
    fn test_carried_forecast_is_not_double_counted() {
        let revenue = vec![point(1, Some(1000.0), Some(1000.0))];
        let snapshot = aggregate(&revenue, &[], &filters(), &profile(), factors());
        assert_eq!(snapshot.revenue_forecast, Decimal::new(1000, 0));
    }

    #[test]
    fn test_search_narrows_totals() {
        let revenue = vec![point(1, Some(1000.0), None)];
        let units = vec![point(1, Some(100.0), None)];
        let snapshot = aggregate(&revenue, &units, &filters().with_search("chips"), &profile(), factors());
        assert_eq!(snapshot.revenue_forecast, Decimal::new(400, 0));
        assert_eq!(snapshot.units_forecast, 40);
    }

    #[test]
    fn test_explain_raises_promo_boost() {
        let snapshot = aggregate(&[], &[], &filters().with_explain(true), &profile(), factors());
        assert_eq!(snapshot.promo_boost, 8.9);

        let snapshot = aggregate(&[], &[], &filters(), &profile(), factors());
        assert_eq!(snapshot.promo_boost, 8.4);
    }

    #[test]
    fn test_empty_series() {
        let snapshot = aggregate(&[], &[], &filters(), &profile(), factors());
        assert_eq!(snapshot.revenue_forecast, Decimal::ZERO);
        assert_eq!(snapshot.units_forecast, 0);
    }
}
