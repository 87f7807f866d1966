use chrono::{Datelike, NaiveDate, Weekday};
use model::Metric;
use serde::Serialize;
use tracing::{debug, instrument};

use crate::rng::SeededSequence;
use crate::settings::{AnnotationRule, ContinuityPolicy, ForecastSettings, JitterBand};

/// One day of one chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub date: NaiveDate,
    pub is_future: bool,
    pub actual: Option<f64>,
    pub forecast: Option<f64>,
    pub annotation: Option<String>,
}

impl SeriesPoint {
    /// Value used for totals: the forecast when there is one, the actual otherwise.
    pub fn projected(&self) -> f64 {
        self.forecast.or(self.actual).unwrap_or(0.0)
    }

    /// Multiplies both magnitudes by `factor`, keeping whole numbers.
    pub fn scale(&mut self, factor: f64) {
        self.actual = self.actual.map(|value| (value * factor).round().max(0.0));
        self.forecast = self.forecast.map(|value| (value * factor).round().max(0.0));
    }
}

/// Revenue and units points synthesized for the same calendar day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyPoint {
    pub date: NaiveDate,
    pub is_future: bool,
    pub revenue: SeriesPoint,
    pub units: SeriesPoint,
}

impl DailyPoint {
    pub fn metric(&self, metric: Metric) -> &SeriesPoint {
        match metric {
            Metric::Revenue => &self.revenue,
            Metric::Units => &self.units,
        }
    }

    pub fn into_metric(self, metric: Metric) -> SeriesPoint {
        match metric {
            Metric::Revenue => self.revenue,
            Metric::Units => self.units,
        }
    }
}

/// Knobs of [`synthesize`], usually taken from [`ForecastSettings`].
#[derive(Debug, Clone)]
pub struct SynthesisOptions<'a> {
    pub weekend_multiplier: f64,
    pub actual_band: JitterBand,
    pub forecast_band: JitterBand,
    pub continuity: ContinuityPolicy,
    /// "Explain changes" mode; annotations are only attached when set.
    pub explain: bool,
    pub annotations: &'a [AnnotationRule],
}

impl<'a> SynthesisOptions<'a> {
    pub fn from_settings(settings: &'a ForecastSettings, explain: bool) -> Self {
        Self {
            weekend_multiplier: settings.weekend_multiplier,
            actual_band: settings.actual_band,
            forecast_band: settings.forecast_band,
            continuity: settings.continuity,
            explain,
            annotations: &settings.annotations,
        }
    }

    fn annotation(&self, metric: Metric, day: NaiveDate, is_future: bool) -> Option<String> {
        if !self.explain {
            return None;
        }
        self.annotations
            .iter()
            .find(|rule| rule.metric == metric && rule.weekday == day.weekday() && (is_future || !rule.future_only))
            .map(|rule| rule.label.clone())
    }
}

fn is_weekend(day: NaiveDate) -> bool {
    matches!(day.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Synthesizes the revenue and units points of every day in `days`.
///
/// Days after `today` get a forecast and never an actual; the others get an
/// actual, plus a forecast mirroring it under [`ContinuityPolicy::CarryThrough`].
/// Jitter for a day is drawn from a fork of `rng` keyed by that day, so a day
/// keeps its values whatever range it is requested in.
#[instrument(skip(days, options, rng), fields(num_days = days.len(), today = %today))]
pub fn synthesize(
    days: &[NaiveDate],
    base_revenue: f64,
    base_units: f64,
    today: NaiveDate,
    options: &SynthesisOptions<'_>,
    rng: &SeededSequence,
) -> Vec<DailyPoint> {
    let points: Vec<DailyPoint> = days
        .iter()
        .map(|&day| {
            let mut day_rng = rng.fork(day.num_days_from_ce() as u64);
            let is_future = day > today;
            let magnitude = if is_weekend(day) { options.weekend_multiplier } else { 1.0 };

            let mut point = |metric: Metric, base: f64| {
                let band = if is_future { options.forecast_band } else { options.actual_band };
                let value = (base * magnitude * band.sample(&mut day_rng)).round().max(0.0);
                let (actual, forecast) = match (is_future, options.continuity) {
                    (true, _) => (None, Some(value)),
                    (false, ContinuityPolicy::Exclusive) => (Some(value), None),
                    (false, ContinuityPolicy::CarryThrough) => (Some(value), Some(value)),
                };
                SeriesPoint {
                    date: day,
                    is_future,
                    actual,
                    forecast,
                    annotation: options.annotation(metric, day, is_future),
                }
            };

            let revenue = point(Metric::Revenue, base_revenue);
            let units = point(Metric::Units, base_units);
            DailyPoint {
                date: day,
                is_future,
                revenue,
                units,
            }
        })
        .collect();

    debug!("Synthesized {} daily points", points.len());
    points
}
