use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Inclusive calendar range echoed back with every series.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct DateRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DateRange {
    pub fn new(from: NaiveDate, to: NaiveDate) -> Self {
        Self { from, to }
    }
}

/// One chart point. `actual` is null for future days, `forecast` is null for
/// past days unless the forecast line is carried through.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct SeriesPointDto {
    pub date: NaiveDate,
    pub is_future: bool,
    pub actual: Option<f64>,
    pub forecast: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annotation: Option<String>,
}

/// A whole chart: the metric name, the range and its points in date order.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct SeriesDto {
    pub metric: String,
    pub range: DateRange,
    /// Store x department multiplier already applied to the points.
    pub multiplier: f64,
    pub points: Vec<SeriesPointDto>,
}

impl SeriesDto {
    /// Sum of forecasts where present, actuals otherwise.
    pub fn projected_total(&self) -> f64 {
        self.points
            .iter()
            .map(|point| point.forecast.or(point.actual).unwrap_or(0.0))
            .sum()
    }

    pub fn future_points(&self) -> impl Iterator<Item = &SeriesPointDto> {
        self.points.iter().filter(|point| point.is_future)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(day: u32, is_future: bool, actual: Option<f64>, forecast: Option<f64>) -> SeriesPointDto {
        SeriesPointDto {
            date: NaiveDate::from_ymd_opt(2026, 1, day).unwrap(),
            is_future,
            actual,
            forecast,
            annotation: None,
        }
    }

    #[test]
    fn test_projected_total_and_future_points() {
        let from = NaiveDate::from_ymd_opt(2026, 1, 8).unwrap();
        let to = NaiveDate::from_ymd_opt(2026, 1, 9).unwrap();
        let series = SeriesDto {
            metric: "revenue".to_string(),
            range: DateRange::new(from, to),
            multiplier: 1.0,
            points: vec![point(8, false, Some(100.0), None), point(9, true, None, Some(150.0))],
        };
        assert_eq!(series.projected_total(), 250.0);
        assert_eq!(series.future_points().count(), 1);
    }

    #[test]
    fn test_annotation_is_omitted_when_absent() {
        let json = serde_json::to_value(point(8, false, Some(1.0), None)).unwrap();
        assert!(json.get("annotation").is_none());
        assert_eq!(json["date"], "2026-01-08");
        assert!(json["forecast"].is_null());
    }
}
