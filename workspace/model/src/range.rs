use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// Inclusive calendar range, `from <= to` by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    from: NaiveDate,
    to: NaiveDate,
}

impl DateRange {
    pub fn new(from: NaiveDate, to: NaiveDate) -> Result<Self, ParseError> {
        if from > to {
            return Err(ParseError::InvalidDateRange { from, to });
        }
        Ok(Self { from, to })
    }

    /// Range covering a single day.
    pub fn single(day: NaiveDate) -> Self {
        Self { from: day, to: day }
    }

    /// Range starting at `start` and spanning `window` days.
    pub fn from_window(start: NaiveDate, window: ForecastWindow) -> Result<Self, ParseError> {
        Ok(Self {
            from: start,
            to: window.end_for(start)?,
        })
    }

    pub fn from(&self) -> NaiveDate {
        self.from
    }

    pub fn to(&self) -> NaiveDate {
        self.to
    }

    /// Number of calendar days in the range, both ends included.
    pub fn num_days(&self) -> i64 {
        (self.to - self.from).num_days() + 1
    }
}

/// Forecast window presets offered next to the date pickers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(try_from = "u32", into = "u32")]
pub enum ForecastWindow {
    Week,
    #[default]
    Fortnight,
    FourWeeks,
}

impl ForecastWindow {
    pub fn days(self) -> u32 {
        match self {
            ForecastWindow::Week => 7,
            ForecastWindow::Fortnight => 14,
            ForecastWindow::FourWeeks => 28,
        }
    }

    /// Last day of a window that starts at `start`.
    pub fn end_for(self, start: NaiveDate) -> Result<NaiveDate, ParseError> {
        start
            .checked_add_signed(Duration::days(i64::from(self.days()) - 1))
            .ok_or(ParseError::WindowOutOfCalendar {
                start,
                days: self.days(),
            })
    }
}

impl TryFrom<u32> for ForecastWindow {
    type Error = ParseError;

    fn try_from(days: u32) -> Result<Self, Self::Error> {
        match days {
            7 => Ok(ForecastWindow::Week),
            14 => Ok(ForecastWindow::Fortnight),
            28 => Ok(ForecastWindow::FourWeeks),
            other => Err(ParseError::InvalidWindow(other)),
        }
    }
}

impl From<ForecastWindow> for u32 {
    fn from(window: ForecastWindow) -> Self {
        window.days()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_reversed_range_is_rejected() {
        let err = DateRange::new(date(2026, 1, 14), date(2026, 1, 1)).unwrap_err();
        assert_eq!(
            err,
            ParseError::InvalidDateRange {
                from: date(2026, 1, 14),
                to: date(2026, 1, 1)
            }
        );
    }

    #[test]
    fn test_window_end_is_inclusive() {
        let range = DateRange::from_window(date(2026, 1, 1), ForecastWindow::Fortnight).unwrap();
        assert_eq!(range.to(), date(2026, 1, 14));
        assert_eq!(range.num_days(), 14);
    }

    #[test]
    fn test_window_past_the_last_day_is_rejected() {
        let err = ForecastWindow::Week.end_for(NaiveDate::MAX).unwrap_err();
        assert_eq!(
            err,
            ParseError::WindowOutOfCalendar {
                start: NaiveDate::MAX,
                days: 7
            }
        );
        assert_eq!(ForecastWindow::Week.end_for(date(2026, 1, 1)).unwrap(), date(2026, 1, 7));
    }

    #[test]
    fn test_window_from_days() {
        assert_eq!(ForecastWindow::try_from(28).unwrap(), ForecastWindow::FourWeeks);
        assert_eq!(ForecastWindow::try_from(10).unwrap_err(), ParseError::InvalidWindow(10));
    }
}
