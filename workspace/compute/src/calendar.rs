use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone};
use tracing::{debug, instrument};

use crate::error::{ComputeError, Result};

/// Anything that can be reduced to a calendar day by dropping its time of day.
pub trait CalendarDay {
    fn calendar_day(&self) -> NaiveDate;
}

impl CalendarDay for NaiveDate {
    fn calendar_day(&self) -> NaiveDate {
        *self
    }
}

impl CalendarDay for NaiveDateTime {
    fn calendar_day(&self) -> NaiveDate {
        self.date()
    }
}

impl<Tz: TimeZone> CalendarDay for DateTime<Tz> {
    fn calendar_day(&self) -> NaiveDate {
        self.date_naive()
    }
}

/// Returns every calendar day from `from` to `to`, both included, in order.
///
/// Fails with [`ComputeError::InvalidRange`] when `from` falls after `to`.
#[instrument(skip_all)]
pub fn enumerate<A: CalendarDay, B: CalendarDay>(from: &A, to: &B) -> Result<Vec<NaiveDate>> {
    let (from, to) = (from.calendar_day(), to.calendar_day());
    if from > to {
        return Err(ComputeError::InvalidRange { from, to });
    }

    let days: Vec<NaiveDate> = from.iter_days().take_while(|day| *day <= to).collect();
    debug!("Enumerated {} days from {} to {}", days.len(), from, to);
    Ok(days)
}
