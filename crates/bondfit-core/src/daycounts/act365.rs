//! Actual/365 Fixed day count convention.

use chrono::Days;

use super::DayCount;
use crate::error::{CoreError, CoreResult};
use crate::types::Date;

/// Actual/365 Fixed day count convention.
///
/// The day count is the actual number of days between dates.
/// The year basis is always 365 days (ignoring leap years).
///
/// # Formula
///
/// $$\text{Year Fraction} = \frac{\text{Actual Days}}{365}$$
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Act365Fixed;

impl Act365Fixed {
    const BASIS: f64 = 365.0;

    /// Inverse of [`DayCount::year_fraction`]: the date `fraction` years
    /// after `start`, rounded to the nearest whole day.
    ///
    /// Ties round to the even day count, so half a day adds nothing and two
    /// and a half days add two.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::DayCountError` if `fraction` is not finite or the
    /// resulting date is out of range.
    pub fn date_from_year_fraction(&self, start: Date, fraction: f64) -> CoreResult<Date> {
        if !fraction.is_finite() {
            return Err(CoreError::day_count(format!(
                "year fraction must be finite, got {fraction}"
            )));
        }

        let days = (fraction * Self::BASIS).round_ties_even();
        let naive = start.as_naive_date();
        let shifted = if days >= 0.0 {
            naive.checked_add_days(Days::new(days as u64))
        } else {
            naive.checked_sub_days(Days::new((-days) as u64))
        };

        shifted.map(Date::from).ok_or_else(|| {
            CoreError::day_count(format!("{fraction} years from {start} is out of range"))
        })
    }
}

impl DayCount for Act365Fixed {
    fn name(&self) -> &'static str {
        "ACT/365F"
    }

    fn year_fraction(&self, start: Date, end: Date) -> f64 {
        self.day_count(start, end) as f64 / Self::BASIS
    }

    fn day_count(&self, start: Date, end: Date) -> i64 {
        start.days_between(&end)
    }
}
