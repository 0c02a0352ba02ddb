//! Business day calendars.
//!
//! Only the weekday/weekend distinction is modelled. Coupon payment and
//! ex-dates are rolled forward off weekends with [`next_business_day`].

use crate::types::Date;

/// Trait for business day calendars.
///
/// Calendars decide which days are business days. Rolling is iterative and
/// steps one calendar day at a time.
pub trait Calendar: Send + Sync {
    /// Returns the name of the calendar.
    fn name(&self) -> &'static str;

    /// Returns true if the date is a business day.
    fn is_business_day(&self, date: Date) -> bool;

    /// Returns true if the date is not a business day.
    fn is_holiday(&self, date: Date) -> bool {
        !self.is_business_day(date)
    }

    /// Returns the first business day on or after the given date.
    fn next_business_day(&self, date: Date) -> Date {
        let mut result = date;
        while !self.is_business_day(result) {
            result = result.add_days(1);
        }
        result
    }
}

/// A weekend-only calendar: every Monday to Friday is a business day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WeekendCalendar;

impl Calendar for WeekendCalendar {
    fn name(&self) -> &'static str {
        "Weekend Only"
    }

    fn is_business_day(&self, date: Date) -> bool {
        date.is_weekday()
    }
}

/// Rolls a Saturday or Sunday forward to the following Monday.
///
/// Weekdays are returned unchanged.
///
/// ```rust
/// use bondfit_core::calendars::next_business_day;
/// use bondfit_core::types::Date;
///
/// let sunday = Date::from_ymd(2021, 11, 21).unwrap();
/// assert_eq!(next_business_day(sunday), Date::from_ymd(2021, 11, 22).unwrap());
/// ```
#[must_use]
pub fn next_business_day(date: Date) -> Date {
    WeekendCalendar.next_business_day(date)
}
