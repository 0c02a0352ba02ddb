//! Day count conventions.
//!
//! Day count conventions map a pair of dates onto an elapsed time measured in
//! years. Curve fitting measures every date as a year fraction from the
//! valuation date, so the convention chosen here fixes the time axis of the
//! fitted curve.
//!
//! # Supported Conventions
//!
//! - [`Act365Fixed`]: Actual/365 Fixed
//!
//! # Usage
//!
//! ```rust
//! use bondfit_core::daycounts::{Act365Fixed, DayCount};
//! use bondfit_core::types::Date;
//!
//! let dc = Act365Fixed;
//! let start = Date::from_ymd(2020, 7, 23).unwrap();
//! let end = Date::from_ymd(2023, 1, 1).unwrap();
//!
//! let days = dc.day_count(start, end);
//! let year_fraction = dc.year_fraction(start, end);
//! assert_eq!(year_fraction, days as f64 / 365.0);
//! ```

mod act365;

pub use act365::Act365Fixed;

use crate::types::Date;

/// Trait for day count conventions.
///
/// Implementations must be thread-safe (`Send + Sync`) so they can be shared
/// by concurrent calibrations.
pub trait DayCount: Send + Sync {
    /// Returns the name of the day count convention.
    fn name(&self) -> &'static str;

    /// Calculates the year fraction between two dates.
    ///
    /// Negative if `end < start`.
    fn year_fraction(&self, start: Date, end: Date) -> f64;

    /// Calculates the day count between two dates.
    fn day_count(&self, start: Date, end: Date) -> i64;
}
