//! Discount factor and yield conversions.
//!
//! Yields are annually compounded on an Actual/365 Fixed time axis:
//!
//! - `P(t) = (1 + y)^(-t)`
//! - `y = P(t)^(-1/t) - 1`
//!
//! where `t` is the year fraction from `today` to the payment date.

use bondfit_core::daycounts::{Act365Fixed, DayCount};
use bondfit_core::Date;

use crate::error::{CurveError, CurveResult};

/// Converts a discount factor for `future_date` into the annual yield it
/// implies as seen from `today`.
///
/// # Errors
///
/// Returns `CurveError::YieldDomain` if `future_date == today` (zero elapsed
/// time), or if `discount` is not a finite positive number.
///
/// # Example
///
/// ```rust
/// use bondfit_curves::discount_to_yield;
/// use bondfit_core::Date;
///
/// let today = Date::from_ymd(2020, 7, 23).unwrap();
/// let in_two_years = Date::from_ymd(2022, 7, 23).unwrap();
///
/// let y = discount_to_yield(0.96, in_two_years, today).unwrap();
/// assert!((y - (0.96_f64.powf(-0.5) - 1.0)).abs() < 1e-15);
/// ```
pub fn discount_to_yield(discount: f64, future_date: Date, today: Date) -> CurveResult<f64> {
    let t = Act365Fixed.year_fraction(today, future_date);
    if t == 0.0 {
        return Err(CurveError::yield_domain(format!(
            "no time elapses between {today} and {future_date}"
        )));
    }
    if !discount.is_finite() || discount <= 0.0 {
        return Err(CurveError::yield_domain(format!(
            "discount factor must be positive and finite, got {discount}"
        )));
    }

    Ok(discount.powf(-1.0 / t) - 1.0)
}

/// Converts an annual yield into the discount factor for `future_date` as
/// seen from `today`.
///
/// # Errors
///
/// Returns `CurveError::YieldDomain` if `yield_rate` is not finite or is at
/// or below -100%.
pub fn yield_to_discount(yield_rate: f64, future_date: Date, today: Date) -> CurveResult<f64> {
    if !yield_rate.is_finite() || yield_rate <= -1.0 {
        return Err(CurveError::yield_domain(format!(
            "yield must be finite and above -1, got {yield_rate}"
        )));
    }

    let t = Act365Fixed.year_fraction(today, future_date);
    Ok((1.0 + yield_rate).powf(-t))
}
