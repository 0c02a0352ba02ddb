//! Core traits for discount curves.

use bondfit_core::Date;

use crate::conversion::discount_to_yield;
use crate::error::CurveResult;

/// A discount curve: the present value of one unit of currency received on
/// a date, relative to the curve's implicit valuation date.
///
/// Nothing about the trait guarantees positive or decaying values; a fitted
/// curve is only as well-formed as the prices it was calibrated to.
///
/// # Example
///
/// ```rust
/// use bondfit_curves::prelude::*;
///
/// fn present_value(curve: &dyn DiscountCurve, date: Date, amount: f64) -> CurveResult<f64> {
///     Ok(curve.discount_factor(date)? * amount)
/// }
///
/// let date = Date::from_ymd(2025, 1, 1).unwrap();
/// assert_eq!(present_value(&FlatDiscountCurve::new(0.9), date, 100.0).unwrap(), 90.0);
/// ```
pub trait DiscountCurve: Send + Sync {
    /// Returns the discount factor for a payment on `date`.
    ///
    /// # Errors
    ///
    /// Returns an error if the curve cannot be evaluated at `date`, for
    /// instance a fitted curve that refuses to extrapolate.
    fn discount_factor(&self, date: Date) -> CurveResult<f64>;

    /// Returns the annual yield implied by the discount factor on `date`,
    /// measured from `today`.
    fn yield_between(&self, today: Date, date: Date) -> CurveResult<f64> {
        discount_to_yield(self.discount_factor(date)?, date, today)
    }
}

impl<T: DiscountCurve + ?Sized> DiscountCurve for &T {
    fn discount_factor(&self, date: Date) -> CurveResult<f64> {
        (**self).discount_factor(date)
    }
}

impl<T: DiscountCurve + ?Sized> DiscountCurve for Box<T> {
    fn discount_factor(&self, date: Date) -> CurveResult<f64> {
        (**self).discount_factor(date)
    }
}

impl<T: DiscountCurve + ?Sized> DiscountCurve for std::sync::Arc<T> {
    fn discount_factor(&self, date: Date) -> CurveResult<f64> {
        (**self).discount_factor(date)
    }
}
