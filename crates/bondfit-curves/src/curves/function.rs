//! Closure-backed discount curve.

use std::fmt;

use bondfit_core::Date;

use crate::error::{CurveError, CurveResult};
use crate::traits::DiscountCurve;

/// Adapts a plain `Fn(Date) -> f64` into a [`DiscountCurve`].
///
/// A non-finite value from the closure is reported as
/// `CurveError::InvalidValue` rather than passed on.
///
/// # Example
///
/// ```rust
/// use bondfit_curves::prelude::*;
///
/// let cutoff = Date::from_ymd(2025, 1, 1).unwrap();
/// let step = FnDiscountCurve::new(move |d: Date| if d < cutoff { 0.99 } else { 1.0 });
///
/// assert_eq!(step.discount_factor(Date::from_ymd(2024, 6, 1).unwrap()).unwrap(), 0.99);
/// assert_eq!(step.discount_factor(cutoff).unwrap(), 1.0);
/// ```
#[derive(Clone)]
pub struct FnDiscountCurve<F> {
    f: F,
}

impl<F> FnDiscountCurve<F>
where
    F: Fn(Date) -> f64 + Send + Sync,
{
    /// Wraps a closure as a discount curve.
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> fmt::Debug for FnDiscountCurve<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnDiscountCurve").finish_non_exhaustive()
    }
}

impl<F> DiscountCurve for FnDiscountCurve<F>
where
    F: Fn(Date) -> f64 + Send + Sync,
{
    fn discount_factor(&self, date: Date) -> CurveResult<f64> {
        let df = (self.f)(date);
        if df.is_finite() {
            Ok(df)
        } else {
            Err(CurveError::invalid_value(format!(
                "discount factor on {date} is {df}"
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closure_curve() {
        let base = Date::from_ymd(2020, 7, 23).unwrap();
        let curve = FnDiscountCurve::new(move |d: Date| 1.0 - 0.0001 * base.days_between(&d) as f64);

        assert_eq!(curve.discount_factor(base).unwrap(), 1.0);
        assert!(curve.discount_factor(base + 100).unwrap() < 1.0);
    }

    #[test]
    fn test_non_finite_rejected() {
        let curve = FnDiscountCurve::new(|_: Date| f64::NAN);
        let date = Date::from_ymd(2021, 1, 1).unwrap();

        assert!(matches!(
            curve.discount_factor(date),
            Err(CurveError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_debug_format() {
        let curve = FnDiscountCurve::new(|_: Date| 1.0);
        assert!(format!("{curve:?}").starts_with("FnDiscountCurve"));
    }
}
