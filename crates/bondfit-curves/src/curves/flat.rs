//! Constant discount curve.

use serde::{Deserialize, Serialize};

use bondfit_core::Date;

use crate::error::CurveResult;
use crate::traits::DiscountCurve;

/// A curve returning the same discount factor for every date.
///
/// With a factor of `1.0` it values cashflows at their face amounts, which
/// makes it the natural reference curve for checking valuation logic.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlatDiscountCurve {
    discount: f64,
}

impl FlatDiscountCurve {
    /// Creates a flat curve.
    #[must_use]
    pub fn new(discount: f64) -> Self {
        Self { discount }
    }

    /// Returns the constant discount factor.
    pub fn discount(&self) -> f64 {
        self.discount
    }
}

impl Default for FlatDiscountCurve {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl DiscountCurve for FlatDiscountCurve {
    fn discount_factor(&self, _date: Date) -> CurveResult<f64> {
        Ok(self.discount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_curve() {
        let curve = FlatDiscountCurve::new(0.99);
        let early = Date::from_ymd(2020, 1, 1).unwrap();
        let late = Date::from_ymd(2050, 1, 1).unwrap();

        assert_eq!(curve.discount_factor(early).unwrap(), 0.99);
        assert_eq!(curve.discount_factor(late).unwrap(), 0.99);
        assert_eq!(FlatDiscountCurve::default().discount(), 1.0);
    }
}
