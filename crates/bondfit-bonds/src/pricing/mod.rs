//! Bond valuation against a discount curve.
//!
//! ```text
//! Dirty Value = Σ Coupon(i) × DF(Pay(i))   for coupons with Ex(i) > as_of
//!             + Principal × DF(Maturity)
//! ```
//!
//! Coupons on or past their ex-date are dropped outright; no accrual is
//! applied to them.

use bondfit_core::Date;
use bondfit_curves::{CurveResult, DiscountCurve};

use crate::error::{BondError, BondResult};
use crate::instruments::Bond;

/// Dirty value of `bond` on `curve` as of `as_of`.
///
/// # Errors
///
/// Curve evaluation errors (for example a date outside a fitted curve's
/// domain under a failing extrapolation policy) come back as
/// `BondError::Curve`. A non-finite total is reported as
/// `BondError::PricingFailed`.
///
/// # Example
///
/// ```rust
/// use bondfit_bonds::prelude::*;
///
/// let bond = Bond::semi_annual(
///     Date::from_ymd(2020, 11, 21).unwrap(),
///     Date::from_ymd(2021, 5, 21).unwrap(),
///     Date::from_ymd(2030, 5, 21).unwrap(),
///     0.01,
///     100.0,
/// )
/// .unwrap();
///
/// let as_of = Date::from_ymd(2020, 7, 20).unwrap();
/// let value = dirty_value(&bond, &FlatDiscountCurve::new(0.99), as_of).unwrap();
/// assert!((value - 0.99 * 110.0).abs() < 1e-9);
/// ```
pub fn dirty_value(bond: &Bond, curve: &dyn DiscountCurve, as_of: Date) -> BondResult<f64> {
    let value = discounted_value(bond, curve, as_of)?;

    if value.is_finite() {
        Ok(value)
    } else {
        Err(BondError::pricing_failed(format!(
            "dirty value of bond maturing {} is {value}",
            bond.maturity()
        )))
    }
}

/// Sum of discounted live cash flows, reported in the curve crate's error
/// type so calibration can propagate it unchanged.
pub(crate) fn discounted_value(
    bond: &Bond,
    curve: &dyn DiscountCurve,
    as_of: Date,
) -> CurveResult<f64> {
    let coupons = bond
        .live_coupons(as_of)
        .try_fold(0.0, |acc, coupon| -> CurveResult<f64> {
            Ok(acc + coupon.amount() * curve.discount_factor(coupon.payment_date())?)
        })?;

    let principal = bond.principal() * curve.discount_factor(bond.maturity())?;

    Ok(coupons + principal)
}
