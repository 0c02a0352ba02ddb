//! Annual coupon schedules.

use bondfit_core::calendars::next_business_day;
use bondfit_core::Date;

use super::Coupon;
use crate::error::{BondError, BondResult};

/// Calendar days between a coupon's ex-date and its unadjusted payment date.
pub const EX_DIVIDEND_DAYS: i64 = 9;

/// Generates one coupon per year from `first_pay_date` up to and including
/// `last_pay_date`.
///
/// Each unadjusted coupon date keeps the month and day of `first_pay_date`
/// (29 February falls back to 28 February in non-leap years). The payment
/// date is the coupon date rolled forward to a weekday, and the ex-date is
/// [`EX_DIVIDEND_DAYS`] earlier, rolled the same way. Every coupon pays
/// `principal * rate_per_period`.
///
/// Returns an empty schedule when `first_pay_date > last_pay_date`.
///
/// # Errors
///
/// Returns `BondError::InvalidSpec` if `rate_per_period` or `principal` is
/// not finite, or if the resulting coupon amount is negative.
///
/// # Example
///
/// ```rust
/// use bondfit_bonds::cashflows::generate_annual_coupons;
/// use bondfit_core::Date;
///
/// let first = Date::from_ymd(2020, 11, 21).unwrap();
/// let last = Date::from_ymd(2030, 11, 21).unwrap();
///
/// let coupons = generate_annual_coupons(first, last, 0.01, 100.0).unwrap();
/// assert_eq!(coupons.len(), 11);
/// // 2020-11-21 is a Saturday
/// assert_eq!(coupons[0].payment_date(), Date::from_ymd(2020, 11, 23).unwrap());
/// ```
pub fn generate_annual_coupons(
    first_pay_date: Date,
    last_pay_date: Date,
    rate_per_period: f64,
    principal: f64,
) -> BondResult<Vec<Coupon>> {
    if !rate_per_period.is_finite() || !principal.is_finite() {
        return Err(BondError::invalid_spec(format!(
            "coupon rate {rate_per_period} and principal {principal} must be finite"
        )));
    }

    let amount = principal * rate_per_period;
    let mut coupons = Vec::new();

    for years in 0.. {
        let coupon_date = first_pay_date.add_years(years)?;
        if coupon_date > last_pay_date {
            break;
        }

        let payment_date = next_business_day(coupon_date);
        let ex_date = next_business_day(coupon_date - EX_DIVIDEND_DAYS);
        coupons.push(Coupon::new(amount, ex_date, payment_date)?);
    }

    Ok(coupons)
}
