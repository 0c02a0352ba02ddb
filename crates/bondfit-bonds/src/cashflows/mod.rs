//! Coupon cash flows and schedule generation.

mod schedule;

pub use schedule::{generate_annual_coupons, EX_DIVIDEND_DAYS};

use serde::{Deserialize, Serialize};

use bondfit_core::Date;

use crate::error::{BondError, BondResult};

/// A single coupon payment.
///
/// The holder on `ex_date` is the last one without entitlement: a bond
/// valued on or after the ex-date no longer includes this coupon.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCoupon")]
pub struct Coupon {
    amount: f64,
    ex_date: Date,
    payment_date: Date,
}

impl Coupon {
    /// Creates a coupon.
    ///
    /// # Errors
    ///
    /// Returns `BondError::InvalidSpec` if `amount` is negative or not
    /// finite, or if `ex_date` falls after `payment_date`.
    pub fn new(amount: f64, ex_date: Date, payment_date: Date) -> BondResult<Self> {
        if !amount.is_finite() || amount < 0.0 {
            return Err(BondError::invalid_spec(format!(
                "coupon amount must be finite and non-negative, got {amount}"
            )));
        }
        if ex_date > payment_date {
            return Err(BondError::invalid_spec(format!(
                "ex-date {ex_date} is after payment date {payment_date}"
            )));
        }

        Ok(Self {
            amount,
            ex_date,
            payment_date,
        })
    }

    /// Cash paid on the payment date.
    #[must_use]
    pub fn amount(&self) -> f64 {
        self.amount
    }

    /// Last date a buyer does not receive this coupon.
    #[must_use]
    pub fn ex_date(&self) -> Date {
        self.ex_date
    }

    /// Date the coupon is paid.
    #[must_use]
    pub fn payment_date(&self) -> Date {
        self.payment_date
    }

    /// True while a bond traded on `as_of` still carries this coupon.
    #[must_use]
    pub fn is_live(&self, as_of: Date) -> bool {
        self.ex_date > as_of
    }
}

/// Wire form of [`Coupon`], checked by [`Coupon::new`] on the way in.
#[derive(Deserialize)]
struct RawCoupon {
    amount: f64,
    ex_date: Date,
    payment_date: Date,
}

impl TryFrom<RawCoupon> for Coupon {
    type Error = BondError;

    fn try_from(raw: RawCoupon) -> BondResult<Self> {
        Coupon::new(raw.amount, raw.ex_date, raw.payment_date)
    }
}
