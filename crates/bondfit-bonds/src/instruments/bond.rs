//! Fixed coupon bond.

use serde::{Deserialize, Serialize};

use bondfit_core::Date;
use bondfit_curves::DiscountCurve;

use crate::cashflows::{generate_annual_coupons, Coupon};
use crate::error::{BondError, BondResult};
use crate::pricing;

/// A fixed coupon bond: a list of coupons plus a principal repaid at
/// maturity.
///
/// Coupons are kept in the order they were supplied. Bonds built by
/// [`Bond::semi_annual`] hold two interleaved annual series, so the list is
/// not necessarily chronological.
///
/// The market dirty price is the only mutable state. It starts at zero and is
/// set once a price has been observed, before the bond is used for curve
/// fitting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawBond")]
pub struct Bond {
    /// Amount repaid at maturity.
    principal: f64,

    /// Coupon payments.
    coupons: Vec<Coupon>,

    /// Date the principal is repaid.
    maturity: Date,

    /// Observed dirty price, zero until set.
    market_dirty_price: f64,
}

/// Wire form of [`Bond`]. The price may be omitted.
#[derive(Deserialize)]
struct RawBond {
    principal: f64,
    coupons: Vec<Coupon>,
    maturity: Date,
    #[serde(default)]
    market_dirty_price: f64,
}

impl TryFrom<RawBond> for Bond {
    type Error = BondError;

    fn try_from(raw: RawBond) -> BondResult<Self> {
        Ok(Bond::new(raw.principal, raw.coupons, raw.maturity)?
            .with_market_dirty_price(raw.market_dirty_price))
    }
}

impl Bond {
    /// Creates a bond from an explicit coupon list.
    ///
    /// # Errors
    ///
    /// Returns `BondError::InvalidSpec` if `principal` is not finite and
    /// positive.
    pub fn new(principal: f64, coupons: Vec<Coupon>, maturity: Date) -> BondResult<Self> {
        if !principal.is_finite() || principal <= 0.0 {
            return Err(BondError::invalid_spec(format!(
                "principal must be finite and positive, got {principal}"
            )));
        }

        Ok(Self {
            principal,
            coupons,
            maturity,
            market_dirty_price: 0.0,
        })
    }

    /// Creates a semi-annual bond as two annual coupon series.
    ///
    /// One series is anchored at `first_coupon_date` and the other at
    /// `second_coupon_date`. Both run to `maturity` and pay half of
    /// `annual_rate` on `principal`. The first series is stored ahead of the
    /// second.
    ///
    /// # Errors
    ///
    /// Returns `BondError::InvalidSpec` for a non-finite rate or a principal
    /// that is not finite and positive.
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
    /// assert_eq!(bond.coupons().len(), 20);
    /// assert!(bond.coupons().iter().all(|c| c.amount() == 0.5));
    /// ```
    pub fn semi_annual(
        first_coupon_date: Date,
        second_coupon_date: Date,
        maturity: Date,
        annual_rate: f64,
        principal: f64,
    ) -> BondResult<Self> {
        let rate_per_period = annual_rate / 2.0;

        let mut coupons =
            generate_annual_coupons(first_coupon_date, maturity, rate_per_period, principal)?;
        coupons.extend(generate_annual_coupons(
            second_coupon_date,
            maturity,
            rate_per_period,
            principal,
        )?);

        Self::new(principal, coupons, maturity)
    }

    /// Sets the market dirty price, builder style.
    #[must_use]
    pub fn with_market_dirty_price(mut self, price: f64) -> Self {
        self.market_dirty_price = price;
        self
    }

    /// Amount repaid at maturity.
    pub fn principal(&self) -> f64 {
        self.principal
    }

    /// All coupons, in insertion order.
    pub fn coupons(&self) -> &[Coupon] {
        &self.coupons
    }

    /// Date the principal is repaid.
    pub fn maturity(&self) -> Date {
        self.maturity
    }

    /// Observed dirty price, zero if none has been set.
    pub fn market_dirty_price(&self) -> f64 {
        self.market_dirty_price
    }

    /// Records an observed dirty price.
    pub fn set_market_dirty_price(&mut self, price: f64) {
        self.market_dirty_price = price;
    }

    /// Coupons a buyer on `as_of` is still entitled to, in insertion order.
    pub fn live_coupons(&self, as_of: Date) -> impl Iterator<Item = &Coupon> + '_ {
        self.coupons.iter().filter(move |c| c.is_live(as_of))
    }

    /// Present value on `curve` of the live coupons and the principal.
    ///
    /// See [`pricing::dirty_value`].
    pub fn dirty_value(&self, curve: &dyn DiscountCurve, as_of: Date) -> BondResult<f64> {
        pricing::dirty_value(self, curve, as_of)
    }
}

/// Builds a semi-annual bond. Equivalent to [`Bond::semi_annual`].
pub fn construct_semi_annual_bond(
    first_coupon_date: Date,
    second_coupon_date: Date,
    maturity: Date,
    annual_rate: f64,
    principal: f64,
) -> BondResult<Bond> {
    Bond::semi_annual(
        first_coupon_date,
        second_coupon_date,
        maturity,
        annual_rate,
        principal,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use bondfit_curves::curves::FlatDiscountCurve;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    fn ten_year() -> Bond {
        construct_semi_annual_bond(
            date(2020, 11, 21),
            date(2021, 5, 21),
            date(2030, 5, 21),
            0.01,
            100.0,
        )
        .unwrap()
    }

    #[test]
    fn test_semi_annual_construction() {
        let bond = ten_year();

        assert_eq!(bond.coupons().len(), 20);
        assert!(bond.coupons().iter().all(|c| c.amount() == 0.5));
        assert_eq!(bond.maturity(), date(2030, 5, 21));
        assert_eq!(bond.principal(), 100.0);
        assert_eq!(bond.coupons().last().unwrap().payment_date(), date(2030, 5, 21));
    }

    #[test]
    fn test_semi_annual_series_are_concatenated() {
        let bond = ten_year();
        let coupons = bond.coupons();

        // First series: 2020-11-21 .. 2029-11-21, then 2021-05-21 .. 2030-05-21
        assert_eq!(coupons[0].payment_date(), date(2020, 11, 23));
        assert_eq!(coupons[9].payment_date(), date(2029, 11, 21));
        assert_eq!(coupons[10].payment_date(), date(2021, 5, 21));
        assert!(coupons[9].payment_date() > coupons[10].payment_date());
    }

    #[test]
    fn test_second_series_past_maturity_is_empty() {
        let bond = construct_semi_annual_bond(
            date(2020, 11, 21),
            date(2021, 5, 21),
            date(2021, 1, 1),
            0.02,
            100.0,
        )
        .unwrap();

        assert_eq!(bond.coupons().len(), 1);
        assert_eq!(bond.coupons()[0].amount(), 1.0);
    }

    #[test]
    fn test_invalid_principal() {
        let maturity = date(2030, 5, 21);
        assert!(Bond::new(0.0, Vec::new(), maturity).is_err());
        assert!(Bond::new(-100.0, Vec::new(), maturity).is_err());
        assert!(Bond::new(f64::NAN, Vec::new(), maturity).is_err());
    }

    #[test]
    fn test_market_dirty_price_accessors() {
        let mut bond = ten_year();
        assert_eq!(bond.market_dirty_price(), 0.0);

        bond.set_market_dirty_price(101.25);
        assert_eq!(bond.market_dirty_price(), 101.25);

        let bond = bond.with_market_dirty_price(99.5);
        assert_eq!(bond.market_dirty_price(), 99.5);
    }

    #[test]
    fn test_live_coupons() {
        let bond = ten_year();

        assert_eq!(bond.live_coupons(date(2020, 7, 20)).count(), 20);
        // Ex-date of the first coupon is 2020-11-12
        assert_eq!(bond.live_coupons(date(2020, 11, 12)).count(), 19);
        assert_eq!(bond.live_coupons(date(2030, 6, 1)).count(), 0);
    }

    #[test]
    fn test_dirty_value_method() {
        let bond = ten_year();
        let value = bond
            .dirty_value(&FlatDiscountCurve::new(1.0), date(2020, 7, 20))
            .unwrap();
        assert_relative_eq!(value, 110.0, epsilon = 1e-12);
    }

    #[test]
    fn test_serde_round_trip() {
        let bond = ten_year().with_market_dirty_price(102.5);
        let json = serde_json::to_string(&bond).unwrap();
        let parsed: Bond = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, bond);
    }

    #[test]
    fn test_deserialize_without_price() {
        let json = r#"{
            "principal": 100.0,
            "coupons": [
                {"amount": 1.0, "ex_date": "2020-11-12", "payment_date": "2020-11-23"}
            ],
            "maturity": "2020-11-23"
        }"#;

        let bond: Bond = serde_json::from_str(json).unwrap();
        assert_eq!(bond.market_dirty_price(), 0.0);
        assert_eq!(bond.coupons().len(), 1);
    }

    #[test]
    fn test_deserialize_rejects_invalid_principal() {
        let json = r#"{
            "principal": -100.0,
            "coupons": [],
            "maturity": "2020-11-23"
        }"#;

        let err = serde_json::from_str::<Bond>(json).unwrap_err();
        assert!(err.to_string().contains("principal must be finite and positive"));
    }

    #[test]
    fn test_deserialize_rejects_invalid_coupon() {
        let json = r#"{
            "principal": 100.0,
            "coupons": [
                {"amount": 1.0, "ex_date": "2020-11-30", "payment_date": "2020-11-23"}
            ],
            "maturity": "2020-11-23"
        }"#;

        assert!(serde_json::from_str::<Bond>(json).is_err());
    }
}
