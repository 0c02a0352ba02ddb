//! Bonds as curve calibration instruments.
//!
//! [`Bond`] implements [`CalibrationInstrument`], pricing itself with
//! [`dirty_value`](crate::pricing::dirty_value) against the trial curve and
//! comparing that with its market dirty price. Any bond slice can therefore
//! be handed to [`DiscountCurveFitter`] directly. [`fit_discount_curve`] and
//! [`fit_bonds`] are the bond-flavoured entry points.
//!
//! # Example
//!
//! ```rust
//! use bondfit_bonds::prelude::*;
//!
//! let today = Date::from_ymd(2020, 7, 23).unwrap();
//! let d = |y, m, day| Date::from_ymd(y, m, day).unwrap();
//!
//! let bonds = vec![
//!     Bond::semi_annual(d(2020, 11, 21), d(2021, 5, 21), d(2022, 5, 21), 0.02, 100.0)
//!         .unwrap()
//!         .with_market_dirty_price(103.2),
//!     Bond::semi_annual(d(2020, 12, 15), d(2021, 6, 15), d(2023, 6, 15), 0.025, 100.0)
//!         .unwrap()
//!         .with_market_dirty_price(106.0),
//!     Bond::semi_annual(d(2021, 1, 10), d(2021, 7, 10), d(2025, 1, 10), 0.03, 100.0)
//!         .unwrap()
//!         .with_market_dirty_price(113.5),
//! ];
//!
//! let options = DiscountFitOptions::default().with_knot_count(3);
//! let curve = fit_discount_curve(&bonds, &options, today).unwrap();
//!
//! for bond in &bonds {
//!     let error = bond.dirty_value(&curve, today).unwrap() - bond.market_dirty_price();
//!     assert!(error.abs() < 1e-6);
//! }
//! ```

use log::warn;

use bondfit_core::Date;
use bondfit_curves::calibration::{
    CalibrationInstrument, CalibrationResult, DiscountCurveFitter, DiscountFitOptions,
};
use bondfit_curves::curves::SplineDiscountCurve;
use bondfit_curves::{CurveResult, DiscountCurve};

use crate::error::BondResult;
use crate::instruments::Bond;
use crate::pricing::discounted_value;

impl CalibrationInstrument for Bond {
    fn maturity(&self) -> Date {
        Bond::maturity(self)
    }

    fn market_price(&self) -> f64 {
        self.market_dirty_price()
    }

    fn model_value(&self, curve: &dyn DiscountCurve, as_of: Date) -> CurveResult<f64> {
        discounted_value(self, curve, as_of)
    }
}

/// Fits a discount curve to the bonds' market dirty prices as of `today`.
///
/// Returns only the curve. Use [`fit_bonds`] for the residuals and solver
/// statistics.
///
/// # Errors
///
/// Any calibration error, wrapped in `BondError::Curve`.
pub fn fit_discount_curve(
    bonds: &[Bond],
    options: &DiscountFitOptions,
    today: Date,
) -> BondResult<SplineDiscountCurve> {
    Ok(fit_bonds(bonds, options, today)?.curve)
}

/// Fits a discount curve to the bonds' market dirty prices as of `today`,
/// returning the full calibration result.
///
/// Residuals are ordered by bond maturity.
///
/// # Errors
///
/// Any calibration error, wrapped in `BondError::Curve`.
pub fn fit_bonds(
    bonds: &[Bond],
    options: &DiscountFitOptions,
    today: Date,
) -> BondResult<CalibrationResult> {
    let unpriced = bonds
        .iter()
        .filter(|b| b.market_dirty_price() == 0.0)
        .count();
    if unpriced > 0 {
        warn!("{unpriced} of {} bonds have no market dirty price set", bonds.len());
    }

    Ok(DiscountCurveFitter::new(*options).fit(today, bonds)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use bondfit_curves::curves::FlatDiscountCurve;
    use bondfit_curves::CurveError;

    use crate::error::BondError;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    fn today() -> Date {
        date(2020, 7, 23)
    }

    /// Four bonds priced off a known smooth curve.
    fn priced_bonds() -> Vec<Bond> {
        let curve = |d: Date| {
            let t = today().days_between(&d) as f64 / 365.0;
            (1.0 + 0.01 + 0.002 * t).powf(-t)
        };
        let truth = bondfit_curves::curves::FnDiscountCurve::new(curve);

        [
            (date(2020, 11, 21), date(2021, 5, 21), date(2022, 5, 21), 0.02),
            (date(2020, 9, 15), date(2021, 3, 15), date(2023, 9, 15), 0.025),
            (date(2021, 1, 10), date(2021, 7, 10), date(2025, 1, 10), 0.03),
            (date(2020, 10, 1), date(2021, 4, 1), date(2027, 4, 1), 0.035),
        ]
        .into_iter()
        .map(|(first, second, maturity, rate)| {
            let bond = Bond::semi_annual(first, second, maturity, rate, 100.0).unwrap();
            let price = bond.dirty_value(&truth, today()).unwrap();
            bond.with_market_dirty_price(price)
        })
        .collect()
    }

    #[test]
    fn test_model_value_matches_dirty_value() {
        let bond = priced_bonds().remove(0);
        let curve = FlatDiscountCurve::new(0.97);

        let model = CalibrationInstrument::model_value(&bond, &curve, today()).unwrap();
        let dirty = bond.dirty_value(&curve, today()).unwrap();
        assert_eq!(model, dirty);

        let error = bond.pricing_error(&curve, today()).unwrap();
        assert_relative_eq!(error, dirty - bond.market_dirty_price());
    }

    #[test]
    fn test_fit_recovers_prices() {
        let bonds = priced_bonds();
        let options = DiscountFitOptions::default().with_knot_count(4);

        let result = fit_bonds(&bonds, &options, today()).unwrap();
        assert_eq!(result.residuals.len(), 4);
        assert!(result.max_error < 1e-6, "{}", result.summary());

        let curve = fit_discount_curve(&bonds, &options, today()).unwrap();
        for bond in &bonds {
            let value = bond.dirty_value(&curve, today()).unwrap();
            assert_relative_eq!(value, bond.market_dirty_price(), epsilon = 1e-6);
        }
    }

    #[test]
    fn test_fitter_accepts_bond_slice() {
        let bonds = priced_bonds();
        let fitter = DiscountCurveFitter::new(DiscountFitOptions::default().with_knot_count(4));

        let direct = fitter.fit(today(), &bonds).unwrap();
        let wrapped = fit_bonds(&bonds, fitter.options(), today()).unwrap();
        assert_eq!(direct.curve.knot_values(), wrapped.curve.knot_values());
    }

    #[test]
    fn test_empty_bond_set() {
        let err = fit_discount_curve(&[], &DiscountFitOptions::default(), today()).unwrap_err();
        assert_eq!(err, BondError::Curve(CurveError::EmptyInstrumentSet));
    }

    #[test]
    fn test_degenerate_options() {
        let options = DiscountFitOptions::default().with_knot_count(1);
        let err = fit_discount_curve(&priced_bonds(), &options, today()).unwrap_err();
        assert!(matches!(
            err,
            BondError::Curve(CurveError::InvalidFitOptions { .. })
        ));
    }
}
