//! Instruments that a discount curve can be calibrated to.

use bondfit_core::Date;

use crate::error::CurveResult;
use crate::traits::DiscountCurve;

/// An instrument with an observed market price that can be revalued on any
/// discount curve.
///
/// The calibrator minimises the squared [`pricing_error`] over all
/// instruments.
///
/// [`pricing_error`]: CalibrationInstrument::pricing_error
pub trait CalibrationInstrument: Send + Sync {
    /// Date of the final payment. Anchors the curve's knot range.
    fn maturity(&self) -> Date;

    /// Observed market price.
    fn market_price(&self) -> f64;

    /// Value of the instrument on `curve` as of `as_of`.
    fn model_value(&self, curve: &dyn DiscountCurve, as_of: Date) -> CurveResult<f64>;

    /// Model value less market price. This is the residual the calibration
    /// solver drives towards zero.
    fn pricing_error(&self, curve: &dyn DiscountCurve, as_of: Date) -> CurveResult<f64> {
        Ok(self.model_value(curve, as_of)? - self.market_price())
    }
}

impl<T: CalibrationInstrument + ?Sized> CalibrationInstrument for &T {
    fn maturity(&self) -> Date {
        (**self).maturity()
    }

    fn market_price(&self) -> f64 {
        (**self).market_price()
    }

    fn model_value(&self, curve: &dyn DiscountCurve, as_of: Date) -> CurveResult<f64> {
        (**self).model_value(curve, as_of)
    }
}

impl<T: CalibrationInstrument + ?Sized> CalibrationInstrument for Box<T> {
    fn maturity(&self) -> Date {
        (**self).maturity()
    }

    fn market_price(&self) -> f64 {
        (**self).market_price()
    }

    fn model_value(&self, curve: &dyn DiscountCurve, as_of: Date) -> CurveResult<f64> {
        (**self).model_value(curve, as_of)
    }
}
