//! Cubic-spline discount curve.

use serde::{Deserialize, Serialize};

use bondfit_core::daycounts::{Act365Fixed, DayCount};
use bondfit_core::Date;
use bondfit_math::interpolation::{CubicSpline, Interpolator};

use crate::error::{CurveError, CurveResult};
use crate::traits::DiscountCurve;

/// What a [`SplineDiscountCurve`] does with dates outside its knot range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ExtrapolationPolicy {
    /// Keep evaluating the cubic of the first or last spline segment.
    ///
    /// Fine for dates a few weeks beyond the knots; the cubic can turn away
    /// sharply further out.
    #[default]
    Extrapolate,

    /// Return `CurveError::OutsideCurveDomain`.
    Fail,
}

/// A discount curve interpolated by a cubic spline in year-fraction space.
///
/// Knot times are Actual/365 Fixed year fractions from the reference date
/// and knot values are discount factors. A date is evaluated by converting
/// it to a year fraction and evaluating the spline there.
///
/// The spline end conditions are not-a-knot: two knots give a straight line
/// and three knots a parabola.
///
/// No positivity or monotonicity is imposed on the values.
#[derive(Debug, Clone)]
pub struct SplineDiscountCurve {
    reference_date: Date,
    spline: CubicSpline,
    extrapolation: ExtrapolationPolicy,
}

impl SplineDiscountCurve {
    /// Creates a not-a-knot spline curve.
    ///
    /// # Errors
    ///
    /// Returns an error if fewer than two knots are given, the lengths
    /// differ, or the knot times are not strictly increasing and finite.
    pub fn new(
        reference_date: Date,
        knot_times: Vec<f64>,
        knot_values: Vec<f64>,
    ) -> CurveResult<Self> {
        if knot_times.len() < 2 {
            return Err(CurveError::insufficient_points(2, knot_times.len()));
        }

        let spline = CubicSpline::new(knot_times, knot_values)?.with_extrapolation();

        Ok(Self {
            reference_date,
            spline,
            extrapolation: ExtrapolationPolicy::default(),
        })
    }

    /// Sets how dates outside the knot range are handled.
    #[must_use]
    pub fn with_extrapolation_policy(mut self, policy: ExtrapolationPolicy) -> Self {
        self.extrapolation = policy;
        self
    }

    /// Returns the date all knot times are measured from.
    pub fn reference_date(&self) -> Date {
        self.reference_date
    }

    /// Returns the knot times in years.
    pub fn knot_times(&self) -> &[f64] {
        self.spline.xs()
    }

    /// Returns the discount factor at each knot.
    pub fn knot_values(&self) -> &[f64] {
        self.spline.ys()
    }

    /// Returns the extrapolation policy.
    pub fn extrapolation_policy(&self) -> ExtrapolationPolicy {
        self.extrapolation
    }

    /// Returns the first and last knot time.
    pub fn domain(&self) -> (f64, f64) {
        (self.spline.min_x(), self.spline.max_x())
    }

    /// Returns true if `date` falls within the knot range.
    pub fn contains(&self, date: Date) -> bool {
        self.spline.in_range(self.time_from_reference(date))
    }

    /// Year fraction from the reference date to `date`.
    pub fn time_from_reference(&self, date: Date) -> f64 {
        Act365Fixed.year_fraction(self.reference_date, date)
    }

    /// Evaluates the curve at a year fraction from the reference date.
    ///
    /// The extrapolation policy is not consulted.
    pub fn discount_factor_at(&self, t: f64) -> CurveResult<f64> {
        Ok(self.spline.interpolate(t)?)
    }

    /// Returns the annual yield to `date` implied by the curve, measured from
    /// the reference date.
    pub fn yield_at(&self, date: Date) -> CurveResult<f64> {
        self.yield_between(self.reference_date, date)
    }

    fn checked_time(&self, date: Date) -> CurveResult<f64> {
        let t = self.time_from_reference(date);
        if self.extrapolation == ExtrapolationPolicy::Fail && !self.spline.in_range(t) {
            let (min, max) = self.domain();
            return Err(CurveError::OutsideCurveDomain { date, t, min, max });
        }
        Ok(t)
    }
}

impl DiscountCurve for SplineDiscountCurve {
    fn discount_factor(&self, date: Date) -> CurveResult<f64> {
        let t = self.checked_time(date)?;
        self.discount_factor_at(t)
    }
}
