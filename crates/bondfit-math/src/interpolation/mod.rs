//! Interpolation methods for curve construction.
//!
//! # Available Methods
//!
//! - [`CubicSpline`]: piecewise cubic with continuous first and second
//!   derivatives and not-a-knot end conditions
//!
//! # Extrapolation
//!
//! Interpolators reject points outside their knot range unless extrapolation
//! is switched on. A cubic spline with extrapolation enabled keeps evaluating
//! the cubic of its first (or last) segment, so values can move quickly away
//! from the data once the query point leaves the knot range.

mod cubic_spline;

pub use cubic_spline::CubicSpline;

use crate::error::MathResult;

/// Trait for interpolation methods.
pub trait Interpolator: Send + Sync {
    /// Returns the interpolated value at x.
    fn interpolate(&self, x: f64) -> MathResult<f64>;

    /// Returns true if extrapolation is allowed.
    fn allows_extrapolation(&self) -> bool {
        false
    }

    /// Returns the minimum x value in the data.
    fn min_x(&self) -> f64;

    /// Returns the maximum x value in the data.
    fn max_x(&self) -> f64;

    /// Checks if x is within the interpolation range.
    fn in_range(&self, x: f64) -> bool {
        x >= self.min_x() && x <= self.max_x()
    }
}
