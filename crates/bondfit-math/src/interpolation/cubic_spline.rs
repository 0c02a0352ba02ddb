//! Cubic spline interpolation.

use nalgebra::{DMatrix, DVector};

use crate::error::{MathError, MathResult};
use crate::interpolation::Interpolator;
use crate::linear_algebra::solve_linear_system;

/// Cubic spline interpolation.
///
/// Constructs a smooth curve through data points using piecewise cubic
/// polynomials with continuous first and second derivatives. The end
/// conditions are not-a-knot: the third derivative is continuous across the
/// second and the penultimate knot, so two knots give the straight line
/// through them and three knots the parabola through them.
///
/// The spline is stored in second-derivative form: on `[x_i, x_{i+1}]` with
/// `a = (x_{i+1} - x) / h` and `b = (x - x_i) / h`,
///
/// ```text
/// y = a*y_i + b*y_{i+1} + ((a^3 - a)*M_i + (b^3 - b)*M_{i+1}) * h^2 / 6
/// ```
///
/// # Example
///
/// ```rust
/// use bondfit_math::interpolation::{CubicSpline, Interpolator};
///
/// let xs = vec![0.0, 1.0, 2.0, 3.0];
/// let ys = vec![0.0, 1.0, 4.0, 9.0];
///
/// let spline = CubicSpline::new(xs, ys).unwrap();
/// let y = spline.interpolate(1.5).unwrap();
/// assert!(y > 1.0 && y < 4.0);
/// ```
#[derive(Debug, Clone)]
pub struct CubicSpline {
    xs: Vec<f64>,
    ys: Vec<f64>,
    /// Second derivatives at each knot
    y2s: Vec<f64>,
    allow_extrapolation: bool,
}

impl CubicSpline {
    /// Creates a not-a-knot cubic spline interpolator.
    ///
    /// # Arguments
    ///
    /// * `xs` - X coordinates (must be sorted in ascending order)
    /// * `ys` - Y coordinates
    ///
    /// # Errors
    ///
    /// Returns an error if there are fewer than 2 points, if lengths differ,
    /// or if the x values are not strictly increasing.
    pub fn new(xs: Vec<f64>, ys: Vec<f64>) -> MathResult<Self> {
        if xs.len() < 2 {
            return Err(MathError::insufficient_data(2, xs.len()));
        }
        if xs.len() != ys.len() {
            return Err(MathError::invalid_input(format!(
                "xs and ys must have same length: {} vs {}",
                xs.len(),
                ys.len()
            )));
        }
        if xs.iter().chain(ys.iter()).any(|v| !v.is_finite()) {
            return Err(MathError::non_finite("spline knots"));
        }
        if xs.windows(2).any(|w| w[1] <= w[0]) {
            return Err(MathError::invalid_input(
                "x values must be strictly increasing",
            ));
        }

        let y2s = not_a_knot_second_derivatives(&xs, &ys)?;

        Ok(Self {
            xs,
            ys,
            y2s,
            allow_extrapolation: false,
        })
    }

    /// Enables extrapolation beyond the data range.
    ///
    /// Points left of the first knot use the first segment's cubic and points
    /// right of the last knot use the last segment's cubic.
    #[must_use]
    pub fn with_extrapolation(mut self) -> Self {
        self.allow_extrapolation = true;
        self
    }

    /// Returns the knot x coordinates.
    pub fn xs(&self) -> &[f64] {
        &self.xs
    }

    /// Returns the knot y coordinates.
    pub fn ys(&self) -> &[f64] {
        &self.ys
    }

    /// Finds the index i such that xs[i] <= x < xs[i+1], clamped to the
    /// first and last segment.
    fn find_segment(&self, x: f64) -> usize {
        match self.xs.binary_search_by(|probe| {
            probe.partial_cmp(&x).unwrap_or(std::cmp::Ordering::Equal)
        }) {
            Ok(i) => i.min(self.xs.len() - 2),
            Err(i) => (i.saturating_sub(1)).min(self.xs.len() - 2),
        }
    }

    fn check_range(&self, x: f64) -> MathResult<()> {
        if !x.is_finite() {
            return Err(MathError::non_finite("spline query point"));
        }
        if !self.allow_extrapolation && !self.in_range(x) {
            return Err(MathError::ExtrapolationNotAllowed {
                x,
                min: self.min_x(),
                max: self.max_x(),
            });
        }
        Ok(())
    }
}

impl Interpolator for CubicSpline {
    fn interpolate(&self, x: f64) -> MathResult<f64> {
        self.check_range(x)?;

        let i = self.find_segment(x);

        let x_lo = self.xs[i];
        let x_hi = self.xs[i + 1];
        let y_lo = self.ys[i];
        let y_hi = self.ys[i + 1];
        let y2_lo = self.y2s[i];
        let y2_hi = self.y2s[i + 1];

        let h = x_hi - x_lo;
        let a = (x_hi - x) / h;
        let b = (x - x_lo) / h;

        let y = a * y_lo
            + b * y_hi
            + ((a * a * a - a) * y2_lo + (b * b * b - b) * y2_hi) * (h * h) / 6.0;

        Ok(y)
    }

    fn allows_extrapolation(&self) -> bool {
        self.allow_extrapolation
    }

    fn min_x(&self) -> f64 {
        self.xs[0]
    }

    fn max_x(&self) -> f64 {
        self.xs[self.xs.len() - 1]
    }
}

/// Right-hand side of the continuity equation at interior knot `i`.
fn curvature_rhs(xs: &[f64], ys: &[f64], i: usize) -> f64 {
    let slope_hi = (ys[i + 1] - ys[i]) / (xs[i + 1] - xs[i]);
    let slope_lo = (ys[i] - ys[i - 1]) / (xs[i] - xs[i - 1]);
    6.0 * (slope_hi - slope_lo)
}

/// Second derivatives for a not-a-knot spline, solved as a dense system.
///
/// The end rows equate the third derivative of the first two (and last two)
/// segments. With three knots that leaves a single interior equation, so the
/// end rows instead force one shared second derivative and the spline is the
/// interpolating parabola.
fn not_a_knot_second_derivatives(xs: &[f64], ys: &[f64]) -> MathResult<Vec<f64>> {
    let n = xs.len();
    if n == 2 {
        return Ok(vec![0.0; 2]);
    }

    let h: Vec<f64> = xs.windows(2).map(|w| w[1] - w[0]).collect();
    let mut a = DMatrix::<f64>::zeros(n, n);
    let mut r = DVector::<f64>::zeros(n);

    for i in 1..n - 1 {
        a[(i, i - 1)] = h[i - 1];
        a[(i, i)] = 2.0 * (h[i - 1] + h[i]);
        a[(i, i + 1)] = h[i];
        r[i] = curvature_rhs(xs, ys, i);
    }

    if n == 3 {
        a[(0, 0)] = 1.0;
        a[(0, 1)] = -1.0;
        a[(2, 1)] = -1.0;
        a[(2, 2)] = 1.0;
    } else {
        a[(0, 0)] = h[1];
        a[(0, 1)] = -(h[0] + h[1]);
        a[(0, 2)] = h[0];

        a[(n - 1, n - 3)] = h[n - 2];
        a[(n - 1, n - 2)] = -(h[n - 3] + h[n - 2]);
        a[(n - 1, n - 1)] = h[n - 3];
    }

    let m = solve_linear_system(&a, &r)?;
    Ok(m.iter().copied().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn test_cubic_spline_through_points() {
        let xs = vec![0.0, 1.0, 2.0, 3.0];
        let ys = vec![0.0, 1.0, 4.0, 9.0];

        let spline = CubicSpline::new(xs.clone(), ys.clone()).unwrap();
        for (x, y) in xs.iter().zip(ys.iter()) {
            assert_relative_eq!(spline.interpolate(*x).unwrap(), *y, epsilon = 1e-10);
        }
    }

    #[test]
    fn test_reproduces_line() {
        let xs = vec![0.0, 0.5, 2.0, 3.5, 5.0];
        let ys: Vec<f64> = xs.iter().map(|x| 1.0 - 0.02 * x).collect();
        let spline = CubicSpline::new(xs, ys).unwrap();

        assert_relative_eq!(spline.interpolate(1.25).unwrap(), 0.975, epsilon = 1e-12);
        assert_relative_eq!(spline.interpolate(4.0).unwrap(), 0.92, epsilon = 1e-12);
    }

    #[test]
    fn test_reproduces_cubic() {
        let xs = vec![0.0, 1.0, 2.0, 3.0, 4.5];
        let ys: Vec<f64> = xs.iter().map(|x: &f64| x.powi(3)).collect();
        let spline = CubicSpline::new(xs, ys).unwrap().with_extrapolation();

        assert_relative_eq!(spline.interpolate(1.5).unwrap(), 3.375, epsilon = 1e-10);
        assert_relative_eq!(spline.interpolate(3.7).unwrap(), 3.7f64.powi(3), epsilon = 1e-9);

        // Extrapolation continues the end cubic
        assert_relative_eq!(spline.interpolate(5.0).unwrap(), 125.0, epsilon = 1e-9);
        assert_relative_eq!(spline.interpolate(-1.0).unwrap(), -1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_three_points_is_parabola() {
        let spline = CubicSpline::new(vec![0.0, 1.0, 3.0], vec![0.0, 1.0, 9.0])
            .unwrap()
            .with_extrapolation();

        assert_relative_eq!(spline.interpolate(2.0).unwrap(), 4.0, epsilon = 1e-12);
        assert_relative_eq!(spline.interpolate(4.0).unwrap(), 16.0, epsilon = 1e-12);
        assert_relative_eq!(spline.interpolate(-1.0).unwrap(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_two_points_is_line() {
        let spline = CubicSpline::new(vec![1.0, 3.0], vec![1.0, 0.9])
            .unwrap()
            .with_extrapolation();

        assert_relative_eq!(spline.interpolate(2.0).unwrap(), 0.95, epsilon = 1e-12);
        assert_relative_eq!(spline.interpolate(5.0).unwrap(), 0.8, epsilon = 1e-12);
    }

    #[test]
    fn test_cubic_spline_extrapolation_error() {
        let spline = CubicSpline::new(vec![0.0, 1.0, 2.0, 3.0], vec![0.0, 1.0, 4.0, 9.0]).unwrap();

        assert!(!spline.allows_extrapolation());
        assert!(matches!(
            spline.interpolate(-0.5),
            Err(MathError::ExtrapolationNotAllowed { .. })
        ));
        assert!(spline.interpolate(3.5).is_err());
    }

    #[test]
    fn test_invalid_input() {
        assert!(matches!(
            CubicSpline::new(vec![0.0], vec![0.0]),
            Err(MathError::InsufficientData { .. })
        ));
        assert!(CubicSpline::new(vec![0.0, 1.0], vec![0.0]).is_err());
        assert!(CubicSpline::new(vec![0.0, 2.0, 1.0], vec![0.0, 1.0, 2.0]).is_err());
        assert!(CubicSpline::new(vec![0.0, 1.0, 1.0], vec![0.0, 1.0, 2.0]).is_err());
        assert!(matches!(
            CubicSpline::new(vec![0.0, 1.0], vec![0.0, f64::NAN]),
            Err(MathError::NonFiniteValue { .. })
        ));
    }

    #[test]
    fn test_nan_query_rejected() {
        let spline = CubicSpline::new(vec![0.0, 1.0], vec![0.0, 1.0])
            .unwrap()
            .with_extrapolation();
        assert!(spline.interpolate(f64::NAN).is_err());
    }

    proptest! {
        #[test]
        fn prop_not_a_knot_passes_through_knots(
            steps in prop::collection::vec(0.1f64..2.0, 1..9),
            values in prop::collection::vec(0.5f64..1.0, 10),
        ) {
            let mut xs = vec![0.0];
            for step in &steps {
                let last = xs[xs.len() - 1];
                xs.push(last + step);
            }
            let ys = values[..xs.len()].to_vec();

            let spline = CubicSpline::new(xs.clone(), ys.clone()).unwrap();
            for (x, y) in xs.iter().zip(ys.iter()) {
                prop_assert!((spline.interpolate(*x).unwrap() - y).abs() < 1e-9);
            }
        }
    }
}
