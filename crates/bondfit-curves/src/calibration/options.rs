//! Calibration settings.

use serde::{Deserialize, Serialize};

use bondfit_math::optimization::LevenbergMarquardtConfig;

use crate::curves::ExtrapolationPolicy;
use crate::error::{CurveError, CurveResult};

/// Settings for fitting a spline discount curve.
///
/// Missing fields take their defaults when deserializing, so
/// `{"knot_count": 10}` is a complete configuration.
///
/// # Example
///
/// ```rust
/// use bondfit_curves::calibration::DiscountFitOptions;
///
/// let options = DiscountFitOptions::default()
///     .with_knot_count(10)
///     .with_extension_days(100);
/// assert!(options.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscountFitOptions {
    /// Number of spline knots. More knots fit prices more closely but leave
    /// each knot less constrained.
    pub knot_count: usize,
    /// Days the knot range extends before the earliest and after the latest
    /// maturity.
    pub extension_days: u32,
    /// Starting value for every knot discount factor.
    pub initial_discount: f64,
    /// Extrapolation policy of the fitted curve.
    pub extrapolation: ExtrapolationPolicy,
    /// Least-squares solver settings.
    pub solver: LevenbergMarquardtConfig,
}

impl Default for DiscountFitOptions {
    fn default() -> Self {
        Self {
            knot_count: 5,
            extension_days: 100,
            initial_discount: 1.0,
            extrapolation: ExtrapolationPolicy::Extrapolate,
            solver: LevenbergMarquardtConfig::default(),
        }
    }
}

impl DiscountFitOptions {
    /// Creates options with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of knots.
    #[must_use]
    pub fn with_knot_count(mut self, knot_count: usize) -> Self {
        self.knot_count = knot_count;
        self
    }

    /// Sets the knot range extension in days.
    #[must_use]
    pub fn with_extension_days(mut self, extension_days: u32) -> Self {
        self.extension_days = extension_days;
        self
    }

    /// Sets the initial knot discount factor.
    #[must_use]
    pub fn with_initial_discount(mut self, initial_discount: f64) -> Self {
        self.initial_discount = initial_discount;
        self
    }

    /// Sets the extrapolation policy of the fitted curve.
    #[must_use]
    pub fn with_extrapolation(mut self, extrapolation: ExtrapolationPolicy) -> Self {
        self.extrapolation = extrapolation;
        self
    }

    /// Sets the solver configuration.
    #[must_use]
    pub fn with_solver(mut self, solver: LevenbergMarquardtConfig) -> Self {
        self.solver = solver;
        self
    }

    /// Checks that the options can define a curve.
    ///
    /// # Errors
    ///
    /// Returns `CurveError::InvalidFitOptions` for fewer than two knots, a
    /// non-positive or non-finite initial discount factor, or invalid solver
    /// settings.
    pub fn validate(&self) -> CurveResult<()> {
        if self.knot_count < 2 {
            return Err(CurveError::invalid_fit_options(
                "knot_count",
                format!("a spline needs at least 2 knots, got {}", self.knot_count),
            ));
        }
        if !(self.initial_discount.is_finite() && self.initial_discount > 0.0) {
            return Err(CurveError::invalid_fit_options(
                "initial_discount",
                format!("must be positive and finite, got {}", self.initial_discount),
            ));
        }
        self.solver
            .validate()
            .map_err(|e| CurveError::invalid_fit_options("solver", e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = DiscountFitOptions::default();
        assert_eq!(options.knot_count, 5);
        assert_eq!(options.extension_days, 100);
        assert_eq!(options.initial_discount, 1.0);
        assert_eq!(options.extrapolation, ExtrapolationPolicy::Extrapolate);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let options = DiscountFitOptions::new()
            .with_knot_count(10)
            .with_extension_days(30)
            .with_initial_discount(0.01)
            .with_extrapolation(ExtrapolationPolicy::Fail)
            .with_solver(LevenbergMarquardtConfig::new().with_max_iterations(20));

        assert_eq!(options.knot_count, 10);
        assert_eq!(options.extension_days, 30);
        assert_eq!(options.initial_discount, 0.01);
        assert_eq!(options.extrapolation, ExtrapolationPolicy::Fail);
        assert_eq!(options.solver.max_iterations, 20);
    }

    #[test]
    fn test_too_few_knots() {
        for knot_count in [0, 1] {
            let err = DiscountFitOptions::default()
                .with_knot_count(knot_count)
                .validate()
                .unwrap_err();
            assert!(matches!(
                err,
                CurveError::InvalidFitOptions { ref field, .. } if field == "knot_count"
            ));
        }
        assert!(DiscountFitOptions::default().with_knot_count(2).validate().is_ok());
    }

    #[test]
    fn test_bad_initial_discount() {
        for seed in [0.0, -1.0, f64::NAN] {
            assert!(DiscountFitOptions::default()
                .with_initial_discount(seed)
                .validate()
                .is_err());
        }
    }

    #[test]
    fn test_bad_solver_settings() {
        let options = DiscountFitOptions::default()
            .with_solver(LevenbergMarquardtConfig::new().with_max_iterations(0));
        assert!(matches!(
            options.validate(),
            Err(CurveError::InvalidFitOptions { ref field, .. }) if field == "solver"
        ));
    }

    #[test]
    fn test_partial_json() {
        let options: DiscountFitOptions =
            serde_json::from_str(r#"{"knot_count": 10, "solver": {"max_iterations": 50}}"#)
                .unwrap();

        assert_eq!(options.knot_count, 10);
        assert_eq!(options.extension_days, 100);
        assert_eq!(options.solver.max_iterations, 50);
        assert_eq!(options.solver, LevenbergMarquardtConfig::default().with_max_iterations(50));
    }

    #[test]
    fn test_json_round_trip() {
        let options = DiscountFitOptions::default().with_extrapolation(ExtrapolationPolicy::Fail);
        let json = serde_json::to_string(&options).unwrap();
        assert!(json.contains("\"extrapolation\":\"Fail\""));
        let parsed: DiscountFitOptions = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, options);
    }
}
