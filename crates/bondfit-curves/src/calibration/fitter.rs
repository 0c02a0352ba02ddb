//! Joint least-squares fit of a spline discount curve.

use log::{debug, info};

use bondfit_core::daycounts::{Act365Fixed, DayCount};
use bondfit_core::{CoreError, Date};
use bondfit_math::optimization::{LevenbergMarquardt, Termination};
use bondfit_math::MathError;

use super::instruments::CalibrationInstrument;
use super::options::DiscountFitOptions;
use crate::curves::SplineDiscountCurve;
use crate::error::{CurveError, CurveResult};

/// Result of curve calibration.
#[derive(Debug, Clone)]
pub struct CalibrationResult {
    /// The calibrated curve.
    pub curve: SplineDiscountCurve,
    /// Model value less market price per instrument, in maturity order.
    pub residuals: Vec<f64>,
    /// Number of solver iterations used.
    pub iterations: usize,
    /// Root mean square of the residuals.
    pub rms_error: f64,
    /// Largest absolute residual.
    pub max_error: f64,
    /// Convergence criterion that ended the solve.
    pub termination: Termination,
}

impl CalibrationResult {
    /// One-line description of the fit quality.
    pub fn summary(&self) -> String {
        format!(
            "Calibration converged ({:?}): {} iterations, RMS={:.6}, Max={:.6}",
            self.termination, self.iterations, self.rms_error, self.max_error
        )
    }
}

/// Calibrates a [`SplineDiscountCurve`] to instrument prices.
///
/// All instruments are fitted simultaneously by Levenberg-Marquardt over the
/// knot discount factors. See the [module documentation](super) for the
/// knot layout.
#[derive(Debug, Clone, Default)]
pub struct DiscountCurveFitter {
    options: DiscountFitOptions,
}

impl DiscountCurveFitter {
    /// Creates a fitter with the given options.
    #[must_use]
    pub fn new(options: DiscountFitOptions) -> Self {
        Self { options }
    }

    /// Returns the fit options.
    pub fn options(&self) -> &DiscountFitOptions {
        &self.options
    }

    /// Fits a curve to the given instruments as of `today`.
    ///
    /// The fitted curve's reference date is `today` and its residuals are
    /// reported in maturity order, whatever the input order.
    ///
    /// # Errors
    ///
    /// - `EmptyInstrumentSet` if `instruments` is empty
    /// - `InvalidFitOptions` if the options fail validation or the knot
    ///   range is empty
    /// - `InvalidValue` if a market price is not finite
    /// - `CalibrationFailure` if the solver does not converge
    pub fn fit<I: CalibrationInstrument>(
        &self,
        today: Date,
        instruments: &[I],
    ) -> CurveResult<CalibrationResult> {
        self.options.validate()?;

        if instruments.is_empty() {
            return Err(CurveError::EmptyInstrumentSet);
        }

        let mut sorted: Vec<&I> = instruments.iter().collect();
        sorted.sort_by_key(|inst| inst.maturity());

        if let Some(bad) = sorted.iter().find(|inst| !inst.market_price().is_finite()) {
            return Err(CurveError::invalid_value(format!(
                "market price {} for instrument maturing {}",
                bad.market_price(),
                bad.maturity()
            )));
        }

        let knots = self.knot_times(today, &sorted)?;
        debug!(
            "Fitting {} knots over [{:.4}, {:.4}] to {} instruments",
            knots.len(),
            knots[0],
            knots[knots.len() - 1],
            sorted.len()
        );

        let residuals = |values: &[f64]| -> CurveResult<Vec<f64>> {
            let curve = SplineDiscountCurve::new(today, knots.clone(), values.to_vec())?;
            sorted
                .iter()
                .map(|inst| inst.pricing_error(&curve, today))
                .collect()
        };

        let initial = vec![self.options.initial_discount; knots.len()];
        let solver = LevenbergMarquardt::new(self.options.solver);

        let solution = match solver.minimize(residuals, &initial) {
            Ok(solution) => solution,
            Err(CurveError::Math(MathError::ConvergenceFailed {
                iterations,
                residual,
            })) => {
                return Err(CurveError::calibration_failed(
                    iterations,
                    residual,
                    format!(
                        "no convergence fitting {} knots to {} instruments",
                        knots.len(),
                        sorted.len()
                    ),
                ));
            }
            Err(e) => return Err(e),
        };

        let rms_error = solution.rms();
        let max_error = solution.max_abs_residual();

        info!(
            "Calibrated {} knots to {} instruments in {} iterations: RMS={:.3e}, max={:.3e}",
            knots.len(),
            sorted.len(),
            solution.iterations,
            rms_error,
            max_error
        );

        let curve = SplineDiscountCurve::new(today, knots, solution.parameters)?
            .with_extrapolation_policy(self.options.extrapolation);

        Ok(CalibrationResult {
            curve,
            residuals: solution.residuals,
            iterations: solution.iterations,
            rms_error,
            max_error,
            termination: solution.termination,
        })
    }

    /// Equally spaced knot times between the extended first and last
    /// maturities. `sorted` must be non-empty and in maturity order.
    fn knot_times<I: CalibrationInstrument>(
        &self,
        today: Date,
        sorted: &[&I],
    ) -> CurveResult<Vec<f64>> {
        let (first, last) = match (sorted.first(), sorted.last()) {
            (Some(first), Some(last)) => (first.maturity(), last.maturity()),
            _ => return Err(CurveError::EmptyInstrumentSet),
        };

        let extension = i64::from(self.options.extension_days);
        let out_of_range = |_: CoreError| {
            CurveError::invalid_fit_options(
                "extension_days",
                format!("{extension} days moves the knot range out of the date range"),
            )
        };
        let curve_start = first.checked_sub_days(extension).map_err(out_of_range)?.max(today);
        let curve_end = last.checked_add_days(extension).map_err(out_of_range)?;

        let start = Act365Fixed.year_fraction(today, curve_start);
        let end = Act365Fixed.year_fraction(today, curve_end);
        if end <= start {
            return Err(CurveError::invalid_fit_options(
                "extension_days",
                format!("knot range {curve_start} to {curve_end} is empty"),
            ));
        }

        let n = self.options.knot_count;
        let step = (end - start) / (n - 1) as f64;
        let mut knots: Vec<f64> = (0..n).map(|i| start + step * i as f64).collect();
        knots[n - 1] = end;

        Ok(knots)
    }
}

/// Fits a discount curve to `instruments` as of `today` and returns only the
/// curve.
///
/// Shorthand for [`DiscountCurveFitter::fit`] when the diagnostics are not
/// needed.
pub fn fit_discount_curve<I: CalibrationInstrument>(
    instruments: &[I],
    options: &DiscountFitOptions,
    today: Date,
) -> CurveResult<SplineDiscountCurve> {
    DiscountCurveFitter::new(*options)
        .fit(today, instruments)
        .map(|result| result.curve)
}
