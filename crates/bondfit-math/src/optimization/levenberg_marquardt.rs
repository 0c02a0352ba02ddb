//! Levenberg-Marquardt nonlinear least squares.

use log::{debug, warn};
use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::error::{MathError, MathResult};
use crate::linear_algebra::solve_linear_system;

/// Floor for the Marquardt scaling of a zero Jacobian column.
const DIAGONAL_FLOOR: f64 = 1e-12;

/// Configuration for the Levenberg-Marquardt solver.
///
/// Every field has a default, so a partial JSON object such as
/// `{"max_iterations": 50}` deserializes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevenbergMarquardtConfig {
    /// Maximum number of Jacobian evaluations.
    pub max_iterations: usize,
    /// Relative reduction in cost below which an accepted step counts as
    /// converged.
    pub ftol: f64,
    /// Relative step size below which the solver counts as converged.
    pub xtol: f64,
    /// Threshold on the infinity norm of the gradient `J^T r`.
    pub gtol: f64,
    /// Initial damping parameter.
    pub initial_lambda: f64,
    /// Factor applied to the damping after a rejected (multiply) or accepted
    /// (divide) step.
    pub lambda_factor: f64,
    /// Minimum damping value.
    pub min_lambda: f64,
    /// Damping above which the solver gives up.
    pub max_lambda: f64,
    /// Finite difference step for the Jacobian.
    pub jacobian_step: f64,
}

impl Default for LevenbergMarquardtConfig {
    fn default() -> Self {
        Self {
            max_iterations: 100,
            ftol: 1e-10,
            xtol: 1e-10,
            gtol: 1e-10,
            initial_lambda: 1e-3,
            lambda_factor: 10.0,
            min_lambda: 1e-10,
            max_lambda: 1e10,
            jacobian_step: 1e-6,
        }
    }
}

impl LevenbergMarquardtConfig {
    /// Creates a new configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum iterations.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Sets `ftol`, `xtol` and `gtol` to the same tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.ftol = tolerance;
        self.xtol = tolerance;
        self.gtol = tolerance;
        self
    }

    /// Sets the initial damping parameter.
    #[must_use]
    pub fn with_initial_lambda(mut self, initial_lambda: f64) -> Self {
        self.initial_lambda = initial_lambda;
        self
    }

    /// Sets the finite difference step for the Jacobian.
    #[must_use]
    pub fn with_jacobian_step(mut self, jacobian_step: f64) -> Self {
        self.jacobian_step = jacobian_step;
        self
    }

    /// Checks that the settings describe a usable solver.
    pub fn validate(&self) -> MathResult<()> {
        if self.max_iterations == 0 {
            return Err(MathError::invalid_input("max_iterations must be at least 1"));
        }
        for (name, tol) in [("ftol", self.ftol), ("xtol", self.xtol), ("gtol", self.gtol)] {
            if !tol.is_finite() || tol < 0.0 {
                return Err(MathError::invalid_input(format!(
                    "{name} must be finite and non-negative, got {tol}"
                )));
            }
        }
        if !(self.lambda_factor.is_finite() && self.lambda_factor > 1.0) {
            return Err(MathError::invalid_input(format!(
                "lambda_factor must be greater than 1, got {}",
                self.lambda_factor
            )));
        }
        if !(self.min_lambda > 0.0
            && self.min_lambda <= self.initial_lambda
            && self.initial_lambda <= self.max_lambda
            && self.max_lambda.is_finite())
        {
            return Err(MathError::invalid_input(format!(
                "damping must satisfy 0 < min_lambda <= initial_lambda <= max_lambda, got {} / {} / {}",
                self.min_lambda, self.initial_lambda, self.max_lambda
            )));
        }
        if !(self.jacobian_step.is_finite() && self.jacobian_step > 0.0) {
            return Err(MathError::invalid_input(format!(
                "jacobian_step must be positive, got {}",
                self.jacobian_step
            )));
        }
        Ok(())
    }
}

/// Which convergence criterion stopped the solver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Termination {
    /// The gradient `J^T r` fell below `gtol`.
    GradientTolerance,
    /// An accepted step reduced the cost by less than `ftol` relative.
    CostTolerance,
    /// The proposed step was smaller than `xtol` relative to the parameters.
    StepTolerance,
}

/// Result of a converged least-squares run.
#[derive(Debug, Clone, PartialEq)]
pub struct LeastSquaresResult {
    /// Parameters at the solution.
    pub parameters: Vec<f64>,
    /// Residuals at the solution.
    pub residuals: Vec<f64>,
    /// Half the sum of squared residuals.
    pub cost: f64,
    /// Number of Jacobian evaluations used.
    pub iterations: usize,
    /// The criterion that ended the run.
    pub termination: Termination,
}

impl LeastSquaresResult {
    /// Root mean square of the residuals.
    pub fn rms(&self) -> f64 {
        if self.residuals.is_empty() {
            return 0.0;
        }
        (2.0 * self.cost / self.residuals.len() as f64).sqrt()
    }

    /// Largest absolute residual.
    pub fn max_abs_residual(&self) -> f64 {
        self.residuals.iter().map(|r| r.abs()).fold(0.0, f64::max)
    }
}

/// Levenberg-Marquardt solver for `min_x 0.5 * |r(x)|^2`.
///
/// Each iteration builds a central-difference Jacobian `J`, then solves the
/// damped normal equations
///
/// ```text
/// (J^T J + lambda * diag(J^T J)) delta = -J^T r
/// ```
///
/// A step that lowers the cost is accepted and the damping shrinks; otherwise
/// the damping grows and the step is re-solved from the same point. The run
/// fails with [`MathError::ConvergenceFailed`] if the iteration budget runs
/// out or the damping exceeds `max_lambda` first.
///
/// # Example
///
/// ```rust
/// use bondfit_math::optimization::{LevenbergMarquardt, LevenbergMarquardtConfig};
/// use bondfit_math::MathResult;
///
/// // Fit y = a + b*x through three collinear points
/// let data: [(f64, f64); 3] = [(0.0, 1.0), (1.0, 3.0), (2.0, 5.0)];
/// let residuals = |p: &[f64]| -> MathResult<Vec<f64>> {
///     Ok(data.iter().map(|(x, y)| p[0] + p[1] * x - y).collect())
/// };
///
/// let solver = LevenbergMarquardt::new(LevenbergMarquardtConfig::default());
/// let result = solver.minimize(residuals, &[0.0, 0.0]).unwrap();
/// assert!((result.parameters[1] - 2.0).abs() < 1e-8);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct LevenbergMarquardt {
    config: LevenbergMarquardtConfig,
}

impl LevenbergMarquardt {
    /// Creates a solver with the given configuration.
    #[must_use]
    pub fn new(config: LevenbergMarquardtConfig) -> Self {
        Self { config }
    }

    /// Returns the solver configuration.
    pub fn config(&self) -> &LevenbergMarquardtConfig {
        &self.config
    }

    /// Minimizes the sum of squared residuals starting from `initial`.
    ///
    /// `residuals` must return a vector of the same length on every call. Its
    /// error type only needs to absorb [`MathError`], so callers can surface
    /// their own failures from inside the residual function unchanged.
    ///
    /// # Errors
    ///
    /// - `InvalidInput` for an invalid configuration, an empty parameter
    ///   vector or an empty residual vector
    /// - `NonFiniteValue` if the residuals at the start point or in the
    ///   Jacobian are not finite
    /// - `ConvergenceFailed` if no convergence criterion is met
    /// - any error returned by `residuals`
    pub fn minimize<F, E>(&self, residuals: F, initial: &[f64]) -> Result<LeastSquaresResult, E>
    where
        F: Fn(&[f64]) -> Result<Vec<f64>, E> + Sync,
        E: From<MathError> + Send,
    {
        self.config.validate()?;

        let n = initial.len();
        if n == 0 {
            return Err(MathError::invalid_input("no parameters to fit").into());
        }
        if initial.iter().any(|v| !v.is_finite()) {
            return Err(MathError::non_finite("initial parameters").into());
        }

        let mut x = DVector::from_column_slice(initial);
        let mut r = evaluate(&residuals, x.as_slice(), None)?;
        let m = r.len();
        if m == 0 {
            return Err(MathError::invalid_input("residual function returned no values").into());
        }
        ensure_finite(&r, "initial residuals")?;

        let mut cost = half_squared_norm(&r);
        let mut lambda = self.config.initial_lambda;

        for iteration in 0..self.config.max_iterations {
            let jacobian = self.jacobian(&residuals, &x, m)?;
            let gradient = jacobian.tr_mul(&r);
            let gradient_norm = gradient.amax();

            debug!(
                "LM iteration {}: cost={:.6e}, |g|={:.3e}, lambda={:.1e}",
                iteration, cost, gradient_norm, lambda
            );

            if gradient_norm <= self.config.gtol {
                return Ok(finish(x, r, cost, iteration, Termination::GradientTolerance));
            }

            let jtj = jacobian.tr_mul(&jacobian);
            let rhs = -&gradient;

            loop {
                let mut damped = jtj.clone();
                for i in 0..n {
                    damped[(i, i)] += lambda * jtj[(i, i)].max(DIAGONAL_FLOOR);
                }

                let delta = match solve_linear_system(&damped, &rhs) {
                    Ok(delta) => delta,
                    Err(MathError::SingularMatrix) => {
                        lambda = self.raise_damping(lambda, iteration, cost)?;
                        continue;
                    }
                    Err(e) => return Err(e.into()),
                };

                let step_norm = delta.norm();
                if step_norm <= self.config.xtol * (self.config.xtol + x.norm()) {
                    return Ok(finish(x, r, cost, iteration, Termination::StepTolerance));
                }

                let candidate = &x + &delta;
                let candidate_r = evaluate(&residuals, candidate.as_slice(), Some(m))?;
                let candidate_cost = if candidate_r.iter().all(|v| v.is_finite()) {
                    half_squared_norm(&candidate_r)
                } else {
                    f64::INFINITY
                };

                if candidate_cost < cost {
                    let reduction = cost - candidate_cost;
                    let previous = cost;

                    x = candidate;
                    r = candidate_r;
                    cost = candidate_cost;
                    lambda = (lambda / self.config.lambda_factor).max(self.config.min_lambda);

                    debug!(
                        "LM step accepted: |delta|={:.3e}, cost {:.6e} -> {:.6e}",
                        step_norm, previous, cost
                    );

                    if reduction <= self.config.ftol * previous {
                        return Ok(finish(x, r, cost, iteration + 1, Termination::CostTolerance));
                    }
                    break;
                }

                lambda = self.raise_damping(lambda, iteration, cost)?;
            }
        }

        let residual = (2.0 * cost).sqrt();
        warn!(
            "Levenberg-Marquardt reached {} iterations without converging (|r|={:.3e})",
            self.config.max_iterations, residual
        );
        Err(MathError::convergence_failed(self.config.max_iterations, residual).into())
    }

    /// Increases the damping after a rejected step, failing once it exceeds
    /// `max_lambda`.
    fn raise_damping(&self, lambda: f64, iteration: usize, cost: f64) -> MathResult<f64> {
        let raised = lambda * self.config.lambda_factor;
        if raised > self.config.max_lambda {
            let residual = (2.0 * cost).sqrt();
            warn!(
                "Levenberg-Marquardt damping saturated at iteration {} (|r|={:.3e})",
                iteration, residual
            );
            return Err(MathError::convergence_failed(iteration + 1, residual));
        }
        Ok(raised)
    }

    /// Computes the `m x n` Jacobian by central differences.
    fn jacobian<F, E>(&self, residuals: &F, x: &DVector<f64>, m: usize) -> Result<DMatrix<f64>, E>
    where
        F: Fn(&[f64]) -> Result<Vec<f64>, E> + Sync,
        E: From<MathError> + Send,
    {
        let n = x.len();

        #[cfg(feature = "parallel")]
        let columns = (0..n)
            .into_par_iter()
            .map(|j| self.jacobian_column(residuals, x, j, m))
            .collect::<Result<Vec<_>, E>>()?;

        #[cfg(not(feature = "parallel"))]
        let columns = (0..n)
            .map(|j| self.jacobian_column(residuals, x, j, m))
            .collect::<Result<Vec<_>, E>>()?;

        Ok(DMatrix::from_fn(m, n, |i, j| columns[j][i]))
    }

    fn jacobian_column<F, E>(
        &self,
        residuals: &F,
        x: &DVector<f64>,
        j: usize,
        m: usize,
    ) -> Result<Vec<f64>, E>
    where
        F: Fn(&[f64]) -> Result<Vec<f64>, E> + Sync,
        E: From<MathError> + Send,
    {
        let h = self.config.jacobian_step;

        let mut up = x.clone();
        up[j] += h;
        let r_up = evaluate(residuals, up.as_slice(), Some(m))?;

        let mut down = x.clone();
        down[j] -= h;
        let r_down = evaluate(residuals, down.as_slice(), Some(m))?;

        let column: Vec<f64> = r_up
            .iter()
            .zip(r_down.iter())
            .map(|(u, d)| (u - d) / (2.0 * h))
            .collect();
        ensure_finite(&column, "Jacobian")?;

        Ok(column)
    }
}

fn evaluate<F, E>(residuals: &F, x: &[f64], expected: Option<usize>) -> Result<DVector<f64>, E>
where
    F: Fn(&[f64]) -> Result<Vec<f64>, E>,
    E: From<MathError>,
{
    let values = residuals(x)?;
    if let Some(m) = expected {
        if values.len() != m {
            return Err(MathError::DimensionMismatch {
                rows1: m,
                cols1: 1,
                rows2: values.len(),
                cols2: 1,
            }
            .into());
        }
    }
    Ok(DVector::from_vec(values))
}

fn ensure_finite<'a>(values: impl IntoIterator<Item = &'a f64>, context: &str) -> MathResult<()> {
    if values.into_iter().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(MathError::non_finite(context))
    }
}

fn half_squared_norm(r: &DVector<f64>) -> f64 {
    0.5 * r.norm_squared()
}

fn finish(
    x: DVector<f64>,
    r: DVector<f64>,
    cost: f64,
    iterations: usize,
    termination: Termination,
) -> LeastSquaresResult {
    LeastSquaresResult {
        parameters: x.iter().copied().collect(),
        residuals: r.iter().copied().collect(),
        cost,
        iterations,
        termination,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn rosenbrock(p: &[f64]) -> MathResult<Vec<f64>> {
        Ok(vec![10.0 * (p[1] - p[0] * p[0]), 1.0 - p[0]])
    }

    #[test]
    fn test_default_config() {
        let config = LevenbergMarquardtConfig::default();
        assert_eq!(config.max_iterations, 100);
        assert_relative_eq!(config.jacobian_step, 1e-6);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder() {
        let config = LevenbergMarquardtConfig::new()
            .with_max_iterations(25)
            .with_tolerance(1e-8)
            .with_initial_lambda(1e-2);

        assert_eq!(config.max_iterations, 25);
        assert_relative_eq!(config.ftol, 1e-8);
        assert_relative_eq!(config.gtol, 1e-8);
        assert_relative_eq!(config.initial_lambda, 1e-2);
    }

    #[test]
    fn test_config_validation() {
        assert!(LevenbergMarquardtConfig::new()
            .with_max_iterations(0)
            .validate()
            .is_err());
        assert!(LevenbergMarquardtConfig::new()
            .with_tolerance(-1.0)
            .validate()
            .is_err());
        assert!(LevenbergMarquardtConfig::new()
            .with_jacobian_step(0.0)
            .validate()
            .is_err());
        assert!(LevenbergMarquardtConfig::new()
            .with_initial_lambda(1e20)
            .validate()
            .is_err());
    }

    #[test]
    fn test_config_partial_json() {
        let config: LevenbergMarquardtConfig =
            serde_json::from_str(r#"{"max_iterations": 7}"#).unwrap();
        assert_eq!(config.max_iterations, 7);
        assert_relative_eq!(config.lambda_factor, 10.0);
    }

    #[test]
    fn test_linear_fit() {
        let xs: [f64; 5] = [0.0, 1.0, 2.0, 3.0, 4.0];
        let residuals = |p: &[f64]| -> MathResult<Vec<f64>> {
            Ok(xs.iter().map(|x| p[0] + p[1] * x - (1.0 + 2.0 * x)).collect())
        };

        let result = LevenbergMarquardt::default()
            .minimize(residuals, &[0.0, 0.0])
            .unwrap();

        assert_relative_eq!(result.parameters[0], 1.0, epsilon = 1e-8);
        assert_relative_eq!(result.parameters[1], 2.0, epsilon = 1e-8);
        assert!(result.max_abs_residual() < 1e-8);
    }

    #[test]
    fn test_exponential_fit() {
        let xs: [f64; 5] = [0.0, 1.0, 2.0, 3.0, 4.0];
        let ys: Vec<f64> = xs.iter().map(|x| 2.0 * (-0.5_f64 * x).exp()).collect();
        let residuals = |p: &[f64]| -> MathResult<Vec<f64>> {
            Ok(xs
                .iter()
                .zip(ys.iter())
                .map(|(x, y)| p[0] * (p[1] * x).exp() - y)
                .collect())
        };

        let result = LevenbergMarquardt::default()
            .minimize(residuals, &[1.0, 0.0])
            .unwrap();

        assert_relative_eq!(result.parameters[0], 2.0, epsilon = 1e-7);
        assert_relative_eq!(result.parameters[1], -0.5, epsilon = 1e-7);
    }

    #[test]
    fn test_rosenbrock() {
        let result = LevenbergMarquardt::default()
            .minimize(rosenbrock, &[-1.2, 1.0])
            .unwrap();

        assert_relative_eq!(result.parameters[0], 1.0, epsilon = 1e-6);
        assert_relative_eq!(result.parameters[1], 1.0, epsilon = 1e-6);
        assert!(result.rms() < 1e-8);
    }

    #[test]
    fn test_iteration_budget_exhausted() {
        let solver = LevenbergMarquardt::new(LevenbergMarquardtConfig::new().with_max_iterations(1));

        let err = solver.minimize(rosenbrock, &[-1.2, 1.0]).unwrap_err();
        assert!(matches!(
            err,
            MathError::ConvergenceFailed { iterations: 1, .. }
        ));
    }

    #[test]
    fn test_already_at_minimum() {
        let result = LevenbergMarquardt::default()
            .minimize(rosenbrock, &[1.0, 1.0])
            .unwrap();

        assert_eq!(result.iterations, 0);
        assert_eq!(result.termination, Termination::GradientTolerance);
        assert_eq!(result.cost, 0.0);
    }

    #[test]
    fn test_invalid_inputs() {
        let solver = LevenbergMarquardt::default();

        assert!(solver.minimize(rosenbrock, &[]).is_err());
        assert!(matches!(
            solver.minimize(rosenbrock, &[f64::NAN, 1.0]),
            Err(MathError::NonFiniteValue { .. })
        ));
        assert!(solver
            .minimize(|_| -> MathResult<Vec<f64>> { Ok(vec![]) }, &[1.0])
            .is_err());
    }

    #[test]
    fn test_residual_error_propagates() {
        let err = LevenbergMarquardt::default()
            .minimize(|_| -> MathResult<Vec<f64>> { Err(MathError::invalid_input("boom")) }, &[1.0])
            .unwrap_err();
        assert_eq!(err, MathError::invalid_input("boom"));
    }
}
