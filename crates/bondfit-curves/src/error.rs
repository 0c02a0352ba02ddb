//! Error types for curve operations.
//!
//! Calibration failures surface as a single [`CurveError`] naming the stage
//! that failed: an empty instrument set, unusable fit options, or a solver
//! that did not converge. No partial curve is returned alongside an error.

use bondfit_core::{CoreError, Date};
use bondfit_math::MathError;
use thiserror::Error;

/// A specialized Result type for curve operations.
pub type CurveResult<T> = Result<T, CurveError>;

/// Error types for curve operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CurveError {
    /// Calibration was asked to fit no instruments.
    #[error("Cannot calibrate a curve from an empty instrument set")]
    EmptyInstrumentSet,

    /// Fit options cannot define a curve.
    #[error("Invalid fit options: {field}: {reason}")]
    InvalidFitOptions {
        /// The offending option.
        field: String,
        /// Why it was rejected.
        reason: String,
    },

    /// Curve calibration failed to converge.
    #[error(
        "Calibration failed after {iterations} iterations (residual: {residual:.2e}): {message}"
    )]
    CalibrationFailure {
        /// Number of iterations attempted.
        iterations: usize,
        /// Final residual norm.
        residual: f64,
        /// Description of failure.
        message: String,
    },

    /// Date lies outside a curve that refuses to extrapolate.
    #[error("Date {date} (t={t:.4}) is outside the curve domain [{min:.4}, {max:.4}]")]
    OutsideCurveDomain {
        /// The requested date.
        date: Date,
        /// Its year fraction from the curve reference date.
        t: f64,
        /// First knot time.
        min: f64,
        /// Last knot time.
        max: f64,
    },

    /// Yield conversion is undefined for the inputs.
    #[error("Yield undefined: {reason}")]
    YieldDomain {
        /// Description of the domain violation.
        reason: String,
    },

    /// Not enough data points to build a curve.
    #[error("Insufficient points: need at least {required}, got {got}")]
    InsufficientPoints {
        /// Minimum required points.
        required: usize,
        /// Actual number of points provided.
        got: usize,
    },

    /// Invalid value (NaN, Inf, or domain error).
    #[error("Invalid value: {reason}")]
    InvalidValue {
        /// Description of why value is invalid.
        reason: String,
    },

    /// Numerical routine failed.
    #[error(transparent)]
    Math(#[from] MathError),

    /// Date or day count failure.
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl CurveError {
    /// Creates an invalid fit options error.
    #[must_use]
    pub fn invalid_fit_options(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidFitOptions {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Creates a calibration failure error.
    #[must_use]
    pub fn calibration_failed(
        iterations: usize,
        residual: f64,
        message: impl Into<String>,
    ) -> Self {
        Self::CalibrationFailure {
            iterations,
            residual,
            message: message.into(),
        }
    }

    /// Creates a yield domain error.
    #[must_use]
    pub fn yield_domain(reason: impl Into<String>) -> Self {
        Self::YieldDomain {
            reason: reason.into(),
        }
    }

    /// Creates an insufficient points error.
    #[must_use]
    pub fn insufficient_points(required: usize, got: usize) -> Self {
        Self::InsufficientPoints { required, got }
    }

    /// Creates an invalid value error.
    #[must_use]
    pub fn invalid_value(reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            reason: reason.into(),
        }
    }
}
