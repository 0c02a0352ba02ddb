//! Optimization algorithms.
//!
//! This module provides the nonlinear least-squares solver used for curve
//! fitting:
//!
//! - [`LevenbergMarquardt`]: damped Gauss-Newton with Marquardt scaling and a
//!   central-difference Jacobian

mod levenberg_marquardt;

pub use levenberg_marquardt::{
    LeastSquaresResult, LevenbergMarquardt, LevenbergMarquardtConfig, Termination,
};
