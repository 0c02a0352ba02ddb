//! # Bondfit Math
//!
//! Numerical routines used by the bondfit curve fitting library.
//!
//! This crate provides:
//!
//! - **Interpolation**: not-a-knot cubic splines
//! - **Linear Algebra**: dense linear solves
//! - **Optimization**: Levenberg-Marquardt nonlinear least squares
//!
//! ## Example
//!
//! ```rust
//! use bondfit_math::prelude::*;
//!
//! let xs = vec![0.0, 1.0, 2.0, 3.0];
//! let ys = vec![0.0, 1.0, 8.0, 27.0];
//!
//! // A not-a-knot spline reproduces any cubic exactly
//! let spline = CubicSpline::new(xs, ys).unwrap();
//! assert!((spline.interpolate(1.5).unwrap() - 3.375).abs() < 1e-12);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::similar_names)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::needless_range_loop)]

pub mod error;
pub mod interpolation;
pub mod linear_algebra;
pub mod optimization;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{MathError, MathResult};
    pub use crate::interpolation::{CubicSpline, Interpolator};
    pub use crate::linear_algebra::solve_linear_system;
    pub use crate::optimization::{
        LeastSquaresResult, LevenbergMarquardt, LevenbergMarquardtConfig, Termination,
    };
}

pub use error::{MathError, MathResult};
