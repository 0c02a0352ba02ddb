//! # Bondfit Curves
//!
//! Discount curves and their calibration for the bondfit library.
//!
//! This crate provides:
//!
//! - **Curve Trait**: [`DiscountCurve`], a date to discount factor function
//! - **Curve Types**: flat, closure-backed and fitted cubic-spline curves
//! - **Conversion**: discount factor to annual yield and back
//! - **Calibration**: joint Levenberg-Marquardt fit of spline knot values to
//!   observed instrument prices
//!
//! ## Quick Start
//!
//! ```rust
//! use bondfit_curves::prelude::*;
//!
//! let today = Date::from_ymd(2020, 7, 23).unwrap();
//!
//! // Knot times are year fractions from today, knot values discount factors
//! let curve = SplineDiscountCurve::new(
//!     today,
//!     vec![0.0, 1.0, 2.0, 3.0],
//!     vec![1.0, 0.99, 0.975, 0.955],
//! )
//! .unwrap();
//!
//! let maturity = Date::from_ymd(2022, 7, 23).unwrap();
//! let df = curve.discount_factor(maturity).unwrap();
//! let y = discount_to_yield(df, maturity, today).unwrap();
//! assert!(y > 0.0 && y < 0.02);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::doc_markdown)]

pub mod calibration;
pub mod conversion;
pub mod curves;
pub mod error;
pub mod traits;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::calibration::{
        fit_discount_curve, CalibrationInstrument, CalibrationResult, DiscountCurveFitter,
        DiscountFitOptions,
    };
    pub use crate::conversion::{discount_to_yield, yield_to_discount};
    pub use crate::curves::{
        ExtrapolationPolicy, FlatDiscountCurve, FnDiscountCurve, SplineDiscountCurve,
    };
    pub use crate::error::{CurveError, CurveResult};
    pub use crate::traits::DiscountCurve;
    pub use bondfit_core::types::Date;
}

pub use conversion::{discount_to_yield, yield_to_discount};
pub use error::{CurveError, CurveResult};
pub use traits::DiscountCurve;
