//! # Bondfit Bonds
//!
//! Coupon bonds, their valuation, and discount curve fitting to bond prices
//! for the bondfit library.
//!
//! This crate provides:
//!
//! - **Cash Flows**: [`Coupon`](cashflows::Coupon) records and annual coupon
//!   schedules rolled to business days
//! - **Instruments**: [`Bond`](instruments::Bond), including semi-annual
//!   bonds built from two interleaved annual series
//! - **Pricing**: dirty value against any
//!   [`DiscountCurve`](bondfit_curves::DiscountCurve)
//! - **Calibration**: bonds as curve calibration instruments and
//!   [`fit_discount_curve`](curve_instruments::fit_discount_curve)
//!
//! ## Example
//!
//! ```rust
//! use bondfit_bonds::prelude::*;
//!
//! let d = |y, m, day| Date::from_ymd(y, m, day).unwrap();
//!
//! let bond = Bond::semi_annual(d(2020, 11, 21), d(2021, 5, 21), d(2030, 5, 21), 0.01, 100.0)
//!     .unwrap();
//! assert_eq!(bond.coupons().len(), 20);
//!
//! // Undiscounted, the bond is worth its principal plus every live coupon
//! let value = bond.dirty_value(&FlatDiscountCurve::new(1.0), d(2020, 7, 20)).unwrap();
//! assert!((value - 110.0).abs() < 1e-12);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::float_cmp)]

pub mod cashflows;
pub mod curve_instruments;
pub mod error;
pub mod instruments;
pub mod pricing;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::cashflows::{generate_annual_coupons, Coupon};
    pub use crate::curve_instruments::{fit_bonds, fit_discount_curve};
    pub use crate::error::{BondError, BondResult};
    pub use crate::instruments::{construct_semi_annual_bond, Bond};
    pub use crate::pricing::dirty_value;

    pub use bondfit_core::types::Date;
    pub use bondfit_curves::calibration::{
        CalibrationInstrument, CalibrationResult, DiscountCurveFitter, DiscountFitOptions,
    };
    pub use bondfit_curves::conversion::discount_to_yield;
    pub use bondfit_curves::curves::{
        ExtrapolationPolicy, FlatDiscountCurve, FnDiscountCurve, SplineDiscountCurve,
    };
    pub use bondfit_curves::DiscountCurve;
}

pub use error::{BondError, BondResult};
