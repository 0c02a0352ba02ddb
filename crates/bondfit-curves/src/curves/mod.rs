//! Discount curve implementations.
//!
//! - [`FlatDiscountCurve`]: one discount factor for every date
//! - [`FnDiscountCurve`]: any `Fn(Date) -> f64`, for ad hoc test curves
//! - [`SplineDiscountCurve`]: cubic spline over knot discount factors, the
//!   output of calibration

mod flat;
mod function;
mod spline;

pub use flat::FlatDiscountCurve;
pub use function::FnDiscountCurve;
pub use spline::{ExtrapolationPolicy, SplineDiscountCurve};
