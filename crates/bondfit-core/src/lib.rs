//! # Bondfit Core
//!
//! Calendar building blocks for the bondfit discount curve library.
//!
//! - **Types**: the [`Date`] newtype used by every other crate
//! - **Day Count Conventions**: Actual/365 Fixed year fractions and their inverse
//! - **Business Day Calendars**: weekend-only business day rolling
//!
//! ## Example
//!
//! ```rust
//! use bondfit_core::prelude::*;
//!
//! let today = Date::from_ymd(2020, 7, 23).unwrap();
//! let maturity = Date::from_ymd(2021, 7, 23).unwrap();
//!
//! let t = Act365Fixed.year_fraction(today, maturity);
//! assert!((t - 1.0).abs() < 1e-12);
//!
//! // 2020-11-21 is a Saturday
//! let saturday = Date::from_ymd(2020, 11, 21).unwrap();
//! assert_eq!(next_business_day(saturday), Date::from_ymd(2020, 11, 23).unwrap());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::doc_markdown)]

pub mod calendars;
pub mod daycounts;
pub mod error;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::calendars::{next_business_day, Calendar, WeekendCalendar};
    pub use crate::daycounts::{Act365Fixed, DayCount};
    pub use crate::error::{CoreError, CoreResult};
    pub use crate::types::Date;
}

// Re-export commonly used types at crate root
pub use error::{CoreError, CoreResult};
pub use types::Date;
