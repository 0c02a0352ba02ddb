//! Bond instruments.

mod bond;

pub use bond::{construct_semi_annual_bond, Bond};
