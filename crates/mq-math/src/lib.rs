//! Model quality math utilities.

pub mod math;

pub use math::integrate::*;
pub use math::rational::Fraction;
pub use math::stable::*;
