//! Core math modules.

pub mod integrate;
pub mod rational;
pub mod stable;
