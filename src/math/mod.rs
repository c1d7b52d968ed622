//! Numeric helpers.

pub mod change;

pub use change::*;
