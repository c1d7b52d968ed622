//! Output files.

pub mod export;

pub use export::*;
