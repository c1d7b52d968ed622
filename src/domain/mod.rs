//! Domain types used throughout the fetchers.
//!
//! This module defines:
//!
//! - normalized records (`EconomicEvent`, `SeriesReading`, `BondYield`, ...)
//! - CLI-facing enums (`Importance`, `YieldSource`)
//! - static instrument tables (`instruments`)
//! - per-command run results (`results`)

pub mod instruments;
pub mod results;
pub mod types;

pub use results::*;
pub use types::*;
