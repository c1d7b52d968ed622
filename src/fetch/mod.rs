//! Retrieval helpers shared by the yield-curve fetchers.

pub mod fallback;

pub use fallback::*;
