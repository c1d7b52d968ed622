//! Yield-curve plots: text bars for terminal/Markdown, SVG charts for files.

pub mod ascii;
pub mod chart;

pub use ascii::*;
pub use chart::write_yield_charts;
