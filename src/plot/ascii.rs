//! Unicode bar rendering of a yield curve for terminal and Markdown output.
//!
//! One line per maturity:
//!
//! ```text
//! 2Y    3.52% ███████ ▼
//! 10Y   4.25% ████████ ▲
//! ```
//!
//! Bar length is `round(yield × 2)` cells; negative yields get an empty bar.

use crate::domain::{BondYield, CountryCurve};

const BAR: char = '█';

fn direction_mark(change: Option<f64>) -> char {
    match change {
        Some(c) if c > 0.0 => '▲',
        Some(c) if c < 0.0 => '▼',
        _ => '─',
    }
}

fn bar_cells(yield_pct: f64) -> usize {
    let cells = (yield_pct * 2.0).round();
    if cells.is_finite() && cells > 0.0 { cells as usize } else { 0 }
}

fn bar_line(bond: &BondYield) -> Option<String> {
    let y = bond.yield_pct.filter(|y| y.is_finite())?;
    let bar: String = std::iter::repeat_n(BAR, bar_cells(y)).collect();
    Some(format!(
        "{:<5} {:>6.2}% {} {}",
        format!("{}Y", bond.period),
        y,
        bar,
        direction_mark(bond.change)
    ))
}

/// Bars for every bond of `curve` that has a yield, in curve order.
pub fn render_yield_bars(curve: &CountryCurve) -> String {
    let lines: Vec<String> = curve.bonds.iter().filter_map(bar_line).collect();
    if lines.is_empty() {
        return "(no data)".to_string();
    }
    lines.join("\n")
}
