//! Reporting: Markdown files and terminal summaries.
//!
//! We keep formatting code in one place so:
//! - source clients only deal with response shapes
//! - output changes are localized (Markdown and terminal share the cell helpers)

pub mod format;
pub mod markdown;

pub use format::*;
pub use markdown::*;

/// Rendered in place of a missing number.
pub const NA: &str = "N/A";

/// `4.25` with `decimals` places, or `N/A`.
pub fn fmt_num(v: Option<f64>, decimals: usize) -> String {
    match v {
        Some(x) if x.is_finite() => format!("{x:.decimals$}"),
        _ => NA.to_string(),
    }
}

/// `4.25%`, or `N/A`.
pub fn fmt_pct(v: Option<f64>) -> String {
    match v {
        Some(x) if x.is_finite() => format!("{x:.2}%"),
        _ => NA.to_string(),
    }
}

/// Signed change such as `+0.03%`, or `N/A`.
pub fn fmt_signed_pct(v: Option<f64>) -> String {
    match v {
        Some(x) if x.is_finite() => format!("{x:+.2}%"),
        _ => NA.to_string(),
    }
}

/// Empty text cells render as `-` so tables keep their shape.
pub fn cell(s: &str) -> &str {
    let t = s.trim();
    if t.is_empty() { "-" } else { t }
}
