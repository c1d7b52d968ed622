//! Terminal summaries printed after each run.
//!
//! Written to stdout; logs go to stderr so the two never interleave in pipes.

use crate::domain::{
    BondListRun, CountryCurve, EconomicEvent, GlobalRun, IndicatorsRun, MarketsRun, YieldCurveRun,
};
use crate::plot::render_yield_bars;
use crate::report::{NA, cell, fmt_num, fmt_pct, fmt_signed_pct};

const RULE: &str = "============================================================";
const EVENT_PREVIEW: usize = 10;

/// Title, total count and the first few events of a list.
pub fn format_event_preview(title: &str, events: &[EconomicEvent]) -> String {
    let mut out = String::new();
    out.push_str(&format!("{title}: {} events\n", events.len()));
    for ev in events.iter().take(EVENT_PREVIEW) {
        out.push_str(&format!(
            "  {} {:<7} {:<16} {}",
            ev.date,
            cell(&ev.time),
            truncate(cell(&ev.country), 16),
            ev.event
        ));
        if !ev.forecast.trim().is_empty() || !ev.previous.trim().is_empty() {
            out.push_str(&format!("  (forecast {} | previous {})", cell(&ev.forecast), cell(&ev.previous)));
        }
        out.push('\n');
    }
    if events.len() > EVENT_PREVIEW {
        out.push_str(&format!("  ... and {} more\n", events.len() - EVENT_PREVIEW));
    }
    out
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut t: String = s.chars().take(max.saturating_sub(1)).collect();
    t.push('…');
    t
}

pub fn format_indicators(run: &IndicatorsRun) -> String {
    let mut out = format!("{RULE}\nUS indicators ({})\n{RULE}\n", run.source);
    if run.indicators.is_empty() {
        out.push_str("no data\n");
    }
    for r in &run.indicators {
        out.push_str(&format!(
            "  {:<10} {:>14} {:>9}  {}\n",
            r.series_id,
            r.latest.value,
            fmt_signed_pct(r.change_percent),
            r.latest.date
        ));
    }
    out
}

pub fn format_global(run: &GlobalRun) -> String {
    let mut out = format!("{RULE}\nGlobal indicators\n{RULE}\n");
    for region in &run.regions {
        out.push_str(&format!("{} [{}]\n", region.region, region.source));
        if region.indicators.is_empty() {
            out.push_str("  no data\n");
        }
        for ind in &region.indicators {
            out.push_str(&format!(
                "  {:<20} {:>12}  {}\n",
                ind.name,
                ind.value.as_deref().unwrap_or(NA),
                ind.period.as_deref().unwrap_or(NA)
            ));
        }
    }
    out
}

/// Per-maturity table of one curve followed by its bar chart.
pub fn format_curve(curve: &CountryCurve) -> String {
    let mut out = format!("{} ({})\n", curve.country_name_ja, curve.country_name);
    out.push_str(&format!("  {:<8} {:>8} {:>9} {:>9}  {}\n", "Maturity", "Yield", "Change", "Change %", "Symbol"));
    for b in &curve.bonds {
        out.push_str(&format!(
            "  {:<8} {:>8} {:>9} {:>9}  {}\n",
            format!("{}Y", b.period),
            fmt_pct(b.yield_pct),
            fmt_signed_pct(b.change),
            fmt_signed_pct(b.change_pct),
            b.symbol
        ));
    }
    for line in render_yield_bars(curve).lines() {
        out.push_str(&format!("  {line}\n"));
    }
    out
}

pub fn format_yield_curves(run: &YieldCurveRun) -> String {
    let mut out = format!(
        "{RULE}\nYIELD CURVE SUMMARY ({})\nFetch Date: {}\n{RULE}\n",
        run.source.display_name(),
        run.timestamp.format("%Y-%m-%d %H:%M:%S")
    );
    if run.curves.is_empty() {
        out.push_str("no data\n");
    }
    for curve in &run.curves {
        out.push('\n');
        out.push_str(&format_curve(curve));
    }
    out
}

pub fn format_markets(run: &MarketsRun) -> String {
    let mut out = format!("{RULE}\nMarkets\n{RULE}\n");
    for section in &run.sections {
        out.push_str(&format!("{}\n", section.title));
        if section.quotes.is_empty() {
            out.push_str("  no data\n");
        }
        for q in &section.quotes {
            let latest = if section.is_rate { fmt_pct(Some(q.latest)) } else { fmt_num(Some(q.latest), 2) };
            out.push_str(&format!("  {:<14} {:>12} {:>9}\n", q.name, latest, fmt_signed_pct(q.change_percent)));
        }
    }
    out
}

pub fn format_bond_list(run: &BondListRun) -> String {
    let mut out = format!("{RULE}\nAvailable government bonds: {}\n{RULE}\n", run.total);
    for (country, bonds) in &run.by_country {
        let periods: Vec<String> = bonds
            .iter()
            .map(|b| b.period.map(|p| format!("{p}Y")).unwrap_or_else(|| "?".to_string()))
            .collect();
        out.push_str(&format!("  {:<16} {:>3}  {}\n", country, bonds.len(), periods.join(" ")));
    }
    if !run.unclassified.is_empty() {
        out.push_str(&format!("  {:<16} {:>3}\n", "(other)", run.unclassified.len()));
    }
    out
}
