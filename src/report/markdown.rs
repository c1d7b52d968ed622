//! Markdown reports, one per command.

use chrono::{DateTime, Local};

use crate::calendar::{group_by_date, translate_indicator};
use crate::domain::{
    BondListRun, CalendarRangeRun, EconomicEvent, ForecastRun, GlobalRun, IndicatorsRun, InvestingRun, MarketsRun,
    ReleasesRun, YieldCurveRun,
};
use crate::math::change::surprise;
use crate::plot::render_yield_bars;
use crate::report::{NA, cell, fmt_num, fmt_pct, fmt_signed_pct};

fn header(title: &str, timestamp: &DateTime<Local>, source: &str) -> String {
    let mut out = String::new();
    out.push_str(&format!("# {title}\n\n"));
    out.push_str(&format!("**取得日時**: {}\n", timestamp.format("%Y-%m-%d %H:%M:%S")));
    out.push_str(&format!("**データソース**: {source}\n\n"));
    out
}

fn table(out: &mut String, columns: &[&str]) {
    out.push_str(&format!("| {} |\n", columns.join(" | ")));
    out.push_str(&format!("|{}\n", "------|".repeat(columns.len())));
}

fn row(out: &mut String, cells: &[&str]) {
    out.push_str(&format!("| {} |\n", cells.join(" | ")));
}

fn empty_note(out: &mut String) {
    out.push_str("データなし\n\n");
}

pub fn indicators_markdown(run: &IndicatorsRun) -> String {
    let mut out = header("米国経済指標", &run.timestamp, run.source);
    if run.indicators.is_empty() {
        empty_note(&mut out);
        return out;
    }
    table(&mut out, &["指標", "最新値", "前回値", "変化率", "日付"]);
    for r in &run.indicators {
        let prev = r.previous.as_ref().map(|p| p.value.as_str()).unwrap_or(NA);
        row(
            &mut out,
            &[
                &r.series_id,
                cell(&r.latest.value),
                cell(prev),
                &fmt_signed_pct(r.change_percent),
                &r.latest.date.to_string(),
            ],
        );
    }
    out.push('\n');
    out
}

pub fn global_markdown(run: &GlobalRun) -> String {
    let mut out = header("世界経済指標", &run.timestamp, "FRED API / OECD / World Bank");
    if run.regions.is_empty() {
        empty_note(&mut out);
    }
    for region in &run.regions {
        out.push_str(&format!("## {}\n\n", region.region));
        out.push_str(&format!("**データソース**: {}\n\n", region.source));
        if region.indicators.is_empty() {
            empty_note(&mut out);
            continue;
        }
        table(&mut out, &["指標", "値", "期間"]);
        for ind in &region.indicators {
            row(
                &mut out,
                &[
                    &ind.name,
                    ind.value.as_deref().unwrap_or(NA),
                    ind.period.as_deref().unwrap_or(NA),
                ],
            );
        }
        out.push('\n');
    }
    out
}

fn release_section(out: &mut String, title: &str, events: &[EconomicEvent]) {
    out.push_str(&format!("## {title}\n\n"));
    if events.is_empty() {
        empty_note(out);
        return;
    }
    table(out, &["日付", "リリース"]);
    for ev in events {
        row(out, &[&ev.date.to_string(), &ev.event]);
    }
    out.push('\n');
}

pub fn releases_markdown(run: &ReleasesRun) -> String {
    let mut out = header("経済指標発表予定", &run.timestamp, "FRED API");
    release_section(&mut out, "今日の発表", &run.buckets.today);
    release_section(&mut out, "明日の発表", &run.buckets.tomorrow);
    release_section(&mut out, "今週の発表", &run.buckets.this_week);
    out
}

fn event_table(out: &mut String, events: &[EconomicEvent]) {
    table(out, &["時刻", "国", "指標", "重要度", "実績", "予想", "前回"]);
    for ev in events {
        row(
            out,
            &[
                cell(&ev.time),
                cell(&ev.country),
                &ev.event,
                cell(&ev.importance),
                cell(&ev.actual),
                cell(&ev.forecast),
                cell(&ev.previous),
            ],
        );
    }
    out.push('\n');
}

pub fn calendar_range_markdown(run: &CalendarRangeRun) -> String {
    let mut out = header(
        &format!("経済カレンダー ({} 〜 {})", run.start, run.end),
        &run.timestamp,
        "Trading Economics",
    );
    if let Some(country) = &run.country {
        out.push_str(&format!("**国**: {country}\n"));
    }
    if let Some(importance) = run.importance {
        out.push_str(&format!("**重要度**: {importance:?}\n"));
    }
    out.push_str(&format!("**件数**: {}\n\n", run.events.len()));

    if run.events.is_empty() {
        empty_note(&mut out);
        return out;
    }
    for (date, events) in group_by_date(run.events.clone()) {
        out.push_str(&format!("## {} ({})\n\n", date, date.format("%a")));
        event_table(&mut out, &events);
    }
    out
}

pub fn forecast_markdown(run: &ForecastRun) -> String {
    let mut out = header("経済カレンダー（予想値付き）", &run.timestamp, "Trading Economics");
    if run.sections.is_empty() {
        empty_note(&mut out);
    }
    for section in &run.sections {
        out.push_str(&format!("## {} ({} events)\n\n", section.title, section.events.len()));
        if section.events.is_empty() {
            empty_note(&mut out);
            continue;
        }
        table(&mut out, &["日付", "時刻", "国", "指標", "重要度", "予想", "前回"]);
        for ev in &section.events {
            row(
                &mut out,
                &[
                    &ev.date.to_string(),
                    cell(&ev.time),
                    cell(&ev.country),
                    &ev.event,
                    cell(&ev.importance),
                    cell(&ev.forecast),
                    cell(&ev.previous),
                ],
            );
        }
        out.push('\n');
    }
    out
}

fn investing_day(out: &mut String, title: &str, events: &[EconomicEvent], with_surprise: bool) {
    out.push_str(&format!("### {title}\n\n"));
    if events.is_empty() {
        empty_note(out);
        return;
    }
    if with_surprise {
        table(out, &["時刻", "指標", "重要度", "実績", "予想", "前回", "サプライズ"]);
    } else {
        table(out, &["時刻", "指標", "重要度", "予想", "前回"]);
    }
    for ev in events {
        let name = translate_indicator(&ev.event);
        if with_surprise {
            let s = surprise(&ev.actual, &ev.forecast).map(|v| format!("{v:+.2}"));
            row(
                out,
                &[
                    cell(&ev.time),
                    &name,
                    cell(&ev.importance),
                    cell(&ev.actual),
                    cell(&ev.forecast),
                    cell(&ev.previous),
                    s.as_deref().unwrap_or("-"),
                ],
            );
        } else {
            row(
                out,
                &[
                    cell(&ev.time),
                    &name,
                    cell(&ev.importance),
                    cell(&ev.forecast),
                    cell(&ev.previous),
                ],
            );
        }
    }
    out.push('\n');
}

pub fn investing_markdown(run: &InvestingRun) -> String {
    let mut out = header("経済指標カレンダー", &run.timestamp, "Investing.com");
    if run.countries.is_empty() {
        empty_note(&mut out);
    }
    for c in &run.countries {
        out.push_str(&format!("## {} ({})\n\n", c.country.to_uppercase(), c.code.to_uppercase()));
        investing_day(&mut out, "昨日の実績", &c.days.yesterday, true);
        investing_day(&mut out, "今日の予定", &c.days.today, true);
        investing_day(&mut out, "明日の予定", &c.days.tomorrow, false);
    }
    out
}

pub fn yield_curve_markdown(run: &YieldCurveRun) -> String {
    let mut out = header("イールドカーブ", &run.timestamp, run.source.display_name());
    if run.curves.is_empty() {
        empty_note(&mut out);
    }
    for curve in &run.curves {
        out.push_str(&format!("## {} ({})\n\n", curve.country_name_ja, curve.country_name));
        table(&mut out, &["年限", "利回り", "前日", "変化", "変化率", "シンボル", "日付"]);
        for b in &curve.bonds {
            let date = b.date.map(|d| d.to_string());
            row(
                &mut out,
                &[
                    &format!("{}Y", b.period),
                    &fmt_pct(b.yield_pct),
                    &fmt_pct(b.previous_yield),
                    &fmt_signed_pct(b.change),
                    &fmt_signed_pct(b.change_pct),
                    &b.symbol,
                    date.as_deref().unwrap_or(NA),
                ],
            );
        }
        out.push_str("\n```\n");
        out.push_str(&render_yield_bars(curve));
        out.push_str("\n```\n\n");
    }
    out
}

pub fn markets_markdown(run: &MarketsRun) -> String {
    let mut out = header("マーケット概況", &run.timestamp, "Yahoo Finance");
    for section in &run.sections {
        out.push_str(&format!("## {}\n\n", section.title));
        if section.quotes.is_empty() {
            empty_note(&mut out);
            continue;
        }
        table(&mut out, &["銘柄", "最新", "前回", "変化率", "日付"]);
        for q in &section.quotes {
            let (latest, previous) = if section.is_rate {
                (fmt_pct(Some(q.latest)), fmt_pct(q.previous))
            } else {
                (fmt_num(Some(q.latest), 2), fmt_num(q.previous, 2))
            };
            let date = q.date.map(|d| d.to_string());
            row(
                &mut out,
                &[
                    &q.name,
                    &latest,
                    &previous,
                    &fmt_signed_pct(q.change_percent),
                    date.as_deref().unwrap_or(NA),
                ],
            );
        }
        out.push('\n');
    }
    out
}

pub fn bond_list_markdown(run: &BondListRun) -> String {
    let mut out = header("利用可能な国債一覧", &run.timestamp, "TradingView");
    out.push_str(&format!("**総数**: {}\n\n", run.total));
    for (country, bonds) in &run.by_country {
        out.push_str(&format!("## {country} ({})\n\n", bonds.len()));
        table(&mut out, &["シンボル", "名称", "年限", "利回り"]);
        for b in bonds {
            let period = b.period.map(|p| format!("{p}Y"));
            row(
                &mut out,
                &[
                    &b.symbol,
                    &b.description,
                    period.as_deref().unwrap_or(NA),
                    &fmt_pct(b.close),
                ],
            );
        }
        out.push('\n');
    }
    if !run.unclassified.is_empty() {
        out.push_str(&format!("## その他 ({})\n\n", run.unclassified.len()));
        for b in &run.unclassified {
            out.push_str(&format!("- {} ({})\n", b.symbol, b.description));
        }
        out.push('\n');
    }
    out
}
