//! Per-command fetch → shape → persist workflows.
//!
//! Every data command follows the same steps:
//! source fetch (errors logged and skipped) -> run result -> JSON + Markdown
//! artifacts -> terminal summary.
//!
//! Fetch failures never abort a run; only configuration and output I/O do.

use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, Days, Duration, Local, NaiveDate};
use reqwest::blocking::Client;
use serde::Serialize;
use tracing::{info, warn};

use crate::calendar::{dedup_by_time_and, partition_three_days, partition_week, translate_indicator};
use crate::cli::CalendarArgs;
use crate::config::Settings;
use crate::data::http::{build_client, check_status};
use crate::data::investing::BondQuote;
use crate::data::tradingview::period_from_description;
use crate::data::yahoo::PriceSnapshot;
use crate::data::{
    CalendarQuery, FredClient, InvestingClient, OecdClient, TradingEconomicsClient, TradingViewClient, WorldBankClient,
    YahooClient,
};
use crate::domain::instruments::{
    BOND_COUNTRIES, BondSpec, CALENDAR_COUNTRIES, CHECK_SITES, CountryBonds, FORECAST_MAJOR_COUNTRIES,
    FRED_INDICATORS, FRED_MAJOR_RELEASES, GLOBAL_REGIONS, GlobalSource, MARKET_GROUPS, bond_country,
};
use crate::domain::{
    BondListRun, BondYield, CalendarRangeRun, CountryCalendar, CountryCurve, EconomicEvent, EventSection, ForecastRun,
    GlobalRun, IndicatorValue, IndicatorsRun, InvestingRun, MarketQuote, MarketSection, MarketsRun, RegionIndicators,
    ReleasesRun, ScannerBond, YieldCurveRun, YieldSource,
};
use crate::error::{AppError, ErrorKind};
use crate::fetch::{Resolved, RetryPolicy, fetch_with_fallback};
use crate::io::{ArtifactSpec, WrittenArtifacts, run_timestamp, write_artifacts};
use crate::{plot, report};

const CHECK_TIMEOUT_SECS: u64 = 10;
const SCAN_LIMIT: usize = 200;

/// Everything a command needs besides its own arguments.
pub struct RunContext<'a> {
    pub settings: &'a Settings,
    pub client: Client,
    pub now: DateTime<Local>,
    pub policy: RetryPolicy,
}

impl<'a> RunContext<'a> {
    pub fn new(settings: &'a Settings) -> Result<Self, AppError> {
        Ok(Self {
            settings,
            client: build_client(settings.http_timeout)?,
            now: Local::now(),
            policy: RetryPolicy::default(),
        })
    }

    pub fn today(&self) -> NaiveDate {
        self.now.date_naive()
    }

    fn persist<T: Serialize>(&self, spec: ArtifactSpec, value: &T, markdown: &str) -> Result<WrittenArtifacts, AppError> {
        write_artifacts(&spec, &run_timestamp(self.now), value, markdown)
    }
}

/// Log a swallowed source failure with its kind.
fn skip(what: &str, err: &AppError) {
    warn!(what, kind = err.kind().label(), error = %err, "fetch failed, continuing without it");
}

// ---------------------------------------------------------------------------
// indicators / global / releases (FRED, OECD, World Bank)
// ---------------------------------------------------------------------------

pub fn run_indicators(ctx: &RunContext<'_>) -> Result<IndicatorsRun, AppError> {
    let fred = FredClient::new(ctx.client.clone(), ctx.settings.fred_api_key.clone());

    let mut indicators = Vec::new();
    for (name, series_id) in FRED_INDICATORS {
        match fred.latest_reading(series_id) {
            Ok(Some(reading)) => {
                info!(name, value = %reading.latest.value, date = %reading.latest.date, "indicator");
                indicators.push(reading);
            }
            Ok(None) => {}
            Err(err) => skip(name, &err),
        }
    }

    let run = IndicatorsRun {
        timestamp: ctx.now,
        source: "FRED API",
        indicators,
    };
    ctx.persist(
        ArtifactSpec::flat(ctx.settings.daily_dir(), "indicators").with_latest("latest"),
        &run,
        &report::indicators_markdown(&run),
    )?;
    println!("{}", report::format_indicators(&run));
    Ok(run)
}

pub fn run_global(ctx: &RunContext<'_>) -> Result<GlobalRun, AppError> {
    let fred = FredClient::new(ctx.client.clone(), ctx.settings.fred_api_key.clone());
    let oecd = OecdClient::new(ctx.client.clone());
    let world_bank = WorldBankClient::new(ctx.client.clone());

    let mut regions = Vec::with_capacity(GLOBAL_REGIONS.len());
    for region in GLOBAL_REGIONS {
        info!(region = region.label, source = region.source.display_name(), "fetching region");
        let mut indicators = Vec::new();
        for (name, id) in region.indicators {
            let result = match region.source {
                GlobalSource::Fred => fred.latest_reading(id).map(|r| {
                    r.map(|r| IndicatorValue {
                        name: name.to_string(),
                        value: Some(r.latest.value),
                        period: Some(r.latest.date.to_string()),
                    })
                }),
                GlobalSource::Oecd => oecd.latest(region.code, id, name),
                GlobalSource::WorldBank => world_bank.latest(region.code, id, name),
            };
            match result {
                Ok(Some(v)) => indicators.push(v),
                Ok(None) => warn!(region = region.label, indicator = *name, "no data"),
                Err(err) => skip(name, &err),
            }
        }
        regions.push(RegionIndicators {
            region: region.label.to_string(),
            source: region.source.display_name(),
            indicators,
        });
    }

    let run = GlobalRun {
        timestamp: ctx.now,
        regions,
    };
    ctx.persist(
        ArtifactSpec::flat(ctx.settings.daily_dir(), "global_indicators"),
        &run,
        &report::global_markdown(&run),
    )?;
    println!("{}", report::format_global(&run));
    Ok(run)
}

pub fn run_releases(ctx: &RunContext<'_>) -> Result<ReleasesRun, AppError> {
    let fred = FredClient::new(ctx.client.clone(), ctx.settings.fred_api_key.clone());
    let today = ctx.today();
    let horizon = today + Duration::days(7);

    let mut events = Vec::new();
    for (release_id, name) in FRED_MAJOR_RELEASES {
        match fred.release_dates(*release_id, today, horizon) {
            Ok(dates) => events.extend(dates.into_iter().map(|d| {
                let mut ev = EconomicEvent::new(d, *name);
                ev.country = "United States".to_string();
                ev
            })),
            Err(err) => skip(name, &err),
        }
    }
    events.sort_by(|a, b| a.date.cmp(&b.date));

    let run = ReleasesRun {
        timestamp: ctx.now,
        reference_date: today,
        buckets: partition_week(events, today),
    };
    ctx.persist(
        ArtifactSpec::flat(ctx.settings.daily_dir(), "calendar"),
        &run,
        &report::releases_markdown(&run),
    )?;
    println!("{}", report::format_event_preview("Today", &run.buckets.today));
    println!("{}", report::format_event_preview("Tomorrow", &run.buckets.tomorrow));
    println!("{}", report::format_event_preview("This week", &run.buckets.this_week));
    Ok(run)
}

// ---------------------------------------------------------------------------
// calendar / forecast (Trading Economics)
// ---------------------------------------------------------------------------

fn month_range(month: &str) -> Result<(NaiveDate, NaiveDate), AppError> {
    let first = NaiveDate::parse_from_str(&format!("{}-01", month.trim()), "%Y-%m-%d")
        .map_err(|_| AppError::config(format!("--month must look like YYYY-MM, got '{month}'.")))?;
    let next = if first.month() == 12 {
        NaiveDate::from_ymd_opt(first.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(first.year(), first.month() + 1, 1)
    }
    .ok_or_else(|| AppError::config(format!("--month out of range: '{month}'.")))?;
    Ok((first, next - Duration::days(1)))
}

fn days_after(date: NaiveDate, days: u64) -> Result<NaiveDate, AppError> {
    date.checked_add_days(Days::new(days))
        .ok_or_else(|| AppError::config(format!("{date} + {days} days is outside the supported date range.")))
}

/// Resolve `--start/--end`, `--month`, `--days` into an inclusive range.
pub fn resolve_range(args: &CalendarArgs, today: NaiveDate) -> Result<(NaiveDate, NaiveDate), AppError> {
    let (start, end) = if let Some(start) = args.start {
        match args.end {
            Some(end) => (start, end),
            None => (start, days_after(start, 7)?),
        }
    } else if let Some(month) = &args.month {
        month_range(month)?
    } else if let Some(days) = args.days {
        (today, days_after(today, u64::from(days))?)
    } else {
        (today, days_after(today, 7)?)
    };
    if end < start {
        return Err(AppError::config(format!("--end ({end}) is before --start ({start}).")));
    }
    Ok((start, end))
}

pub fn run_calendar(ctx: &RunContext<'_>, args: &CalendarArgs) -> Result<CalendarRangeRun, AppError> {
    let (start, end) = resolve_range(args, ctx.today())?;
    let te = TradingEconomicsClient::new(ctx.client.clone(), ctx.settings.te_api_key.clone());

    let mut query = CalendarQuery::new(start, end);
    query.country = args.country.clone();
    query.importance = args.importance;

    let events = te.calendar(&query).unwrap_or_else(|err| {
        skip("Trading Economics calendar", &err);
        Vec::new()
    });

    let run = CalendarRangeRun {
        timestamp: ctx.now,
        start,
        end,
        country: args.country.clone(),
        importance: args.importance,
        events,
    };
    ctx.persist(
        ArtifactSpec::flat(ctx.settings.daily_dir(), "calendar_range"),
        &run,
        &report::calendar_range_markdown(&run),
    )?;
    println!("{}", report::format_event_preview(&format!("{start} .. {end}"), &run.events));
    Ok(run)
}

fn forecast_events(te: &TradingEconomicsClient, country: &str, start: NaiveDate, end: NaiveDate) -> Vec<EconomicEvent> {
    let mut query = CalendarQuery::new(start, end);
    query.country = Some(country.to_string());
    match te.calendar(&query) {
        Ok(events) => events.into_iter().filter(EconomicEvent::has_forecast).collect(),
        Err(err) => {
            skip(country, &err);
            Vec::new()
        }
    }
}

pub fn run_forecast(ctx: &RunContext<'_>, major: bool, country: &str) -> Result<ForecastRun, AppError> {
    let te = TradingEconomicsClient::new(ctx.client.clone(), ctx.settings.te_api_key.clone());
    let today = ctx.today();

    let sections = if major {
        let end = today + Duration::days(7);
        FORECAST_MAJOR_COUNTRIES
            .iter()
            .map(|(name, label)| EventSection {
                title: label.to_string(),
                events: forecast_events(&te, name, today, end),
            })
            .collect()
    } else {
        let tomorrow = today + Duration::days(1);
        let events = forecast_events(&te, country, today, tomorrow);
        let (today_events, tomorrow_events): (Vec<_>, Vec<_>) = events
            .into_iter()
            .filter(|e| e.date == today || e.date == tomorrow)
            .partition(|e| e.date == today);
        vec![
            EventSection {
                title: format!("今日の予定 {today}"),
                events: today_events,
            },
            EventSection {
                title: format!("明日の予定 {tomorrow}"),
                events: tomorrow_events,
            },
        ]
    };

    let run = ForecastRun {
        timestamp: ctx.now,
        sections,
    };
    ctx.persist(
        ArtifactSpec::flat(ctx.settings.daily_dir(), "calendar_forecast"),
        &run,
        &report::forecast_markdown(&run),
    )?;
    for section in &run.sections {
        println!("{}", report::format_event_preview(&section.title, &section.events));
    }
    Ok(run)
}

// ---------------------------------------------------------------------------
// investing (Investing.com scrape)
// ---------------------------------------------------------------------------

/// `(name, code)` pairs to include; unknown names are kept with their own name as code.
fn calendar_countries(requested: &[String]) -> Vec<(String, String)> {
    if requested.is_empty() {
        return CALENDAR_COUNTRIES
            .iter()
            .map(|(n, c)| (n.to_string(), c.to_string()))
            .collect();
    }
    requested
        .iter()
        .map(|r| {
            let name = r.trim().to_lowercase();
            let code = CALENDAR_COUNTRIES
                .iter()
                .find(|(n, _)| *n == name)
                .map(|(_, c)| c.to_string())
                .unwrap_or_else(|| name.clone());
            (name, code)
        })
        .collect()
}

fn country_matches(event: &EconomicEvent, country: &str) -> bool {
    event.country.trim().eq_ignore_ascii_case(country)
}

/// Split scraped rows per country, dedup each country and bucket by day.
pub fn build_investing_run(
    now: DateTime<Local>,
    countries: &[(String, String)],
    rows: &[EconomicEvent],
) -> InvestingRun {
    let today = now.date_naive();
    let countries = countries
        .iter()
        .map(|(name, code)| {
            let mine: Vec<EconomicEvent> = rows.iter().filter(|e| country_matches(e, name)).cloned().collect();
            let mut days = partition_three_days(mine, today);
            // Keyed on the translated name so "X (Dec)" and "X" collapse.
            days.yesterday = dedup_by_time_and(days.yesterday, translate_indicator);
            days.today = dedup_by_time_and(days.today, translate_indicator);
            days.tomorrow = dedup_by_time_and(days.tomorrow, translate_indicator);
            CountryCalendar {
                country: name.clone(),
                code: code.clone(),
                days,
            }
        })
        .collect();
    InvestingRun {
        timestamp: now,
        reference_date: today,
        countries,
    }
}

pub fn run_investing(ctx: &RunContext<'_>, requested: &[String]) -> Result<InvestingRun, AppError> {
    let investing = InvestingClient::new(ctx.client.clone());
    let today = ctx.today();

    let mut rows = Vec::new();
    for offset in [-1i64, 0, 1] {
        let day = today + Duration::days(offset);
        match investing.calendar_day(day) {
            Ok(events) => rows.extend(events),
            Err(err) => skip(&format!("Investing.com calendar {day}"), &err),
        }
    }

    let run = build_investing_run(ctx.now, &calendar_countries(requested), &rows);
    ctx.persist(
        ArtifactSpec::split(ctx.settings.data_dir().join("economic_calendar"), "investing"),
        &run,
        &report::investing_markdown(&run),
    )?;
    for c in &run.countries {
        println!("{}", report::format_event_preview(&format!("{} yesterday", c.country), &c.days.yesterday));
        println!("{}", report::format_event_preview(&format!("{} today", c.country), &c.days.today));
        println!("{}", report::format_event_preview(&format!("{} tomorrow", c.country), &c.days.tomorrow));
    }
    Ok(run)
}

// ---------------------------------------------------------------------------
// yields (Yahoo / Investing.com / TradingView)
// ---------------------------------------------------------------------------

fn selected_countries(requested: &[String]) -> Result<Vec<&'static CountryBonds>, AppError> {
    if requested.is_empty() {
        return Ok(BOND_COUNTRIES.iter().collect());
    }
    requested
        .iter()
        .map(|r| {
            bond_country(r).ok_or_else(|| {
                let known: Vec<&str> = BOND_COUNTRIES.iter().map(|c| c.key).collect();
                AppError::config(format!("Unknown country '{r}'. Known: {}.", known.join(", ")))
            })
        })
        .collect()
}

fn new_curve(country: &CountryBonds, now: DateTime<Local>, mut bonds: Vec<BondYield>) -> CountryCurve {
    bonds.sort_by_key(|b| b.period);
    CountryCurve {
        country: country.key.to_string(),
        country_name: country.name.to_string(),
        country_name_ja: country.name_ja.to_string(),
        fetch_date: now,
        bonds,
    }
}

/// Yahoo snapshot for `spec`, recorded under the symbol that answered.
pub fn bond_from_snapshot(spec: &BondSpec, found: Resolved<PriceSnapshot>, today: NaiveDate) -> BondYield {
    let s = found.value;
    BondYield {
        period: spec.period,
        name: spec.name.to_string(),
        symbol: found.alias,
        yield_pct: Some(s.close),
        previous_yield: s.previous,
        change: s.change,
        change_pct: s.change_pct,
        date: s.date.or(Some(today)),
    }
}

/// Investing.com bond page for `spec`, recorded under the slug that answered.
pub fn bond_from_quote(spec: &BondSpec, found: Resolved<BondQuote>, today: NaiveDate) -> BondYield {
    let q = found.value;
    BondYield {
        period: spec.period,
        name: spec.name.to_string(),
        symbol: found.alias,
        yield_pct: Some(q.yield_pct),
        previous_yield: q.previous_yield(),
        change: q.change,
        change_pct: q.change_pct,
        date: Some(today),
    }
}

/// Walk each bond's aliases with `fetch` and assemble the country curve.
///
/// Bonds whose aliases are all exhausted are left out; `None` when none resolved.
pub fn resolve_country_curve<T, F>(
    country: &CountryBonds,
    now: DateTime<Local>,
    policy: RetryPolicy,
    aliases: fn(&BondSpec) -> &'static [&'static str],
    mut fetch: F,
    build: fn(&BondSpec, Resolved<T>, NaiveDate) -> BondYield,
) -> Option<CountryCurve>
where
    F: FnMut(&str) -> Result<Option<T>, AppError>,
{
    let today = now.date_naive();
    let bonds: Vec<BondYield> = country
        .bonds
        .iter()
        .filter_map(|spec| {
            let found = fetch_with_fallback(spec.name, aliases(spec), policy, &mut fetch).found()?;
            Some(build(spec, found, today))
        })
        .collect();
    (!bonds.is_empty()).then(|| new_curve(country, now, bonds))
}

fn yahoo_curves(ctx: &RunContext<'_>, countries: &[&'static CountryBonds]) -> Vec<CountryCurve> {
    let yahoo = YahooClient::new(ctx.client.clone());
    countries
        .iter()
        .filter_map(|country| {
            info!(country = country.name, "fetching yields (Yahoo)");
            resolve_country_curve(
                country,
                ctx.now,
                ctx.policy,
                |spec| spec.yahoo,
                |sym| yahoo.snapshot(sym),
                bond_from_snapshot,
            )
        })
        .collect()
}

fn investing_curves(ctx: &RunContext<'_>, countries: &[&'static CountryBonds]) -> Vec<CountryCurve> {
    let investing = InvestingClient::new(ctx.client.clone());
    countries
        .iter()
        .filter_map(|country| {
            info!(country = country.name, "fetching yields (Investing.com)");
            resolve_country_curve(
                country,
                ctx.now,
                ctx.policy,
                |spec| spec.investing,
                |slug| investing.bond(slug),
                bond_from_quote,
            )
        })
        .collect()
}

/// Curves from one TradingView scan.
///
/// The first row per maturity wins; the previous yield is `close - change`.
pub fn build_tradingview_curves(
    rows: &[ScannerBond],
    countries: &[&'static CountryBonds],
    now: DateTime<Local>,
) -> Vec<CountryCurve> {
    let today = now.date_naive();
    countries
        .iter()
        .filter_map(|country| {
            let mut bonds: Vec<BondYield> = Vec::new();
            for row in rows.iter().filter(|r| r.country == Some(country.key)) {
                let Some(period) = row.period else { continue };
                if bonds.iter().any(|b| b.period == period) {
                    continue;
                }
                let name = country
                    .find(period)
                    .map(|s| s.name.to_string())
                    .unwrap_or_else(|| row.description.clone());
                let previous_yield = match (row.close, row.change) {
                    (Some(c), Some(d)) => Some(c - d),
                    _ => None,
                };
                bonds.push(BondYield {
                    period,
                    name,
                    symbol: row.symbol.clone(),
                    yield_pct: row.close,
                    previous_yield,
                    change: row.change,
                    change_pct: row.change_pct,
                    date: Some(today),
                });
            }
            (!bonds.is_empty()).then(|| new_curve(country, now, bonds))
        })
        .collect()
}

fn tradingview_curves(ctx: &RunContext<'_>, countries: &[&'static CountryBonds]) -> Vec<CountryCurve> {
    let tv = TradingViewClient::new(ctx.client.clone());
    match tv.scan_gov_bonds(SCAN_LIMIT) {
        Ok(rows) => build_tradingview_curves(&rows, countries, ctx.now),
        Err(err) => {
            skip("TradingView scan", &err);
            Vec::new()
        }
    }
}

pub fn run_yields(ctx: &RunContext<'_>, source: YieldSource, requested: &[String]) -> Result<YieldCurveRun, AppError> {
    let countries = selected_countries(requested)?;
    info!(source = source.display_name(), countries = countries.len(), "fetching yield curves");

    let curves = match source {
        YieldSource::Yahoo => yahoo_curves(ctx, &countries),
        YieldSource::Investing => investing_curves(ctx, &countries),
        YieldSource::Tradingview => tradingview_curves(ctx, &countries),
    };

    let run = YieldCurveRun {
        timestamp: ctx.now,
        source,
        curves,
    };
    let base = ctx.settings.data_dir().join("yield_curves");
    ctx.persist(ArtifactSpec::split(&base, "yield_curve"), &run, &report::yield_curve_markdown(&run))?;
    plot::write_yield_charts(&base.join("images"), &run)?;
    println!("{}", report::format_yield_curves(&run));
    Ok(run)
}

// ---------------------------------------------------------------------------
// markets / bonds
// ---------------------------------------------------------------------------

pub fn run_markets(ctx: &RunContext<'_>) -> Result<MarketsRun, AppError> {
    let yahoo = YahooClient::new(ctx.client.clone());

    let sections = MARKET_GROUPS
        .iter()
        .map(|group| {
            let quotes = group
                .symbols
                .iter()
                .filter_map(|(symbol, name)| match yahoo.snapshot(symbol) {
                    Ok(Some(s)) => Some(MarketQuote {
                        symbol: symbol.to_string(),
                        name: name.to_string(),
                        latest: s.close,
                        previous: s.previous,
                        change_percent: s.change_pct,
                        date: s.date,
                    }),
                    Ok(None) => {
                        warn!(symbol, "no data");
                        None
                    }
                    Err(err) => {
                        skip(symbol, &err);
                        None
                    }
                })
                .collect();
            MarketSection {
                key: group.key,
                title: group.title,
                is_rate: group.is_rate,
                quotes,
            }
        })
        .collect();

    let run = MarketsRun {
        timestamp: ctx.now,
        sections,
    };
    ctx.persist(
        ArtifactSpec::flat(ctx.settings.daily_dir(), "markets"),
        &run,
        &report::markets_markdown(&run),
    )?;
    println!("{}", report::format_markets(&run));
    Ok(run)
}

pub fn run_bonds(ctx: &RunContext<'_>) -> Result<BondListRun, AppError> {
    let tv = TradingViewClient::new(ctx.client.clone());
    let rows = tv.scan_gov_bonds(SCAN_LIMIT).unwrap_or_else(|err| {
        skip("TradingView scan", &err);
        Vec::new()
    });

    let total = rows.len();
    let mut by_country: BTreeMap<String, Vec<_>> = BTreeMap::new();
    let mut unclassified = Vec::new();
    for row in rows {
        match row.country {
            Some(key) => by_country.entry(key.to_string()).or_default().push(row),
            None => unclassified.push(row),
        }
    }
    for bonds in by_country.values_mut() {
        bonds.sort_by_key(|b| b.period.or_else(|| period_from_description(&b.name)).unwrap_or(u32::MAX));
    }

    let run = BondListRun {
        timestamp: ctx.now,
        total,
        by_country,
        unclassified,
    };
    ctx.persist(
        ArtifactSpec::flat(ctx.settings.data_dir(), "available_bonds").with_latest("available_bonds"),
        &run,
        &report::bond_list_markdown(&run),
    )?;
    println!("{}", report::format_bond_list(&run));
    Ok(run)
}

// ---------------------------------------------------------------------------
// check
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct SiteCheck {
    pub name: &'static str,
    pub ok: bool,
    pub detail: String,
}

fn check_site(client: &Client, name: &'static str, url: &str) -> SiteCheck {
    let outcome = client
        .get(url)
        .send()
        .map_err(AppError::from)
        .and_then(|resp| check_status(resp, name))
        .and_then(|resp| {
            let status = resp.status();
            resp.bytes()
                .map(|b| format!("status {status}, {} bytes", b.len()))
                .map_err(AppError::from)
        });
    match outcome {
        Ok(detail) => {
            info!(site = name, %detail, "reachable");
            SiteCheck { name, ok: true, detail }
        }
        Err(err) => {
            warn!(site = name, kind = err.kind().label(), error = %err, "unreachable");
            SiteCheck {
                name,
                ok: false,
                detail: err.to_string(),
            }
        }
    }
}

/// Try every site once; `Err(Unreachable)` when none answered.
pub fn run_check(settings: &Settings) -> Result<Vec<SiteCheck>, AppError> {
    let timeout = settings.http_timeout.min(std::time::Duration::from_secs(CHECK_TIMEOUT_SECS));
    let client = build_client(timeout)?;

    let results: Vec<SiteCheck> = CHECK_SITES.iter().map(|&(name, url)| check_site(&client, name, url)).collect();

    println!("Summary:");
    for r in &results {
        let mark = if r.ok { "✓ OK  " } else { "✗ FAIL" };
        println!("{mark} - {} ({})", r.name, r.detail);
    }

    let reachable = results.iter().filter(|r| r.ok).count();
    if reachable == 0 {
        return Err(AppError::new(ErrorKind::Unreachable, "No data source is reachable."));
    }
    info!(reachable, total = results.len(), "connectivity check done");
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use clap::Parser;
    use serde_json::Value;

    fn ctx_for(settings: &Settings) -> RunContext<'_> {
        RunContext {
            settings,
            client: Client::new(),
            now: Local.with_ymd_and_hms(2026, 2, 5, 9, 0, 0).unwrap(),
            policy: RetryPolicy::single(),
        }
    }

    #[test]
    fn missing_fred_key_still_writes_valid_empty_json() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::for_tests(dir.path().to_path_buf());
        let ctx = ctx_for(&settings);

        let run = run_indicators(&ctx).unwrap();
        assert!(run.indicators.is_empty());

        let latest = dir.path().join("daily/latest.json");
        let parsed: Value = serde_json::from_str(&std::fs::read_to_string(&latest).unwrap()).unwrap();
        assert_eq!(parsed["indicators"], Value::Array(Vec::new()));
        assert_eq!(parsed["source"], "FRED API");
        assert!(dir.path().join("daily/indicators_20260205_090000.json").exists());
        assert!(dir.path().join("daily/latest.md").exists());
    }

    #[test]
    fn missing_fred_key_gives_empty_release_buckets() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::for_tests(dir.path().to_path_buf());
        let run = run_releases(&ctx_for(&settings)).unwrap();
        assert!(run.buckets.is_empty());

        let parsed: Value =
            serde_json::from_str(&std::fs::read_to_string(dir.path().join("daily/calendar_latest.json")).unwrap())
                .unwrap();
        assert_eq!(parsed["today"], Value::Array(Vec::new()));
        assert_eq!(parsed["this_week"], Value::Array(Vec::new()));
        assert_eq!(parsed["reference_date"], "2026-02-05");
    }

    fn range_args() -> CalendarArgs {
        CalendarArgs {
            start: None,
            end: None,
            month: None,
            days: None,
            country: None,
            importance: None,
        }
    }

    #[test]
    fn calendar_range_resolution() {
        let today = NaiveDate::from_ymd_opt(2026, 2, 5).unwrap();
        let d = |m, day| NaiveDate::from_ymd_opt(2026, m, day).unwrap();

        assert_eq!(resolve_range(&range_args(), today).unwrap(), (today, d(2, 12)));

        let mut a = range_args();
        a.month = Some("2026-02".to_string());
        assert_eq!(resolve_range(&a, today).unwrap(), (d(2, 1), d(2, 28)));

        let mut a = range_args();
        a.month = Some("2026-12".to_string());
        assert_eq!(resolve_range(&a, today).unwrap(), (d(12, 1), d(12, 31)));

        let mut a = range_args();
        a.days = Some(3);
        assert_eq!(resolve_range(&a, today).unwrap(), (today, d(2, 8)));

        let mut a = range_args();
        a.start = Some(d(3, 1));
        assert_eq!(resolve_range(&a, today).unwrap(), (d(3, 1), d(3, 8)));

        a.end = Some(d(2, 1));
        assert_eq!(resolve_range(&a, today).unwrap_err().kind(), ErrorKind::Config);

        let mut a = range_args();
        a.month = Some("Feb 2026".to_string());
        assert!(resolve_range(&a, today).is_err());
    }

    #[test]
    fn overflowing_ranges_are_config_errors() {
        let today = NaiveDate::from_ymd_opt(2026, 2, 5).unwrap();

        let mut a = range_args();
        a.days = Some(u32::MAX);
        let err = resolve_range(&a, today).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);
        assert_eq!(err.exit_code(), 2);

        let mut a = range_args();
        a.start = Some(NaiveDate::MAX);
        assert_eq!(resolve_range(&a, today).unwrap_err().kind(), ErrorKind::Config);

        let cli = crate::cli::Cli::try_parse_from(["mkt", "calendar", "--days", "4294967295"]).unwrap();
        let crate::cli::Command::Calendar(args) = cli.command else {
            panic!("expected calendar");
        };
        assert!(resolve_range(&args, today).is_err());
    }

    fn row(day: u32, country: &str, time: &str, name: &str, actual: &str) -> EconomicEvent {
        let mut e = EconomicEvent::new(NaiveDate::from_ymd_opt(2026, 2, day).unwrap(), name);
        e.country = country.to_string();
        e.time = time.to_string();
        e.actual = actual.to_string();
        e
    }

    #[test]
    fn investing_rows_are_split_deduped_and_bucketed() {
        let now = Local.with_ymd_and_hms(2026, 2, 5, 9, 0, 0).unwrap();
        let rows = vec![
            row(4, "United States", "08:30", "Initial Jobless Claims", ""),
            row(4, "United States", "08:30", "Initial Jobless Claims", "218K"),
            row(5, "Japan", "08:50", "Foreign Bonds Buying", ""),
            row(6, "United States", "08:30", "Non-Farm Payrolls (Jan)", ""),
            row(6, "United States", "08:30", "Non-Farm Payrolls", "143K"),
            row(6, "Germany", "08:00", "Factory Orders", ""),
        ];
        let run = build_investing_run(now, &calendar_countries(&[]), &rows);
        assert_eq!(run.countries.len(), 3);

        let us = run.countries.iter().find(|c| c.code == "us").unwrap();
        assert_eq!(us.days.yesterday.len(), 1);
        assert_eq!(us.days.yesterday[0].actual, "218K");
        assert_eq!(us.days.tomorrow.len(), 1);
        assert_eq!(us.days.tomorrow[0].actual, "143K");

        let jp = run.countries.iter().find(|c| c.code == "jp").unwrap();
        assert_eq!(jp.days.today.len(), 1);

        let uk = run.countries.iter().find(|c| c.code == "uk").unwrap();
        assert_eq!(uk.days.yesterday.len() + uk.days.today.len() + uk.days.tomorrow.len(), 0);
    }

    #[test]
    fn requested_countries_keep_known_codes() {
        let list = calendar_countries(&["Japan".to_string(), "germany".to_string()]);
        assert_eq!(list[0], ("japan".to_string(), "jp".to_string()));
        assert_eq!(list[1], ("germany".to_string(), "germany".to_string()));
    }

    #[test]
    fn unknown_yield_country_is_a_config_error() {
        assert_eq!(selected_countries(&[]).unwrap().len(), BOND_COUNTRIES.len());
        let err = selected_countries(&["atlantis".to_string()]).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    fn snapshot(close: f64) -> PriceSnapshot {
        PriceSnapshot {
            close,
            previous: Some(close - 0.05),
            change: Some(0.05),
            change_pct: None,
            date: None,
        }
    }

    #[test]
    fn curve_bonds_carry_the_alias_that_answered() {
        let us = bond_country("united states").unwrap();
        let now = Local.with_ymd_and_hms(2026, 2, 5, 9, 0, 0).unwrap();
        let mut calls: Vec<String> = Vec::new();

        let curve = resolve_country_curve(
            us,
            now,
            RetryPolicy::single(),
            |spec| spec.yahoo,
            |sym| {
                calls.push(sym.to_string());
                match sym {
                    "US2Y=F" => Ok(Some(snapshot(3.52))),
                    "^FVX" => Err(AppError::network("timeout")),
                    "^TNX" => Ok(Some(snapshot(4.25))),
                    "^TYX" => Ok(Some(snapshot(4.60))),
                    _ => Ok(None),
                }
            },
            bond_from_snapshot,
        )
        .unwrap();

        // 2Y and 5Y both needed their second alias; 5Y never resolved.
        assert_eq!(calls, ["2YY=F", "US2Y=F", "^FVX", "US5Y=F", "^TNX", "^TYX"]);
        let periods: Vec<u32> = curve.bonds.iter().map(|b| b.period).collect();
        assert_eq!(periods, [2, 10, 30]);
        let symbols: Vec<&str> = curve.bonds.iter().map(|b| b.symbol.as_str()).collect();
        assert_eq!(symbols, ["US2Y=F", "^TNX", "^TYX"]);
        assert_eq!(curve.bonds[1].yield_pct, Some(4.25));
        assert_eq!(curve.bonds[1].date, NaiveDate::from_ymd_opt(2026, 2, 5));
        assert_eq!(curve.country_name_ja, "米国");
    }

    #[test]
    fn country_without_any_bond_is_omitted() {
        let jp = bond_country("japan").unwrap();
        let now = Local.with_ymd_and_hms(2026, 2, 5, 9, 0, 0).unwrap();
        let curve = resolve_country_curve(
            jp,
            now,
            RetryPolicy::single(),
            |spec| spec.investing,
            |_| Ok(None),
            bond_from_quote,
        );
        assert!(curve.is_none());
    }

    #[test]
    fn quote_builder_derives_previous_yield() {
        let us = bond_country("united states").unwrap();
        let spec = us.find(10).unwrap();
        let today = NaiveDate::from_ymd_opt(2026, 2, 5).unwrap();
        let found = Resolved {
            value: BondQuote {
                yield_pct: 4.25,
                change: Some(0.05),
                change_pct: Some(1.19),
            },
            alias: "us-10-yr-t-note".to_string(),
            attempts: 3,
        };
        let bond = bond_from_quote(spec, found, today);
        assert_eq!(bond.symbol, "us-10-yr-t-note");
        assert_eq!(bond.name, "US 10Y");
        assert!((bond.previous_yield.unwrap() - 4.20).abs() < 1e-9);
        assert_eq!(bond.date, Some(today));
    }

    fn scanned(symbol: &str, description: &str, close: Option<f64>, change: Option<f64>, period: Option<u32>) -> ScannerBond {
        ScannerBond {
            symbol: symbol.to_string(),
            name: symbol.to_string(),
            description: description.to_string(),
            close,
            change,
            change_pct: None,
            period,
            country: Some("united states"),
        }
    }

    #[test]
    fn tradingview_rows_become_sorted_curves() {
        let now = Local.with_ymd_and_hms(2026, 2, 5, 9, 0, 0).unwrap();
        let mut brazil = scanned("TVC:BR10Y", "Brazil 10 Year", Some(13.1), None, Some(10));
        brazil.country = None;
        let rows = vec![
            scanned("TVC:US10Y", "United States 10 Year", Some(4.25), Some(0.05), Some(10)),
            scanned("TVC:US10", "United States 10Y Note", Some(9.99), Some(0.0), Some(10)),
            scanned("TVC:US02Y", "United States 2 Year", Some(3.50), Some(-0.02), Some(2)),
            scanned("TVC:US07Y", "United States 7 Year", Some(4.00), None, Some(7)),
            scanned("TVC:USBILL", "United States Bill", Some(4.30), Some(0.01), None),
            brazil,
        ];
        let countries = [bond_country("united states").unwrap(), bond_country("japan").unwrap()];

        let curves = build_tradingview_curves(&rows, &countries, now);
        assert_eq!(curves.len(), 1, "japan has no rows and is left out");

        let us = &curves[0];
        let periods: Vec<u32> = us.bonds.iter().map(|b| b.period).collect();
        assert_eq!(periods, [2, 7, 10]);

        let ten = &us.bonds[2];
        assert_eq!(ten.symbol, "TVC:US10Y");
        assert_eq!(ten.name, "US 10Y");
        assert_eq!(ten.yield_pct, Some(4.25));
        assert!((ten.previous_yield.unwrap() - 4.20).abs() < 1e-9);

        let two = &us.bonds[0];
        assert!((two.previous_yield.unwrap() - 3.52).abs() < 1e-9);

        let seven = &us.bonds[1];
        assert_eq!(seven.name, "United States 7 Year");
        assert_eq!(seven.previous_yield, None);
        assert_eq!(seven.date, NaiveDate::from_ymd_opt(2026, 2, 5));
    }
}
