//! Investing.com HTML scraping: economic calendar and bond yield pages.
//!
//! Both parsers work on a fetched page body so they can be exercised against
//! static fixtures. Layout changes on the site show up as empty results, not
//! errors, and callers log them as "no data".

use chrono::NaiveDate;
use reqwest::blocking::Client;
use scraper::{ElementRef, Html, Selector};
use tracing::info;

use crate::data::http::get_text;
use crate::domain::EconomicEvent;
use crate::error::AppError;
use crate::math::change::parse_numeric_like;

const CALENDAR_URL: &str = "https://www.investing.com/economic-calendar/";
const BONDS_URL: &str = "https://www.investing.com/rates-bonds";

/// Headline figures of one bond page.
#[derive(Debug, Clone, PartialEq)]
pub struct BondQuote {
    pub yield_pct: f64,
    pub change: Option<f64>,
    pub change_pct: Option<f64>,
}

impl BondQuote {
    pub fn previous_yield(&self) -> Option<f64> {
        self.change.map(|c| self.yield_pct - c)
    }
}

pub struct InvestingClient {
    client: Client,
}

impl InvestingClient {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// All calendar rows published for `date`.
    pub fn calendar_day(&self, date: NaiveDate) -> Result<Vec<EconomicEvent>, AppError> {
        let html = get_text(
            &self.client,
            CALENDAR_URL,
            &[
                ("date", date.format("%b %d, %Y").to_string()),
                ("currencyFilter", "all".to_string()),
                ("importance", "all".to_string()),
            ],
            "Investing.com calendar",
        )?;
        let events = parse_calendar(&html, date);
        info!(%date, n = events.len(), "calendar rows scraped");
        Ok(events)
    }

    /// Bond page `rates-bonds/{slug}`; `Ok(None)` when the page has no price block.
    pub fn bond(&self, slug: &str) -> Result<Option<BondQuote>, AppError> {
        let html = get_text(&self.client, &format!("{BONDS_URL}/{slug}"), &[], "Investing.com bond page")?;
        Ok(parse_bond_page(&html))
    }
}

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("valid selector")
}

fn cell_text(el: ElementRef<'_>) -> String {
    let joined = el.text().collect::<Vec<_>>().join(" ");
    joined.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn first_text(row: ElementRef<'_>, sel: &Selector) -> String {
    row.select(sel).next().map(cell_text).unwrap_or_default()
}

/// Parse the calendar table of one day's page.
pub fn parse_calendar(html: &str, date: NaiveDate) -> Vec<EconomicEvent> {
    let document = Html::parse_document(html);

    let primary = selector("table#economicCalendarData tr.js-event-item");
    let fallback = selector("tbody.js-economic-table tr");
    let time_sel = selector("td.first");
    let sentiment_sel = selector("td.sentiment");
    let bull_sel = selector("i.grayFullBullishIcon");
    let flag_sel = selector("td.flagCur");
    let event_sel = selector("td.event");
    let actual_sel = selector(r#"td[id^="actual_"]"#);
    let forecast_sel = selector(r#"td[id^="forecast_"]"#);
    let previous_sel = selector(r#"td[id^="previous_"]"#);

    let mut rows: Vec<ElementRef<'_>> = document.select(&primary).collect();
    if rows.is_empty() {
        rows = document.select(&fallback).collect();
    }

    rows.into_iter()
        .filter_map(|row| {
            let name = first_text(row, &event_sel);
            // Day separators and ad rows have no event cell.
            if name.is_empty() {
                return None;
            }
            let mut ev = EconomicEvent::new(date, name);
            ev.time = first_text(row, &time_sel);
            ev.importance = row
                .select(&sentiment_sel)
                .next()
                .map(|cell| format!("{}/3", cell.select(&bull_sel).count()))
                .unwrap_or_default();
            ev.country = row
                .select(&flag_sel)
                .next()
                .and_then(|cell| {
                    cell.value()
                        .attr("title")
                        .map(|t| t.trim().to_string())
                        .or_else(|| Some(cell_text(cell)))
                })
                .unwrap_or_default();
            ev.actual = first_text(row, &actual_sel);
            ev.forecast = first_text(row, &forecast_sel);
            ev.previous = first_text(row, &previous_sel);
            Some(ev)
        })
        .collect()
}

fn strip_wrapping(raw: &str) -> &str {
    raw.trim().trim_start_matches('(').trim_end_matches(')').trim()
}

/// Parse the headline yield block of a bond page.
pub fn parse_bond_page(html: &str) -> Option<BondQuote> {
    let document = Html::parse_document(html);
    let last = selector(r#"[data-test="instrument-price-last"]"#);
    let chg = selector(r#"[data-test="instrument-price-change"]"#);
    let chg_pct = selector(r#"[data-test="instrument-price-change-percent"]"#);

    let text_of = |sel: &Selector| document.select(sel).next().map(cell_text);

    let yield_pct = text_of(&last).as_deref().and_then(parse_numeric_like)?;
    let change = text_of(&chg).as_deref().map(strip_wrapping).and_then(parse_numeric_like);
    let change_pct = text_of(&chg_pct).as_deref().map(strip_wrapping).and_then(parse_numeric_like);

    Some(BondQuote {
        yield_pct,
        change,
        change_pct,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const CALENDAR_FIXTURE: &str = r#"
<html><body>
<table id="economicCalendarData">
  <tbody>
    <tr><td class="theDay" colspan="8">Thursday, February 5, 2026</td></tr>
    <tr class="js-event-item" id="eventRowId_1">
      <td class="first left time">08:30</td>
      <td class="left flagCur noWrap" title="United States"><span class="ceFlags"></span> USD</td>
      <td class="left textNum sentiment noWrap">
        <i class="grayFullBullishIcon"></i><i class="grayFullBullishIcon"></i><i class="grayEmptyBullishIcon"></i>
      </td>
      <td class="left event"><a href="/x">Initial Jobless Claims</a></td>
      <td class="bold act" id="eventActual_1"></td>
      <td id="actual_1">218K</td>
      <td id="forecast_1">215K</td>
      <td id="previous_1">209K</td>
    </tr>
    <tr class="js-event-item" id="eventRowId_2">
      <td class="first left time">All Day</td>
      <td class="left flagCur noWrap" title="Japan"> JPY</td>
      <td class="left textNum sentiment noWrap"><i class="grayEmptyBullishIcon"></i></td>
      <td class="left event">  Bank Holiday  </td>
      <td id="actual_2">&nbsp;</td>
      <td id="forecast_2"></td>
      <td id="previous_2"></td>
    </tr>
  </tbody>
</table>
</body></html>"#;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 2, 5).unwrap()
    }

    #[test]
    fn parses_event_rows() {
        let events = parse_calendar(CALENDAR_FIXTURE, day());
        assert_eq!(events.len(), 2);

        let claims = &events[0];
        assert_eq!(claims.date, day());
        assert_eq!(claims.time, "08:30");
        assert_eq!(claims.country, "United States");
        assert_eq!(claims.importance, "2/3");
        assert_eq!(claims.event, "Initial Jobless Claims");
        assert_eq!(claims.actual, "218K");
        assert_eq!(claims.forecast, "215K");
        assert_eq!(claims.previous, "209K");

        let holiday = &events[1];
        assert_eq!(holiday.event, "Bank Holiday");
        assert_eq!(holiday.importance, "0/3");
        assert_eq!(holiday.actual, "");
    }

    #[test]
    fn falls_back_to_economic_table_body() {
        let html = r#"<table><tbody class="js-economic-table">
            <tr><td class="first">10:00</td><td class="flagCur" title="Germany"></td><td class="event">Ifo Business Climate</td>
                <td id="actual_9">85.2</td><td id="forecast_9">85.5</td><td id="previous_9">84.7</td></tr>
        </tbody></table>"#;
        let events = parse_calendar(html, day());
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].country, "Germany");
        assert_eq!(events[0].importance, "");
        assert_eq!(events[0].forecast, "85.5");
    }

    #[test]
    fn page_without_table_is_empty() {
        assert!(parse_calendar("<html><body><p>Access denied</p></body></html>", day()).is_empty());
    }

    #[test]
    fn parses_bond_page_headline() {
        let html = r#"<div>
            <div data-test="instrument-price-last">4.253</div>
            <span data-test="instrument-price-change">+0.021</span>
            <span data-test="instrument-price-change-percent">(+0.50%)</span>
        </div>"#;
        let q = parse_bond_page(html).unwrap();
        assert_eq!(q.yield_pct, 4.253);
        assert_eq!(q.change, Some(0.021));
        assert_eq!(q.change_pct, Some(0.5));
        assert!((q.previous_yield().unwrap() - 4.232).abs() < 1e-9);
    }

    #[test]
    fn bond_page_without_price_is_none() {
        assert!(parse_bond_page("<div data-test=\"other\">1</div>").is_none());
    }
}
