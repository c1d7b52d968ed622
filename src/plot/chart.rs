//! Yield-curve charts written next to the JSON/Markdown artifacts.
//!
//! Two images per `mkt yields` run, one panel per country (three per row):
//!
//! - `yield_curves.svg`: yield by maturity with the value above each point
//! - `yield_changes.svg`: day-over-day change per maturity as signed bars
//!
//! SVG keeps labels as text, so no font rasterizer (and no fontconfig) is needed.

use std::fs;
use std::path::{Path, PathBuf};

use plotters::coord::Shift;
use plotters::prelude::*;
use tracing::info;

use crate::domain::{CountryCurve, YieldCurveRun};
use crate::error::AppError;

pub const CURVES_FILE: &str = "yield_curves.svg";
pub const CHANGES_FILE: &str = "yield_changes.svg";

const PANEL_W: u32 = 600;
const PANEL_H: u32 = 500;
const COLUMNS: usize = 3;

const PALETTE: [RGBColor; 6] = [
    RGBColor(0x1f, 0x77, 0xb4),
    RGBColor(0xff, 0x7f, 0x0e),
    RGBColor(0x2c, 0xa0, 0x2c),
    RGBColor(0xd6, 0x27, 0x28),
    RGBColor(0x94, 0x67, 0xbd),
    RGBColor(0x8c, 0x56, 0x4b),
];

type Panel<'a> = DrawingArea<SVGBackend<'a>, Shift>;
type DrawResult = Result<(), DrawingAreaErrorKind<std::io::Error>>;

/// `(rows, cols)` of the panel grid for `n` countries.
pub fn grid_shape(n: usize) -> (usize, usize) {
    let n = n.max(1);
    (n.div_ceil(COLUMNS), n.min(COLUMNS))
}

/// `(maturity, yield)` for every bond with a finite yield.
pub fn curve_points(curve: &CountryCurve) -> Vec<(f64, f64)> {
    curve
        .bonds
        .iter()
        .filter_map(|b| b.yield_pct.filter(|y| y.is_finite()).map(|y| (f64::from(b.period), y)))
        .collect()
}

/// `("10Y", change)` for every bond with a finite change.
pub fn change_bars(curve: &CountryCurve) -> Vec<(String, f64)> {
    curve
        .bonds
        .iter()
        .filter_map(|b| b.change.filter(|c| c.is_finite()).map(|c| (format!("{}Y", b.period), c)))
        .collect()
}

/// Y range that always contains 0 (the fill baseline) with headroom for labels.
fn yield_axis(points: &[(f64, f64)]) -> (f64, f64) {
    let lo = points.iter().map(|p| p.1).fold(0.0, f64::min);
    let hi = points.iter().map(|p| p.1).fold(0.0, f64::max);
    let span = (hi - lo).max(0.5);
    let floor = if lo < 0.0 { lo - span * 0.1 } else { 0.0 };
    (floor, hi + span * 0.15)
}

/// Symmetric half-range for the change axis: 1.5 × the largest move.
fn change_limit(bars: &[(String, f64)]) -> f64 {
    let largest = bars.iter().map(|b| b.1.abs()).fold(0.0, f64::max);
    if largest > 0.0 { largest * 1.5 } else { 0.1 }
}

fn panel_title(curve: &CountryCurve) -> String {
    format!("{} ({})", curve.country_name_ja, curve.country_name)
}

fn draw_note(area: &Panel<'_>, title: &str, note: &str) -> DrawResult {
    area.draw(&Text::new(format!("{title}: {note}"), (30, 40), ("sans-serif", 20).into_font()))
}

fn draw_curve_panel(area: &Panel<'_>, idx: usize, curve: &CountryCurve) -> DrawResult {
    let title = panel_title(curve);
    let points = curve_points(curve);
    if points.is_empty() {
        return draw_note(area, &title, "No Data");
    }

    let color = PALETTE[idx % PALETTE.len()];
    let x_max = points.iter().map(|p| p.0).fold(0.0, f64::max) + 2.0;
    let (y0, y1) = yield_axis(&points);

    let mut chart = ChartBuilder::on(area)
        .caption(&title, ("sans-serif", 22))
        .margin(12)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(0f64..x_max, y0..y1)?;

    chart
        .configure_mesh()
        .x_desc("Maturity (Years)")
        .y_desc("Yield (%)")
        .draw()?;

    chart.draw_series(AreaSeries::new(points.iter().copied(), 0.0, color.mix(0.2).filled()))?;
    chart.draw_series(LineSeries::new(points.iter().copied(), color.stroke_width(2)))?;
    chart.draw_series(points.iter().map(|&(x, y)| {
        EmptyElement::at((x, y))
            + Circle::new((0, 0), 5, color.filled())
            + Text::new(format!("{y:.2}%"), (-20, -22), ("sans-serif", 14).into_font())
    }))?;
    Ok(())
}

fn draw_change_panel(area: &Panel<'_>, _idx: usize, curve: &CountryCurve) -> DrawResult {
    let title = panel_title(curve);
    let bars = change_bars(curve);
    if bars.is_empty() {
        return draw_note(area, &title, "No change data");
    }

    let n = bars.len() as u32;
    let limit = change_limit(&bars);

    let mut chart = ChartBuilder::on(area)
        .caption(&title, ("sans-serif", 22))
        .margin(12)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d((0u32..n).into_segmented(), -limit..limit)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc("Maturity")
        .y_desc("Change (%)")
        .x_label_formatter(&|v| match v {
            SegmentValue::CenterOf(i) => bars.get(*i as usize).map(|b| b.0.clone()).unwrap_or_default(),
            _ => String::new(),
        })
        .draw()?;

    chart.draw_series(bars.iter().enumerate().map(|(i, (_, c))| {
        let i = i as u32;
        let fill = if *c >= 0.0 { GREEN } else { RED };
        Rectangle::new(
            [(SegmentValue::Exact(i), 0.0), (SegmentValue::Exact(i + 1), *c)],
            fill.mix(0.7).filled(),
        )
    }))?;
    chart.draw_series(LineSeries::new(
        [(SegmentValue::Exact(0), 0.0), (SegmentValue::Exact(n), 0.0)],
        BLACK.stroke_width(1),
    ))?;
    chart.draw_series(bars.iter().enumerate().map(|(i, (_, c))| {
        let dy = if *c >= 0.0 { -20 } else { 6 };
        EmptyElement::at((SegmentValue::CenterOf(i as u32), *c))
            + Text::new(format!("{c:+.2}%"), (-20, dy), ("sans-serif", 14).into_font())
    }))?;
    Ok(())
}

fn draw_grid(
    path: &Path,
    title: &str,
    curves: &[CountryCurve],
    panel: fn(&Panel<'_>, usize, &CountryCurve) -> DrawResult,
) -> Result<(), AppError> {
    let (rows, cols) = grid_shape(curves.len());
    let draw = || -> DrawResult {
        let root = SVGBackend::new(path, (PANEL_W * cols as u32, PANEL_H * rows as u32)).into_drawing_area();
        root.fill(&WHITE)?;
        let body = root.titled(title, ("sans-serif", 30))?;
        for (idx, (area, curve)) in body.split_evenly((rows, cols)).iter().zip(curves).enumerate() {
            panel(area, idx, curve)?;
        }
        root.present()
    };
    draw().map_err(|e| AppError::io(format!("Failed to draw chart '{}': {e}", path.display())))
}

/// Write both charts into `dir`. Nothing is written for a run without curves.
pub fn write_yield_charts(dir: &Path, run: &YieldCurveRun) -> Result<Vec<PathBuf>, AppError> {
    if run.curves.is_empty() {
        info!("no yield curves to plot");
        return Ok(Vec::new());
    }
    fs::create_dir_all(dir)
        .map_err(|e| AppError::io(format!("Failed to create image directory '{}': {e}", dir.display())))?;

    let date = run.timestamp.format("%Y-%m-%d");
    let curves_path = dir.join(CURVES_FILE);
    draw_grid(&curves_path, &format!("Government Bond Yield Curves {date}"), &run.curves, draw_curve_panel)?;
    info!(path = %curves_path.display(), "saved yield curve chart");

    let changes_path = dir.join(CHANGES_FILE);
    draw_grid(&changes_path, &format!("Yield Change (Day-over-Day) {date}"), &run.curves, draw_change_panel)?;
    info!(path = %changes_path.display(), "saved yield change chart");

    Ok(vec![curves_path, changes_path])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BondYield, YieldSource};
    use chrono::{Local, TimeZone};

    fn bond(period: u32, y: Option<f64>, change: Option<f64>) -> BondYield {
        BondYield {
            period,
            name: format!("US {period}Y"),
            symbol: "X".to_string(),
            yield_pct: y,
            previous_yield: None,
            change,
            change_pct: None,
            date: None,
        }
    }

    fn curve(bonds: Vec<BondYield>) -> CountryCurve {
        CountryCurve {
            country: "united states".to_string(),
            country_name: "United States".to_string(),
            country_name_ja: "米国".to_string(),
            fetch_date: Local::now(),
            bonds,
        }
    }

    fn run(curves: Vec<CountryCurve>) -> YieldCurveRun {
        YieldCurveRun {
            timestamp: Local.with_ymd_and_hms(2026, 2, 5, 9, 0, 0).unwrap(),
            source: YieldSource::Yahoo,
            curves,
        }
    }

    #[test]
    fn grid_is_three_wide() {
        assert_eq!(grid_shape(1), (1, 1));
        assert_eq!(grid_shape(3), (1, 3));
        assert_eq!(grid_shape(4), (2, 3));
        assert_eq!(grid_shape(6), (2, 3));
        assert_eq!(grid_shape(0), (1, 1));
    }

    #[test]
    fn points_and_bars_skip_missing_values() {
        let c = curve(vec![
            bond(2, Some(3.52), Some(-0.01)),
            bond(5, None, Some(0.02)),
            bond(10, Some(4.25), None),
        ]);
        assert_eq!(curve_points(&c), vec![(2.0, 3.52), (10.0, 4.25)]);
        assert_eq!(change_bars(&c), vec![("2Y".to_string(), -0.01), ("5Y".to_string(), 0.02)]);
    }

    #[test]
    fn axes_cover_zero_and_moves() {
        let (lo, hi) = yield_axis(&[(2.0, 3.5), (10.0, 4.25)]);
        assert_eq!(lo, 0.0);
        assert!(hi > 4.25);

        let (lo, _) = yield_axis(&[(2.0, -0.2), (10.0, 0.8)]);
        assert!(lo < -0.2);

        assert!((change_limit(&[("2Y".to_string(), -0.04), ("10Y".to_string(), 0.02)]) - 0.06).abs() < 1e-12);
        assert_eq!(change_limit(&[("2Y".to_string(), 0.0)]), 0.1);
    }

    #[test]
    fn writes_both_charts_with_labels() {
        let dir = tempfile::tempdir().unwrap();
        let images = dir.path().join("images");
        let r = run(vec![curve(vec![bond(2, Some(3.52), Some(-0.01)), bond(10, Some(4.25), Some(0.03))])]);

        let written = write_yield_charts(&images, &r).unwrap();
        assert_eq!(written, vec![images.join(CURVES_FILE), images.join(CHANGES_FILE)]);

        let curves_svg = std::fs::read_to_string(&written[0]).unwrap();
        assert!(curves_svg.contains("4.25%"));
        assert!(curves_svg.contains("米国 (United States)"));

        let changes_svg = std::fs::read_to_string(&written[1]).unwrap();
        assert!(changes_svg.contains("+0.03%"));
        assert!(changes_svg.contains("-0.01%"));
    }

    #[test]
    fn empty_run_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let images = dir.path().join("images");
        assert!(write_yield_charts(&images, &run(Vec::new())).unwrap().is_empty());
        assert!(!images.exists());
    }
}
