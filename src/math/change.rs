//! Day-over-day / period-over-period change helpers.

/// Percent change from `previous` to `latest`.
///
/// `None` when either side is missing or non-finite, or when `previous` is zero.
pub fn change_percent(latest: Option<f64>, previous: Option<f64>) -> Option<f64> {
    let (latest, previous) = (latest?, previous?);
    if !(latest.is_finite() && previous.is_finite()) || previous == 0.0 {
        return None;
    }
    Some((latest - previous) / previous * 100.0)
}

/// Absolute change `latest - previous`.
pub fn change(latest: Option<f64>, previous: Option<f64>) -> Option<f64> {
    let d = latest? - previous?;
    d.is_finite().then_some(d)
}

/// Parse a FRED-style textual value. `"."` and blanks mean "missing".
pub fn parse_fred_value(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed == "." || trimmed.is_empty() {
        return None;
    }
    let v = trimmed.parse::<f64>().ok()?;
    if v.is_finite() { Some(v) } else { None }
}

/// `change_percent` over two FRED-style textual values.
pub fn change_percent_text(latest: &str, previous: &str) -> Option<f64> {
    change_percent(parse_fred_value(latest), parse_fred_value(previous))
}

/// Parse a calendar value such as `"1.5%"`, `"215K"`, `"-0.3B"` or `"1,234.5"`.
///
/// The unit suffix is dropped, not applied: `"215K"` parses as `215.0`, which
/// keeps actual/forecast comparisons on the same scale.
pub fn parse_numeric_like(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .trim()
        .trim_end_matches(['%', 'K', 'M', 'B', 'T'])
        .chars()
        .filter(|c| *c != ',')
        .collect();
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// `actual - forecast` when both are numeric-like.
pub fn surprise(actual: &str, forecast: &str) -> Option<f64> {
    Some(parse_numeric_like(actual)? - parse_numeric_like(forecast)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn change_percent_matches_formula() {
        let pairs = [(110.0, 100.0), (95.0, 100.0), (-2.0, 4.0), (0.0, -3.0)];
        for (latest, previous) in pairs {
            let expected = (latest - previous) / previous * 100.0;
            let got = change_percent(Some(latest), Some(previous)).unwrap();
            assert!((got - expected).abs() < 1e-12, "{latest} vs {previous}");
        }
    }

    #[test]
    fn change_percent_undefined_cases() {
        assert_eq!(change_percent(Some(1.0), Some(0.0)), None);
        assert_eq!(change_percent(Some(1.0), None), None);
        assert_eq!(change_percent(None, Some(1.0)), None);
        assert_eq!(change_percent(Some(f64::NAN), Some(1.0)), None);
        assert_eq!(change_percent_text("3.9", "."), None);
        assert_eq!(change_percent_text("3.9", ""), None);
        assert_eq!(change_percent_text("3.9", "n/a"), None);
        assert_eq!(change_percent_text("4.0", "0"), None);
    }

    #[test]
    fn change_percent_text_parses_fred_values() {
        let got = change_percent_text("4.2", "4.0").unwrap();
        assert!((got - 5.0).abs() < 1e-9);
    }

    #[test]
    fn numeric_like_strips_units() {
        assert_eq!(parse_numeric_like("1.5%"), Some(1.5));
        assert_eq!(parse_numeric_like("215K"), Some(215.0));
        assert_eq!(parse_numeric_like("-0.3B"), Some(-0.3));
        assert_eq!(parse_numeric_like("1,234.5"), Some(1234.5));
        assert_eq!(parse_numeric_like(""), None);
        assert_eq!(parse_numeric_like("%"), None);
        assert_eq!(parse_numeric_like("abc"), None);
    }

    #[test]
    fn surprise_requires_both_sides() {
        let s = surprise("3.2%", "3.0%").unwrap();
        assert!((s - 0.2).abs() < 1e-9);
        assert_eq!(surprise("", "3.0%"), None);
    }

    #[test]
    fn absolute_change() {
        assert_eq!(change(Some(4.25), Some(4.0)), Some(0.25));
        assert_eq!(change(None, Some(4.0)), None);
    }
}
