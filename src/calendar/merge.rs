use std::collections::HashMap;

use crate::domain::EconomicEvent;

fn filled(s: &str) -> bool {
    !s.trim().is_empty()
}

/// `true` when `candidate` carries a value `kept` lacks, checked in the
/// order actual, forecast, previous.
fn is_richer(candidate: &EconomicEvent, kept: &EconomicEvent) -> bool {
    if filled(&candidate.actual) && !filled(&kept.actual) {
        return true;
    }
    if filled(&candidate.forecast) && !filled(&kept.forecast) {
        return true;
    }
    filled(&candidate.previous) && !filled(&kept.previous)
}

/// Collapse rows sharing `(time, event)`.
///
/// Output order is the order in which each key was first seen. A repeated key
/// replaces the kept row only when it is richer (see `is_richer`).
pub fn dedup_by_time_event(events: Vec<EconomicEvent>) -> Vec<EconomicEvent> {
    dedup_by_time_and(events, str::to_string)
}

/// [`dedup_by_time_event`] keyed on `(time, normalize(event))`.
///
/// Kept rows retain their original event name.
pub fn dedup_by_time_and<N>(events: Vec<EconomicEvent>, normalize: N) -> Vec<EconomicEvent>
where
    N: Fn(&str) -> String,
{
    let mut index: HashMap<(String, String), usize> = HashMap::new();
    let mut out: Vec<EconomicEvent> = Vec::with_capacity(events.len());

    for ev in events {
        let key = (ev.time.clone(), normalize(&ev.event));
        match index.get(&key) {
            Some(&i) => {
                if is_richer(&ev, &out[i]) {
                    out[i] = ev;
                }
            }
            None => {
                index.insert(key, out.len());
                out.push(ev);
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ev(time: &str, name: &str, actual: &str, forecast: &str, previous: &str) -> EconomicEvent {
        let mut e = EconomicEvent::new(NaiveDate::from_ymd_opt(2026, 2, 5).unwrap(), name);
        e.time = time.to_string();
        e.actual = actual.to_string();
        e.forecast = forecast.to_string();
        e.previous = previous.to_string();
        e
    }

    #[test]
    fn newcomer_with_actual_wins() {
        let out = dedup_by_time_event(vec![
            ev("08:30", "CPI", "", "3.0%", "2.9%"),
            ev("10:00", "ISM", "", "", ""),
            ev("08:30", "CPI", "3.1%", "", ""),
        ]);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].event, "CPI");
        assert_eq!(out[0].actual, "3.1%");
        assert_eq!(out[1].event, "ISM");
    }

    #[test]
    fn forecast_then_previous_are_tie_breakers() {
        let out = dedup_by_time_event(vec![ev("09:00", "A", "", "", ""), ev("09:00", "A", "", "1.0", "")]);
        assert_eq!(out[0].forecast, "1.0");

        let out = dedup_by_time_event(vec![ev("09:00", "B", "", "", ""), ev("09:00", "B", "", "", "0.5")]);
        assert_eq!(out[0].previous, "0.5");
    }

    #[test]
    fn poorer_duplicate_is_dropped() {
        let out = dedup_by_time_event(vec![ev("09:00", "A", "1", "2", "3"), ev("09:00", "A", "", "", "")]);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].actual, "1");
    }

    #[test]
    fn normalized_names_share_a_key() {
        let rows = vec![
            ev("08:30", "Non-Farm Payrolls (Jan)", "", "70K", ""),
            ev("08:30", "Non-Farm Payrolls", "143K", "", ""),
        ];
        assert_eq!(dedup_by_time_event(rows.clone()).len(), 2);

        let out = dedup_by_time_and(rows, crate::calendar::translate_indicator);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].actual, "143K");
        assert_eq!(out[0].event, "Non-Farm Payrolls");
    }

    #[test]
    fn same_event_at_different_times_is_kept() {
        let out = dedup_by_time_event(vec![ev("09:00", "Speech", "", "", ""), ev("15:00", "Speech", "", "", "")]);
        assert_eq!(out.len(), 2);
    }
}
