//! Date bucketing of calendar rows relative to a reference day.

use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate};
use serde::Serialize;

use crate::domain::EconomicEvent;

/// Today / tomorrow / rest of the coming week.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WeekBuckets {
    pub today: Vec<EconomicEvent>,
    pub tomorrow: Vec<EconomicEvent>,
    pub this_week: Vec<EconomicEvent>,
}

impl WeekBuckets {
    pub fn len(&self) -> usize {
        self.today.len() + self.tomorrow.len() + self.this_week.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Split `events` into today, tomorrow and `today + 2 ..= today + 7`.
///
/// Past dates and anything beyond the seven-day window are dropped.
pub fn partition_week(events: Vec<EconomicEvent>, today: NaiveDate) -> WeekBuckets {
    let tomorrow = today + Duration::days(1);
    let horizon = today + Duration::days(7);
    let mut buckets = WeekBuckets::default();

    for ev in events {
        if ev.date == today {
            buckets.today.push(ev);
        } else if ev.date == tomorrow {
            buckets.tomorrow.push(ev);
        } else if ev.date > tomorrow && ev.date <= horizon {
            buckets.this_week.push(ev);
        }
    }
    buckets
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ThreeDayBuckets {
    pub yesterday: Vec<EconomicEvent>,
    pub today: Vec<EconomicEvent>,
    pub tomorrow: Vec<EconomicEvent>,
}

pub fn partition_three_days(events: Vec<EconomicEvent>, today: NaiveDate) -> ThreeDayBuckets {
    let yesterday = today - Duration::days(1);
    let tomorrow = today + Duration::days(1);
    let mut buckets = ThreeDayBuckets::default();

    for ev in events {
        if ev.date == yesterday {
            buckets.yesterday.push(ev);
        } else if ev.date == today {
            buckets.today.push(ev);
        } else if ev.date == tomorrow {
            buckets.tomorrow.push(ev);
        }
    }
    buckets
}

/// Events grouped by date, dates ascending, input order kept within a date.
pub fn group_by_date(events: Vec<EconomicEvent>) -> BTreeMap<NaiveDate, Vec<EconomicEvent>> {
    let mut out: BTreeMap<NaiveDate, Vec<EconomicEvent>> = BTreeMap::new();
    for ev in events {
        out.entry(ev.date).or_default().push(ev);
    }
    out
}
