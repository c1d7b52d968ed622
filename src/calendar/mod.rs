//! Calendar post-processing: dedup, date bucketing, indicator-name translation.

pub mod merge;
pub mod partition;
pub mod translate;

pub use merge::{dedup_by_time_and, dedup_by_time_event};
pub use partition::{ThreeDayBuckets, WeekBuckets, group_by_date, partition_three_days, partition_week};
pub use translate::translate_indicator;
