//! Time helpers shared by the aggregator and the command line.
//!
//! Calendar days are always UTC dates so that bucketing does not depend on
//! the machine the log is read on.

use chrono::{DateTime, NaiveDate, Utc};

pub const MS_PER_MINUTE: i64 = 60_000;
pub const MS_PER_HOUR: i64 = 60 * MS_PER_MINUTE;
pub const MS_PER_DAY: i64 = 24 * MS_PER_HOUR;

/// Current wall-clock time as epoch milliseconds
///
/// Only the outer layers call this; queries take "now" as an argument.
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Timestamp for an event consumed `hours` and `minutes` before `now`
pub fn backdate(now: i64, hours: u32, minutes: u32) -> i64 {
    now.saturating_sub(i64::from(hours) * MS_PER_HOUR)
        .saturating_sub(i64::from(minutes) * MS_PER_MINUTE)
}

/// UTC calendar day of an epoch-millisecond timestamp
pub fn day_of(timestamp: i64) -> NaiveDate {
    match DateTime::<Utc>::from_timestamp_millis(timestamp) {
        Some(dt) => dt.date_naive(),
        // Outside chrono's range; clamp to the nearest representable day
        None if timestamp < 0 => NaiveDate::MIN,
        None => NaiveDate::MAX,
    }
}

/// Compact human form of an elapsed duration, e.g. `"1d 2h 5m"`
///
/// Leading zero units are dropped; negative durations read as `"0m"`.
pub fn format_elapsed(elapsed_ms: i64) -> String {
    let elapsed_ms = elapsed_ms.max(0);
    let days = elapsed_ms / MS_PER_DAY;
    let hours = (elapsed_ms % MS_PER_DAY) / MS_PER_HOUR;
    let minutes = (elapsed_ms % MS_PER_HOUR) / MS_PER_MINUTE;

    if days > 0 {
        format!("{days}d {hours}h {minutes}m")
    } else if hours > 0 {
        format!("{hours}h {minutes}m")
    } else {
        format!("{minutes}m")
    }
}
