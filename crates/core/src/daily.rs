//! UTC calendar-day arithmetic and daily seed derivation.
//!
//! The daily seed namespaces every per-day storage key, so all daily state
//! rolls over at UTC midnight without any cleanup job.

use chrono::{Datelike, Duration, TimeZone, Utc};
use sha2::{Digest, Sha256};

use crate::types::{CalendarDay, Timestamp};

/// Seconds in one UTC day.
pub const SECONDS_PER_DAY: i64 = 86_400;

/// The UTC calendar date containing `now`.
pub fn calendar_day(now: Timestamp) -> CalendarDay {
    now.date_naive()
}

/// Seed input for a calendar day: `"{year}-{month}-{day}"`, no zero padding.
pub fn seed_source(day: CalendarDay) -> String {
    format!("{}-{}-{}", day.year(), day.month(), day.day())
}

/// Deterministic seed for the UTC day containing `now`.
///
/// Depends only on the calendar date, so every call within one UTC day
/// returns the same 64-character hex string.
pub fn daily_seed(now: Timestamp) -> String {
    seed_for_day(calendar_day(now))
}

/// Deterministic seed for an explicit calendar day: the SHA-256 hex digest
/// of [`seed_source`].
pub fn seed_for_day(day: CalendarDay) -> String {
    let hash = Sha256::digest(seed_source(day).as_bytes());
    format!("{hash:x}")
}

/// Whole seconds from `now` until the next UTC midnight, floored.
///
/// Exactly at midnight this is a full day (86400).
pub fn seconds_until_next_midnight(now: Timestamp) -> i64 {
    let next_day = calendar_day(now) + Duration::days(1);
    let midnight = Utc.from_utc_datetime(&next_day.and_time(chrono::NaiveTime::MIN));
    (midnight - now).num_seconds()
}

/// Number of calendar days from `earlier` to `later` (negative if reversed).
pub fn days_between(earlier: CalendarDay, later: CalendarDay) -> i64 {
    (later - earlier).num_days()
}
