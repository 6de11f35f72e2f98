//! # WebKit Timestamps
//!
//! Chromium stores visit times as signed microseconds since
//! 1601-01-01T00:00:00 UTC. Conversion goes through 100 ns ticks held in an
//! `i128`, so no input value can overflow; values outside chrono's calendar
//! range come back as `None` instead of panicking.

use chrono::{DateTime, Local, TimeZone, Utc};

/// Seconds between 1601-01-01T00:00:00Z and the Unix epoch.
pub const WEBKIT_EPOCH_UNIX_OFFSET_SECONDS: i64 = 11_644_473_600;

const TICKS_PER_MICROSECOND: i128 = 10;
const TICKS_PER_SECOND: i128 = 10_000_000;
const NANOS_PER_TICK: i128 = 100;

/// 100 ns ticks since 1601-01-01T00:00:00Z.
pub fn webkit_ticks(raw_visit_time: i64) -> i128 {
    i128::from(raw_visit_time) * TICKS_PER_MICROSECOND
}

/// Absolute UTC instant for a raw visit time. `0` is the 1601 epoch itself.
pub fn webkit_to_utc(raw_visit_time: i64) -> Option<DateTime<Utc>> {
    let unix_ticks = webkit_ticks(raw_visit_time)
        - i128::from(WEBKIT_EPOCH_UNIX_OFFSET_SECONDS) * TICKS_PER_SECOND;
    let secs = i64::try_from(unix_ticks.div_euclid(TICKS_PER_SECOND)).ok()?;
    let nanos = u32::try_from(unix_ticks.rem_euclid(TICKS_PER_SECOND) * NANOS_PER_TICK).ok()?;
    DateTime::<Utc>::from_timestamp(secs, nanos)
}

/// Raw visit time expressed in `tz`, using the offset in force at that instant.
pub fn normalize_in<Tz: TimeZone>(raw_visit_time: i64, tz: &Tz) -> Option<DateTime<Tz>> {
    webkit_to_utc(raw_visit_time).map(|dt| dt.with_timezone(tz))
}

/// Raw visit time in the system's local timezone.
pub fn normalize(raw_visit_time: i64) -> Option<DateTime<Local>> {
    normalize_in(raw_visit_time, &Local)
}

/// Zero and negative values mean the browser never recorded a visit time.
pub fn is_recorded(raw_visit_time: i64) -> bool {
    raw_visit_time > 0
}

/// Inverse of [`webkit_to_utc`], truncated to whole microseconds.
pub fn utc_to_webkit<Tz: TimeZone>(dt: &DateTime<Tz>) -> Option<i64> {
    let secs = i128::from(dt.timestamp()) + i128::from(WEBKIT_EPOCH_UNIX_OFFSET_SECONDS);
    let micros = secs * 1_000_000 + i128::from(dt.timestamp_subsec_micros());
    i64::try_from(micros).ok()
}
