//! Conversion between calendar dates and the historical API's tick addressing.
//!
//! A tick is 100ns counted from 0001-01-01T00:00:00Z.

use chrono::{DateTime, NaiveDate, NaiveTime};

use crate::error::RateError;

pub const TICKS_PER_SECOND: i64 = 10_000_000;
pub const TICKS_PER_DAY: i64 = 864_000_000_000;
/// Ticks at 1970-01-01T00:00:00Z.
pub const UNIX_EPOCH_TICKS: i64 = 621_355_968_000_000_000;

/// Parse a `YYYY-MM-DD` date; a malformed value is the caller's input error.
pub fn parse_iso_date(date: &str) -> Result<NaiveDate, RateError> {
    NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d").map_err(|_| {
        RateError::InvalidInput(format!(
            "Invalid date '{}', expected YYYY-MM-DD",
            date
        ))
    })
}

fn out_of_range(date: NaiveDate) -> RateError {
    RateError::InvalidInput(format!("Date {} is out of range", date))
}

/// Ticks at midnight UTC of `date`. Dates past the tick range are the caller's input error.
pub fn naive_date_to_ticks(date: NaiveDate) -> Result<i64, RateError> {
    let unix_seconds = date.and_time(NaiveTime::MIN).and_utc().timestamp();
    unix_seconds
        .checked_mul(TICKS_PER_SECOND)
        .and_then(|ticks| ticks.checked_add(UNIX_EPOCH_TICKS))
        .ok_or_else(|| out_of_range(date))
}

pub fn date_to_ticks(date: &str) -> Result<i64, RateError> {
    parse_iso_date(date).and_then(naive_date_to_ticks)
}

/// `[start, end)` bounds covering exactly one day.
pub fn day_to_ticks(date: NaiveDate) -> Result<(i64, i64), RateError> {
    let start = naive_date_to_ticks(date)?;
    let end = start
        .checked_add(TICKS_PER_DAY)
        .ok_or_else(|| out_of_range(date))?;
    Ok((start, end))
}

/// `[start, end)` bounds where `end` is the day after `end_date`, so the end date is included.
pub fn date_range_to_ticks(start_date: NaiveDate, end_date: NaiveDate) -> Result<(i64, i64), RateError> {
    let after_end = end_date.succ_opt().ok_or_else(|| {
        RateError::InvalidInput(format!("End date {} is out of range", end_date))
    })?;
    Ok((naive_date_to_ticks(start_date)?, naive_date_to_ticks(after_end)?))
}

pub fn ticks_to_date(ticks: i64) -> Option<NaiveDate> {
    let unix_seconds = ticks.checked_sub(UNIX_EPOCH_TICKS)?.div_euclid(TICKS_PER_SECOND);
    DateTime::from_timestamp(unix_seconds, 0).map(|dt| dt.date_naive())
}

/// Reassemble the date part of an upstream `DD.MM.YYYY HH:MM:SS` timestamp as `YYYY-MM-DD`.
pub fn upstream_timestamp_to_iso(timestamp: &str) -> Option<String> {
    let date_part = timestamp.split_whitespace().next()?;
    let parts: Vec<&str> = date_part.split('.').collect();
    if parts.len() != 3 {
        return None;
    }
    Some(format!("{}-{}-{}", parts[2], parts[1], parts[0]))
}
