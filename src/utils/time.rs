//! Time utilities: parsing and formatting the TEXT timestamps stored in
//! SQLite, plus day-window helpers for the dashboard counts.

use crate::errors::{AppError, AppResult};
use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

/// Storage format for check-in/out timestamps.
pub const DT_FMT: &str = "%Y-%m-%d %H:%M:%S";

pub fn parse_dt(s: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, DT_FMT).ok()
}

pub fn fmt_dt(dt: &NaiveDateTime) -> String {
    dt.format(DT_FMT).to_string()
}

/// Current local time truncated to whole seconds, so stored and reparsed
/// values compare equal.
pub fn now_local() -> NaiveDateTime {
    let now = Local::now().naive_local();
    now.with_nanosecond(0).unwrap_or(now)
}

/// Parse an optional user-supplied timestamp (`--at`), accepting either
/// "YYYY-MM-DD HH:MM:SS" or "YYYY-MM-DD HH:MM".
pub fn parse_optional_dt(input: Option<&String>) -> AppResult<Option<NaiveDateTime>> {
    if let Some(s) = input {
        let t = parse_dt(s)
            .or_else(|| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").ok())
            .ok_or_else(|| AppError::InvalidTimestamp(s.to_string()))?;
        Ok(Some(t))
    } else {
        Ok(None)
    }
}

/// Half-open [start, end) bounds of one calendar day, in storage format.
/// String comparison on DT_FMT-formatted values matches chronological order.
pub fn day_bounds(date: NaiveDate) -> (String, String) {
    let start = date.and_time(NaiveTime::MIN);
    let end = start + chrono::Duration::days(1);
    (fmt_dt(&start), fmt_dt(&end))
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}
