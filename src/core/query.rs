//! Attendance query facade: the read paths dashboards and history views
//! use. Member-scoped reads run the same lazy auto-close as the write
//! paths, so stale sessions are never reported as "currently in gym."

use crate::db::sessions::{count_checkins_between, load_history};
use crate::errors::AppResult;
use crate::models::day_counts::DayCounts;
use crate::models::session::AttendanceSession;
use crate::core::engine::resolve_open_session;
use crate::utils::time::day_bounds;
use chrono::{Duration, NaiveDate, NaiveDateTime};
use rusqlite::Connection;

/// A member's past sessions, most recent first. A negative limit means
/// no limit.
pub fn history(
    conn: &Connection,
    gym_id: &str,
    member_id: &str,
    limit: i64,
    now: NaiveDateTime,
    stale_after: Duration,
) -> AppResult<Vec<AttendanceSession>> {
    resolve_open_session(conn, gym_id, member_id, now, stale_after)?;
    load_history(conn, gym_id, member_id, limit)
}

/// Today's / yesterday's check-in counts and a 7-day trend for one gym.
/// Counts are by check-in date and include still-open sessions; no
/// per-member resolution is needed to count.
pub fn day_counts(conn: &Connection, gym_id: &str, today: NaiveDate) -> AppResult<DayCounts> {
    let mut trend = Vec::with_capacity(7);
    for offset in (0..7).rev() {
        let day = today - Duration::days(offset);
        let (since, until) = day_bounds(day);
        let count = count_checkins_between(conn, gym_id, &since, &until)?;
        trend.push((day, count));
    }

    let today_count = trend.last().map(|(_, c)| *c).unwrap_or(0);
    let yesterday_count = trend
        .get(trend.len().saturating_sub(2))
        .map(|(_, c)| *c)
        .unwrap_or(0);

    Ok(DayCounts {
        today: today_count,
        yesterday: yesterday_count,
        trend,
    })
}
