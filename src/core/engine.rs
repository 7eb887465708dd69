//! Session lifecycle engine.
//!
//! States per (gym, member): NOT_CHECKED_IN → CHECKED_IN → CHECKED_OUT.
//! An open session past the staleness threshold auto-transitions to
//! CHECKED_OUT lazily, on the next touch of that member's attendance state;
//! there is no background sweep.

use crate::db::log::ttlog;
use crate::db::sessions::{
    close_session, find_open_session, get_session, insert_session, latest_session_between,
};
use crate::errors::{AppError, AppResult};
use crate::models::exit_type::ExitType;
use crate::models::session::AttendanceSession;
use crate::models::source::CheckInSource;
use crate::utils::time::{day_bounds, fmt_dt};
use chrono::{Duration, NaiveDateTime};
use rusqlite::Connection;

/// Staleness threshold applied when no configured value is supplied.
pub const DEFAULT_STALE_AFTER_HOURS: i64 = 3;

/// Today's attendance state for one member, as reported to callers.
#[derive(Debug)]
pub enum TodayStatus {
    NotCheckedIn,
    InGym(AttendanceSession),
    CheckedOut(AttendanceSession),
}

impl TodayStatus {
    pub fn label(&self) -> &'static str {
        match self {
            TodayStatus::NotCheckedIn => "not_checked_in",
            TodayStatus::InGym(_) => "in_gym",
            TodayStatus::CheckedOut(_) => "checked_out",
        }
    }

    pub fn record(&self) -> Option<&AttendanceSession> {
        match self {
            TodayStatus::NotCheckedIn => None,
            TodayStatus::InGym(s) | TodayStatus::CheckedOut(s) => Some(s),
        }
    }
}

/// Fetch the member's open session, auto-closing it first if stale.
///
/// A stale session is deemed to have ended at the timeout boundary
/// (check-in + threshold), not at query time. Every check-in, checkout
/// and query path starts here, so staleness is corrected on first touch
/// regardless of which path touches it.
pub fn resolve_open_session(
    conn: &Connection,
    gym_id: &str,
    member_id: &str,
    now: NaiveDateTime,
    stale_after: Duration,
) -> AppResult<Option<AttendanceSession>> {
    let Some(open) = find_open_session(conn, gym_id, member_id)? else {
        return Ok(None);
    };

    let deadline = open.check_in_time + stale_after;
    if deadline <= now {
        close_session(conn, open.id, deadline, ExitType::Auto)?;
        let _ = ttlog(
            conn,
            "auto_close",
            member_id,
            &format!(
                "Auto-closed stale session {} for gym={} at {}",
                open.id,
                gym_id,
                fmt_dt(&deadline)
            ),
        );
        return Ok(None);
    }

    Ok(Some(open))
}

/// Open a new session for the member.
///
/// The pre-check gives the common case a clean ALREADY_IN_GYM without
/// touching the index; the insert itself is what makes the race safe.
pub fn check_in(
    conn: &Connection,
    gym_id: &str,
    member_id: &str,
    source: CheckInSource,
    now: NaiveDateTime,
    stale_after: Duration,
) -> AppResult<AttendanceSession> {
    if resolve_open_session(conn, gym_id, member_id, now, stale_after)?.is_some() {
        return Err(AppError::AlreadyInGym);
    }

    let id = insert_session(conn, gym_id, member_id, now, source)?;

    let _ = ttlog(
        conn,
        "checkin",
        member_id,
        &format!(
            "Checked in at gym={} via {} at {}",
            gym_id,
            source.to_db_str(),
            fmt_dt(&now)
        ),
    );

    get_session(conn, id)?
        .ok_or_else(|| AppError::Other(format!("Session {} vanished after insert", id)))
}

/// Close the member's open session.
pub fn check_out(
    conn: &Connection,
    gym_id: &str,
    member_id: &str,
    now: NaiveDateTime,
    stale_after: Duration,
) -> AppResult<AttendanceSession> {
    let Some(open) = resolve_open_session(conn, gym_id, member_id, now, stale_after)? else {
        return Err(AppError::NotInGym);
    };

    // Conditional update keyed on the session's identity; a racing
    // checkout that got there first leaves nothing to close.
    if !close_session(conn, open.id, now, ExitType::Manual)? {
        return Err(AppError::NotInGym);
    }

    let _ = ttlog(
        conn,
        "checkout",
        member_id,
        &format!("Checked out of gym={} at {}", gym_id, fmt_dt(&now)),
    );

    get_session(conn, open.id)?
        .ok_or_else(|| AppError::Other(format!("Session {} vanished after close", open.id)))
}

/// Today's status: `in_gym` while a (non-stale) open session exists, else
/// `checked_out` with the most recent of today's sessions, else
/// `not_checked_in`.
pub fn status_today(
    conn: &Connection,
    gym_id: &str,
    member_id: &str,
    now: NaiveDateTime,
    stale_after: Duration,
) -> AppResult<TodayStatus> {
    if let Some(open) = resolve_open_session(conn, gym_id, member_id, now, stale_after)? {
        return Ok(TodayStatus::InGym(open));
    }

    let (since, until) = day_bounds(now.date());
    match latest_session_between(conn, gym_id, member_id, &since, &until)? {
        Some(s) => Ok(TodayStatus::CheckedOut(s)),
        None => Ok(TodayStatus::NotCheckedIn),
    }
}
