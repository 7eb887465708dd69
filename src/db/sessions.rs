use crate::errors::{AppError, AppResult};
use crate::models::exit_type::ExitType;
use crate::models::session::AttendanceSession;
use crate::models::source::CheckInSource;
use crate::models::status::SessionStatus;
use crate::utils::time::{fmt_dt, parse_dt};
use chrono::{Local, NaiveDateTime};
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

pub fn map_row(row: &Row) -> Result<AttendanceSession> {
    let check_in_str: String = row.get("check_in_time")?;
    let check_in_time = parse_dt(&check_in_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidTimestamp(check_in_str.clone())),
        )
    })?;

    let check_out_str: Option<String> = row.get("check_out_time")?;
    let check_out_time = match check_out_str {
        Some(s) => Some(parse_dt(&s).ok_or_else(|| {
            rusqlite::Error::FromSqlConversionFailure(
                0,
                rusqlite::types::Type::Text,
                Box::new(AppError::InvalidTimestamp(s.clone())),
            )
        })?),
        None => None,
    };

    let status_str: String = row.get("status")?;
    let status = SessionStatus::from_db_str(&status_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::Other(format!("Invalid status: {}", status_str))),
        )
    })?;

    let exit_str: Option<String> = row.get("exit_type")?;
    let exit_type = match exit_str {
        Some(s) => Some(ExitType::from_db_str(&s).ok_or_else(|| {
            rusqlite::Error::FromSqlConversionFailure(
                0,
                rusqlite::types::Type::Text,
                Box::new(AppError::Other(format!("Invalid exit_type: {}", s))),
            )
        })?),
        None => None,
    };

    let source_str: String = row.get("source")?;
    let source = CheckInSource::from_db_str(&source_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidSource(source_str.clone())),
        )
    })?;

    Ok(AttendanceSession {
        id: row.get("id")?,
        gym_id: row.get("gym_id")?,
        member_id: row.get("member_id")?,
        check_in_time,
        check_out_time,
        status,
        exit_type,
        source,
        created_at: row.get("created_at")?,
    })
}

/// The member's current open session, if any. The lifecycle engine decides
/// whether it is stale; this is a plain lookup.
pub fn find_open_session(
    conn: &Connection,
    gym_id: &str,
    member_id: &str,
) -> AppResult<Option<AttendanceSession>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM attendance_sessions
         WHERE gym_id = ?1 AND member_id = ?2
           AND status = 'in' AND check_out_time IS NULL
         LIMIT 1",
    )?;

    let session = stmt
        .query_row(params![gym_id, member_id], map_row)
        .optional()?;
    Ok(session)
}

/// Insert a new open session.
///
/// A uniqueness violation on idx_sessions_open means a concurrent request
/// won the race; it is re-mapped to the same ALREADY_IN_GYM outcome a
/// pre-check would have produced, so callers observe consistent semantics
/// regardless of which request won.
pub fn insert_session(
    conn: &Connection,
    gym_id: &str,
    member_id: &str,
    check_in_time: NaiveDateTime,
    source: CheckInSource,
) -> AppResult<i64> {
    let res = conn.execute(
        "INSERT INTO attendance_sessions
             (gym_id, member_id, check_in_time, check_out_time, status, exit_type, source, created_at)
         VALUES (?1, ?2, ?3, NULL, 'in', NULL, ?4, ?5)",
        params![
            gym_id,
            member_id,
            fmt_dt(&check_in_time),
            source.to_db_str(),
            Local::now().to_rfc3339(),
        ],
    );

    match res {
        Ok(_) => Ok(conn.last_insert_rowid()),
        Err(rusqlite::Error::SqliteFailure(e, _))
            if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE =>
        {
            Err(AppError::AlreadyInGym)
        }
        Err(e) => Err(e.into()),
    }
}

/// Close a session, keyed on its id AND on it still being open.
/// Returns false when someone else closed it first.
pub fn close_session(
    conn: &Connection,
    id: i64,
    check_out_time: NaiveDateTime,
    exit_type: ExitType,
) -> AppResult<bool> {
    let affected = conn.execute(
        "UPDATE attendance_sessions
         SET check_out_time = ?1, status = 'out', exit_type = ?2
         WHERE id = ?3 AND status = 'in' AND check_out_time IS NULL",
        params![fmt_dt(&check_out_time), exit_type.to_db_str(), id],
    )?;
    Ok(affected > 0)
}

pub fn get_session(conn: &Connection, id: i64) -> AppResult<Option<AttendanceSession>> {
    let mut stmt = conn.prepare("SELECT * FROM attendance_sessions WHERE id = ?1")?;
    let session = stmt.query_row([id], map_row).optional()?;
    Ok(session)
}

/// Most recent session whose check-in falls in [since, until).
pub fn latest_session_between(
    conn: &Connection,
    gym_id: &str,
    member_id: &str,
    since: &str,
    until: &str,
) -> AppResult<Option<AttendanceSession>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM attendance_sessions
         WHERE gym_id = ?1 AND member_id = ?2
           AND check_in_time >= ?3 AND check_in_time < ?4
         ORDER BY check_in_time DESC, id DESC
         LIMIT 1",
    )?;

    let session = stmt
        .query_row(params![gym_id, member_id, since, until], map_row)
        .optional()?;
    Ok(session)
}

/// A member's sessions, most recent first. A negative limit means no
/// limit (SQLite semantics).
pub fn load_history(
    conn: &Connection,
    gym_id: &str,
    member_id: &str,
    limit: i64,
) -> AppResult<Vec<AttendanceSession>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM attendance_sessions
         WHERE gym_id = ?1 AND member_id = ?2
         ORDER BY check_in_time DESC, id DESC
         LIMIT ?3",
    )?;

    let rows = stmt.query_map(params![gym_id, member_id, limit], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Check-ins for a gym whose check_in_time falls in [since, until).
/// String comparison matches chronological order for DT_FMT values.
pub fn count_checkins_between(
    conn: &Connection,
    gym_id: &str,
    since: &str,
    until: &str,
) -> AppResult<i64> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM attendance_sessions
         WHERE gym_id = ?1 AND check_in_time >= ?2 AND check_in_time < ?3",
        params![gym_id, since, until],
        |row| row.get(0),
    )?;
    Ok(count)
}

/// Open rows for one (gym, member). The storage invariant keeps this at
/// 0 or 1; tests assert it never exceeds 1.
pub fn count_open_sessions(
    conn: &Connection,
    gym_id: &str,
    member_id: &str,
) -> AppResult<i64> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM attendance_sessions
         WHERE gym_id = ?1 AND member_id = ?2
           AND status = 'in' AND check_out_time IS NULL",
        params![gym_id, member_id],
        |row| row.get(0),
    )?;
    Ok(count)
}
