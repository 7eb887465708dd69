//! QR scan handler: payload → credential checks → eligibility → check-in.
//!
//! Every rejection before eligibility surfaces as the same INVALID_QR
//! outcome; a scanner cannot tell a wrong secret from an unknown gym or a
//! disabled one. Scanning never checks out.

use crate::core::eligibility::resolve_member;
use crate::core::engine::check_in;
use crate::db::qr::get_config;
use crate::errors::{AppError, AppResult};
use crate::models::session::AttendanceSession;
use crate::models::source::CheckInSource;
use crate::qr::QrPayload;
use chrono::{Duration, NaiveDateTime};
use rusqlite::Connection;

/// Compare secrets without leaking match position through timing.
/// Lengths are public (a mismatch rejects immediately); for equal lengths
/// every byte is visited and the differences accumulated.
fn secrets_match(scanned: &[u8], stored: &[u8]) -> bool {
    if scanned.len() != stored.len() {
        return false;
    }

    let mut diff = 0u8;
    for (a, b) in scanned.iter().zip(stored.iter()) {
        diff |= a ^ b;
    }
    diff == 0
}

/// Run a scanned payload through the full check-in pipeline.
pub fn handle_scan(
    conn: &Connection,
    raw_payload: &str,
    user_id: &str,
    now: NaiveDateTime,
    stale_after: Duration,
) -> AppResult<AttendanceSession> {
    // 1) Parse
    let payload: QrPayload =
        serde_json::from_str(raw_payload).map_err(|_| AppError::InvalidQr)?;

    // 2) Gym must have a config
    let cfg = get_config(conn, &payload.gym_id)?.ok_or(AppError::InvalidQr)?;

    // 3) Secret must match
    if !secrets_match(payload.secret.as_bytes(), cfg.secret.as_bytes()) {
        return Err(AppError::InvalidQr);
    }

    // 4) Kill switch
    if !cfg.is_enabled {
        return Err(AppError::InvalidQr);
    }

    // 5) Eligibility
    let profile = resolve_member(conn, user_id, &payload.gym_id)?;

    // 6) Check in; ALREADY_IN_GYM propagates as-is
    check_in(
        conn,
        &payload.gym_id,
        &profile.member_id,
        CheckInSource::QrScan,
        now,
        stale_after,
    )
}
