//! Eligibility: a check-in request must come from (or name) someone with a
//! member profile at the target gym. Profile existence is the only current
//! requirement; membership-active checks would slot in here if needed.

use crate::db::members::{find_by_member_id, find_by_user};
use crate::errors::{AppError, AppResult};
use crate::models::member::MemberProfile;
use rusqlite::Connection;

/// Resolve the scanning user's profile at the gym (the QR path).
pub fn resolve_member(
    conn: &Connection,
    user_id: &str,
    gym_id: &str,
) -> AppResult<MemberProfile> {
    find_by_user(conn, gym_id, user_id)?.ok_or(AppError::MemberNotFound)
}

/// Resolve a profile by badge code (the admin/trainer button path).
pub fn resolve_member_by_code(
    conn: &Connection,
    member_id: &str,
    gym_id: &str,
) -> AppResult<MemberProfile> {
    find_by_member_id(conn, gym_id, member_id)?.ok_or(AppError::MemberNotFound)
}
