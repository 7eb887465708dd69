use crate::errors::{AppError, AppResult};
use crate::models::member::MemberProfile;
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

pub fn map_row(row: &Row) -> Result<MemberProfile> {
    Ok(MemberProfile {
        id: row.get("id")?,
        gym_id: row.get("gym_id")?,
        member_id: row.get("member_id")?,
        user_id: row.get("user_id")?,
        name: row.get("name")?,
        created_at: row.get("created_at")?,
    })
}

/// Profile lookup by platform account (the QR scan path).
pub fn find_by_user(
    conn: &Connection,
    gym_id: &str,
    user_id: &str,
) -> AppResult<Option<MemberProfile>> {
    let mut stmt =
        conn.prepare("SELECT * FROM members WHERE gym_id = ?1 AND user_id = ?2")?;
    let member = stmt.query_row(params![gym_id, user_id], map_row).optional()?;
    Ok(member)
}

/// Profile lookup by badge code (the admin/button path).
pub fn find_by_member_id(
    conn: &Connection,
    gym_id: &str,
    member_id: &str,
) -> AppResult<Option<MemberProfile>> {
    let mut stmt =
        conn.prepare("SELECT * FROM members WHERE gym_id = ?1 AND member_id = ?2")?;
    let member = stmt
        .query_row(params![gym_id, member_id], map_row)
        .optional()?;
    Ok(member)
}

pub fn insert_member(
    conn: &Connection,
    gym_id: &str,
    member_id: &str,
    user_id: &str,
    name: &str,
    created_at: &str,
) -> AppResult<i64> {
    let res = conn.execute(
        "INSERT INTO members (gym_id, member_id, user_id, name, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![gym_id, member_id, user_id, name, created_at],
    );

    match res {
        Ok(_) => Ok(conn.last_insert_rowid()),
        Err(rusqlite::Error::SqliteFailure(e, _))
            if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE =>
        {
            Err(AppError::Other(format!(
                "Member '{}' (user '{}') already exists at gym '{}'",
                member_id, user_id, gym_id
            )))
        }
        Err(e) => Err(e.into()),
    }
}

pub fn list_members(conn: &Connection, gym_id: &str) -> AppResult<Vec<MemberProfile>> {
    let mut stmt =
        conn.prepare("SELECT * FROM members WHERE gym_id = ?1 ORDER BY member_id ASC")?;
    let rows = stmt.query_map([gym_id], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}
