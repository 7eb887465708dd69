use crate::errors::AppResult;
use crate::models::qr_config::QrConfig;
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

pub fn map_row(row: &Row) -> Result<QrConfig> {
    let enabled: i64 = row.get("is_enabled")?;
    Ok(QrConfig {
        gym_id: row.get("gym_id")?,
        secret: row.get("secret")?,
        is_enabled: enabled != 0,
        last_rotated_at: row.get("last_rotated_at")?,
    })
}

pub fn get_config(conn: &Connection, gym_id: &str) -> AppResult<Option<QrConfig>> {
    let mut stmt = conn.prepare("SELECT * FROM qr_configs WHERE gym_id = ?1")?;
    let cfg = stmt.query_row([gym_id], map_row).optional()?;
    Ok(cfg)
}

/// Insert a fresh config row. `INSERT OR IGNORE` keeps lazy creation safe
/// under concurrent first access: the loser re-reads the winner's row.
pub fn insert_config(conn: &Connection, cfg: &QrConfig) -> AppResult<()> {
    conn.execute(
        "INSERT OR IGNORE INTO qr_configs (gym_id, secret, is_enabled, last_rotated_at)
         VALUES (?1, ?2, ?3, ?4)",
        params![
            cfg.gym_id,
            cfg.secret,
            if cfg.is_enabled { 1 } else { 0 },
            cfg.last_rotated_at,
        ],
    )?;
    Ok(())
}

pub fn update_secret(
    conn: &Connection,
    gym_id: &str,
    secret: &str,
    rotated_at: &str,
) -> AppResult<bool> {
    let affected = conn.execute(
        "UPDATE qr_configs SET secret = ?1, last_rotated_at = ?2 WHERE gym_id = ?3",
        params![secret, rotated_at, gym_id],
    )?;
    Ok(affected > 0)
}

pub fn set_enabled(conn: &Connection, gym_id: &str, enabled: bool) -> AppResult<bool> {
    let affected = conn.execute(
        "UPDATE qr_configs SET is_enabled = ?1 WHERE gym_id = ?2",
        params![if enabled { 1 } else { 0 }, gym_id],
    )?;
    Ok(affected > 0)
}
