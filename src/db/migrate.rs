use rusqlite::{Connection, OptionalExtension, Result};

/// Ensure that the `log` table exists.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

/// Check if a table exists.
fn table_exists(conn: &Connection, name: &str) -> Result<bool> {
    let mut stmt =
        conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name=?1")?;
    let exists: Option<String> = stmt.query_row([name], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}

/// Create the `attendance_sessions` table.
///
/// The partial unique index over the open-session subset is the invariant
/// that survives concurrent check-ins: at most one row per (gym, member)
/// may be 'in' with no checkout. The losing writer of a race gets a
/// uniqueness violation from SQLite itself, never a second open row.
fn create_sessions_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS attendance_sessions (
            id             INTEGER PRIMARY KEY AUTOINCREMENT,
            gym_id         TEXT NOT NULL,
            member_id      TEXT NOT NULL,
            check_in_time  TEXT NOT NULL,
            check_out_time TEXT,
            status         TEXT NOT NULL CHECK(status IN ('in','out')),
            exit_type      TEXT CHECK(exit_type IN ('manual','auto')),
            source         TEXT NOT NULL CHECK(source IN ('qr_scan','button','admin')),
            created_at     TEXT NOT NULL
        );

        CREATE UNIQUE INDEX IF NOT EXISTS idx_sessions_open
            ON attendance_sessions(gym_id, member_id)
            WHERE status = 'in' AND check_out_time IS NULL;

        CREATE INDEX IF NOT EXISTS idx_sessions_member_time
            ON attendance_sessions(gym_id, member_id, check_in_time);
        CREATE INDEX IF NOT EXISTS idx_sessions_gym_time
            ON attendance_sessions(gym_id, check_in_time);
        "#,
    )?;
    Ok(())
}

/// Create the `qr_configs` table (one row per gym, lazily populated).
fn create_qr_configs_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS qr_configs (
            gym_id          TEXT PRIMARY KEY,
            secret          TEXT NOT NULL,
            is_enabled      INTEGER NOT NULL DEFAULT 1,
            last_rotated_at TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

/// Create the `members` table (local projection of the membership directory).
fn create_members_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS members (
            id         INTEGER PRIMARY KEY AUTOINCREMENT,
            gym_id     TEXT NOT NULL,
            member_id  TEXT NOT NULL,
            user_id    TEXT NOT NULL,
            name       TEXT NOT NULL,
            created_at TEXT NOT NULL,
            UNIQUE(gym_id, member_id),
            UNIQUE(gym_id, user_id)
        );
        "#,
    )?;
    Ok(())
}

/// Public entry point: run all pending migrations.
///
/// Invoked from db::init_db() and on demand via `gymgate db --migrate`.
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    // 1) Ensure log table
    ensure_log_table(conn)?;

    // 2) Core tables. CREATE IF NOT EXISTS keeps this re-runnable; the
    //    index statements also repair databases created before an index
    //    was introduced.
    create_sessions_table(conn)?;
    create_qr_configs_table(conn)?;
    create_members_table(conn)?;

    // Sanity probe so a truncated/corrupted file fails loudly here rather
    // than on first insert.
    for t in ["attendance_sessions", "qr_configs", "members"] {
        if !table_exists(conn, t)? {
            return Err(rusqlite::Error::SqliteFailure(
                rusqlite::ffi::Error::new(1),
                Some(format!("Migration did not produce table '{}'", t)),
            ));
        }
    }

    Ok(())
}
