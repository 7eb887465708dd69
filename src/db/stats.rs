use crate::db::pool::DbPool;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use rusqlite::OptionalExtension;
use std::fs;

pub fn print_db_info(pool: &mut DbPool, db_path: &str) -> rusqlite::Result<()> {
    println!();

    //
    // 1) FILE SIZE
    //
    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_mb = (file_size as f64) / (1024.0 * 1024.0);

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.2} MB", CYAN, RESET, file_mb);

    //
    // 2) TOTAL SESSIONS
    //
    let total: i64 = pool
        .conn
        .query_row("SELECT COUNT(*) FROM attendance_sessions", [], |row| {
            row.get(0)
        })?;
    println!(
        "{}• Total sessions:{} {}{}{}",
        CYAN, RESET, GREEN, total, RESET
    );

    //
    // 3) CURRENTLY OPEN
    //
    let open: i64 = pool.conn.query_row(
        "SELECT COUNT(*) FROM attendance_sessions
         WHERE status = 'in' AND check_out_time IS NULL",
        [],
        |row| row.get(0),
    )?;
    println!("{}• Open sessions:{} {}", CYAN, RESET, open);

    //
    // 4) DATE RANGE
    //
    let first: Option<String> = pool
        .conn
        .query_row(
            "SELECT check_in_time FROM attendance_sessions ORDER BY check_in_time ASC LIMIT 1",
            [],
            |row| row.get(0),
        )
        .optional()?;

    let last: Option<String> = pool
        .conn
        .query_row(
            "SELECT check_in_time FROM attendance_sessions ORDER BY check_in_time DESC LIMIT 1",
            [],
            |row| row.get(0),
        )
        .optional()?;

    let fmt_first = first.unwrap_or_else(|| format!("{GREY}--{RESET}"));
    let fmt_last = last.unwrap_or_else(|| format!("{GREY}--{RESET}"));

    println!("{}• Check-in range:{}", CYAN, RESET);
    println!("    from: {}", fmt_first);
    println!("    to:   {}", fmt_last);

    //
    // 5) GYMS SEEN
    //
    let gyms: i64 = pool.conn.query_row(
        "SELECT COUNT(DISTINCT gym_id) FROM attendance_sessions",
        [],
        |row| row.get(0),
    )?;
    println!("{}• Gyms with sessions:{} {}", CYAN, RESET, gyms);

    println!();
    Ok(())
}
