//! Export a member's attendance history to CSV or JSON.

use crate::db::pool::DbPool;
use crate::db::sessions::load_history;
use crate::errors::{AppError, AppResult};
use crate::models::session::AttendanceSession;
use clap::ValueEnum;
use serde::Serialize;
use std::fs::File;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Csv,
    Json,
}

/// Flat row shape shared by both formats.
#[derive(Serialize)]
struct HistoryRow {
    id: i64,
    gym_id: String,
    member_id: String,
    check_in_time: String,
    check_out_time: String,
    status: &'static str,
    exit_type: String,
    source: &'static str,
}

impl From<&AttendanceSession> for HistoryRow {
    fn from(s: &AttendanceSession) -> Self {
        HistoryRow {
            id: s.id,
            gym_id: s.gym_id.clone(),
            member_id: s.member_id.clone(),
            check_in_time: s.check_in_str(),
            check_out_time: s.check_out_str(),
            status: s.status.to_db_str(),
            exit_type: s
                .exit_type
                .map(|e| e.to_db_str().to_string())
                .unwrap_or_else(|| "-".to_string()),
            source: s.source.to_db_str(),
        }
    }
}

/// Write the member's history (most recent first) to `file`.
/// Returns the number of exported rows.
pub fn export_history(
    pool: &mut DbPool,
    gym_id: &str,
    member_id: &str,
    format: ExportFormat,
    file: &str,
    force: bool,
) -> AppResult<usize> {
    let path = Path::new(file);
    if path.exists() && !force {
        return Err(AppError::Export(format!(
            "File '{}' already exists (use --force to overwrite)",
            file
        )));
    }

    let sessions = load_history(&pool.conn, gym_id, member_id, -1)?;
    let rows: Vec<HistoryRow> = sessions.iter().map(HistoryRow::from).collect();

    match format {
        ExportFormat::Csv => {
            let mut writer = csv::Writer::from_path(path)
                .map_err(|e| AppError::Export(e.to_string()))?;
            for row in &rows {
                writer
                    .serialize(row)
                    .map_err(|e| AppError::Export(e.to_string()))?;
            }
            writer.flush()?;
        }
        ExportFormat::Json => {
            let out = File::create(path)?;
            serde_json::to_writer_pretty(out, &rows)
                .map_err(|e| AppError::Export(e.to_string()))?;
        }
    }

    Ok(rows.len())
}
