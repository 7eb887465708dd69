use super::{exit_type::ExitType, source::CheckInSource, status::SessionStatus};
use crate::utils::time::DT_FMT;
use chrono::NaiveDateTime;
use serde::Serialize;

/// One row per check-in/out event.
///
/// `status = In` iff `check_out_time` is None; the pair is kept denormalized
/// so the open-session subset can carry a partial unique index.
#[derive(Debug, Clone, Serialize)]
pub struct AttendanceSession {
    pub id: i64,
    pub gym_id: String,            // ⇔ attendance_sessions.gym_id (TEXT)
    pub member_id: String,         // ⇔ attendance_sessions.member_id (TEXT)
    pub check_in_time: NaiveDateTime,          // ⇔ check_in_time (TEXT "YYYY-MM-DD HH:MM:SS")
    pub check_out_time: Option<NaiveDateTime>, // ⇔ check_out_time (TEXT, NULL while open)
    pub status: SessionStatus,     // ⇔ status ('in' | 'out')
    pub exit_type: Option<ExitType>, // ⇔ exit_type ('manual' | 'auto', NULL while open)
    pub source: CheckInSource,     // ⇔ source ('qr_scan' | 'button' | 'admin')
    pub created_at: String,        // ⇔ created_at (TEXT, ISO8601)
}

impl AttendanceSession {
    pub fn is_open(&self) -> bool {
        self.status.is_in() && self.check_out_time.is_none()
    }

    pub fn check_in_str(&self) -> String {
        self.check_in_time.format(DT_FMT).to_string()
    }

    pub fn check_out_str(&self) -> String {
        match &self.check_out_time {
            Some(t) => t.format(DT_FMT).to_string(),
            None => "-".to_string(),
        }
    }
}
