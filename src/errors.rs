//! Unified application error type.
//! All modules (db, core, qr, cli) return AppError to keep the error
//! handling consistent and easy to manage.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Database migration error: {0}")]
    Migration(String),

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid timestamp format: {0}")]
    InvalidTimestamp(String),

    #[error("Invalid check-in source: {0}")]
    InvalidSource(String),

    // ---------------------------
    // Attendance outcomes (expected, user-facing)
    // ---------------------------
    #[error("You are already checked in. Use the Check Out button to leave.")]
    AlreadyInGym,

    #[error("You are not currently checked in.")]
    NotInGym,

    #[error("You are not a member of this gym.")]
    MemberNotFound,

    #[error("Invalid QR code. The code may have been updated.")]
    InvalidQr,

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

impl AppError {
    /// Machine-readable code for the expected attendance outcomes.
    /// Infrastructure errors have no code and are surfaced generically.
    pub fn code(&self) -> Option<&'static str> {
        match self {
            AppError::AlreadyInGym => Some("ALREADY_IN_GYM"),
            AppError::NotInGym => Some("NOT_IN_GYM"),
            AppError::MemberNotFound => Some("MEMBER_NOT_FOUND"),
            AppError::InvalidQr => Some("INVALID_QR"),
            _ => None,
        }
    }

    /// True for outcomes the caller can recover from (a rejected check-in,
    /// a checkout with nothing open, a bad scan). These are printed as
    /// warnings, not propagated as failures.
    pub fn is_expected(&self) -> bool {
        self.code().is_some()
    }
}

pub type AppResult<T> = Result<T, AppError>;
