//! QR credential manager: owns the per-gym rotating secret and the
//! enabled flag, and renders the payload administrators display.
//!
//! Payloads carry no expiry; rotating the secret is the revocation
//! mechanism, and it invalidates every previously printed code at once.

pub mod scan;

use crate::db::log::ttlog;
use crate::db::qr::{get_config, insert_config, set_enabled as db_set_enabled, update_secret};
use crate::errors::{AppError, AppResult};
use crate::models::qr_config::QrConfig;
use chrono::Local;
use rand::RngCore;
use rusqlite::Connection;
use serde::{Deserialize, Serialize};

/// What the displayed QR code encodes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QrPayload {
    pub gym_id: String,
    pub secret: String,
}

/// 32 random bytes, hex-encoded.
pub fn generate_secret() -> String {
    let mut buf = [0u8; 32];
    rand::rngs::OsRng.fill_bytes(&mut buf);
    hex::encode(buf)
}

/// Return the gym's config, creating it on first access with a fresh
/// secret and scans enabled.
pub fn get_or_create_config(conn: &Connection, gym_id: &str) -> AppResult<QrConfig> {
    if let Some(cfg) = get_config(conn, gym_id)? {
        return Ok(cfg);
    }

    let cfg = QrConfig {
        gym_id: gym_id.to_string(),
        secret: generate_secret(),
        is_enabled: true,
        last_rotated_at: Local::now().to_rfc3339(),
    };
    insert_config(conn, &cfg)?;

    // INSERT OR IGNORE: re-read in case a concurrent first access won.
    get_config(conn, gym_id)?
        .ok_or_else(|| AppError::Other(format!("QR config for gym '{}' vanished", gym_id)))
}

/// Replace the gym's secret. Every previously displayed QR code stops
/// matching immediately.
pub fn regenerate_secret(conn: &Connection, gym_id: &str) -> AppResult<QrConfig> {
    get_or_create_config(conn, gym_id)?;

    let secret = generate_secret();
    let rotated_at = Local::now().to_rfc3339();
    update_secret(conn, gym_id, &secret, &rotated_at)?;

    let _ = ttlog(conn, "qr_rotate", gym_id, "QR secret regenerated");

    get_config(conn, gym_id)?
        .ok_or_else(|| AppError::Other(format!("QR config for gym '{}' vanished", gym_id)))
}

/// Toggle whether scans are accepted. Does not affect manual checkout.
pub fn set_enabled(conn: &Connection, gym_id: &str, enabled: bool) -> AppResult<QrConfig> {
    get_or_create_config(conn, gym_id)?;
    db_set_enabled(conn, gym_id, enabled)?;

    let _ = ttlog(
        conn,
        "qr_toggle",
        gym_id,
        if enabled { "QR scans enabled" } else { "QR scans disabled" },
    );

    get_config(conn, gym_id)?
        .ok_or_else(|| AppError::Other(format!("QR config for gym '{}' vanished", gym_id)))
}

/// The JSON administrators print or display.
pub fn payload_for(cfg: &QrConfig) -> AppResult<String> {
    let payload = QrPayload {
        gym_id: cfg.gym_id.clone(),
        secret: cfg.secret.clone(),
    };
    serde_json::to_string(&payload).map_err(|e| AppError::Other(e.to_string()))
}
