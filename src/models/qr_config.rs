use serde::Serialize;

/// Per-gym QR credential: a rotating shared secret plus a kill switch.
/// Created lazily on first access; mutated only by admin actions.
#[derive(Debug, Clone, Serialize)]
pub struct QrConfig {
    pub gym_id: String,          // ⇔ qr_configs.gym_id (TEXT PK)
    pub secret: String,          // ⇔ qr_configs.secret (64-char hex)
    pub is_enabled: bool,        // ⇔ qr_configs.is_enabled (INTEGER 0/1)
    pub last_rotated_at: String, // ⇔ qr_configs.last_rotated_at (TEXT, ISO8601)
}
