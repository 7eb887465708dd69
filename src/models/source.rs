use serde::Serialize;

/// How a session was opened.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum CheckInSource {
    QrScan,  // member scanned the gym QR code
    Button,  // member pressed the check-in button
    Admin,   // admin/trainer checked the member in
}

impl CheckInSource {
    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            CheckInSource::QrScan => "qr_scan",
            CheckInSource::Button => "button",
            CheckInSource::Admin => "admin",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "qr_scan" => Some(CheckInSource::QrScan),
            "button" => Some(CheckInSource::Button),
            "admin" => Some(CheckInSource::Admin),
            _ => None,
        }
    }

    /// Helper: convert input code from CLI (lowercase or uppercase)
    pub fn from_code(code: &str) -> Option<Self> {
        CheckInSource::from_db_str(&code.to_lowercase())
    }
}
