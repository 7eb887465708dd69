use serde::Serialize;

/// How a session was closed: explicitly by a member/admin, or by the
/// staleness timeout.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum ExitType {
    Manual,
    Auto,
}

impl ExitType {
    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            ExitType::Manual => "manual",
            ExitType::Auto => "auto",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "manual" => Some(ExitType::Manual),
            "auto" => Some(ExitType::Auto),
            _ => None,
        }
    }
}
