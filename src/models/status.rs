use serde::Serialize;

/// Denormalized session state: `In` iff the row has no checkout yet.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum SessionStatus {
    In,
    Out,
}

impl SessionStatus {
    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            SessionStatus::In => "in",
            SessionStatus::Out => "out",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "in" => Some(SessionStatus::In),
            "out" => Some(SessionStatus::Out),
            _ => None,
        }
    }

    pub fn is_in(&self) -> bool {
        matches!(self, SessionStatus::In)
    }
}
