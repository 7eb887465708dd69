use chrono::NaiveDate;
use serde::Serialize;

/// Dashboard aggregates: check-ins counted by check-in date.
#[derive(Debug, Default, Serialize)]
pub struct DayCounts {
    pub today: i64,
    pub yesterday: i64,
    /// Last 7 days (oldest first), today included.
    pub trend: Vec<(NaiveDate, i64)>,
}
