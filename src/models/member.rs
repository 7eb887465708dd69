use serde::Serialize;

/// A member profile at one gym. The surrounding platform's membership
/// directory is the real owner of this data; gymgate keeps the minimal
/// projection the eligibility check and the CLI need.
#[derive(Debug, Clone, Serialize)]
pub struct MemberProfile {
    pub id: i64,
    pub gym_id: String,
    pub member_id: String, // badge code within the gym, used on sessions
    pub user_id: String,   // platform account behind the badge
    pub name: String,
    pub created_at: String,
}
