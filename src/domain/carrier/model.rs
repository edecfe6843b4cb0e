use chrono::{DateTime, Utc};

/// Freight carrier. Operated by at most one TRANSPORTADOR user.
#[derive(Debug, Clone)]
pub struct Carrier {
    pub id: String,
    pub name: String,
    pub owner_user_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
