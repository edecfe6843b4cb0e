use chrono::{DateTime, Utc};

/// Shipper company. Clients act on behalf of exactly one company.
#[derive(Debug, Clone)]
pub struct Company {
    pub id: String,
    pub name: String,
    /// Tax document (CNPJ), digits only
    pub document: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
