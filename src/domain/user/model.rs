//! User domain entity

use chrono::{DateTime, Utc};

use crate::shared::errors::{DomainError, DomainResult};

/// Platform role. Stored and serialized with the platform's Portuguese names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UserRole {
    Admin,
    /// Shipper company user ("CLIENTE")
    Client,
    /// Carrier user ("TRANSPORTADOR")
    Carrier,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "ADMIN",
            Self::Client => "CLIENTE",
            Self::Carrier => "TRANSPORTADOR",
        }
    }

    /// Roles allowed to open freight requests and run quotes
    pub fn is_shipper(&self) -> bool {
        matches!(self, Self::Admin | Self::Client)
    }
}

impl Default for UserRole {
    fn default() -> Self {
        Self::Client
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for UserRole {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "ADMIN" => Ok(Self::Admin),
            "CLIENTE" => Ok(Self::Client),
            "TRANSPORTADOR" => Ok(Self::Carrier),
            other => Err(DomainError::Validation(format!("Unknown role '{}'", other))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: UserRole,
    /// Shipper company the user acts for (clients and, optionally, admins)
    pub company_id: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub last_login_at: Option<DateTime<Utc>>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }

    /// Company the user must be bound to for shipper operations
    pub fn require_company(&self) -> DomainResult<&str> {
        self.company_id
            .as_deref()
            .ok_or_else(|| DomainError::Validation("User is not linked to a company".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_round_trips_through_its_name() {
        for role in [UserRole::Admin, UserRole::Client, UserRole::Carrier] {
            assert_eq!(role.as_str().parse::<UserRole>().unwrap(), role);
        }
        assert_eq!("cliente".parse::<UserRole>().unwrap(), UserRole::Client);
        assert!("viewer".parse::<UserRole>().is_err());
    }

    #[test]
    fn only_admin_and_client_are_shippers() {
        assert!(UserRole::Admin.is_shipper());
        assert!(UserRole::Client.is_shipper());
        assert!(!UserRole::Carrier.is_shipper());
    }
}
