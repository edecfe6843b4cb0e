//! Freight request entity

use chrono::{DateTime, NaiveDate, Utc};

use crate::domain::user::{User, UserRole};
use crate::shared::errors::{DomainError, DomainResult};

/// Lifecycle: OPEN → CLOSED (proposal selected) or OPEN → CANCELLED
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FreightRequestStatus {
    Open,
    Closed,
    Cancelled,
}

impl FreightRequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "OPEN",
            Self::Closed => "CLOSED",
            Self::Cancelled => "CANCELLED",
        }
    }
}

impl Default for FreightRequestStatus {
    fn default() -> Self {
        Self::Open
    }
}

impl std::fmt::Display for FreightRequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for FreightRequestStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "OPEN" => Ok(Self::Open),
            "CLOSED" => Ok(Self::Closed),
            "CANCELLED" => Ok(Self::Cancelled),
            other => Err(DomainError::Validation(format!(
                "Unknown freight request status '{}'",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct FreightRequest {
    pub id: String,
    pub company_id: String,
    pub created_by: String,
    pub status: FreightRequestStatus,
    pub origin_zip: String,
    pub origin_city: String,
    pub origin_state: String,
    pub destination_zip: String,
    pub destination_city: String,
    pub destination_state: String,
    pub cargo_type: String,
    pub cargo_description: Option<String>,
    pub weight_kg: Option<f64>,
    pub volume_m3: Option<f64>,
    pub length_cm: Option<f64>,
    pub width_cm: Option<f64>,
    pub height_cm: Option<f64>,
    pub invoice_value_cents: Option<i64>,
    pub pickup_date: NaiveDate,
    pub selected_proposal_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated input for a new request; ids and timestamps are assigned on insert
#[derive(Debug, Clone)]
pub struct NewFreightRequest {
    pub company_id: String,
    pub created_by: String,
    pub origin_zip: String,
    pub origin_city: String,
    pub origin_state: String,
    pub destination_zip: String,
    pub destination_city: String,
    pub destination_state: String,
    pub cargo_type: String,
    pub cargo_description: Option<String>,
    pub weight_kg: Option<f64>,
    pub volume_m3: Option<f64>,
    pub length_cm: Option<f64>,
    pub width_cm: Option<f64>,
    pub height_cm: Option<f64>,
    pub invoice_value_cents: Option<i64>,
    pub pickup_date: NaiveDate,
}

impl FreightRequest {
    pub fn is_open(&self) -> bool {
        self.status == FreightRequestStatus::Open && self.selected_proposal_id.is_none()
    }

    /// Carriers may only answer (or withdraw from) open requests
    pub fn ensure_open(&self) -> DomainResult<()> {
        if self.is_open() {
            Ok(())
        } else {
            Err(DomainError::Conflict(format!(
                "Freight request {} is {}",
                self.id,
                self.status.as_str().to_lowercase()
            )))
        }
    }

    /// Admins and users of the owning company may manage the request
    pub fn is_managed_by(&self, user: &User) -> bool {
        match user.role {
            UserRole::Admin => true,
            UserRole::Client => user.company_id.as_deref() == Some(self.company_id.as_str()),
            UserRole::Carrier => false,
        }
    }

    /// Carriers see every open request; shippers see their own company's
    pub fn is_visible_to(&self, user: &User) -> bool {
        match user.role {
            UserRole::Carrier => self.status == FreightRequestStatus::Open,
            _ => self.is_managed_by(user),
        }
    }
}
