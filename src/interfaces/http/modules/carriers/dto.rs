use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::Carrier;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CarrierDto {
    pub id: String,
    pub name: String,
    /// TRANSPORTADOR user operating the carrier
    pub owner_user_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Carrier> for CarrierDto {
    fn from(c: Carrier) -> Self {
        Self {
            id: c.id,
            name: c.name,
            owner_user_id: c.owner_user_id,
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCarrierRequest {
    #[validate(length(min = 1, max = 200, message = "name must be 1-200 characters"))]
    pub name: String,
    pub owner_user_id: Option<String>,
}
