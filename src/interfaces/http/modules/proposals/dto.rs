use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::FreightProposal;
use crate::shared::parsing::format_cents;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProposalDto {
    pub id: String,
    pub freight_request_id: String,
    pub carrier_id: String,
    pub price_cents: i64,
    pub price: String,
    pub deadline_days: i32,
    pub notes: Option<String>,
    /// SENT, WITHDRAWN, WON or LOST
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<FreightProposal> for ProposalDto {
    fn from(p: FreightProposal) -> Self {
        Self {
            id: p.id,
            freight_request_id: p.freight_request_id,
            carrier_id: p.carrier_id,
            price_cents: p.price_cents,
            price: format_cents(p.price_cents),
            deadline_days: p.deadline_days,
            notes: p.notes,
            status: p.status.to_string(),
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SubmitProposalRequest {
    /// Money text, `1.234,56` or `1234.56`
    #[validate(length(min = 1, max = 32, message = "price is required"))]
    pub price: String,
    #[validate(range(min = 1, max = 365, message = "deadline must be 1-365 days"))]
    pub deadline_days: i32,
    #[validate(length(max = 2000))]
    pub notes: Option<String>,
}
