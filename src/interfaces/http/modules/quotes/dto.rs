//! Quote DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::application::{QuoteInput, QuoteWithResults};
use crate::domain::{Quote, QuoteResult};
use crate::shared::parsing::format_cents;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct QuoteDto {
    pub id: String,
    pub company_id: String,
    pub created_by: String,
    pub status: String,
    pub origin_zip: String,
    pub origin_city: String,
    pub origin_state: String,
    pub destination_zip: String,
    pub destination_city: String,
    pub destination_state: String,
    pub weight_kg: f64,
    pub length_cm: Option<f64>,
    pub width_cm: Option<f64>,
    pub height_cm: Option<f64>,
    pub cargo_type: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Quote> for QuoteDto {
    fn from(q: Quote) -> Self {
        Self {
            id: q.id,
            company_id: q.company_id,
            created_by: q.created_by,
            status: q.status.to_string(),
            origin_zip: q.origin_zip,
            origin_city: q.origin_city,
            origin_state: q.origin_state,
            destination_zip: q.destination_zip,
            destination_city: q.destination_city,
            destination_state: q.destination_state,
            weight_kg: q.weight_kg,
            length_cm: q.length_cm,
            width_cm: q.width_cm,
            height_cm: q.height_cm,
            cargo_type: q.cargo_type,
            created_at: q.created_at,
        }
    }
}

/// One carrier offer
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct QuoteResultDto {
    pub id: String,
    pub carrier_id: String,
    /// TABELA or API
    pub origin_source: String,
    pub price_cents: i64,
    pub price: String,
    pub deadline_days: i32,
    pub status: String,
    pub rate_row_id: Option<String>,
}

impl From<QuoteResult> for QuoteResultDto {
    fn from(r: QuoteResult) -> Self {
        Self {
            id: r.id,
            carrier_id: r.carrier_id,
            origin_source: r.origin_source.to_string(),
            price_cents: r.price_cents,
            price: format_cents(r.price_cents),
            deadline_days: r.deadline_days,
            status: r.status.to_string(),
            rate_row_id: r.rate_row_id,
        }
    }
}

/// Quote plus offers, cheapest first
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct QuoteDetailDto {
    pub quote: QuoteDto,
    pub results: Vec<QuoteResultDto>,
}

impl From<QuoteWithResults> for QuoteDetailDto {
    fn from(q: QuoteWithResults) -> Self {
        Self {
            quote: q.quote.into(),
            results: q.results.into_iter().map(QuoteResultDto::from).collect(),
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateQuoteRequest {
    /// Administrators may quote for any company
    pub company_id: Option<String>,
    #[validate(length(min = 1, max = 32, message = "postal code is required"))]
    pub origin_zip: String,
    #[validate(length(min = 1, max = 32, message = "postal code is required"))]
    pub destination_zip: String,
    pub weight_kg: f64,
    pub length_cm: Option<f64>,
    pub width_cm: Option<f64>,
    pub height_cm: Option<f64>,
    #[validate(length(max = 100))]
    pub cargo_type: Option<String>,
}

impl From<CreateQuoteRequest> for QuoteInput {
    fn from(r: CreateQuoteRequest) -> Self {
        Self {
            company_id: r.company_id,
            origin_zip: r.origin_zip,
            destination_zip: r.destination_zip,
            weight_kg: r.weight_kg,
            length_cm: r.length_cm,
            width_cm: r.width_cm,
            height_cm: r.height_cm,
            cargo_type: r.cargo_type,
        }
    }
}
