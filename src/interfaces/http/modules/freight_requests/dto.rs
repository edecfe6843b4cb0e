//! Freight request DTOs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::application::CreateFreightRequest;
use crate::domain::FreightRequest;
use crate::shared::parsing::format_cents;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct FreightRequestDto {
    pub id: String,
    pub company_id: String,
    pub created_by: String,
    /// OPEN, CLOSED or CANCELLED
    pub status: String,
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
    /// Decimal rendering of `invoice_value_cents`
    pub invoice_value: Option<String>,
    pub pickup_date: NaiveDate,
    pub selected_proposal_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<FreightRequest> for FreightRequestDto {
    fn from(r: FreightRequest) -> Self {
        Self {
            id: r.id,
            company_id: r.company_id,
            created_by: r.created_by,
            status: r.status.to_string(),
            origin_zip: r.origin_zip,
            origin_city: r.origin_city,
            origin_state: r.origin_state,
            destination_zip: r.destination_zip,
            destination_city: r.destination_city,
            destination_state: r.destination_state,
            cargo_type: r.cargo_type,
            cargo_description: r.cargo_description,
            weight_kg: r.weight_kg,
            volume_m3: r.volume_m3,
            length_cm: r.length_cm,
            width_cm: r.width_cm,
            height_cm: r.height_cm,
            invoice_value_cents: r.invoice_value_cents,
            invoice_value: r.invoice_value_cents.map(format_cents),
            pickup_date: r.pickup_date,
            selected_proposal_id: r.selected_proposal_id,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

/// City and state are looked up from the postal code when omitted
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateFreightRequestBody {
    /// Administrators may open a request on behalf of any company
    pub company_id: Option<String>,
    #[validate(length(min = 1, max = 32, message = "postal code is required"))]
    pub origin_zip: String,
    pub origin_city: Option<String>,
    pub origin_state: Option<String>,
    #[validate(length(min = 1, max = 32, message = "postal code is required"))]
    pub destination_zip: String,
    pub destination_city: Option<String>,
    pub destination_state: Option<String>,
    #[validate(length(min = 1, max = 100, message = "cargo type is required"))]
    pub cargo_type: String,
    #[validate(length(max = 2000))]
    pub cargo_description: Option<String>,
    pub weight_kg: Option<f64>,
    pub volume_m3: Option<f64>,
    pub length_cm: Option<f64>,
    pub width_cm: Option<f64>,
    pub height_cm: Option<f64>,
    /// Money text, `1.234,56` or `1234.56`
    pub invoice_value: Option<String>,
    pub pickup_date: Option<NaiveDate>,
}

impl From<CreateFreightRequestBody> for CreateFreightRequest {
    fn from(b: CreateFreightRequestBody) -> Self {
        Self {
            company_id: b.company_id,
            origin_zip: b.origin_zip,
            origin_city: b.origin_city,
            origin_state: b.origin_state,
            destination_zip: b.destination_zip,
            destination_city: b.destination_city,
            destination_state: b.destination_state,
            cargo_type: b.cargo_type,
            cargo_description: b.cargo_description,
            weight_kg: b.weight_kg,
            volume_m3: b.volume_m3,
            length_cm: b.length_cm,
            width_cm: b.width_cm,
            height_cm: b.height_cm,
            invoice_value: b.invoice_value,
            pickup_date: b.pickup_date,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SelectProposalRequest {
    #[validate(length(min = 1, message = "proposal_id is required"))]
    pub proposal_id: String,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct ListFreightRequestsParams {
    /// OPEN, CLOSED or CANCELLED
    pub status: Option<String>,
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_limit")]
    pub limit: u32,
}

fn default_page() -> u32 {
    1
}

fn default_limit() -> u32 {
    50
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn postal_code_formatting_is_left_to_the_service() {
        let body: CreateFreightRequestBody = serde_json::from_value(serde_json::json!({
            "origin_zip": "01 310-100",
            "destination_zip": " 20.040-020 ",
            "cargo_type": "Pallets",
            "pickup_date": "2026-11-10"
        }))
        .unwrap();
        assert!(body.validate().is_ok());

        let blank: CreateFreightRequestBody = serde_json::from_value(serde_json::json!({
            "origin_zip": "",
            "destination_zip": "20040020",
            "cargo_type": "Pallets"
        }))
        .unwrap();
        assert!(blank.validate().is_err());
    }
}
