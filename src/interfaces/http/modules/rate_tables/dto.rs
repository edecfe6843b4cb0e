//! Rate table DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::application::NewRowInput;
use crate::domain::{RateTable, RateTableRow};
use crate::shared::parsing::format_cents;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RateTableDto {
    pub id: String,
    pub carrier_id: String,
    pub name: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<RateTable> for RateTableDto {
    fn from(t: RateTable) -> Self {
        Self {
            id: t.id,
            carrier_id: t.carrier_id,
            name: t.name,
            is_active: t.is_active,
            created_at: t.created_at,
            updated_at: t.updated_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RateTableRowDto {
    pub id: String,
    pub rate_table_id: String,
    pub origin_state: String,
    pub destination_state: String,
    pub min_weight_kg: f64,
    pub max_weight_kg: f64,
    pub price_cents: i64,
    pub price: String,
    pub deadline_days: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<RateTableRow> for RateTableRowDto {
    fn from(r: RateTableRow) -> Self {
        Self {
            id: r.id,
            rate_table_id: r.rate_table_id,
            origin_state: r.origin_state,
            destination_state: r.destination_state,
            min_weight_kg: r.min_weight_kg,
            max_weight_kg: r.max_weight_kg,
            price_cents: r.price_cents,
            price: format_cents(r.price_cents),
            deadline_days: r.deadline_days,
            is_active: r.is_active,
            created_at: r.created_at,
        }
    }
}

/// Table with its rows, newest row first
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RateTableDetailDto {
    #[serde(flatten)]
    pub table: RateTableDto,
    pub rows: Vec<RateTableRowDto>,
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct CreateRateTableRequest {
    /// Defaults to "Tabela padrão"
    #[validate(length(max = 200))]
    pub name: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RenameRateTableRequest {
    #[validate(length(min = 1, max = 200, message = "name must be 1-200 characters"))]
    pub name: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SetActiveRequest {
    pub is_active: bool,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct AddRowRequest {
    #[validate(length(equal = 2, message = "must be a two-letter UF"))]
    pub origin_state: String,
    #[validate(length(equal = 2, message = "must be a two-letter UF"))]
    pub destination_state: String,
    pub min_weight_kg: f64,
    pub max_weight_kg: f64,
    /// Money text, `1.234,56` or `1234.56`
    #[validate(length(min = 1, max = 32, message = "price is required"))]
    pub price: String,
    #[validate(range(min = 1, max = 365, message = "deadline must be 1-365 days"))]
    pub deadline_days: i32,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl From<AddRowRequest> for NewRowInput {
    fn from(r: AddRowRequest) -> Self {
        Self {
            origin_state: r.origin_state,
            destination_state: r.destination_state,
            min_weight_kg: r.min_weight_kg,
            max_weight_kg: r.max_weight_kg,
            price: r.price,
            deadline_days: r.deadline_days,
            is_active: r.is_active,
        }
    }
}
