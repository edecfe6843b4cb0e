use std::cmp::Ordering;

use chrono::{DateTime, Utc};

/// Default name for a table created without one
pub const DEFAULT_TABLE_NAME: &str = "Tabela padrão";

#[derive(Debug, Clone)]
pub struct RateTable {
    pub id: String,
    pub carrier_id: String,
    pub name: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RateTableRow {
    pub id: String,
    pub rate_table_id: String,
    pub origin_state: String,
    pub destination_state: String,
    pub min_weight_kg: f64,
    pub max_weight_kg: f64,
    pub price_cents: i64,
    pub deadline_days: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewRateTableRow {
    pub rate_table_id: String,
    pub origin_state: String,
    pub destination_state: String,
    pub min_weight_kg: f64,
    pub max_weight_kg: f64,
    pub price_cents: i64,
    pub deadline_days: i32,
    pub is_active: bool,
}

impl RateTableRow {
    /// Active row for this state pair whose band contains `weight_kg` (inclusive)
    pub fn covers(&self, origin_state: &str, destination_state: &str, weight_kg: f64) -> bool {
        self.is_active
            && self.origin_state == origin_state
            && self.destination_state == destination_state
            && self.min_weight_kg <= weight_kg
            && weight_kg <= self.max_weight_kg
    }

    pub fn band_width(&self) -> f64 {
        self.max_weight_kg - self.min_weight_kg
    }
}

/// Best row of a single carrier for a route and weight.
///
/// Among covering rows: lowest price, then shortest deadline, then narrowest
/// weight band, then the oldest row.
pub fn pick_best_rate_row<'a>(
    rows: &'a [RateTableRow],
    origin_state: &str,
    destination_state: &str,
    weight_kg: f64,
) -> Option<&'a RateTableRow> {
    rows.iter()
        .filter(|r| r.covers(origin_state, destination_state, weight_kg))
        .min_by(|a, b| {
            a.price_cents
                .cmp(&b.price_cents)
                .then(a.deadline_days.cmp(&b.deadline_days))
                .then(
                    a.band_width()
                        .partial_cmp(&b.band_width())
                        .unwrap_or(Ordering::Equal),
                )
                .then(a.created_at.cmp(&b.created_at))
        })
}
