use chrono::{DateTime, Utc};

use crate::domain::user::{User, UserRole};
use crate::domain::ProposalStatus;
use crate::shared::errors::DomainError;

pub use crate::domain::freight_request::FreightRequestStatus as QuoteStatus;

/// Where an offer came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OfferSource {
    /// Carrier rate table lookup
    Table,
    /// Carrier integration (not produced yet)
    Api,
}

impl OfferSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Table => "TABELA",
            Self::Api => "API",
        }
    }
}

impl std::fmt::Display for OfferSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for OfferSource {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "TABELA" => Ok(Self::Table),
            "API" => Ok(Self::Api),
            other => Err(DomainError::Validation(format!(
                "Unknown offer source '{}'",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Quote {
    pub id: String,
    pub company_id: String,
    pub created_by: String,
    pub status: QuoteStatus,
    pub origin_zip: String,
    pub destination_zip: String,
    pub weight_kg: f64,
    pub length_cm: Option<f64>,
    pub width_cm: Option<f64>,
    pub height_cm: Option<f64>,
    pub cargo_type: Option<String>,
    pub origin_city: String,
    pub origin_state: String,
    pub destination_city: String,
    pub destination_state: String,
    pub created_at: DateTime<Utc>,
}

impl Quote {
    pub fn is_visible_to(&self, user: &User) -> bool {
        match user.role {
            UserRole::Admin => true,
            UserRole::Client => user.company_id.as_deref() == Some(self.company_id.as_str()),
            UserRole::Carrier => false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewQuote {
    pub company_id: String,
    pub created_by: String,
    pub origin_zip: String,
    pub destination_zip: String,
    pub weight_kg: f64,
    pub length_cm: Option<f64>,
    pub width_cm: Option<f64>,
    pub height_cm: Option<f64>,
    pub cargo_type: Option<String>,
    pub origin_city: String,
    pub origin_state: String,
    pub destination_city: String,
    pub destination_state: String,
}

/// One carrier's offer for a quote
#[derive(Debug, Clone)]
pub struct QuoteResult {
    pub id: String,
    pub quote_id: String,
    pub carrier_id: String,
    pub origin_source: OfferSource,
    pub price_cents: i64,
    pub deadline_days: i32,
    pub status: ProposalStatus,
    pub rate_row_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewQuoteResult {
    pub quote_id: String,
    pub carrier_id: String,
    pub origin_source: OfferSource,
    pub price_cents: i64,
    pub deadline_days: i32,
    pub rate_row_id: Option<String>,
}

/// Sort offers cheapest first, then fastest
pub fn rank_results(results: &mut [QuoteResult]) {
    results.sort_by(|a, b| {
        a.price_cents
            .cmp(&b.price_cents)
            .then(a.deadline_days.cmp(&b.deadline_days))
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(carrier: &str, price: i64, days: i32) -> QuoteResult {
        QuoteResult {
            id: format!("r-{}", carrier),
            quote_id: "q1".into(),
            carrier_id: carrier.into(),
            origin_source: OfferSource::Table,
            price_cents: price,
            deadline_days: days,
            status: ProposalStatus::Sent,
            rate_row_id: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn ranking_is_price_then_deadline() {
        let mut results = vec![
            result("slow-cheap", 5000, 9),
            result("expensive", 9000, 1),
            result("fast-cheap", 5000, 2),
        ];
        rank_results(&mut results);
        let order: Vec<_> = results.iter().map(|r| r.carrier_id.as_str()).collect();
        assert_eq!(order, ["fast-cheap", "slow-cheap", "expensive"]);
    }

    #[test]
    fn offer_source_names() {
        assert_eq!(OfferSource::Table.as_str(), "TABELA");
        assert_eq!("api".parse::<OfferSource>().unwrap(), OfferSource::Api);
        assert!("EMAIL".parse::<OfferSource>().is_err());
    }
}
