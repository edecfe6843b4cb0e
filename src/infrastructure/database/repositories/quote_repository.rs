use async_trait::async_trait;
use chrono::Utc;
use log::{debug, info};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};

use super::freight_request_repository::status_to_domain as request_status_to_domain;
use super::proposal_repository::status_to_domain as offer_status_to_domain;
use super::{db_err, write_err};
use crate::domain::quote::{NewQuote, NewQuoteResult, QuoteFilter};
use crate::domain::{DomainResult, OfferSource, Quote, QuoteRepository, QuoteResult};
use crate::infrastructure::database::entities::{freight_proposal, freight_request, quote, quote_result};
use crate::shared::{PaginatedResult, PaginationParams};

pub struct SeaOrmQuoteRepository {
    db: DatabaseConnection,
}

impl SeaOrmQuoteRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn source_to_domain(s: quote_result::OriginSource) -> OfferSource {
    match s {
        quote_result::OriginSource::Table => OfferSource::Table,
        quote_result::OriginSource::Api => OfferSource::Api,
    }
}

fn source_to_entity(s: OfferSource) -> quote_result::OriginSource {
    match s {
        OfferSource::Table => quote_result::OriginSource::Table,
        OfferSource::Api => quote_result::OriginSource::Api,
    }
}

fn quote_to_domain(m: quote::Model) -> Quote {
    Quote {
        id: m.id,
        company_id: m.company_id,
        created_by: m.created_by,
        status: request_status_to_domain(m.status),
        origin_zip: m.origin_zip,
        destination_zip: m.destination_zip,
        weight_kg: m.weight_kg,
        length_cm: m.length_cm,
        width_cm: m.width_cm,
        height_cm: m.height_cm,
        cargo_type: m.cargo_type,
        origin_city: m.origin_city,
        origin_state: m.origin_state,
        destination_city: m.destination_city,
        destination_state: m.destination_state,
        created_at: m.created_at,
    }
}

fn result_to_domain(m: quote_result::Model) -> QuoteResult {
    QuoteResult {
        id: m.id,
        quote_id: m.quote_id,
        carrier_id: m.carrier_id,
        origin_source: source_to_domain(m.origin_source),
        price_cents: m.price_cents,
        deadline_days: m.deadline_days,
        status: offer_status_to_domain(m.status),
        rate_row_id: m.rate_row_id,
        created_at: m.created_at,
    }
}

// ── Repository implementation ───────────────────────────────────

#[async_trait]
impl QuoteRepository for SeaOrmQuoteRepository {
    async fn create(&self, q: NewQuote) -> DomainResult<Quote> {
        let model = quote::ActiveModel {
            id: Set(uuid::Uuid::new_v4().to_string()),
            company_id: Set(q.company_id),
            created_by: Set(q.created_by),
            status: Set(freight_request::RequestStatus::Open),
            origin_zip: Set(q.origin_zip),
            destination_zip: Set(q.destination_zip),
            weight_kg: Set(q.weight_kg),
            length_cm: Set(q.length_cm),
            width_cm: Set(q.width_cm),
            height_cm: Set(q.height_cm),
            cargo_type: Set(q.cargo_type),
            origin_city: Set(q.origin_city),
            origin_state: Set(q.origin_state),
            destination_city: Set(q.destination_city),
            destination_state: Set(q.destination_state),
            created_at: Set(Utc::now()),
        };
        let saved = model.insert(&self.db).await.map_err(db_err)?;
        info!(
            "Quote {} created: {}/{} -> {}/{} {}kg",
            saved.id,
            saved.origin_city,
            saved.origin_state,
            saved.destination_city,
            saved.destination_state,
            saved.weight_kg
        );
        Ok(quote_to_domain(saved))
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Quote>> {
        let model = quote::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(quote_to_domain))
    }

    async fn list(
        &self,
        filter: QuoteFilter,
        pagination: PaginationParams,
    ) -> DomainResult<PaginatedResult<Quote>> {
        let mut query = quote::Entity::find();
        if let Some(ref company_id) = filter.company_id {
            query = query.filter(quote::Column::CompanyId.eq(company_id.as_str()));
        }

        let total = query.clone().count(&self.db).await.map_err(db_err)?;
        let models = query
            .order_by_desc(quote::Column::CreatedAt)
            .offset(pagination.offset())
            .limit(pagination.limit as u64)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(PaginatedResult::new(
            models.into_iter().map(quote_to_domain).collect(),
            total,
            pagination.page,
            pagination.limit,
        ))
    }

    async fn add_result(&self, r: NewQuoteResult) -> DomainResult<QuoteResult> {
        let model = quote_result::ActiveModel {
            id: Set(uuid::Uuid::new_v4().to_string()),
            quote_id: Set(r.quote_id),
            carrier_id: Set(r.carrier_id),
            origin_source: Set(source_to_entity(r.origin_source)),
            price_cents: Set(r.price_cents),
            deadline_days: Set(r.deadline_days),
            status: Set(freight_proposal::OfferStatus::Sent),
            rate_row_id: Set(r.rate_row_id),
            created_at: Set(Utc::now()),
        };
        let saved = model
            .insert(&self.db)
            .await
            .map_err(|e| write_err(e, "Carrier already has an offer for this quote"))?;
        debug!(
            "Quote {} offer from carrier {}: {} cents, {} days",
            saved.quote_id, saved.carrier_id, saved.price_cents, saved.deadline_days
        );
        Ok(result_to_domain(saved))
    }

    async fn results_for(&self, quote_id: &str) -> DomainResult<Vec<QuoteResult>> {
        let models = quote_result::Entity::find()
            .filter(quote_result::Column::QuoteId.eq(quote_id))
            .order_by_asc(quote_result::Column::PriceCents)
            .order_by_asc(quote_result::Column::DeadlineDays)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(result_to_domain).collect())
    }
}
