use async_trait::async_trait;
use chrono::Utc;
use log::info;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};

use super::db_err;
use super::proposal_repository::status_to_entity as offer_status_to_entity;
use crate::domain::freight_request::{FreightRequestFilter, NewFreightRequest};
use crate::domain::{
    DomainError, DomainResult, FreightRequest, FreightRequestRepository, FreightRequestStatus,
    ProposalStatus,
};
use crate::infrastructure::database::entities::{freight_proposal, freight_request};
use crate::shared::{PaginatedResult, PaginationParams};

pub struct SeaOrmFreightRequestRepository {
    db: DatabaseConnection,
}

impl SeaOrmFreightRequestRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

pub(crate) fn status_to_domain(s: freight_request::RequestStatus) -> FreightRequestStatus {
    match s {
        freight_request::RequestStatus::Open => FreightRequestStatus::Open,
        freight_request::RequestStatus::Closed => FreightRequestStatus::Closed,
        freight_request::RequestStatus::Cancelled => FreightRequestStatus::Cancelled,
    }
}

pub(crate) fn status_to_entity(s: FreightRequestStatus) -> freight_request::RequestStatus {
    match s {
        FreightRequestStatus::Open => freight_request::RequestStatus::Open,
        FreightRequestStatus::Closed => freight_request::RequestStatus::Closed,
        FreightRequestStatus::Cancelled => freight_request::RequestStatus::Cancelled,
    }
}

fn model_to_domain(m: freight_request::Model) -> FreightRequest {
    FreightRequest {
        id: m.id,
        company_id: m.company_id,
        created_by: m.created_by,
        status: status_to_domain(m.status),
        origin_zip: m.origin_zip,
        origin_city: m.origin_city,
        origin_state: m.origin_state,
        destination_zip: m.destination_zip,
        destination_city: m.destination_city,
        destination_state: m.destination_state,
        cargo_type: m.cargo_type,
        cargo_description: m.cargo_description,
        weight_kg: m.weight_kg,
        volume_m3: m.volume_m3,
        length_cm: m.length_cm,
        width_cm: m.width_cm,
        height_cm: m.height_cm,
        invoice_value_cents: m.invoice_value_cents,
        pickup_date: m.pickup_date,
        selected_proposal_id: m.selected_proposal_id,
        created_at: m.created_at,
        updated_at: m.updated_at,
    }
}

// ── Repository implementation ───────────────────────────────────

#[async_trait]
impl FreightRequestRepository for SeaOrmFreightRequestRepository {
    async fn create(&self, r: NewFreightRequest) -> DomainResult<FreightRequest> {
        let now = Utc::now();
        let model = freight_request::ActiveModel {
            id: Set(uuid::Uuid::new_v4().to_string()),
            company_id: Set(r.company_id),
            created_by: Set(r.created_by),
            status: Set(freight_request::RequestStatus::Open),
            origin_zip: Set(r.origin_zip),
            origin_city: Set(r.origin_city),
            origin_state: Set(r.origin_state),
            destination_zip: Set(r.destination_zip),
            destination_city: Set(r.destination_city),
            destination_state: Set(r.destination_state),
            cargo_type: Set(r.cargo_type),
            cargo_description: Set(r.cargo_description),
            weight_kg: Set(r.weight_kg),
            volume_m3: Set(r.volume_m3),
            length_cm: Set(r.length_cm),
            width_cm: Set(r.width_cm),
            height_cm: Set(r.height_cm),
            invoice_value_cents: Set(r.invoice_value_cents),
            pickup_date: Set(r.pickup_date),
            selected_proposal_id: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        };
        let saved = model.insert(&self.db).await.map_err(db_err)?;
        info!(
            "Freight request {} created: {} -> {}",
            saved.id, saved.origin_zip, saved.destination_zip
        );
        Ok(model_to_domain(saved))
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<FreightRequest>> {
        let model = freight_request::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn list(
        &self,
        filter: FreightRequestFilter,
        pagination: PaginationParams,
    ) -> DomainResult<PaginatedResult<FreightRequest>> {
        let mut query = freight_request::Entity::find();
        if let Some(ref company_id) = filter.company_id {
            query = query.filter(freight_request::Column::CompanyId.eq(company_id.as_str()));
        }
        if let Some(status) = filter.status {
            query = query.filter(freight_request::Column::Status.eq(status_to_entity(status)));
        }

        let total = query.clone().count(&self.db).await.map_err(db_err)?;
        let models = query
            .order_by_desc(freight_request::Column::CreatedAt)
            .offset(pagination.offset())
            .limit(pagination.limit as u64)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(PaginatedResult::new(
            models.into_iter().map(model_to_domain).collect(),
            total,
            pagination.page,
            pagination.limit,
        ))
    }

    async fn transition_status(
        &self,
        id: &str,
        from: FreightRequestStatus,
        to: FreightRequestStatus,
    ) -> DomainResult<()> {
        let result = freight_request::Entity::update_many()
            .set(freight_request::ActiveModel {
                status: Set(status_to_entity(to)),
                updated_at: Set(Utc::now()),
                ..Default::default()
            })
            .filter(freight_request::Column::Id.eq(id))
            .filter(freight_request::Column::Status.eq(status_to_entity(from)))
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        if result.rows_affected == 0 {
            let current = self
                .find_by_id(id)
                .await?
                .ok_or_else(|| DomainError::not_found("FreightRequest", id))?;
            return Err(DomainError::Conflict(format!(
                "Freight request {} is {}",
                id,
                current.status.as_str().to_lowercase()
            )));
        }
        info!("Freight request {} is now {}", id, to);
        Ok(())
    }

    async fn select_proposal(
        &self,
        request_id: &str,
        proposal_id: &str,
    ) -> DomainResult<FreightRequest> {
        let txn = self.db.begin().await.map_err(db_err)?;
        let now = Utc::now();

        // Re-read inside the transaction so concurrent selections cannot both win
        let request = freight_request::Entity::find_by_id(request_id)
            .one(&txn)
            .await
            .map_err(db_err)?
            .ok_or_else(|| DomainError::not_found("FreightRequest", request_id))?;
        model_to_domain(request.clone()).ensure_open()?;

        let proposal = freight_proposal::Entity::find_by_id(proposal_id)
            .one(&txn)
            .await
            .map_err(db_err)?
            .filter(|p| p.freight_request_id == request_id)
            .ok_or_else(|| DomainError::not_found("FreightProposal", proposal_id))?;
        if proposal.status != freight_proposal::OfferStatus::Sent {
            return Err(DomainError::Conflict(format!(
                "Proposal {} can no longer be selected",
                proposal_id
            )));
        }

        let mut winner: freight_proposal::ActiveModel = proposal.into();
        winner.status = Set(offer_status_to_entity(ProposalStatus::Won));
        winner.updated_at = Set(now);
        winner.update(&txn).await.map_err(db_err)?;

        freight_proposal::Entity::update_many()
            .set(freight_proposal::ActiveModel {
                status: Set(offer_status_to_entity(ProposalStatus::Lost)),
                updated_at: Set(now),
                ..Default::default()
            })
            .filter(freight_proposal::Column::FreightRequestId.eq(request_id))
            .filter(freight_proposal::Column::Id.ne(proposal_id))
            .filter(freight_proposal::Column::Status.ne(freight_proposal::OfferStatus::Withdrawn))
            .exec(&txn)
            .await
            .map_err(db_err)?;

        let mut active: freight_request::ActiveModel = request.into();
        active.status = Set(freight_request::RequestStatus::Closed);
        active.selected_proposal_id = Set(Some(proposal_id.to_string()));
        active.updated_at = Set(now);
        let closed = active.update(&txn).await.map_err(db_err)?;

        txn.commit().await.map_err(db_err)?;
        info!(
            "Freight request {} closed with proposal {}",
            request_id, proposal_id
        );
        Ok(model_to_domain(closed))
    }
}
