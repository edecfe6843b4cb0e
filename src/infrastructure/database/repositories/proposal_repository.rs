use async_trait::async_trait;
use chrono::Utc;
use log::info;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use super::{db_err, write_err};
use crate::domain::proposal::NewProposal;
use crate::domain::{DomainError, DomainResult, FreightProposal, ProposalRepository, ProposalStatus};
use crate::infrastructure::database::entities::freight_proposal;

pub struct SeaOrmProposalRepository {
    db: DatabaseConnection,
}

impl SeaOrmProposalRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

pub(crate) fn status_to_domain(s: freight_proposal::OfferStatus) -> ProposalStatus {
    match s {
        freight_proposal::OfferStatus::Sent => ProposalStatus::Sent,
        freight_proposal::OfferStatus::Withdrawn => ProposalStatus::Withdrawn,
        freight_proposal::OfferStatus::Won => ProposalStatus::Won,
        freight_proposal::OfferStatus::Lost => ProposalStatus::Lost,
    }
}

pub(crate) fn status_to_entity(s: ProposalStatus) -> freight_proposal::OfferStatus {
    match s {
        ProposalStatus::Sent => freight_proposal::OfferStatus::Sent,
        ProposalStatus::Withdrawn => freight_proposal::OfferStatus::Withdrawn,
        ProposalStatus::Won => freight_proposal::OfferStatus::Won,
        ProposalStatus::Lost => freight_proposal::OfferStatus::Lost,
    }
}

fn model_to_domain(m: freight_proposal::Model) -> FreightProposal {
    FreightProposal {
        id: m.id,
        freight_request_id: m.freight_request_id,
        carrier_id: m.carrier_id,
        price_cents: m.price_cents,
        deadline_days: m.deadline_days,
        notes: m.notes,
        status: status_to_domain(m.status),
        created_at: m.created_at,
        updated_at: m.updated_at,
    }
}

// ── Repository implementation ───────────────────────────────────

#[async_trait]
impl ProposalRepository for SeaOrmProposalRepository {
    async fn create(&self, p: NewProposal) -> DomainResult<FreightProposal> {
        let now = Utc::now();
        let model = freight_proposal::ActiveModel {
            id: Set(uuid::Uuid::new_v4().to_string()),
            freight_request_id: Set(p.freight_request_id),
            carrier_id: Set(p.carrier_id),
            price_cents: Set(p.price_cents),
            deadline_days: Set(p.deadline_days),
            notes: Set(p.notes),
            status: Set(freight_proposal::OfferStatus::Sent),
            created_at: Set(now),
            updated_at: Set(now),
        };
        let saved = model
            .insert(&self.db)
            .await
            .map_err(|e| write_err(e, "Carrier already sent a proposal for this request"))?;
        info!(
            "Proposal {} sent by carrier {} for request {}",
            saved.id, saved.carrier_id, saved.freight_request_id
        );
        Ok(model_to_domain(saved))
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<FreightProposal>> {
        let model = freight_proposal::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn list_by_request(&self, request_id: &str) -> DomainResult<Vec<FreightProposal>> {
        let models = freight_proposal::Entity::find()
            .filter(freight_proposal::Column::FreightRequestId.eq(request_id))
            .order_by_asc(freight_proposal::Column::PriceCents)
            .order_by_asc(freight_proposal::Column::DeadlineDays)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn list_by_carrier(&self, carrier_id: &str) -> DomainResult<Vec<FreightProposal>> {
        let models = freight_proposal::Entity::find()
            .filter(freight_proposal::Column::CarrierId.eq(carrier_id))
            .order_by_desc(freight_proposal::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn transition_status(
        &self,
        id: &str,
        from: ProposalStatus,
        to: ProposalStatus,
    ) -> DomainResult<()> {
        let result = freight_proposal::Entity::update_many()
            .set(freight_proposal::ActiveModel {
                status: Set(status_to_entity(to)),
                updated_at: Set(Utc::now()),
                ..Default::default()
            })
            .filter(freight_proposal::Column::Id.eq(id))
            .filter(freight_proposal::Column::Status.eq(status_to_entity(from)))
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        if result.rows_affected == 0 {
            let current = self
                .find_by_id(id)
                .await?
                .ok_or_else(|| DomainError::not_found("FreightProposal", id))?;
            return Err(DomainError::Conflict(format!(
                "Proposal {} is {}",
                id,
                current.status.as_str().to_lowercase()
            )));
        }
        info!("Proposal {} is now {}", id, to);
        Ok(())
    }
}
