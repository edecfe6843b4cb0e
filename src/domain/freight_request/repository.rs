use async_trait::async_trait;

use super::{FreightRequest, FreightRequestStatus, NewFreightRequest};
use crate::domain::DomainResult;
use crate::shared::{PaginatedResult, PaginationParams};

#[derive(Debug, Clone, Default)]
pub struct FreightRequestFilter {
    pub company_id: Option<String>,
    pub status: Option<FreightRequestStatus>,
}

#[async_trait]
pub trait FreightRequestRepository: Send + Sync {
    async fn create(&self, request: NewFreightRequest) -> DomainResult<FreightRequest>;
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<FreightRequest>>;
    /// Newest first
    async fn list(
        &self,
        filter: FreightRequestFilter,
        pagination: PaginationParams,
    ) -> DomainResult<PaginatedResult<FreightRequest>>;
    /// Move the request from `from` to `to`. Fails with Conflict when the stored
    /// status is no longer `from`.
    async fn transition_status(
        &self,
        id: &str,
        from: FreightRequestStatus,
        to: FreightRequestStatus,
    ) -> DomainResult<()>;
    /// Close the request with `proposal_id` as winner, mark that proposal WON and
    /// every other proposal of the request LOST, in a single transaction.
    async fn select_proposal(
        &self,
        request_id: &str,
        proposal_id: &str,
    ) -> DomainResult<FreightRequest>;
}
