use async_trait::async_trait;

use super::{FreightProposal, NewProposal, ProposalStatus};
use crate::domain::DomainResult;

#[async_trait]
pub trait ProposalRepository: Send + Sync {
    /// Fails with `Conflict` when the carrier already answered the request
    async fn create(&self, proposal: NewProposal) -> DomainResult<FreightProposal>;
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<FreightProposal>>;
    /// Cheapest first, then shortest deadline
    async fn list_by_request(&self, request_id: &str) -> DomainResult<Vec<FreightProposal>>;
    /// Newest first
    async fn list_by_carrier(&self, carrier_id: &str) -> DomainResult<Vec<FreightProposal>>;
    /// Compare-and-set on the status; Conflict when it already moved on
    async fn transition_status(
        &self,
        id: &str,
        from: ProposalStatus,
        to: ProposalStatus,
    ) -> DomainResult<()>;
}
