use async_trait::async_trait;

use super::Carrier;
use crate::domain::DomainResult;

#[async_trait]
pub trait CarrierRepository: Send + Sync {
    async fn create(&self, carrier: Carrier) -> DomainResult<Carrier>;
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Carrier>>;
    async fn find_by_owner(&self, user_id: &str) -> DomainResult<Option<Carrier>>;
    async fn find_all(&self) -> DomainResult<Vec<Carrier>>;
}
