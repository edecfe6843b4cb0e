use async_trait::async_trait;

use super::Company;
use crate::domain::DomainResult;

#[async_trait]
pub trait CompanyRepository: Send + Sync {
    async fn create(&self, company: Company) -> DomainResult<Company>;
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Company>>;
    async fn find_all(&self) -> DomainResult<Vec<Company>>;
}
