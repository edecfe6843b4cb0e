use async_trait::async_trait;

use super::{User, UserRole};
use crate::domain::DomainResult;
use crate::shared::{PaginatedResult, PaginationParams};

/// Filters for the admin user listing
#[derive(Debug, Clone, Default)]
pub struct UserFilter {
    pub search: Option<String>,
    pub role: Option<UserRole>,
    pub company_id: Option<String>,
}

/// Partial update applied by administrators
#[derive(Debug, Clone, Default)]
pub struct UserUpdate {
    pub role: Option<UserRole>,
    /// `Some(None)` unlinks the company
    pub company_id: Option<Option<String>>,
    pub is_active: Option<bool>,
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: User) -> DomainResult<User>;
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<User>>;
    async fn find_by_username(&self, username: &str) -> DomainResult<Option<User>>;
    async fn find_by_email(&self, email: &str) -> DomainResult<Option<User>>;
    async fn list(
        &self,
        filter: UserFilter,
        pagination: PaginationParams,
    ) -> DomainResult<PaginatedResult<User>>;
    async fn count(&self) -> DomainResult<u64>;
    async fn update(&self, id: &str, update: UserUpdate) -> DomainResult<User>;
    async fn update_password(&self, id: &str, password_hash: &str) -> DomainResult<()>;
    async fn touch_last_login(&self, id: &str) -> DomainResult<()>;
}
