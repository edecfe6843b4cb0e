use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use crate::application::access::{require_admin, require_carrier};
use crate::domain::{Carrier, DomainError, DomainResult, RepositoryProvider, User, UserRole};

pub struct CarrierService {
    repos: Arc<dyn RepositoryProvider>,
}

impl CarrierService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    /// Register a carrier, optionally operated by a TRANSPORTADOR user
    pub async fn create(
        &self,
        actor: &User,
        name: &str,
        owner_user_id: Option<&str>,
    ) -> DomainResult<Carrier> {
        require_admin(actor)?;

        let name = name.trim();
        if name.is_empty() || name.chars().count() > 200 {
            return Err(DomainError::Validation(
                "Carrier name must be 1-200 characters".into(),
            ));
        }

        if let Some(owner_id) = owner_user_id {
            let owner = self
                .repos
                .users()
                .find_by_id(owner_id)
                .await?
                .ok_or_else(|| DomainError::Validation(format!("Unknown user {}", owner_id)))?;
            if owner.role != UserRole::Carrier {
                return Err(DomainError::Validation(format!(
                    "User {} does not have the TRANSPORTADOR role",
                    owner.username
                )));
            }
        }

        let now = Utc::now();
        let carrier = self
            .repos
            .carriers()
            .create(Carrier {
                id: uuid::Uuid::new_v4().to_string(),
                name: name.to_string(),
                owner_user_id: owner_user_id.map(String::from),
                created_at: now,
                updated_at: now,
            })
            .await?;

        info!(carrier_id = %carrier.id, name = %carrier.name, owner = ?carrier.owner_user_id, "Carrier created");
        Ok(carrier)
    }

    pub async fn list(&self, actor: &User) -> DomainResult<Vec<Carrier>> {
        require_admin(actor)?;
        self.repos.carriers().find_all().await
    }

    /// Carrier operated by the calling user
    pub async fn my_carrier(&self, actor: &User) -> DomainResult<Carrier> {
        require_carrier(self.repos.as_ref(), actor).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support;

    #[tokio::test]
    async fn owner_must_be_a_carrier_user_and_own_one_carrier() {
        let repos = test_support::repos().await;
        let admin = test_support::user(&repos, "root", UserRole::Admin, None).await;
        let client = test_support::user(&repos, "maria", UserRole::Client, None).await;
        let driver = test_support::user(&repos, "joao", UserRole::Carrier, None).await;
        let service = CarrierService::new(repos);

        assert!(matches!(
            service.create(&admin, "Rápido", Some(&client.id)).await,
            Err(DomainError::Validation(_))
        ));

        let carrier = service.create(&admin, "Rápido", Some(&driver.id)).await.unwrap();
        assert_eq!(service.my_carrier(&driver).await.unwrap().id, carrier.id);

        assert!(matches!(
            service.create(&admin, "Segundo", Some(&driver.id)).await,
            Err(DomainError::Conflict(_))
        ));

        service.create(&admin, "Sem dono", None).await.unwrap();
        assert_eq!(service.list(&admin).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn unlinked_carrier_user_is_forbidden() {
        let repos = test_support::repos().await;
        let driver = test_support::user(&repos, "joao", UserRole::Carrier, None).await;
        let client = test_support::user(&repos, "maria", UserRole::Client, None).await;
        let service = CarrierService::new(repos);

        assert!(matches!(
            service.my_carrier(&driver).await,
            Err(DomainError::Forbidden(_))
        ));
        assert!(matches!(
            service.my_carrier(&client).await,
            Err(DomainError::Forbidden(_))
        ));
        assert!(matches!(
            service.create(&client, "X", None).await,
            Err(DomainError::Forbidden(_))
        ));
    }
}
