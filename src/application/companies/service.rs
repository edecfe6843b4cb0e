use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use crate::application::access::require_admin;
use crate::domain::{Company, DomainError, DomainResult, RepositoryProvider, User};
use crate::shared::parsing::digits_only;

pub struct CompanyService {
    repos: Arc<dyn RepositoryProvider>,
}

impl CompanyService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    pub async fn create(
        &self,
        actor: &User,
        name: &str,
        document: Option<&str>,
    ) -> DomainResult<Company> {
        require_admin(actor)?;

        let name = name.trim();
        if name.is_empty() || name.chars().count() > 200 {
            return Err(DomainError::Validation(
                "Company name must be 1-200 characters".into(),
            ));
        }
        let document = document.map(digits_only).filter(|d| !d.is_empty());

        let now = Utc::now();
        let company = self
            .repos
            .companies()
            .create(Company {
                id: uuid::Uuid::new_v4().to_string(),
                name: name.to_string(),
                document,
                created_at: now,
                updated_at: now,
            })
            .await?;

        info!(company_id = %company.id, name = %company.name, "Company created");
        Ok(company)
    }

    pub async fn list(&self, actor: &User) -> DomainResult<Vec<Company>> {
        require_admin(actor)?;
        self.repos.companies().find_all().await
    }

    pub async fn get(&self, actor: &User, id: &str) -> DomainResult<Company> {
        require_admin(actor)?;
        self.repos
            .companies()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Company", id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support;
    use crate::domain::UserRole;

    #[tokio::test]
    async fn admin_creates_companies_with_unique_documents() {
        let repos = test_support::repos().await;
        let admin = test_support::user(&repos, "root", UserRole::Admin, None).await;
        let service = CompanyService::new(repos);

        let acme = service
            .create(&admin, "  Acme Ltda ", Some("12.345.678/0001-90"))
            .await
            .unwrap();
        assert_eq!(acme.name, "Acme Ltda");
        assert_eq!(acme.document.as_deref(), Some("12345678000190"));

        let dup = service
            .create(&admin, "Acme Copy", Some("12345678000190"))
            .await;
        assert!(matches!(dup, Err(DomainError::Conflict(_))));

        // Companies without a document never collide
        service.create(&admin, "No Doc A", None).await.unwrap();
        service.create(&admin, "No Doc B", Some("")).await.unwrap();

        assert_eq!(service.list(&admin).await.unwrap().len(), 3);
        assert_eq!(service.get(&admin, &acme.id).await.unwrap().name, "Acme Ltda");
        assert!(matches!(
            service.get(&admin, "missing").await,
            Err(DomainError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn name_is_required_and_clients_are_refused() {
        let repos = test_support::repos().await;
        let admin = test_support::user(&repos, "root", UserRole::Admin, None).await;
        let client = test_support::user(&repos, "maria", UserRole::Client, None).await;
        let service = CompanyService::new(repos);

        assert!(matches!(
            service.create(&admin, "   ", None).await,
            Err(DomainError::Validation(_))
        ));
        assert!(matches!(
            service.create(&client, "Acme", None).await,
            Err(DomainError::Forbidden(_))
        ));
        assert!(matches!(service.list(&client).await, Err(DomainError::Forbidden(_))));
    }
}
