//! Fixtures for service tests: migrated in-memory database and seed helpers

use std::sync::Arc;

use chrono::Utc;

use crate::domain::{Carrier, Company, RepositoryProvider, User, UserRole};
use crate::infrastructure::database::repositories::test_support::memory_db;
use crate::infrastructure::database::repositories::SeaOrmRepositoryProvider;

pub async fn repos() -> Arc<dyn RepositoryProvider> {
    Arc::new(SeaOrmRepositoryProvider::new(memory_db().await))
}

pub async fn company(repos: &Arc<dyn RepositoryProvider>, id: &str) -> Company {
    repos
        .companies()
        .create(Company {
            id: id.into(),
            name: format!("{} Ltda", id),
            document: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        })
        .await
        .unwrap()
}

pub async fn user(
    repos: &Arc<dyn RepositoryProvider>,
    username: &str,
    role: UserRole,
    company_id: Option<&str>,
) -> User {
    let now = Utc::now();
    repos
        .users()
        .create(User {
            id: uuid::Uuid::new_v4().to_string(),
            username: username.into(),
            email: format!("{}@example.com", username),
            password_hash: "not-a-real-hash".into(),
            role,
            company_id: company_id.map(String::from),
            is_active: true,
            created_at: now,
            updated_at: now,
            last_login_at: None,
        })
        .await
        .unwrap()
}

/// TRANSPORTADOR user plus the carrier it operates
pub async fn carrier_user(repos: &Arc<dyn RepositoryProvider>, name: &str) -> (User, Carrier) {
    let owner = user(repos, name, UserRole::Carrier, None).await;
    let carrier = repos
        .carriers()
        .create(Carrier {
            id: format!("carrier-{}", name),
            name: name.into(),
            owner_user_id: Some(owner.id.clone()),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        })
        .await
        .unwrap();
    (owner, carrier)
}
