use async_trait::async_trait;
use log::info;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};

use super::{db_err, write_err};
use crate::domain::{Company, CompanyRepository, DomainResult};
use crate::infrastructure::database::entities::company;

pub struct SeaOrmCompanyRepository {
    db: DatabaseConnection,
}

impl SeaOrmCompanyRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn model_to_domain(m: company::Model) -> Company {
    Company {
        id: m.id,
        name: m.name,
        document: m.document,
        created_at: m.created_at,
        updated_at: m.updated_at,
    }
}

#[async_trait]
impl CompanyRepository for SeaOrmCompanyRepository {
    async fn create(&self, c: Company) -> DomainResult<Company> {
        let model = company::ActiveModel {
            id: Set(c.id),
            name: Set(c.name),
            document: Set(c.document),
            created_at: Set(c.created_at),
            updated_at: Set(c.updated_at),
        };
        let saved = model
            .insert(&self.db)
            .await
            .map_err(|e| write_err(e, "A company with this document already exists"))?;
        info!("Company created: {} ({})", saved.name, saved.id);
        Ok(model_to_domain(saved))
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Company>> {
        let model = company::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn find_all(&self) -> DomainResult<Vec<Company>> {
        let models = company::Entity::find()
            .order_by_asc(company::Column::Name)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }
}
