use async_trait::async_trait;
use log::info;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use super::{db_err, write_err};
use crate::domain::{Carrier, CarrierRepository, DomainResult};
use crate::infrastructure::database::entities::carrier;

pub struct SeaOrmCarrierRepository {
    db: DatabaseConnection,
}

impl SeaOrmCarrierRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn model_to_domain(m: carrier::Model) -> Carrier {
    Carrier {
        id: m.id,
        name: m.name,
        owner_user_id: m.owner_user_id,
        created_at: m.created_at,
        updated_at: m.updated_at,
    }
}

#[async_trait]
impl CarrierRepository for SeaOrmCarrierRepository {
    async fn create(&self, c: Carrier) -> DomainResult<Carrier> {
        let model = carrier::ActiveModel {
            id: Set(c.id),
            name: Set(c.name),
            owner_user_id: Set(c.owner_user_id),
            created_at: Set(c.created_at),
            updated_at: Set(c.updated_at),
        };
        let saved = model
            .insert(&self.db)
            .await
            .map_err(|e| write_err(e, "User already operates a carrier"))?;
        info!("Carrier created: {} ({})", saved.name, saved.id);
        Ok(model_to_domain(saved))
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Carrier>> {
        let model = carrier::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn find_by_owner(&self, user_id: &str) -> DomainResult<Option<Carrier>> {
        let model = carrier::Entity::find()
            .filter(carrier::Column::OwnerUserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn find_all(&self) -> DomainResult<Vec<Carrier>> {
        let models = carrier::Entity::find()
            .order_by_asc(carrier::Column::Name)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }
}
