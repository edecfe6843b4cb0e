use async_trait::async_trait;
use chrono::Utc;
use log::{debug, info};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};

use super::db_err;
use crate::domain::rate_table::NewRateTableRow;
use crate::domain::{DomainError, DomainResult, RateTable, RateTableRepository, RateTableRow};
use crate::infrastructure::database::entities::{rate_table, rate_table_row};

pub struct SeaOrmRateTableRepository {
    db: DatabaseConnection,
}

impl SeaOrmRateTableRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn table_model(&self, id: &str) -> DomainResult<rate_table::Model> {
        rate_table::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?
            .ok_or_else(|| DomainError::not_found("RateTable", id))
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn table_to_domain(m: rate_table::Model) -> RateTable {
    RateTable {
        id: m.id,
        carrier_id: m.carrier_id,
        name: m.name,
        is_active: m.is_active,
        created_at: m.created_at,
        updated_at: m.updated_at,
    }
}

fn row_to_domain(m: rate_table_row::Model) -> RateTableRow {
    RateTableRow {
        id: m.id,
        rate_table_id: m.rate_table_id,
        origin_state: m.origin_state,
        destination_state: m.destination_state,
        min_weight_kg: m.min_weight_kg,
        max_weight_kg: m.max_weight_kg,
        price_cents: m.price_cents,
        deadline_days: m.deadline_days,
        is_active: m.is_active,
        created_at: m.created_at,
    }
}

// ── Repository implementation ───────────────────────────────────

#[async_trait]
impl RateTableRepository for SeaOrmRateTableRepository {
    async fn create_table(&self, carrier_id: &str, name: &str) -> DomainResult<RateTable> {
        let now = Utc::now();
        let model = rate_table::ActiveModel {
            id: Set(uuid::Uuid::new_v4().to_string()),
            carrier_id: Set(carrier_id.to_string()),
            name: Set(name.to_string()),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        };
        let saved = model.insert(&self.db).await.map_err(db_err)?;
        info!("Rate table '{}' created for carrier {}", saved.name, carrier_id);
        Ok(table_to_domain(saved))
    }

    async fn find_table(&self, id: &str) -> DomainResult<Option<RateTable>> {
        let model = rate_table::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(table_to_domain))
    }

    async fn list_tables_by_carrier(&self, carrier_id: &str) -> DomainResult<Vec<RateTable>> {
        let models = rate_table::Entity::find()
            .filter(rate_table::Column::CarrierId.eq(carrier_id))
            .order_by_desc(rate_table::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(table_to_domain).collect())
    }

    async fn rename_table(&self, id: &str, name: &str) -> DomainResult<RateTable> {
        let mut active: rate_table::ActiveModel = self.table_model(id).await?.into();
        active.name = Set(name.to_string());
        active.updated_at = Set(Utc::now());
        let saved = active.update(&self.db).await.map_err(db_err)?;
        info!("Rate table {} renamed to '{}'", id, saved.name);
        Ok(table_to_domain(saved))
    }

    async fn set_table_active(&self, id: &str, is_active: bool) -> DomainResult<RateTable> {
        let mut active: rate_table::ActiveModel = self.table_model(id).await?.into();
        active.is_active = Set(is_active);
        active.updated_at = Set(Utc::now());
        let saved = active.update(&self.db).await.map_err(db_err)?;
        info!(
            "Rate table {} {}",
            id,
            if is_active { "activated" } else { "deactivated" }
        );
        Ok(table_to_domain(saved))
    }

    async fn add_row(&self, row: NewRateTableRow) -> DomainResult<RateTableRow> {
        let model = rate_table_row::ActiveModel {
            id: Set(uuid::Uuid::new_v4().to_string()),
            rate_table_id: Set(row.rate_table_id),
            origin_state: Set(row.origin_state),
            destination_state: Set(row.destination_state),
            min_weight_kg: Set(row.min_weight_kg),
            max_weight_kg: Set(row.max_weight_kg),
            price_cents: Set(row.price_cents),
            deadline_days: Set(row.deadline_days),
            is_active: Set(row.is_active),
            created_at: Set(Utc::now()),
        };
        let saved = model.insert(&self.db).await.map_err(db_err)?;
        debug!(
            "Rate row {} added to table {}: {}->{} {}..{}kg",
            saved.id,
            saved.rate_table_id,
            saved.origin_state,
            saved.destination_state,
            saved.min_weight_kg,
            saved.max_weight_kg
        );
        Ok(row_to_domain(saved))
    }

    async fn list_rows(&self, table_id: &str) -> DomainResult<Vec<RateTableRow>> {
        let models = rate_table_row::Entity::find()
            .filter(rate_table_row::Column::RateTableId.eq(table_id))
            .order_by_desc(rate_table_row::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(row_to_domain).collect())
    }

    async fn delete_row(&self, table_id: &str, row_id: &str) -> DomainResult<()> {
        let result = rate_table_row::Entity::delete_many()
            .filter(rate_table_row::Column::Id.eq(row_id))
            .filter(rate_table_row::Column::RateTableId.eq(table_id))
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        if result.rows_affected == 0 {
            return Err(DomainError::not_found("RateTableRow", row_id));
        }
        info!("Rate row {} removed from table {}", row_id, table_id);
        Ok(())
    }

    async fn carriers_with_active_table(&self) -> DomainResult<Vec<String>> {
        rate_table::Entity::find()
            .select_only()
            .column(rate_table::Column::CarrierId)
            .filter(rate_table::Column::IsActive.eq(true))
            .distinct()
            .order_by_asc(rate_table::Column::CarrierId)
            .into_tuple::<String>()
            .all(&self.db)
            .await
            .map_err(db_err)
    }

    async fn candidate_rows(
        &self,
        carrier_id: &str,
        origin_state: &str,
        destination_state: &str,
        weight_kg: f64,
    ) -> DomainResult<Vec<RateTableRow>> {
        let models = rate_table_row::Entity::find()
            .inner_join(rate_table::Entity)
            .filter(rate_table::Column::CarrierId.eq(carrier_id))
            .filter(rate_table::Column::IsActive.eq(true))
            .filter(rate_table_row::Column::IsActive.eq(true))
            .filter(rate_table_row::Column::OriginState.eq(origin_state))
            .filter(rate_table_row::Column::DestinationState.eq(destination_state))
            .filter(rate_table_row::Column::MinWeightKg.lte(weight_kg))
            .filter(rate_table_row::Column::MaxWeightKg.gte(weight_kg))
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(row_to_domain).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Carrier, CarrierRepository};
    use crate::infrastructure::database::repositories::carrier_repository::SeaOrmCarrierRepository;
    use crate::infrastructure::database::repositories::test_support::memory_db;

    async fn repo_with_carriers(ids: &[&str]) -> SeaOrmRateTableRepository {
        let db = memory_db().await;
        let carriers = SeaOrmCarrierRepository::new(db.clone());
        for id in ids {
            carriers
                .create(Carrier {
                    id: id.to_string(),
                    name: id.to_string(),
                    owner_user_id: None,
                    created_at: Utc::now(),
                    updated_at: Utc::now(),
                })
                .await
                .unwrap();
        }
        SeaOrmRateTableRepository::new(db)
    }

    fn row(table: &str, min: f64, max: f64, price: i64) -> NewRateTableRow {
        NewRateTableRow {
            rate_table_id: table.into(),
            origin_state: "SP".into(),
            destination_state: "RJ".into(),
            min_weight_kg: min,
            max_weight_kg: max,
            price_cents: price,
            deadline_days: 2,
            is_active: true,
        }
    }

    #[tokio::test]
    async fn candidates_respect_band_and_activation() {
        let repo = repo_with_carriers(&["c1"]).await;
        let table = repo.create_table("c1", "Tabela padrão").await.unwrap();
        repo.add_row(row(&table.id, 0.0, 100.0, 5_000)).await.unwrap();
        repo.add_row(row(&table.id, 100.0, 500.0, 9_000)).await.unwrap();
        let mut inactive = row(&table.id, 0.0, 1000.0, 1_000);
        inactive.is_active = false;
        repo.add_row(inactive).await.unwrap();

        let at_boundary = repo.candidate_rows("c1", "SP", "RJ", 100.0).await.unwrap();
        assert_eq!(at_boundary.len(), 2);

        let heavy = repo.candidate_rows("c1", "SP", "RJ", 250.0).await.unwrap();
        assert_eq!(heavy.len(), 1);
        assert_eq!(heavy[0].price_cents, 9_000);

        assert!(repo.candidate_rows("c1", "RJ", "SP", 50.0).await.unwrap().is_empty());

        repo.set_table_active(&table.id, false).await.unwrap();
        assert!(repo.candidate_rows("c1", "SP", "RJ", 50.0).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn active_carriers_are_distinct() {
        let repo = repo_with_carriers(&["c1", "c2", "c3"]).await;
        repo.create_table("c1", "A").await.unwrap();
        repo.create_table("c1", "B").await.unwrap();
        let t2 = repo.create_table("c2", "A").await.unwrap();
        repo.set_table_active(&t2.id, false).await.unwrap();
        repo.create_table("c3", "A").await.unwrap();

        let carriers = repo.carriers_with_active_table().await.unwrap();
        assert_eq!(carriers, vec!["c1".to_string(), "c3".to_string()]);
    }

    #[tokio::test]
    async fn delete_row_is_scoped_to_its_table() {
        let repo = repo_with_carriers(&["c1"]).await;
        let t1 = repo.create_table("c1", "A").await.unwrap();
        let t2 = repo.create_table("c1", "B").await.unwrap();
        let r = repo.add_row(row(&t1.id, 0.0, 10.0, 100)).await.unwrap();

        let wrong_table = repo.delete_row(&t2.id, &r.id).await;
        assert!(matches!(wrong_table, Err(DomainError::NotFound { .. })));

        repo.delete_row(&t1.id, &r.id).await.unwrap();
        assert!(repo.list_rows(&t1.id).await.unwrap().is_empty());
    }
}
