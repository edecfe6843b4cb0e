use std::sync::Arc;

use tracing::info;

use crate::application::access::require_carrier;
use crate::domain::rate_table::model::DEFAULT_TABLE_NAME;
use crate::domain::rate_table::NewRateTableRow;
use crate::domain::{
    Carrier, DomainError, DomainResult, RateTable, RateTableRow, RepositoryProvider, User,
};
use crate::shared::parsing::{parse_money_cents, parse_state_code};

/// Raw input for a new rate row
#[derive(Debug, Clone)]
pub struct NewRowInput {
    pub origin_state: String,
    pub destination_state: String,
    pub min_weight_kg: f64,
    pub max_weight_kg: f64,
    pub price: String,
    pub deadline_days: i32,
    pub is_active: bool,
}

pub struct RateTableService {
    repos: Arc<dyn RepositoryProvider>,
}

impl RateTableService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    /// Table owned by the caller's carrier; anything else is reported missing
    async fn own_table(&self, actor: &User, id: &str) -> DomainResult<(Carrier, RateTable)> {
        let carrier = require_carrier(self.repos.as_ref(), actor).await?;
        let table = self
            .repos
            .rate_tables()
            .find_table(id)
            .await?
            .filter(|t| t.carrier_id == carrier.id)
            .ok_or_else(|| DomainError::not_found("RateTable", id))?;
        Ok((carrier, table))
    }

    pub async fn create_table(&self, actor: &User, name: Option<&str>) -> DomainResult<RateTable> {
        let carrier = require_carrier(self.repos.as_ref(), actor).await?;
        let name = name
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .unwrap_or(DEFAULT_TABLE_NAME);

        let table = self.repos.rate_tables().create_table(&carrier.id, name).await?;
        info!(table_id = %table.id, carrier_id = %carrier.id, name, "Rate table created");
        Ok(table)
    }

    pub async fn list_tables(&self, actor: &User) -> DomainResult<Vec<RateTable>> {
        let carrier = require_carrier(self.repos.as_ref(), actor).await?;
        self.repos.rate_tables().list_tables_by_carrier(&carrier.id).await
    }

    /// Table with its rows, newest first
    pub async fn get_table(
        &self,
        actor: &User,
        id: &str,
    ) -> DomainResult<(RateTable, Vec<RateTableRow>)> {
        let (_, table) = self.own_table(actor, id).await?;
        let rows = self.repos.rate_tables().list_rows(&table.id).await?;
        Ok((table, rows))
    }

    pub async fn rename_table(&self, actor: &User, id: &str, name: &str) -> DomainResult<RateTable> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DomainError::Validation("Table name is required".into()));
        }
        self.own_table(actor, id).await?;
        self.repos.rate_tables().rename_table(id, name).await
    }

    pub async fn set_table_active(
        &self,
        actor: &User,
        id: &str,
        is_active: bool,
    ) -> DomainResult<RateTable> {
        self.own_table(actor, id).await?;
        self.repos.rate_tables().set_table_active(id, is_active).await
    }

    pub async fn add_row(
        &self,
        actor: &User,
        table_id: &str,
        input: NewRowInput,
    ) -> DomainResult<RateTableRow> {
        let (_, table) = self.own_table(actor, table_id).await?;

        let origin_state = parse_state_code(&input.origin_state)?;
        let destination_state = parse_state_code(&input.destination_state)?;

        let (min, max) = (input.min_weight_kg, input.max_weight_kg);
        if !min.is_finite() || !max.is_finite() || min < 0.0 || max < 0.0 {
            return Err(DomainError::Validation(
                "Weight limits must be zero or greater".into(),
            ));
        }
        if min > max {
            return Err(DomainError::Validation(
                "Minimum weight cannot exceed maximum weight".into(),
            ));
        }
        let price_cents = parse_money_cents(&input.price)?;
        if input.deadline_days < 1 {
            return Err(DomainError::Validation(
                "Deadline must be at least one day".into(),
            ));
        }

        self.repos
            .rate_tables()
            .add_row(NewRateTableRow {
                rate_table_id: table.id,
                origin_state,
                destination_state,
                min_weight_kg: min,
                max_weight_kg: max,
                price_cents,
                deadline_days: input.deadline_days,
                is_active: input.is_active,
            })
            .await
    }

    pub async fn remove_row(&self, actor: &User, table_id: &str, row_id: &str) -> DomainResult<()> {
        self.own_table(actor, table_id).await?;
        self.repos.rate_tables().delete_row(table_id, row_id).await
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::application::test_support;
    use crate::domain::UserRole;

    pub(crate) fn row(origin: &str, dest: &str, min: f64, max: f64, price: &str, days: i32) -> NewRowInput {
        NewRowInput {
            origin_state: origin.into(),
            destination_state: dest.into(),
            min_weight_kg: min,
            max_weight_kg: max,
            price: price.into(),
            deadline_days: days,
            is_active: true,
        }
    }

    #[tokio::test]
    async fn default_name_and_listing() {
        let repos = test_support::repos().await;
        let (joao, _) = test_support::carrier_user(&repos, "joao").await;
        let service = RateTableService::new(repos);

        let table = service.create_table(&joao, None).await.unwrap();
        assert_eq!(table.name, "Tabela padrão");
        assert!(table.is_active);

        let named = service.create_table(&joao, Some("  Sudeste ")).await.unwrap();
        assert_eq!(named.name, "Sudeste");
        assert_eq!(service.list_tables(&joao).await.unwrap().len(), 2);

        let renamed = service.rename_table(&joao, &table.id, "Nacional").await.unwrap();
        assert_eq!(renamed.name, "Nacional");
        assert!(matches!(
            service.rename_table(&joao, &table.id, "  ").await,
            Err(DomainError::Validation(_))
        ));

        let off = service.set_table_active(&joao, &table.id, false).await.unwrap();
        assert!(!off.is_active);
    }

    #[tokio::test]
    async fn rows_are_validated() {
        let repos = test_support::repos().await;
        let (joao, _) = test_support::carrier_user(&repos, "joao").await;
        let service = RateTableService::new(repos);
        let table = service.create_table(&joao, None).await.unwrap();

        let added = service
            .add_row(&joao, &table.id, row("sp", "rj", 0.0, 100.0, "150,50", 3))
            .await
            .unwrap();
        assert_eq!(added.origin_state, "SP");
        assert_eq!(added.price_cents, 15_050);

        for bad in [
            row("SPX", "RJ", 0.0, 10.0, "10", 1),
            row("SP", "RJ", 50.0, 10.0, "10", 1),
            row("SP", "RJ", -1.0, 10.0, "10", 1),
            row("SP", "RJ", 0.0, 10.0, "0", 1),
            row("SP", "RJ", 0.0, 10.0, "10", 0),
        ] {
            assert!(matches!(
                service.add_row(&joao, &table.id, bad).await,
                Err(DomainError::Validation(_))
            ));
        }

        let (_, rows) = service.get_table(&joao, &table.id).await.unwrap();
        assert_eq!(rows.len(), 1);

        service.remove_row(&joao, &table.id, &added.id).await.unwrap();
        let (_, rows) = service.get_table(&joao, &table.id).await.unwrap();
        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn other_carriers_tables_are_invisible() {
        let repos = test_support::repos().await;
        let (joao, _) = test_support::carrier_user(&repos, "joao").await;
        let (ana, _) = test_support::carrier_user(&repos, "ana").await;
        let client = test_support::user(&repos, "maria", UserRole::Client, None).await;
        let service = RateTableService::new(repos);
        let table = service.create_table(&joao, None).await.unwrap();

        assert!(matches!(
            service.get_table(&ana, &table.id).await,
            Err(DomainError::NotFound { .. })
        ));
        assert!(matches!(
            service
                .add_row(&ana, &table.id, row("SP", "RJ", 0.0, 10.0, "10", 1))
                .await,
            Err(DomainError::NotFound { .. })
        ));
        assert!(service.list_tables(&ana).await.unwrap().is_empty());
        assert!(matches!(
            service.list_tables(&client).await,
            Err(DomainError::Forbidden(_))
        ));
    }
}
