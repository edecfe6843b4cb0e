use async_trait::async_trait;

use super::{NewRateTableRow, RateTable, RateTableRow};
use crate::domain::DomainResult;

#[async_trait]
pub trait RateTableRepository: Send + Sync {
    async fn create_table(&self, carrier_id: &str, name: &str) -> DomainResult<RateTable>;
    async fn find_table(&self, id: &str) -> DomainResult<Option<RateTable>>;
    async fn list_tables_by_carrier(&self, carrier_id: &str) -> DomainResult<Vec<RateTable>>;
    async fn rename_table(&self, id: &str, name: &str) -> DomainResult<RateTable>;
    async fn set_table_active(&self, id: &str, is_active: bool) -> DomainResult<RateTable>;

    async fn add_row(&self, row: NewRateTableRow) -> DomainResult<RateTableRow>;
    /// Newest first
    async fn list_rows(&self, table_id: &str) -> DomainResult<Vec<RateTableRow>>;
    async fn delete_row(&self, table_id: &str, row_id: &str) -> DomainResult<()>;

    /// Distinct carriers owning at least one active table
    async fn carriers_with_active_table(&self) -> DomainResult<Vec<String>>;
    /// Active rows of the carrier's active tables matching the route and weight
    async fn candidate_rows(
        &self,
        carrier_id: &str,
        origin_state: &str,
        destination_state: &str,
        weight_kg: f64,
    ) -> DomainResult<Vec<RateTableRow>>;
}
