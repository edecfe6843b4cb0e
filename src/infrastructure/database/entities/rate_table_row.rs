//! Rate table row: price and deadline for a state pair and weight band

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "rate_table_rows")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub rate_table_id: String,
    pub origin_state: String,
    pub destination_state: String,
    pub min_weight_kg: f64,
    pub max_weight_kg: f64,
    pub price_cents: i64,
    pub deadline_days: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::rate_table::Entity",
        from = "Column::RateTableId",
        to = "super::rate_table::Column::Id"
    )]
    RateTable,
}

impl Related<super::rate_table::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RateTable.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
