//! Carrier entity

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "carriers")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    /// TRANSPORTADOR user operating this carrier
    #[sea_orm(unique)]
    pub owner_user_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::rate_table::Entity")]
    RateTables,
    #[sea_orm(has_many = "super::freight_proposal::Entity")]
    Proposals,
}

impl Related<super::rate_table::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RateTables.def()
    }
}

impl Related<super::freight_proposal::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Proposals.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
