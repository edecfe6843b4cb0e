//! Create carriers table

use sea_orm_migration::prelude::*;

use super::m20260101_000002_create_users::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Carriers::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Carriers::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Carriers::Name).string().not_null())
                    .col(ColumnDef::new(Carriers::OwnerUserId).string())
                    .col(
                        ColumnDef::new(Carriers::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Carriers::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_carriers_owner")
                            .from(Carriers::Table, Carriers::OwnerUserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // One carrier per TRANSPORTADOR user
        manager
            .create_index(
                Index::create()
                    .name("idx_carriers_owner")
                    .table(Carriers::Table)
                    .col(Carriers::OwnerUserId)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Carriers::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Carriers {
    Table,
    Id,
    Name,
    OwnerUserId,
    CreatedAt,
    UpdatedAt,
}
