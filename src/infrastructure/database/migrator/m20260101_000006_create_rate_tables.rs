//! Create rate_tables and rate_table_rows

use sea_orm_migration::prelude::*;

use super::m20260101_000003_create_carriers::Carriers;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(RateTables::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(RateTables::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(RateTables::CarrierId).string().not_null())
                    .col(ColumnDef::new(RateTables::Name).string().not_null())
                    .col(
                        ColumnDef::new(RateTables::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(RateTables::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RateTables::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_rate_tables_carrier")
                            .from(RateTables::Table, RateTables::CarrierId)
                            .to(Carriers::Table, Carriers::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(RateTableRows::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(RateTableRows::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(RateTableRows::RateTableId).string().not_null())
                    .col(
                        ColumnDef::new(RateTableRows::OriginState)
                            .string_len(2)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RateTableRows::DestinationState)
                            .string_len(2)
                            .not_null(),
                    )
                    .col(ColumnDef::new(RateTableRows::MinWeightKg).double().not_null())
                    .col(ColumnDef::new(RateTableRows::MaxWeightKg).double().not_null())
                    .col(ColumnDef::new(RateTableRows::PriceCents).big_integer().not_null())
                    .col(ColumnDef::new(RateTableRows::DeadlineDays).integer().not_null())
                    .col(
                        ColumnDef::new(RateTableRows::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(RateTableRows::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_rate_table_rows_table")
                            .from(RateTableRows::Table, RateTableRows::RateTableId)
                            .to(RateTables::Table, RateTables::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Range lookup used by the quote engine
        manager
            .create_index(
                Index::create()
                    .name("idx_rate_table_rows_route")
                    .table(RateTableRows::Table)
                    .col(RateTableRows::RateTableId)
                    .col(RateTableRows::OriginState)
                    .col(RateTableRows::DestinationState)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(RateTableRows::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(RateTables::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum RateTables {
    Table,
    Id,
    CarrierId,
    Name,
    IsActive,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
pub enum RateTableRows {
    Table,
    Id,
    RateTableId,
    OriginState,
    DestinationState,
    MinWeightKg,
    MaxWeightKg,
    PriceCents,
    DeadlineDays,
    IsActive,
    CreatedAt,
}
