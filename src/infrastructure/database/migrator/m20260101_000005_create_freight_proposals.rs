//! Create freight_proposals table

use sea_orm_migration::prelude::*;

use super::m20260101_000003_create_carriers::Carriers;
use super::m20260101_000004_create_freight_requests::FreightRequests;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(FreightProposals::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(FreightProposals::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(FreightProposals::FreightRequestId)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(FreightProposals::CarrierId).string().not_null())
                    .col(
                        ColumnDef::new(FreightProposals::PriceCents)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(FreightProposals::DeadlineDays)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(FreightProposals::Notes).text())
                    .col(
                        ColumnDef::new(FreightProposals::Status)
                            .string_len(20)
                            .not_null()
                            .default("SENT"),
                    )
                    .col(
                        ColumnDef::new(FreightProposals::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(FreightProposals::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_freight_proposals_request")
                            .from(FreightProposals::Table, FreightProposals::FreightRequestId)
                            .to(FreightRequests::Table, FreightRequests::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_freight_proposals_carrier")
                            .from(FreightProposals::Table, FreightProposals::CarrierId)
                            .to(Carriers::Table, Carriers::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // A carrier answers each request at most once
        manager
            .create_index(
                Index::create()
                    .name("idx_freight_proposals_request_carrier")
                    .table(FreightProposals::Table)
                    .col(FreightProposals::FreightRequestId)
                    .col(FreightProposals::CarrierId)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(FreightProposals::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum FreightProposals {
    Table,
    Id,
    FreightRequestId,
    CarrierId,
    PriceCents,
    DeadlineDays,
    Notes,
    Status,
    CreatedAt,
    UpdatedAt,
}
