//! Create quotes and quote_results

use sea_orm_migration::prelude::*;

use super::m20260101_000001_create_companies::Companies;
use super::m20260101_000003_create_carriers::Carriers;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Quotes::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Quotes::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Quotes::CompanyId).string().not_null())
                    .col(ColumnDef::new(Quotes::CreatedBy).string().not_null())
                    .col(
                        ColumnDef::new(Quotes::Status)
                            .string_len(20)
                            .not_null()
                            .default("OPEN"),
                    )
                    .col(ColumnDef::new(Quotes::OriginZip).string_len(8).not_null())
                    .col(ColumnDef::new(Quotes::DestinationZip).string_len(8).not_null())
                    .col(ColumnDef::new(Quotes::WeightKg).double().not_null())
                    .col(ColumnDef::new(Quotes::LengthCm).double())
                    .col(ColumnDef::new(Quotes::WidthCm).double())
                    .col(ColumnDef::new(Quotes::HeightCm).double())
                    .col(ColumnDef::new(Quotes::CargoType).string())
                    .col(ColumnDef::new(Quotes::OriginCity).string().not_null())
                    .col(ColumnDef::new(Quotes::OriginState).string_len(2).not_null())
                    .col(ColumnDef::new(Quotes::DestinationCity).string().not_null())
                    .col(ColumnDef::new(Quotes::DestinationState).string_len(2).not_null())
                    .col(
                        ColumnDef::new(Quotes::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_quotes_company")
                            .from(Quotes::Table, Quotes::CompanyId)
                            .to(Companies::Table, Companies::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(QuoteResults::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(QuoteResults::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(QuoteResults::QuoteId).string().not_null())
                    .col(ColumnDef::new(QuoteResults::CarrierId).string().not_null())
                    .col(
                        ColumnDef::new(QuoteResults::OriginSource)
                            .string_len(10)
                            .not_null()
                            .default("TABELA"),
                    )
                    .col(ColumnDef::new(QuoteResults::PriceCents).big_integer().not_null())
                    .col(ColumnDef::new(QuoteResults::DeadlineDays).integer().not_null())
                    .col(
                        ColumnDef::new(QuoteResults::Status)
                            .string_len(20)
                            .not_null()
                            .default("SENT"),
                    )
                    .col(ColumnDef::new(QuoteResults::RateRowId).string())
                    .col(
                        ColumnDef::new(QuoteResults::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_quote_results_quote")
                            .from(QuoteResults::Table, QuoteResults::QuoteId)
                            .to(Quotes::Table, Quotes::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_quote_results_carrier")
                            .from(QuoteResults::Table, QuoteResults::CarrierId)
                            .to(Carriers::Table, Carriers::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // One offer per carrier per quote
        manager
            .create_index(
                Index::create()
                    .name("idx_quote_results_quote_carrier")
                    .table(QuoteResults::Table)
                    .col(QuoteResults::QuoteId)
                    .col(QuoteResults::CarrierId)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(QuoteResults::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Quotes::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Quotes {
    Table,
    Id,
    CompanyId,
    CreatedBy,
    Status,
    OriginZip,
    DestinationZip,
    WeightKg,
    LengthCm,
    WidthCm,
    HeightCm,
    CargoType,
    OriginCity,
    OriginState,
    DestinationCity,
    DestinationState,
    CreatedAt,
}

#[derive(Iden)]
pub enum QuoteResults {
    Table,
    Id,
    QuoteId,
    CarrierId,
    OriginSource,
    PriceCents,
    DeadlineDays,
    Status,
    RateRowId,
    CreatedAt,
}
