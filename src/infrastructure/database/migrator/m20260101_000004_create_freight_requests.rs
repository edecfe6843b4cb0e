//! Create freight_requests table

use sea_orm_migration::prelude::*;

use super::m20260101_000001_create_companies::Companies;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(FreightRequests::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(FreightRequests::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(FreightRequests::CompanyId).string().not_null())
                    .col(ColumnDef::new(FreightRequests::CreatedBy).string().not_null())
                    .col(
                        ColumnDef::new(FreightRequests::Status)
                            .string_len(20)
                            .not_null()
                            .default("OPEN"),
                    )
                    .col(ColumnDef::new(FreightRequests::OriginZip).string_len(8).not_null())
                    .col(ColumnDef::new(FreightRequests::OriginCity).string().not_null())
                    .col(ColumnDef::new(FreightRequests::OriginState).string_len(2).not_null())
                    .col(
                        ColumnDef::new(FreightRequests::DestinationZip)
                            .string_len(8)
                            .not_null(),
                    )
                    .col(ColumnDef::new(FreightRequests::DestinationCity).string().not_null())
                    .col(
                        ColumnDef::new(FreightRequests::DestinationState)
                            .string_len(2)
                            .not_null(),
                    )
                    .col(ColumnDef::new(FreightRequests::CargoType).string().not_null())
                    .col(ColumnDef::new(FreightRequests::CargoDescription).text())
                    .col(ColumnDef::new(FreightRequests::WeightKg).double())
                    .col(ColumnDef::new(FreightRequests::VolumeM3).double())
                    .col(ColumnDef::new(FreightRequests::LengthCm).double())
                    .col(ColumnDef::new(FreightRequests::WidthCm).double())
                    .col(ColumnDef::new(FreightRequests::HeightCm).double())
                    .col(ColumnDef::new(FreightRequests::InvoiceValueCents).big_integer())
                    .col(ColumnDef::new(FreightRequests::PickupDate).date().not_null())
                    .col(ColumnDef::new(FreightRequests::SelectedProposalId).string())
                    .col(
                        ColumnDef::new(FreightRequests::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(FreightRequests::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_freight_requests_company")
                            .from(FreightRequests::Table, FreightRequests::CompanyId)
                            .to(Companies::Table, Companies::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_freight_requests_company_status")
                    .table(FreightRequests::Table)
                    .col(FreightRequests::CompanyId)
                    .col(FreightRequests::Status)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(FreightRequests::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum FreightRequests {
    Table,
    Id,
    CompanyId,
    CreatedBy,
    Status,
    OriginZip,
    OriginCity,
    OriginState,
    DestinationZip,
    DestinationCity,
    DestinationState,
    CargoType,
    CargoDescription,
    WeightKg,
    VolumeM3,
    LengthCm,
    WidthCm,
    HeightCm,
    InvoiceValueCents,
    PickupDate,
    SelectedProposalId,
    CreatedAt,
    UpdatedAt,
}
