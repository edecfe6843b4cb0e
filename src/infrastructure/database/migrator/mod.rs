//! Database migrations module

pub use sea_orm_migration::prelude::*;

mod m20260101_000001_create_companies;
mod m20260101_000002_create_users;
mod m20260101_000003_create_carriers;
mod m20260101_000004_create_freight_requests;
mod m20260101_000005_create_freight_proposals;
mod m20260101_000006_create_rate_tables;
mod m20260101_000007_create_quotes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260101_000001_create_companies::Migration),
            Box::new(m20260101_000002_create_users::Migration),
            Box::new(m20260101_000003_create_carriers::Migration),
            Box::new(m20260101_000004_create_freight_requests::Migration),
            Box::new(m20260101_000005_create_freight_proposals::Migration),
            Box::new(m20260101_000006_create_rate_tables::Migration),
            Box::new(m20260101_000007_create_quotes::Migration),
        ]
    }
}
