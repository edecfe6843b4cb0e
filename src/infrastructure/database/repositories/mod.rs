//! Database repository implementations
//!
//! Per-aggregate SeaORM repositories + unified RepositoryProvider.

pub mod carrier_repository;
pub mod company_repository;
pub mod freight_request_repository;
pub mod proposal_repository;
pub mod quote_repository;
pub mod rate_table_repository;
pub mod repository_provider;
pub mod user_repository;

pub use repository_provider::SeaOrmRepositoryProvider;

use sea_orm::{DbErr, SqlErr};

use crate::domain::DomainError;

pub(crate) fn db_err(e: DbErr) -> DomainError {
    DomainError::Storage(format!("Database error: {}", e))
}

/// Map an insert/update failure, turning unique violations into `Conflict`
pub(crate) fn write_err(e: DbErr, conflict: &str) -> DomainError {
    let unique = matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
        || e.to_string().contains("UNIQUE")
        || e.to_string().contains("duplicate");
    if unique {
        DomainError::Conflict(conflict.to_string())
    } else {
        db_err(e)
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use sea_orm::{Database, DatabaseConnection};
    use sea_orm_migration::MigratorTrait;

    use crate::infrastructure::database::migrator::Migrator;

    /// Fresh migrated in-memory database
    pub async fn memory_db() -> DatabaseConnection {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        Migrator::up(&db, None).await.unwrap();
        db
    }
}
