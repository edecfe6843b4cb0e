//! SeaORM implementation of RepositoryProvider

use sea_orm::DatabaseConnection;

use crate::domain::{
    CarrierRepository, CompanyRepository, FreightRequestRepository, ProposalRepository,
    QuoteRepository, RateTableRepository, RepositoryProvider, UserRepository,
};

use super::carrier_repository::SeaOrmCarrierRepository;
use super::company_repository::SeaOrmCompanyRepository;
use super::freight_request_repository::SeaOrmFreightRequestRepository;
use super::proposal_repository::SeaOrmProposalRepository;
use super::quote_repository::SeaOrmQuoteRepository;
use super::rate_table_repository::SeaOrmRateTableRepository;
use super::user_repository::SeaOrmUserRepository;

/// Unified repository provider backed by SeaORM.
///
/// Holds one connection pool and exposes per-aggregate repository accessors.
///
/// ```ignore
/// let repos = SeaOrmRepositoryProvider::new(db.clone());
/// let carriers = repos.rate_tables().carriers_with_active_table().await?;
/// ```
pub struct SeaOrmRepositoryProvider {
    users: SeaOrmUserRepository,
    companies: SeaOrmCompanyRepository,
    carriers: SeaOrmCarrierRepository,
    freight_requests: SeaOrmFreightRequestRepository,
    proposals: SeaOrmProposalRepository,
    rate_tables: SeaOrmRateTableRepository,
    quotes: SeaOrmQuoteRepository,
}

impl SeaOrmRepositoryProvider {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            users: SeaOrmUserRepository::new(db.clone()),
            companies: SeaOrmCompanyRepository::new(db.clone()),
            carriers: SeaOrmCarrierRepository::new(db.clone()),
            freight_requests: SeaOrmFreightRequestRepository::new(db.clone()),
            proposals: SeaOrmProposalRepository::new(db.clone()),
            rate_tables: SeaOrmRateTableRepository::new(db.clone()),
            quotes: SeaOrmQuoteRepository::new(db),
        }
    }
}

impl RepositoryProvider for SeaOrmRepositoryProvider {
    fn users(&self) -> &dyn UserRepository {
        &self.users
    }

    fn companies(&self) -> &dyn CompanyRepository {
        &self.companies
    }

    fn carriers(&self) -> &dyn CarrierRepository {
        &self.carriers
    }

    fn freight_requests(&self) -> &dyn FreightRequestRepository {
        &self.freight_requests
    }

    fn proposals(&self) -> &dyn ProposalRepository {
        &self.proposals
    }

    fn rate_tables(&self) -> &dyn RateTableRepository {
        &self.rate_tables
    }

    fn quotes(&self) -> &dyn QuoteRepository {
        &self.quotes
    }
}
