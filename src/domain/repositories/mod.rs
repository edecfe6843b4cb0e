//! Unified access to the per-aggregate repositories

use super::carrier::CarrierRepository;
use super::company::CompanyRepository;
use super::freight_request::FreightRequestRepository;
use super::proposal::ProposalRepository;
use super::quote::QuoteRepository;
use super::rate_table::RateTableRepository;
use super::user::UserRepository;

/// Consumers request only the repository they need:
///
/// ```ignore
/// async fn handle(repos: &dyn RepositoryProvider) {
///     let request = repos.freight_requests().find_by_id("fr-1").await?;
///     let offers = repos.proposals().list_by_request("fr-1").await?;
/// }
/// ```
pub trait RepositoryProvider: Send + Sync {
    fn users(&self) -> &dyn UserRepository;
    fn companies(&self) -> &dyn CompanyRepository;
    fn carriers(&self) -> &dyn CarrierRepository;
    fn freight_requests(&self) -> &dyn FreightRequestRepository;
    fn proposals(&self) -> &dyn ProposalRepository;
    fn rate_tables(&self) -> &dyn RateTableRepository;
    fn quotes(&self) -> &dyn QuoteRepository;
}
