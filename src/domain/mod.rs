//! Domain layer: entities, value types and repository interfaces
//!
//! Nothing in here knows about HTTP or SeaORM.

pub mod carrier;
pub mod company;
pub mod freight_request;
pub mod postal_code;
pub mod proposal;
pub mod quote;
pub mod rate_table;
pub mod repositories;
pub mod user;

pub use carrier::{Carrier, CarrierRepository};
pub use company::{Company, CompanyRepository};
pub use freight_request::{FreightRequest, FreightRequestRepository, FreightRequestStatus};
pub use postal_code::{Address, PostalCodeResolver};
pub use proposal::{FreightProposal, ProposalRepository, ProposalStatus};
pub use quote::{OfferSource, Quote, QuoteRepository, QuoteResult, QuoteStatus};
pub use rate_table::{RateTable, RateTableRepository, RateTableRow};
pub use repositories::RepositoryProvider;
pub use user::{User, UserFilter, UserRepository, UserRole, UserUpdate};

pub use crate::shared::errors::{DomainError, DomainResult};
