//! Application services
//!
//! Each service takes the acting [`User`](crate::domain::User) and enforces
//! role and ownership rules before touching the repositories.

pub mod access;
pub mod carriers;
pub mod companies;
pub mod freight_requests;
pub mod identity;
pub mod proposals;
pub mod quoting;
pub mod rate_tables;

#[cfg(test)]
pub(crate) mod test_support;

pub use carriers::CarrierService;
pub use companies::CompanyService;
pub use freight_requests::{CreateFreightRequest, FreightRequestService};
pub use identity::{AuthResult, UserService};
pub use proposals::ProposalService;
pub use quoting::{QuoteEngine, QuoteInput, QuoteWithResults};
pub use rate_tables::{NewRowInput, RateTableService};
