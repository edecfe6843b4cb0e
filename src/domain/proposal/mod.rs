//! Carrier proposals on freight requests

pub mod model;
pub mod repository;

pub use model::{FreightProposal, NewProposal, ProposalStatus};
pub use repository::ProposalRepository;
