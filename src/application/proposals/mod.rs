//! Carrier proposals on freight requests

pub mod service;

pub use service::ProposalService;
