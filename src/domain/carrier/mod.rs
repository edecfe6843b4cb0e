//! Carrier aggregate

pub mod model;
pub mod repository;

pub use model::Carrier;
pub use repository::CarrierRepository;
