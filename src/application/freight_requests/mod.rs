//! Freight request use-cases

pub mod service;

pub use service::{CreateFreightRequest, FreightRequestService};
