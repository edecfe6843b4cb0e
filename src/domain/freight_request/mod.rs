//! Freight request aggregate ("solicitação")
//!
//! A shipper's request for a shipment. Carriers answer with proposals and the
//! shipper closes the request by selecting one.

pub mod model;
pub mod repository;

pub use model::{FreightRequest, FreightRequestStatus, NewFreightRequest};
pub use repository::{FreightRequestFilter, FreightRequestRepository};
