//! Freight requests: creation, listing, cancellation and proposal selection

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
