//! Carrier rate tables and their rows

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
