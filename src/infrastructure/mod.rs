//! Infrastructure layer - external concerns

pub mod crypto;
pub mod database;
pub mod postal_code;

pub use database::{init_database, DatabaseConfig};
pub use postal_code::{StaticPostalCodeResolver, ViaCepResolver};
