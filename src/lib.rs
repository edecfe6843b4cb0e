//! # Freight Quote Service
//!
//! B2B freight quoting backend. Shipper companies open freight requests that
//! carriers answer with proposals, and get instant quotes computed from the
//! carriers' rate tables.
//!
//! ## Architecture
//!
//! - **domain**: entities, value types, repository and resolver traits
//! - **application**: services enforcing roles and ownership, quote engine
//! - **infrastructure**: SeaORM persistence, JWT/bcrypt, postal-code lookup
//! - **interfaces**: axum REST API with Swagger documentation
//! - **server**: runtime wiring and graceful shutdown

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod server;
pub mod shared;

pub use config::{default_config_path, AppConfig};
pub use infrastructure::database::repositories::SeaOrmRepositoryProvider;
pub use infrastructure::{init_database, DatabaseConfig};
pub use interfaces::{create_api_router, AppState};
