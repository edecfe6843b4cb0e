//! User aggregate
//!
//! Contains the User entity, role enum, and repository interface.

pub mod model;
pub mod repository;

pub use model::{User, UserRole};
pub use repository::{UserFilter, UserRepository, UserUpdate};
