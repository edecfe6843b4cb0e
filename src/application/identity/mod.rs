//! Identity: user management and authentication
//!
//! Contains the `UserService` which orchestrates all user-related
//! use-cases: login, registration, password changes and admin management.

pub mod service;

pub use service::{AuthResult, UserService};
