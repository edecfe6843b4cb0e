//! Carrier rate table maintenance

pub mod service;

pub use service::{NewRowInput, RateTableService};
