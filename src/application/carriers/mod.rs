//! Carrier administration and lookup

pub mod service;

pub use service::CarrierService;
