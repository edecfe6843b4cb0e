//! Shipper company administration

pub mod service;

pub use service::CompanyService;
