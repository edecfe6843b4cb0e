//! Postal code (CEP) resolvers

pub mod static_resolver;
pub mod viacep;

pub use static_resolver::StaticPostalCodeResolver;
pub use viacep::ViaCepResolver;
