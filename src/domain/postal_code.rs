//! Postal code (CEP) resolution port

use async_trait::async_trait;

use crate::domain::DomainResult;

/// City and state a CEP belongs to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address {
    pub city: String,
    /// Two-letter UF, uppercase
    pub state: String,
}

#[async_trait]
pub trait PostalCodeResolver: Send + Sync {
    /// `cep` is already normalised to 8 digits
    async fn resolve(&self, cep: &str) -> DomainResult<Address>;
}
