//! In-process resolver backed by a fixed map

use std::collections::HashMap;

use async_trait::async_trait;

use crate::domain::{Address, DomainError, DomainResult, PostalCodeResolver};
use crate::shared::parsing::normalize_postal_code;

#[derive(Debug, Default, Clone)]
pub struct StaticPostalCodeResolver {
    entries: HashMap<String, Address>,
}

impl StaticPostalCodeResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a CEP (any formatting) for a city and state
    pub fn with(mut self, cep: &str, city: &str, state: &str) -> Self {
        self.entries.insert(
            normalize_postal_code(cep),
            Address {
                city: city.to_string(),
                state: state.to_uppercase(),
            },
        );
        self
    }
}

#[async_trait]
impl PostalCodeResolver for StaticPostalCodeResolver {
    async fn resolve(&self, cep: &str) -> DomainResult<Address> {
        self.entries
            .get(&normalize_postal_code(cep))
            .cloned()
            .ok_or_else(|| DomainError::PostalCodeNotFound(cep.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn resolves_registered_codes_only() {
        let resolver = StaticPostalCodeResolver::new().with("01310-100", "São Paulo", "sp");
        let address = resolver.resolve("01310100").await.unwrap();
        assert_eq!(address.state, "SP");
        assert!(matches!(
            resolver.resolve("20040020").await,
            Err(DomainError::PostalCodeNotFound(_))
        ));
    }
}
