use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Not found: {entity} with {field}={value}")]
    NotFound {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("Validation: {0}")]
    Validation(String),

    #[error("Already exists: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Postal code {0} not found")]
    PostalCodeNotFound(String),

    #[error("Postal code lookup unavailable: {0}")]
    PostalCodeUnavailable(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl DomainError {
    pub fn not_found(entity: &'static str, value: impl ToString) -> Self {
        DomainError::NotFound {
            entity,
            field: "id",
            value: value.to_string(),
        }
    }

    /// Whether this error is likely transient (e.g. DB connection lost,
    /// lookup service down) and the operation may succeed if retried.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            DomainError::Storage(_) | DomainError::PostalCodeUnavailable(_)
        )
    }
}

#[derive(Debug, Error)]
pub enum InfraError {
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("Crypto error: {0}")]
    Crypto(String),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
}

impl From<InfraError> for DomainError {
    fn from(e: InfraError) -> Self {
        match e {
            InfraError::Http(e) => DomainError::PostalCodeUnavailable(e.to_string()),
            other => DomainError::Storage(other.to_string()),
        }
    }
}

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_and_lookup_failures_are_transient() {
        assert!(DomainError::Storage("timeout".into()).is_transient());
        assert!(DomainError::PostalCodeUnavailable("503".into()).is_transient());
        assert!(!DomainError::Validation("bad".into()).is_transient());
        assert!(!DomainError::not_found("Quote", "q1").is_transient());
    }

    #[test]
    fn not_found_message() {
        let e = DomainError::not_found("RateTable", "t-1");
        assert_eq!(e.to_string(), "Not found: RateTable with id=t-1");
    }

    #[test]
    fn infra_errors_map_to_storage() {
        let e: DomainError = InfraError::Crypto("bad hash".into()).into();
        assert!(matches!(e, DomainError::Storage(_)));
    }
}
