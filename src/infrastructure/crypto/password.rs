//! bcrypt password hashing

use bcrypt::{hash, verify, DEFAULT_COST};

use crate::shared::InfraError;

/// Hash a password with the default bcrypt cost
pub fn hash_password(password: &str) -> Result<String, InfraError> {
    hash(password, DEFAULT_COST).map_err(|e| InfraError::Crypto(format!("Failed to hash password: {}", e)))
}

/// Check `password` against a stored hash.
///
/// A malformed stored hash counts as a mismatch, so a corrupted row can never
/// be logged into.
pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    match verify(password, stored_hash) {
        Ok(valid) => valid,
        Err(e) => {
            log::warn!("Stored password hash could not be checked: {}", e);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify() {
        let hashed = hash_password("s3cret-pass").unwrap();
        assert_ne!(hashed, "s3cret-pass");
        assert!(verify_password("s3cret-pass", &hashed));
        assert!(!verify_password("wrong-pass", &hashed));
    }

    #[test]
    fn malformed_hash_never_matches() {
        assert!(!verify_password("s3cret-pass", "not-a-bcrypt-hash"));
    }
}
