//! Account password hashing
//!
//! Customer and admin passwords are stored as bcrypt hashes; the plain
//! text never reaches the database. Hashing failures surface as internal
//! domain errors so the API edge maps them to a 500.

use bcrypt::DEFAULT_COST;

use crate::domain::{DomainError, DomainResult};

/// Hash an account password with bcrypt at the default cost factor.
pub fn hash_password(plain: &str) -> DomainResult<String> {
    bcrypt::hash(plain, DEFAULT_COST)
        .map_err(|e| DomainError::Internal(format!("Password hashing failed: {}", e)))
}

/// Check a login attempt against the stored hash.
///
/// A corrupt or non-bcrypt hash counts as a failed match rather than an
/// error: the caller only ever answers "are these credentials valid".
pub fn verify_password(plain: &str, stored_hash: &str) -> bool {
    bcrypt::verify(plain, stored_hash).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verifies_own_hash() {
        let hash = hash_password("secure_password_123").unwrap();
        assert!(verify_password("secure_password_123", &hash));
        assert!(!verify_password("secure_password_124", &hash));
    }

    #[test]
    fn salts_differ_between_hashes() {
        let first = hash_password("charge&go2026").unwrap();
        let second = hash_password("charge&go2026").unwrap();
        assert_ne!(first, second);
        assert!(verify_password("charge&go2026", &first));
        assert!(verify_password("charge&go2026", &second));
    }

    #[test]
    fn corrupt_stored_hash_is_a_failed_match() {
        assert!(!verify_password("secure_password_123", "not-a-bcrypt-hash"));
        assert!(!verify_password("secure_password_123", ""));
    }
}
