//! # Password Hashing
//!
//! argon2 hashing and verification for admin credentials.
//!
//! Lives in velora-core because hashing is pure computation (the only
//! entropy is local salt generation) and both the API server and the seed
//! binary need it.
//!
//! ## Usage
//! ```rust
//! use velora_core::password::{hash_password, verify_password};
//!
//! let hash = hash_password("correct horse battery").unwrap();
//! assert!(verify_password("correct horse battery", &hash));
//! assert!(!verify_password("wrong", &hash));
//! ```

use argon2::{
    password_hash::{rand_core::OsRng, SaltString},
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
};
use thiserror::Error;

/// Password hashing failure.
///
/// Only surfaces for pathological inputs or parameter misconfiguration;
/// verification failures are a boolean, not an error.
#[derive(Debug, Error)]
#[error("Failed to hash password: {0}")]
pub struct PasswordHashError(String);

/// Hashes a password with argon2 and a fresh random salt.
///
/// The returned PHC string embeds the salt and parameters, so it is the only
/// thing that needs to be stored.
pub fn hash_password(password: &str) -> Result<String, PasswordHashError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| PasswordHashError(e.to_string()))?;

    Ok(hash.to_string())
}

/// Verifies a password against a stored argon2 hash.
///
/// Returns `false` for a wrong password AND for an unparseable hash - a
/// corrupt stored hash must fail closed, not panic.
pub fn verify_password(password: &str, hash: &str) -> bool {
    let parsed_hash = match PasswordHash::new(hash) {
        Ok(h) => h,
        Err(_) => return false,
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify_roundtrip() {
        let hash = hash_password("hunter2hunter2").unwrap();
        assert!(verify_password("hunter2hunter2", &hash));
        assert!(!verify_password("hunter3hunter3", &hash));
    }

    #[test]
    fn test_hashes_are_salted() {
        let a = hash_password("same-password").unwrap();
        let b = hash_password("same-password").unwrap();
        // Fresh salt every time: identical inputs must not collide
        assert_ne!(a, b);
    }

    #[test]
    fn test_corrupt_hash_fails_closed() {
        assert!(!verify_password("anything", "not-a-phc-string"));
        assert!(!verify_password("anything", ""));
    }
}
