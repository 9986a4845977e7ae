//! Password hashing using Argon2.

use abrigo_core::{AbrigoError, AbrigoResult};
use argon2::{
    password_hash::{
        rand_core::OsRng, PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString,
    },
    Argon2, Params,
};
use std::sync::Arc;
use tracing::debug;

/// Password hasher service using Argon2id.
#[derive(Clone)]
pub struct PasswordHasher {
    argon2: Arc<Argon2<'static>>,
}

impl PasswordHasher {
    /// Creates a new password hasher with default parameters.
    #[must_use]
    pub fn new() -> Self {
        Self::with_params(Params::DEFAULT)
    }

    /// Creates a new password hasher with custom parameters.
    #[must_use]
    pub fn with_params(params: Params) -> Self {
        let argon2 = Argon2::new(argon2::Algorithm::Argon2id, argon2::Version::V0x13, params);
        Self {
            argon2: Arc::new(argon2),
        }
    }

    /// Hashes a password with a fresh random salt.
    pub fn hash(&self, password: &str) -> AbrigoResult<String> {
        let salt = SaltString::generate(&mut OsRng);

        let hash = self
            .argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AbrigoError::Internal(format!("Failed to hash password: {}", e)))?;

        debug!("Password hashed successfully");
        Ok(hash.to_string())
    }

    /// Verifies a password against a hash.
    ///
    /// Returns `Ok(false)` for an incorrect password; an `Err` means the
    /// stored hash itself is malformed.
    pub fn verify(&self, password: &str, hash: &str) -> AbrigoResult<bool> {
        let parsed_hash = PasswordHash::new(hash)
            .map_err(|e| AbrigoError::Internal(format!("Invalid password hash format: {}", e)))?;

        match self.argon2.verify_password(password.as_bytes(), &parsed_hash) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => {
                debug!("Password verification failed: incorrect password");
                Ok(false)
            }
            Err(e) => Err(AbrigoError::Internal(format!(
                "Password verification error: {}",
                e
            ))),
        }
    }

    /// Checks if a hash was produced by a different algorithm and should
    /// be rehashed on next login.
    #[must_use]
    pub fn needs_rehash(&self, hash: &str) -> bool {
        match PasswordHash::new(hash) {
            Ok(parsed) => parsed.algorithm != argon2::Algorithm::Argon2id.ident(),
            Err(_) => true,
        }
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for PasswordHasher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PasswordHasher").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hasher = PasswordHasher::new();
        let password = "12345678";

        let hash = hasher.hash(password).unwrap();
        assert!(hasher.verify(password, &hash).unwrap());
        assert!(!hasher.verify("wrong-password", &hash).unwrap());
    }

    #[test]
    fn test_different_hashes_for_same_password() {
        let hasher = PasswordHasher::new();
        let password = "12345678";

        let hash1 = hasher.hash(password).unwrap();
        let hash2 = hasher.hash(password).unwrap();

        assert_ne!(hash1, hash2);
        assert!(hasher.verify(password, &hash1).unwrap());
        assert!(hasher.verify(password, &hash2).unwrap());
    }

    #[test]
    fn test_invalid_hash_format_returns_error() {
        let hasher = PasswordHasher::new();
        assert!(hasher.verify("password", "not-a-valid-hash").is_err());
    }

    #[test]
    fn test_needs_rehash() {
        let hasher = PasswordHasher::new();
        let hash = hasher.hash("password").unwrap();
        assert!(!hasher.needs_rehash(&hash));
        assert!(hasher.needs_rehash("garbage-hash"));
    }

    #[test]
    fn test_hasher_debug_does_not_leak_secrets() {
        let hasher = PasswordHasher::new();
        let debug_str = format!("{:?}", hasher);
        assert!(debug_str.contains("PasswordHasher"));
    }
}
