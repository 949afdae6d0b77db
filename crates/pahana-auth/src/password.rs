//! Password hashing and verification using Argon2id

use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use pahana_core::error::AppError;
use rand_core::OsRng;
use tracing::{debug, error};

/// Password hashing service using Argon2 with default parameters
#[derive(Debug, Clone)]
pub struct PasswordService {
    argon2: Argon2<'static>,
}

impl PasswordService {
    pub fn new() -> Self {
        Self {
            argon2: Argon2::default(),
        }
    }

    /// Hash a password, returning a PHC-format string
    ///
    /// # Errors
    ///
    /// Returns `AppError::PasswordHash` if hashing fails
    pub fn hash_password(&self, password: &str) -> Result<String, AppError> {
        let salt = SaltString::generate(&mut OsRng);

        let password_hash = self
            .argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| {
                error!(error = %e, "Failed to hash password");
                AppError::PasswordHash(format!("Password hashing failed: {}", e))
            })?;

        Ok(password_hash.to_string())
    }

    /// Verify a password against a stored hash
    ///
    /// Returns `Ok(false)` for a mismatching password; errors are reserved
    /// for malformed hashes and internal failures.
    pub fn verify_password(&self, password: &str, hash: &str) -> Result<bool, AppError> {
        let parsed_hash = PasswordHash::new(hash).map_err(|e| {
            error!(error = %e, "Failed to parse password hash");
            AppError::PasswordHash(format!("Invalid password hash format: {}", e))
        })?;

        match self
            .argon2
            .verify_password(password.as_bytes(), &parsed_hash)
        {
            Ok(_) => Ok(true),
            Err(argon2::password_hash::Error::Password) => {
                debug!("Password verification failed: incorrect password");
                Ok(false)
            }
            Err(e) => {
                error!(error = %e, "Password verification error");
                Err(AppError::PasswordHash(format!(
                    "Password verification failed: {}",
                    e
                )))
            }
        }
    }
}

impl Default for PasswordService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_password() {
        let service = PasswordService::new();
        let hash = service.hash_password("test_password").unwrap();

        assert!(!hash.is_empty());
        assert!(hash.starts_with("$argon2"));
    }

    #[test]
    fn test_verify_correct_password() {
        let service = PasswordService::new();
        let hash = service.hash_password("correct_password").unwrap();

        assert!(service
            .verify_password("correct_password", &hash)
            .unwrap());
    }

    #[test]
    fn test_verify_incorrect_password() {
        let service = PasswordService::new();
        let hash = service.hash_password("correct_password").unwrap();

        assert!(!service.verify_password("wrong_password", &hash).unwrap());
    }

    #[test]
    fn test_different_hashes_for_same_password() {
        let service = PasswordService::new();

        let hash1 = service.hash_password("same_password").unwrap();
        let hash2 = service.hash_password("same_password").unwrap();

        // Salts differ per hash
        assert_ne!(hash1, hash2);
        assert!(service.verify_password("same_password", &hash1).unwrap());
        assert!(service.verify_password("same_password", &hash2).unwrap());
    }

    #[test]
    fn test_invalid_hash_format() {
        let service = PasswordService::new();
        let result = service.verify_password("password", "not_a_valid_hash");

        assert!(matches!(result, Err(AppError::PasswordHash(_))));
    }

    #[test]
    fn test_special_characters() {
        let service = PasswordService::new();
        let password = "p@ssw0rd!#$%^&*()_+-=[]{}|;':\",./<>?";
        let hash = service.hash_password(password).unwrap();

        assert!(service.verify_password(password, &hash).unwrap());
    }
}
