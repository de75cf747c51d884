//! Argon2id credential hashing.
//!
//! Passwords are stored as PHC strings (`$argon2id$v=19$m=19456,t=2,p=1$...`)
//! with a fresh random salt per credential. The PHC string is self-describing,
//! so verification reads the parameters from the stored hash.
//!
//! SECURITY: Error types never contain the password.

use argon2::Argon2;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("credential hashing failed")]
    HashingFailed,

    #[error("credential worker task failed: {0}")]
    WorkerFailed(String),
}

/// Hashes and verifies user credentials with Argon2id.
///
/// Uses the Argon2id defaults, which match the OWASP recommendation:
/// 19 MiB memory, 2 iterations, 1 degree of parallelism.
#[derive(Clone)]
pub struct CredentialHasher {
    argon2: Argon2<'static>,
}

impl CredentialHasher {
    pub fn new() -> Self {
        Self {
            argon2: Argon2::default(),
        }
    }

    /// Hash a password into a PHC string with a random salt.
    pub fn hash(&self, password: &str) -> Result<String, CredentialError> {
        let salt = SaltString::generate(&mut OsRng);
        self.argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|_| CredentialError::HashingFailed)
    }

    /// Check a password against a stored PHC string.
    ///
    /// A malformed stored hash never verifies.
    pub fn verify(&self, password: &str, stored: &str) -> bool {
        match PasswordHash::new(stored) {
            Ok(parsed) => self
                .argon2
                .verify_password(password.as_bytes(), &parsed)
                .is_ok(),
            Err(_) => {
                tracing::warn!("Stored credential is not a valid PHC string");
                false
            }
        }
    }
}

impl CredentialHasher {
    /// [`hash`](Self::hash) on the blocking thread pool.
    pub async fn hash_blocking(&self, password: &str) -> Result<String, CredentialError> {
        let hasher = self.clone();
        let password = password.to_string();
        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| CredentialError::WorkerFailed(e.to_string()))?
    }

    /// [`verify`](Self::verify) on the blocking thread pool.
    pub async fn verify_blocking(
        &self,
        password: &str,
        stored: String,
    ) -> Result<bool, CredentialError> {
        let hasher = self.clone();
        let password = password.to_string();
        tokio::task::spawn_blocking(move || hasher.verify(&password, &stored))
            .await
            .map_err(|e| CredentialError::WorkerFailed(e.to_string()))
    }
}

impl Default for CredentialHasher {
    fn default() -> Self {
        Self::new()
    }
}
