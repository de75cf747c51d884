//! User (identity) repository trait definition.

use chatline_types::error::RepositoryError;

/// Repository trait for user credentials.
///
/// The adapter owns credential storage: it receives the plaintext secret,
/// stores only a derived hash, and performs the comparison itself.
/// Uses native async fn in traits (Rust 2024 edition, no async_trait macro).
pub trait UserRepository: Send + Sync {
    /// Whether a user with exactly this username is registered.
    fn user_exists(
        &self,
        username: &str,
    ) -> impl std::future::Future<Output = Result<bool, RepositoryError>> + Send;

    /// Create a user if and only if the username is free.
    ///
    /// Must be atomic: of two concurrent calls for the same username, exactly
    /// one succeeds and the other returns `RepositoryError::Conflict`.
    fn create_user(
        &self,
        username: &str,
        password: &str,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Check a password against the stored credential.
    ///
    /// Returns `false` both for an unknown username and for a wrong password.
    fn verify_credential(
        &self,
        username: &str,
        password: &str,
    ) -> impl std::future::Future<Output = Result<bool, RepositoryError>> + Send;
}
