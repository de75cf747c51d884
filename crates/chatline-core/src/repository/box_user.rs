//! BoxUserRepository -- object-safe dynamic dispatch wrapper for UserRepository.
//!
//! 1. Define an object-safe `UserRepositoryDyn` trait with boxed futures
//! 2. Blanket-impl `UserRepositoryDyn` for all `T: UserRepository`
//! 3. `BoxUserRepository` wraps `Box<dyn UserRepositoryDyn>` and delegates

use std::future::Future;
use std::pin::Pin;

use chatline_types::error::RepositoryError;

use super::user::UserRepository;

/// Object-safe version of [`UserRepository`] with boxed futures.
pub trait UserRepositoryDyn: Send + Sync {
    fn user_exists_boxed<'a>(
        &'a self,
        username: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<bool, RepositoryError>> + Send + 'a>>;

    fn create_user_boxed<'a>(
        &'a self,
        username: &'a str,
        password: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<(), RepositoryError>> + Send + 'a>>;

    fn verify_credential_boxed<'a>(
        &'a self,
        username: &'a str,
        password: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<bool, RepositoryError>> + Send + 'a>>;
}

impl<T: UserRepository> UserRepositoryDyn for T {
    fn user_exists_boxed<'a>(
        &'a self,
        username: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<bool, RepositoryError>> + Send + 'a>> {
        Box::pin(self.user_exists(username))
    }

    fn create_user_boxed<'a>(
        &'a self,
        username: &'a str,
        password: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<(), RepositoryError>> + Send + 'a>> {
        Box::pin(self.create_user(username, password))
    }

    fn verify_credential_boxed<'a>(
        &'a self,
        username: &'a str,
        password: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<bool, RepositoryError>> + Send + 'a>> {
        Box::pin(self.verify_credential(username, password))
    }
}

/// Type-erased user repository, selected at startup (SQLite or in-memory).
pub struct BoxUserRepository {
    inner: Box<dyn UserRepositoryDyn + Send + Sync>,
}

impl BoxUserRepository {
    /// Wrap a concrete `UserRepository` in a type-erased box.
    pub fn new<T: UserRepository + 'static>(repo: T) -> Self {
        Self {
            inner: Box::new(repo),
        }
    }

    pub async fn user_exists(&self, username: &str) -> Result<bool, RepositoryError> {
        self.inner.user_exists_boxed(username).await
    }

    pub async fn create_user(&self, username: &str, password: &str) -> Result<(), RepositoryError> {
        self.inner.create_user_boxed(username, password).await
    }

    pub async fn verify_credential(
        &self,
        username: &str,
        password: &str,
    ) -> Result<bool, RepositoryError> {
        self.inner.verify_credential_boxed(username, password).await
    }
}
