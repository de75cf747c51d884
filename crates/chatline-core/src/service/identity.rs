//! Identity management service.
//!
//! Enforces username uniqueness and credential correctness on top of the
//! user repository. Registration is a single call to the repository's atomic
//! create-if-absent primitive; there is no separate existence check before it.

use std::sync::Arc;

use chatline_types::error::{ChatError, Operation, RepositoryError};
use tracing::{error, info, warn};

use crate::repository::box_user::BoxUserRepository;
use crate::service::ensure_registered;

pub struct IdentityService {
    users: Arc<BoxUserRepository>,
}

impl IdentityService {
    pub fn new(users: Arc<BoxUserRepository>) -> Self {
        Self { users }
    }

    /// Register a new user.
    ///
    /// Fails with `AlreadyExists` only when the repository reports a conflict
    /// from its own insert.
    pub async fn register(&self, username: &str, password: &str) -> Result<(), ChatError> {
        if username.is_empty() {
            return Err(ChatError::InvalidUsername);
        }
        if password.is_empty() {
            return Err(ChatError::InvalidPassword);
        }

        match self.users.create_user(username, password).await {
            Ok(()) => {
                info!(username, "User registered");
                Ok(())
            }
            Err(RepositoryError::Conflict(_)) => {
                warn!(username, "Registration rejected: username taken");
                Err(ChatError::AlreadyExists)
            }
            Err(e) => {
                error!(username, error = %e, "Failed to register user");
                Err(ChatError::Unavailable(Operation::Register))
            }
        }
    }

    /// Check a username/password pair.
    ///
    /// Unknown usernames and wrong passwords produce the same error.
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<(), ChatError> {
        if username.is_empty() {
            return Err(ChatError::InvalidCredentials);
        }

        match self.users.verify_credential(username, password).await {
            Ok(true) => {
                info!(username, "User authenticated");
                Ok(())
            }
            Ok(false) => {
                warn!(username, "Authentication failed");
                Err(ChatError::InvalidCredentials)
            }
            Err(e) => {
                error!(username, error = %e, "Credential check failed");
                Err(ChatError::Unavailable(Operation::Login))
            }
        }
    }

    /// Fail with `NotFound` unless the username is registered.
    pub async fn verify_exists(&self, username: &str) -> Result<(), ChatError> {
        ensure_registered(&self.users, username, Operation::VerifyContact).await
    }
}
