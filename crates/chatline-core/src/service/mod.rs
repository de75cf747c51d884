//! Business logic services (use cases).
//!
//! Services orchestrate repository calls and business rules, and translate
//! every `RepositoryError` into a caller-safe `ChatError` at their boundary.
//! They depend on the boxed repository ports -- never on concrete
//! infrastructure implementations.

pub mod conversation;
pub mod identity;

#[cfg(test)]
pub(crate) mod mock;

use chatline_types::error::{ChatError, Operation};
use tracing::{error, warn};

use crate::repository::box_user::BoxUserRepository;

/// Fail with `NotFound` unless `username` is registered.
///
/// An empty username is never registered and short-circuits without a store
/// call. Store failures become `Unavailable(operation)`.
pub(crate) async fn ensure_registered(
    users: &BoxUserRepository,
    username: &str,
    operation: Operation,
) -> Result<(), ChatError> {
    if username.is_empty() {
        return Err(ChatError::NotFound);
    }

    match users.user_exists(username).await {
        Ok(true) => Ok(()),
        Ok(false) => {
            warn!(username, ?operation, "Unknown username");
            Err(ChatError::NotFound)
        }
        Err(e) => {
            error!(username, ?operation, error = %e, "User lookup failed");
            Err(ChatError::Unavailable(operation))
        }
    }
}
