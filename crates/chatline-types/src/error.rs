use std::fmt;

use thiserror::Error;

/// The operation a caller was attempting when the store became unavailable.
///
/// Rendered into the user-facing `Unavailable` message; never carries the
/// underlying store error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Register,
    Login,
    VerifyContact,
    FetchHistory,
    FetchContacts,
    SendMessage,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Register => write!(f, "register the user"),
            Operation::Login => write!(f, "log in"),
            Operation::VerifyContact => write!(f, "verify the contact"),
            Operation::FetchHistory => write!(f, "fetch chat history"),
            Operation::FetchContacts => write!(f, "fetch contact list"),
            Operation::SendMessage => write!(f, "send the message"),
        }
    }
}

/// Caller-visible failures of the identity and conversation services.
///
/// The `Display` output of every variant is a stable, user-safe message and
/// is what ends up in the response envelope.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChatError {
    #[error("username already taken. try something else.")]
    AlreadyExists,

    #[error("invalid username or password")]
    InvalidCredentials,

    #[error("incorrect username")]
    NotFound,

    #[error("username must not be empty")]
    InvalidUsername,

    #[error("password must not be empty")]
    InvalidPassword,

    #[error("cannot send a message to yourself")]
    InvalidRecipient,

    #[error("both from-ts and to-ts are required")]
    InvalidWindow,

    #[error("unable to {0}. please try again later.")]
    Unavailable(Operation),
}

/// Errors from repository operations (used by trait definitions in chatline-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("query error: {0}")]
    Query(String),

    #[error("conflict: {0}")]
    Conflict(String),
}
