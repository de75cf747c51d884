//! Uniform success/failure envelope returned by every operation.
//!
//! ```json
//! { "status": true, "message": "", "data": [ ... ], "total": 3 }
//! ```
//!
//! `data` and `total` are only present on successful operations that return
//! a collection.

use serde::{Deserialize, Serialize};

use crate::chat::{ChatMessage, Contact};

/// The collection carried by a successful envelope.
///
/// Serialized untagged, so `data` is a bare JSON array on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Payload {
    Messages(Vec<ChatMessage>),
    Contacts(Vec<Contact>),
}

impl Payload {
    pub fn len(&self) -> usize {
        match self {
            Payload::Messages(messages) => messages.len(),
            Payload::Contacts(contacts) => contacts.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    pub status: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Payload>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<usize>,
}

impl ResponseEnvelope {
    /// Success with no payload.
    pub fn ok() -> Self {
        Self {
            status: true,
            message: String::new(),
            data: None,
            total: None,
        }
    }

    /// Success carrying a collection; `total` is the collection length.
    pub fn with_data(data: Payload) -> Self {
        Self {
            status: true,
            message: String::new(),
            total: Some(data.len()),
            data: Some(data),
        }
    }

    /// Failure with a user-safe message. Never carries data.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            status: false,
            message: message.into(),
            data: None,
            total: None,
        }
    }
}
