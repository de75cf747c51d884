//! Response composer: maps service outcomes to the response envelope.
//!
//! Pure and infallible. Failures carry the `ChatError` display text, which is
//! always a fixed user-safe message; repository error text never reaches here
//! because services translate it first.

use chatline_types::chat::{ChatMessage, Contact};
use chatline_types::envelope::{Payload, ResponseEnvelope};
use chatline_types::error::ChatError;

/// A service success value that may carry a collection.
pub trait IntoPayload {
    fn into_payload(self) -> Option<Payload>;
}

impl IntoPayload for () {
    fn into_payload(self) -> Option<Payload> {
        None
    }
}

impl IntoPayload for Vec<ChatMessage> {
    fn into_payload(self) -> Option<Payload> {
        Some(Payload::Messages(self))
    }
}

impl IntoPayload for Vec<Contact> {
    fn into_payload(self) -> Option<Payload> {
        Some(Payload::Contacts(self))
    }
}

/// Wrap a service result in the uniform envelope.
pub fn compose<T: IntoPayload>(result: Result<T, ChatError>) -> ResponseEnvelope {
    match result {
        Ok(value) => match value.into_payload() {
            Some(payload) => ResponseEnvelope::with_data(payload),
            None => ResponseEnvelope::ok(),
        },
        Err(err) => ResponseEnvelope::failure(err.to_string()),
    }
}
