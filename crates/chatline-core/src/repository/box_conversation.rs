//! BoxConversationRepository -- object-safe dynamic dispatch wrapper for
//! ConversationRepository.
//!
//! Same blanket-impl pattern as `BoxUserRepository`.

use std::future::Future;
use std::pin::Pin;

use chatline_types::chat::{ChatMessage, Contact, ConversationKey, TimeWindow};
use chatline_types::error::RepositoryError;

use super::conversation::ConversationRepository;

/// Object-safe version of [`ConversationRepository`] with boxed futures.
pub trait ConversationRepositoryDyn: Send + Sync {
    fn save_message_boxed<'a>(
        &'a self,
        message: &'a ChatMessage,
    ) -> Pin<Box<dyn Future<Output = Result<(), RepositoryError>> + Send + 'a>>;

    fn range_messages_boxed<'a>(
        &'a self,
        key: &'a ConversationKey,
        window: &'a TimeWindow,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<ChatMessage>, RepositoryError>> + Send + 'a>>;

    fn contacts_boxed<'a>(
        &'a self,
        username: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<Contact>, RepositoryError>> + Send + 'a>>;
}

impl<T: ConversationRepository> ConversationRepositoryDyn for T {
    fn save_message_boxed<'a>(
        &'a self,
        message: &'a ChatMessage,
    ) -> Pin<Box<dyn Future<Output = Result<(), RepositoryError>> + Send + 'a>> {
        Box::pin(self.save_message(message))
    }

    fn range_messages_boxed<'a>(
        &'a self,
        key: &'a ConversationKey,
        window: &'a TimeWindow,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<ChatMessage>, RepositoryError>> + Send + 'a>>
    {
        Box::pin(self.range_messages(key, window))
    }

    fn contacts_boxed<'a>(
        &'a self,
        username: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<Contact>, RepositoryError>> + Send + 'a>> {
        Box::pin(self.contacts(username))
    }
}

/// Type-erased conversation repository.
pub struct BoxConversationRepository {
    inner: Box<dyn ConversationRepositoryDyn + Send + Sync>,
}

impl BoxConversationRepository {
    /// Wrap a concrete `ConversationRepository` in a type-erased box.
    pub fn new<T: ConversationRepository + 'static>(repo: T) -> Self {
        Self {
            inner: Box::new(repo),
        }
    }

    pub async fn save_message(&self, message: &ChatMessage) -> Result<(), RepositoryError> {
        self.inner.save_message_boxed(message).await
    }

    pub async fn range_messages(
        &self,
        key: &ConversationKey,
        window: &TimeWindow,
    ) -> Result<Vec<ChatMessage>, RepositoryError> {
        self.inner.range_messages_boxed(key, window).await
    }

    pub async fn contacts(&self, username: &str) -> Result<Vec<Contact>, RepositoryError> {
        self.inner.contacts_boxed(username).await
    }
}
