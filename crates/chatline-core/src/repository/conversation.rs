//! Conversation repository trait definition.
//!
//! Defines the storage interface for the time-ordered message store.

use chatline_types::chat::{ChatMessage, Contact, ConversationKey, TimeWindow};
use chatline_types::error::RepositoryError;

/// Repository trait for two-party conversations.
///
/// Implementations live in chatline-infra (e.g., `SqliteConversationRepository`).
pub trait ConversationRepository: Send + Sync {
    /// Append a message to the conversation between its sender and recipient.
    fn save_message(
        &self,
        message: &ChatMessage,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Messages of one conversation with `timestamp` inside `window`
    /// (both ends inclusive), ordered by timestamp ASC.
    ///
    /// Callers rely on this ordering and never re-sort.
    fn range_messages(
        &self,
        key: &ConversationKey,
        window: &TimeWindow,
    ) -> impl std::future::Future<Output = Result<Vec<ChatMessage>, RepositoryError>> + Send;

    /// Distinct counterparties of `username`, most recently active first.
    ///
    /// Never includes `username` itself.
    fn contacts(
        &self,
        username: &str,
    ) -> impl std::future::Future<Output = Result<Vec<Contact>, RepositoryError>> + Send;
}
