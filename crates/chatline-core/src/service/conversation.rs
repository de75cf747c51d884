//! Conversation query service.
//!
//! Turns two usernames and an optional time window into an ordered chat
//! history, and a username into its contact directory. Both participants must
//! be registered before the message store is touched.

use std::sync::Arc;

use chatline_types::chat::{ChatMessage, Contact, ConversationKey, TimeBound, TimeWindow};
use chatline_types::config::PartialBoundsPolicy;
use chatline_types::error::{ChatError, Operation};
use tracing::{debug, error, info};
use uuid::Uuid;

use crate::repository::box_conversation::BoxConversationRepository;
use crate::repository::box_user::BoxUserRepository;
use crate::service::ensure_registered;

/// Resolve the effective history window from caller-supplied bounds.
///
/// Both bounds supplied: used verbatim. Neither: the default `[0, +inf]`.
/// Exactly one: governed by `policy`.
pub fn resolve_window(
    from: Option<TimeBound>,
    to: Option<TimeBound>,
    policy: PartialBoundsPolicy,
) -> Result<TimeWindow, ChatError> {
    match (from, to) {
        (Some(from), Some(to)) => Ok(TimeWindow::new(from, to)),
        (None, None) => Ok(TimeWindow::default()),
        (from, to) => match policy {
            PartialBoundsPolicy::Fallback => Ok(TimeWindow::default()),
            PartialBoundsPolicy::Reject => Err(ChatError::InvalidWindow),
            PartialBoundsPolicy::FillMissing => {
                let default = TimeWindow::default();
                Ok(TimeWindow::new(
                    from.unwrap_or(default.from),
                    to.unwrap_or(default.to),
                ))
            }
        },
    }
}

pub struct ConversationService {
    users: Arc<BoxUserRepository>,
    conversations: Arc<BoxConversationRepository>,
    partial_bounds: PartialBoundsPolicy,
}

impl ConversationService {
    pub fn new(
        users: Arc<BoxUserRepository>,
        conversations: Arc<BoxConversationRepository>,
        partial_bounds: PartialBoundsPolicy,
    ) -> Self {
        Self {
            users,
            conversations,
            partial_bounds,
        }
    }

    /// Chat history between `u1` and `u2`, ascending by timestamp.
    ///
    /// Symmetric in `u1`/`u2`. The result order is the repository's; it is
    /// not re-sorted here.
    pub async fn fetch_history(
        &self,
        u1: &str,
        u2: &str,
        from: Option<TimeBound>,
        to: Option<TimeBound>,
    ) -> Result<Vec<ChatMessage>, ChatError> {
        ensure_registered(&self.users, u1, Operation::FetchHistory)
            .await?;
        ensure_registered(&self.users, u2, Operation::FetchHistory)
            .await?;

        let key = ConversationKey::new(u1, u2);
        let window = resolve_window(from, to, self.partial_bounds)?;
        debug!(conversation = %key, %window, "Fetching chat history");

        self.conversations
            .range_messages(&key, &window)
            .await
            .map_err(|e| {
                error!(conversation = %key, error = %e, "Failed to fetch chat history");
                ChatError::Unavailable(Operation::FetchHistory)
            })
    }

    /// Distinct counterparties of `username`, most recently active first.
    pub async fn fetch_contacts(&self, username: &str) -> Result<Vec<Contact>, ChatError> {
        ensure_registered(&self.users, username, Operation::FetchContacts)
            .await?;

        self.conversations.contacts(username).await.map_err(|e| {
            error!(username, error = %e, "Failed to fetch contact list");
            ChatError::Unavailable(Operation::FetchContacts)
        })
    }

    /// Store a message from `sender` to `recipient`.
    ///
    /// Stamps the current time when `timestamp` is `None`.
    pub async fn record_message(
        &self,
        sender: &str,
        recipient: &str,
        content: &str,
        timestamp: Option<i64>,
    ) -> Result<ChatMessage, ChatError> {
        if sender == recipient {
            return Err(ChatError::InvalidRecipient);
        }
        ensure_registered(&self.users, sender, Operation::SendMessage)
            .await?;
        ensure_registered(&self.users, recipient, Operation::SendMessage)
            .await?;

        let message = ChatMessage {
            id: Uuid::now_v7(),
            sender: sender.to_string(),
            recipient: recipient.to_string(),
            content: content.to_string(),
            timestamp: timestamp.unwrap_or_else(|| chrono::Utc::now().timestamp()),
        };

        self.conversations
            .save_message(&message)
            .await
            .map_err(|e| {
                error!(sender, recipient, error = %e, "Failed to store message");
                ChatError::Unavailable(Operation::SendMessage)
            })?;

        info!(id = %message.id, sender, recipient, "Message recorded");
        Ok(message)
    }
}
