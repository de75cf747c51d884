//! In-memory store adapter.
//!
//! `MemoryStore` implements both repository traits on top of `DashMap`. It
//! backs `--in-memory` runs and tests, and honors the same contract as the
//! SQLite adapter: atomic create-if-absent registration, hashed credentials,
//! ascending inclusive range reads, and participants that must be registered.

use std::sync::Arc;

use chatline_core::repository::conversation::ConversationRepository;
use chatline_core::repository::user::UserRepository;
use chatline_types::chat::{ChatMessage, Contact, ConversationKey, TimeWindow};
use chatline_types::error::RepositoryError;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use crate::crypto::password::CredentialHasher;

/// Cloneable handle to a shared in-memory store.
///
/// Clones share the same data, so one store can back both the user and the
/// conversation repository.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Inner>,
}

#[derive(Default)]
struct Inner {
    /// username -> Argon2id PHC string
    users: DashMap<String, String>,
    /// Each conversation's messages, kept sorted by `(timestamp, id)`.
    conversations: DashMap<ConversationKey, Vec<ChatMessage>>,
    hasher: CredentialHasher,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl UserRepository for MemoryStore {
    async fn user_exists(&self, username: &str) -> Result<bool, RepositoryError> {
        Ok(self.inner.users.contains_key(username))
    }

    async fn create_user(&self, username: &str, password: &str) -> Result<(), RepositoryError> {
        let password_hash = self
            .inner
            .hasher
            .hash_blocking(password)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        match self.inner.users.entry(username.to_string()) {
            Entry::Occupied(_) => Err(RepositoryError::Conflict(format!(
                "username '{username}' already exists"
            ))),
            Entry::Vacant(slot) => {
                slot.insert(password_hash);
                Ok(())
            }
        }
    }

    async fn verify_credential(
        &self,
        username: &str,
        password: &str,
    ) -> Result<bool, RepositoryError> {
        // Clone out of the map so no shard lock is held across the await.
        let stored = self
            .inner
            .users
            .get(username)
            .map(|entry| entry.value().clone());
        let Some(stored) = stored else {
            return Ok(false);
        };

        self.inner
            .hasher
            .verify_blocking(password, stored)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))
    }
}

impl ConversationRepository for MemoryStore {
    async fn save_message(&self, message: &ChatMessage) -> Result<(), RepositoryError> {
        for participant in [&message.sender, &message.recipient] {
            if !self.inner.users.contains_key(participant.as_str()) {
                return Err(RepositoryError::Query(format!(
                    "unknown participant '{participant}'"
                )));
            }
        }

        let mut messages = self
            .inner
            .conversations
            .entry(message.conversation_key())
            .or_default();

        if messages.iter().any(|m| m.id == message.id) {
            return Err(RepositoryError::Conflict(format!(
                "message '{}' already exists",
                message.id
            )));
        }

        let at = messages
            .partition_point(|m| (m.timestamp, m.id) <= (message.timestamp, message.id));
        messages.insert(at, message.clone());
        Ok(())
    }

    async fn range_messages(
        &self,
        key: &ConversationKey,
        window: &TimeWindow,
    ) -> Result<Vec<ChatMessage>, RepositoryError> {
        let Some(messages) = self.inner.conversations.get(key) else {
            return Ok(Vec::new());
        };

        Ok(messages
            .iter()
            .filter(|m| window.contains(m.timestamp))
            .cloned()
            .collect())
    }

    async fn contacts(&self, username: &str) -> Result<Vec<Contact>, RepositoryError> {
        let mut contacts: Vec<Contact> = self
            .inner
            .conversations
            .iter()
            .filter_map(|entry| {
                let counterpart = entry.key().counterpart(username)?;
                if counterpart == username {
                    return None;
                }
                let last = entry.value().last()?;
                Some(Contact {
                    username: counterpart.to_string(),
                    last_activity: last.timestamp,
                })
            })
            .collect();

        contacts.sort_by(|a, b| {
            b.last_activity
                .cmp(&a.last_activity)
                .then_with(|| a.username.cmp(&b.username))
        });
        Ok(contacts)
    }
}

#[cfg(test)]
mod tests {
    use chatline_types::chat::TimeBound;
    use uuid::Uuid;

    use super::*;

    fn make_message(from: &str, to: &str, timestamp: i64) -> ChatMessage {
        ChatMessage {
            id: Uuid::now_v7(),
            sender: from.to_string(),
            recipient: to.to_string(),
            content: format!("{from}->{to}@{timestamp}"),
            timestamp,
        }
    }

    async fn seeded_store(users: &[&str]) -> MemoryStore {
        let store = MemoryStore::new();
        for user in users {
            store.create_user(user, "pw").await.unwrap();
        }
        store
    }

    #[tokio::test]
    async fn test_duplicate_username_conflicts() {
        let store = MemoryStore::new();
        store.create_user("alice", "pw1").await.unwrap();

        let err = store.create_user("alice", "pw2").await.unwrap_err();
        assert!(matches!(err, RepositoryError::Conflict(_)));
        assert!(store.verify_credential("alice", "pw1").await.unwrap());
        assert!(!store.verify_credential("alice", "pw2").await.unwrap());
    }

    #[tokio::test]
    async fn test_verify_unknown_user_is_false() {
        let store = MemoryStore::new();
        assert!(!store.verify_credential("ghost", "pw").await.unwrap());
        assert!(!store.user_exists("ghost").await.unwrap());
    }

    #[tokio::test]
    async fn test_concurrent_registration_has_one_winner() {
        let store = MemoryStore::new();

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = store.clone();
                tokio::spawn(async move {
                    store.create_user("alice", &format!("pw{i}")).await
                })
            })
            .collect();

        let mut ok = 0;
        for handle in handles {
            if handle.await.unwrap().is_ok() {
                ok += 1;
            }
        }
        assert_eq!(ok, 1);
    }

    #[tokio::test]
    async fn test_range_sorted_regardless_of_insert_order() {
        let store = seeded_store(&["alice", "bob"]).await;
        for ts in [30, 10, 20] {
            store
                .save_message(&make_message("alice", "bob", ts))
                .await
                .unwrap();
        }

        let got = store
            .range_messages(
                &ConversationKey::new("bob", "alice"),
                &TimeWindow::default(),
            )
            .await
            .unwrap();
        let stamps: Vec<i64> = got.iter().map(|m| m.timestamp).collect();
        assert_eq!(stamps, vec![10, 20, 30]);

        let window = TimeWindow::new(TimeBound::At(15), TimeBound::At(25));
        let got = store
            .range_messages(&ConversationKey::new("alice", "bob"), &window)
            .await
            .unwrap();
        assert_eq!(got.len(), 1);
        assert_eq!(got[0].timestamp, 20);
    }

    #[tokio::test]
    async fn test_save_rejects_unknown_participant() {
        let store = seeded_store(&["alice"]).await;
        let err = store
            .save_message(&make_message("alice", "ghost", 10))
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::Query(_)));
    }

    #[tokio::test]
    async fn test_contacts_exclude_self_and_order_by_activity() {
        let store = seeded_store(&["alice", "bob", "carol"]).await;
        store
            .save_message(&make_message("alice", "bob", 10))
            .await
            .unwrap();
        store
            .save_message(&make_message("carol", "alice", 5))
            .await
            .unwrap();
        store
            .save_message(&make_message("bob", "alice", 30))
            .await
            .unwrap();
        store
            .save_message(&make_message("alice", "alice", 99))
            .await
            .unwrap();

        let contacts = store.contacts("alice").await.unwrap();
        let names: Vec<&str> = contacts.iter().map(|c| c.username.as_str()).collect();
        assert_eq!(names, vec!["bob", "carol"]);
        assert_eq!(contacts[0].last_activity, 30);

        assert!(store.contacts("nobody").await.unwrap().is_empty());
    }
}
