//! In-process repository doubles for service tests.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use chatline_types::chat::{ChatMessage, Contact, ConversationKey, TimeWindow};
use chatline_types::error::RepositoryError;

use crate::repository::conversation::ConversationRepository;
use crate::repository::user::UserRepository;

/// Failure switch and call counter, shared so a test can still reach them
/// after the repository has been moved into a box.
#[derive(Default)]
pub struct Faults {
    pub fail: AtomicBool,
    pub calls: AtomicUsize,
}

impl Faults {
    pub fn fail(&self) {
        self.fail.store(true, Ordering::SeqCst);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn hit(&self) -> Result<(), RepositoryError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail.load(Ordering::SeqCst) {
            Err(RepositoryError::Query(
                "disk I/O error at /var/lib/db".to_string(),
            ))
        } else {
            Ok(())
        }
    }
}

/// Plaintext user store. Credentials are compared verbatim.
#[derive(Default)]
pub struct MockUsers {
    pub users: Mutex<HashMap<String, String>>,
    pub faults: Arc<Faults>,
}

impl MockUsers {
    pub fn with_users(names: &[(&str, &str)]) -> Self {
        let repo = Self::default();
        {
            let mut users = repo.users.lock().unwrap();
            for (name, password) in names {
                users.insert(name.to_string(), password.to_string());
            }
        }
        repo
    }
}

impl UserRepository for MockUsers {
    async fn user_exists(&self, username: &str) -> Result<bool, RepositoryError> {
        self.faults.hit()?;
        Ok(self.users.lock().unwrap().contains_key(username))
    }

    async fn create_user(&self, username: &str, password: &str) -> Result<(), RepositoryError> {
        self.faults.hit()?;
        let mut users = self.users.lock().unwrap();
        if users.contains_key(username) {
            return Err(RepositoryError::Conflict(format!(
                "username '{username}' already exists"
            )));
        }
        users.insert(username.to_string(), password.to_string());
        Ok(())
    }

    async fn verify_credential(
        &self,
        username: &str,
        password: &str,
    ) -> Result<bool, RepositoryError> {
        self.faults.hit()?;
        Ok(self
            .users
            .lock()
            .unwrap()
            .get(username)
            .is_some_and(|stored| stored == password))
    }
}

/// Message store that keeps insertion order per conversation and sorts on read.
#[derive(Default)]
pub struct MockConversations {
    pub messages: Mutex<Vec<ChatMessage>>,
    pub faults: Arc<Faults>,
}

impl ConversationRepository for MockConversations {
    async fn save_message(&self, message: &ChatMessage) -> Result<(), RepositoryError> {
        self.faults.hit()?;
        self.messages.lock().unwrap().push(message.clone());
        Ok(())
    }

    async fn range_messages(
        &self,
        key: &ConversationKey,
        window: &TimeWindow,
    ) -> Result<Vec<ChatMessage>, RepositoryError> {
        self.faults.hit()?;
        let mut found: Vec<ChatMessage> = self
            .messages
            .lock()
            .unwrap()
            .iter()
            .filter(|m| m.conversation_key() == *key)
            .filter(|m| window.contains(m.timestamp))
            .cloned()
            .collect();
        found.sort_by_key(|m| m.timestamp);
        Ok(found)
    }

    async fn contacts(&self, username: &str) -> Result<Vec<Contact>, RepositoryError> {
        self.faults.hit()?;
        let mut latest: HashMap<String, i64> = HashMap::new();
        for m in self.messages.lock().unwrap().iter() {
            let key = m.conversation_key();
            if let Some(other) = key.counterpart(username) {
                if other != username {
                    let entry = latest.entry(other.to_string()).or_insert(m.timestamp);
                    *entry = (*entry).max(m.timestamp);
                }
            }
        }
        let mut contacts: Vec<Contact> = latest
            .into_iter()
            .map(|(username, last_activity)| Contact {
                username,
                last_activity,
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
