//! Repository behavior every store adapter must share.
//!
//! Each check takes the adapter's user and conversation repositories and is
//! instantiated once per adapter by `adapter_tests!`.

use chatline_core::repository::conversation::ConversationRepository;
use chatline_core::repository::user::UserRepository;
use chatline_types::chat::{ChatMessage, ConversationKey, TimeBound, TimeWindow};
use chatline_types::error::RepositoryError;
use uuid::Uuid;

use crate::memory::MemoryStore;
use crate::sqlite::conversation::SqliteConversationRepository;
use crate::sqlite::pool::DatabasePool;
use crate::sqlite::user::SqliteUserRepository;

async fn sqlite_adapter() -> (SqliteUserRepository, SqliteConversationRepository) {
    let dir = tempfile::tempdir().unwrap();
    let url = format!(
        "sqlite://{}?mode=rwc",
        dir.path().join("test.db").display()
    );
    std::mem::forget(dir);
    let pool = DatabasePool::new(&url).await.unwrap();
    (
        SqliteUserRepository::new(pool.clone()),
        SqliteConversationRepository::new(pool),
    )
}

fn memory_adapter() -> (MemoryStore, MemoryStore) {
    let store = MemoryStore::new();
    (store.clone(), store)
}

async fn register_all(users: &impl UserRepository, names: &[&str]) {
    for name in names {
        users.create_user(name, "pw").await.unwrap();
    }
}

fn message(id: u128, from: &str, to: &str, timestamp: i64) -> ChatMessage {
    ChatMessage {
        id: Uuid::from_u128(id),
        sender: from.to_string(),
        recipient: to.to_string(),
        content: format!("{from}->{to}@{timestamp}"),
        timestamp,
    }
}

async fn history(
    conversations: &impl ConversationRepository,
    u1: &str,
    u2: &str,
    window: TimeWindow,
) -> Vec<(u128, i64)> {
    conversations
        .range_messages(&ConversationKey::new(u1, u2), &window)
        .await
        .unwrap()
        .iter()
        .map(|m| (m.id.as_u128(), m.timestamp))
        .collect()
}

fn stamps(rows: Vec<(u128, i64)>) -> Vec<i64> {
    rows.into_iter().map(|(_, ts)| ts).collect()
}

async fn check_duplicate_registration(users: &impl UserRepository) {
    users.create_user("alice", "pw1").await.unwrap();

    let err = users.create_user("alice", "pw2").await.unwrap_err();
    assert!(matches!(err, RepositoryError::Conflict(_)));
    assert!(users.verify_credential("alice", "pw1").await.unwrap());
    assert!(!users.verify_credential("alice", "pw2").await.unwrap());
    assert!(!users.verify_credential("Alice", "pw1").await.unwrap());
}

async fn check_ordering_and_symmetry(
    users: &impl UserRepository,
    conversations: &impl ConversationRepository,
) {
    register_all(users, &["alice", "bob"]).await;
    // Out of insertion order, with a timestamp tie broken by id.
    for m in [
        message(4, "alice", "bob", 30),
        message(3, "bob", "alice", 20),
        message(1, "alice", "bob", 10),
        message(2, "alice", "bob", 20),
    ] {
        conversations.save_message(&m).await.unwrap();
    }

    let window = TimeWindow::default();
    let forward = history(conversations, "alice", "bob", window).await;
    let backward = history(conversations, "bob", "alice", window).await;
    assert_eq!(forward, vec![(1, 10), (2, 20), (3, 20), (4, 30)]);
    assert_eq!(forward, backward);
}

async fn check_inclusive_bounds(
    users: &impl UserRepository,
    conversations: &impl ConversationRepository,
) {
    register_all(users, &["alice", "bob"]).await;
    for (id, ts) in [(1, -5), (2, 0), (3, 10), (4, 20), (5, 30)] {
        conversations
            .save_message(&message(id, "alice", "bob", ts))
            .await
            .unwrap();
    }

    let at = |from, to| TimeWindow::new(TimeBound::At(from), TimeBound::At(to));
    let alice_bob = |window| history(conversations, "alice", "bob", window);

    assert_eq!(stamps(alice_bob(at(10, 20)).await), vec![10, 20]);
    assert_eq!(stamps(alice_bob(at(15, 25)).await), vec![20]);
    assert!(alice_bob(at(21, 29)).await.is_empty());
    assert!(alice_bob(at(30, 10)).await.is_empty());
    assert_eq!(
        stamps(alice_bob(TimeWindow::default()).await),
        vec![0, 10, 20, 30]
    );

    let everything = TimeWindow::new(TimeBound::NegInfinity, TimeBound::PosInfinity);
    assert_eq!(alice_bob(everything).await.len(), 5);
}

async fn check_contacts(users: &impl UserRepository, conversations: &impl ConversationRepository) {
    let names = ["alice", "bob", "carol", "dave"];
    register_all(users, &names).await;
    for m in [
        message(1, "alice", "bob", 10),
        message(2, "carol", "alice", 40),
        message(3, "bob", "alice", 30),
        message(4, "alice", "alice", 99),
        message(5, "bob", "dave", 50),
    ] {
        conversations.save_message(&m).await.unwrap();
    }

    let contacts: Vec<(String, i64)> = conversations
        .contacts("alice")
        .await
        .unwrap()
        .into_iter()
        .map(|c| (c.username, c.last_activity))
        .collect();
    assert_eq!(
        contacts,
        vec![("carol".to_string(), 40), ("bob".to_string(), 30)]
    );
    assert!(conversations.contacts("nobody").await.unwrap().is_empty());
}

async fn check_adversarial_usernames(
    users: &impl UserRepository,
    conversations: &impl ConversationRepository,
) {
    let names = ["a", "b:c", "a:b", "c", "x%", "x_", "x", "Ä", " a", "a "];
    register_all(users, &names).await;
    for name in names {
        assert!(users.user_exists(name).await.unwrap(), "{name:?} missing");
    }
    assert!(!users.user_exists("X").await.unwrap());

    conversations
        .save_message(&message(1, "a", "b:c", 10))
        .await
        .unwrap();
    conversations
        .save_message(&message(2, "x%", "x_", 20))
        .await
        .unwrap();
    conversations
        .save_message(&message(3, " a", "a ", 30))
        .await
        .unwrap();

    let between = |u1, u2| history(conversations, u1, u2, TimeWindow::default());
    assert!(between("a:b", "c").await.is_empty());
    assert_eq!(between("b:c", "a").await, vec![(1, 10)]);
    assert!(between("x", "x_").await.is_empty());
    assert_eq!(between("x_", "x%").await, vec![(2, 20)]);
    assert!(between("a", "a ").await.is_empty());
    assert_eq!(between("a ", " a").await, vec![(3, 30)]);

    let contacts = conversations.contacts("a").await.unwrap();
    assert_eq!(contacts.len(), 1);
    assert_eq!(contacts[0].username, "b:c");
    assert!(conversations.contacts("a:b").await.unwrap().is_empty());
}

macro_rules! adapter_tests {
    ($adapter:ident, $make:expr) => {
        mod $adapter {
            use super::*;

            #[tokio::test]
            async fn duplicate_registration_conflicts() {
                let (users, _conversations) = $make;
                check_duplicate_registration(&users).await;
            }

            #[tokio::test]
            async fn history_is_ordered_and_symmetric() {
                let (users, conversations) = $make;
                check_ordering_and_symmetry(&users, &conversations).await;
            }

            #[tokio::test]
            async fn history_bounds_are_inclusive() {
                let (users, conversations) = $make;
                check_inclusive_bounds(&users, &conversations).await;
            }

            #[tokio::test]
            async fn contacts_exclude_self_and_order_by_activity() {
                let (users, conversations) = $make;
                check_contacts(&users, &conversations).await;
            }

            #[tokio::test]
            async fn usernames_with_separators_stay_isolated() {
                let (users, conversations) = $make;
                check_adversarial_usernames(&users, &conversations).await;
            }
        }
    };
}

adapter_tests!(sqlite, sqlite_adapter().await);
adapter_tests!(memory, memory_adapter());
