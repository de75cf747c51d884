//! SQLite conversation repository implementation.
//!
//! Implements `ConversationRepository` from `chatline-core`. Every message row
//! carries its ordered participant pair, so a history query is a single index
//! range scan over `(participant_low, participant_high, timestamp)`.

use chatline_core::repository::conversation::ConversationRepository;
use chatline_types::chat::{ChatMessage, Contact, ConversationKey, TimeWindow};
use chatline_types::error::RepositoryError;
use sqlx::Row;
use uuid::Uuid;

use super::pool::DatabasePool;

/// SQLite-backed implementation of `ConversationRepository`.
pub struct SqliteConversationRepository {
    pool: DatabasePool,
}

impl SqliteConversationRepository {
    /// Create a new repository backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

// ---------------------------------------------------------------------------
// Internal row types
// ---------------------------------------------------------------------------

struct ChatMessageRow {
    id: String,
    sender: String,
    recipient: String,
    content: String,
    timestamp: i64,
}

impl ChatMessageRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            sender: row.try_get("sender")?,
            recipient: row.try_get("recipient")?,
            content: row.try_get("content")?,
            timestamp: row.try_get("timestamp")?,
        })
    }

    fn into_message(self) -> Result<ChatMessage, RepositoryError> {
        Ok(ChatMessage {
            id: parse_uuid(&self.id)?,
            sender: self.sender,
            recipient: self.recipient,
            content: self.content,
            timestamp: self.timestamp,
        })
    }
}

fn parse_uuid(s: &str) -> Result<Uuid, RepositoryError> {
    s.parse::<Uuid>()
        .map_err(|e| RepositoryError::Query(format!("invalid UUID: {e}")))
}

// ---------------------------------------------------------------------------
// ConversationRepository impl
// ---------------------------------------------------------------------------

impl ConversationRepository for SqliteConversationRepository {
    async fn save_message(&self, message: &ChatMessage) -> Result<(), RepositoryError> {
        let key = message.conversation_key();
        let (low, high) = key.participants();
        let result = sqlx::query(
            r#"INSERT INTO chat_messages
                   (id, participant_low, participant_high, sender, recipient, content, timestamp)
               VALUES (?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(message.id.to_string())
        .bind(low)
        .bind(high)
        .bind(&message.sender)
        .bind(&message.recipient)
        .bind(&message.content)
        .bind(message.timestamp)
        .execute(&self.pool.writer)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => Err(
                RepositoryError::Conflict(format!("message '{}' already exists", message.id)),
            ),
            Err(e) => Err(RepositoryError::Query(e.to_string())),
        }
    }

    async fn range_messages(
        &self,
        key: &ConversationKey,
        window: &TimeWindow,
    ) -> Result<Vec<ChatMessage>, RepositoryError> {
        let (low, high) = key.participants();
        let rows = sqlx::query(
            r#"SELECT id, sender, recipient, content, timestamp
               FROM chat_messages
               WHERE participant_low = ? AND participant_high = ?
                 AND timestamp >= ? AND timestamp <= ?
               ORDER BY timestamp ASC, id ASC"#,
        )
        .bind(low)
        .bind(high)
        .bind(window.from.as_timestamp())
        .bind(window.to.as_timestamp())
        .fetch_all(&self.pool.reader)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        rows.iter()
            .map(|row| {
                ChatMessageRow::from_row(row)
                    .map_err(|e| RepositoryError::Query(e.to_string()))?
                    .into_message()
            })
            .collect()
    }

    async fn contacts(&self, username: &str) -> Result<Vec<Contact>, RepositoryError> {
        let rows = sqlx::query(
            r#"SELECT counterparty, MAX(timestamp) AS last_activity
               FROM (
                   SELECT recipient AS counterparty, timestamp FROM chat_messages WHERE sender = ?
                   UNION ALL
                   SELECT sender AS counterparty, timestamp FROM chat_messages WHERE recipient = ?
               )
               WHERE counterparty != ?
               GROUP BY counterparty
               ORDER BY last_activity DESC, counterparty ASC"#,
        )
        .bind(username)
        .bind(username)
        .bind(username)
        .fetch_all(&self.pool.reader)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        rows.iter()
            .map(|row| {
                Ok(Contact {
                    username: row
                        .try_get("counterparty")
                        .map_err(|e| RepositoryError::Query(e.to_string()))?,
                    last_activity: row
                        .try_get("last_activity")
                        .map_err(|e| RepositoryError::Query(e.to_string()))?,
                })
            })
            .collect()
    }
}
