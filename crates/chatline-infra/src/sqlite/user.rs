//! SQLite user repository implementation.
//!
//! Implements `UserRepository` from `chatline-core`. Credentials are stored as
//! Argon2id PHC strings; the plaintext password never reaches the database.

use chatline_core::repository::user::UserRepository;
use chatline_types::error::RepositoryError;
use chrono::Utc;

use super::pool::DatabasePool;
use crate::crypto::password::CredentialHasher;

/// SQLite-backed implementation of `UserRepository`.
pub struct SqliteUserRepository {
    pool: DatabasePool,
    hasher: CredentialHasher,
}

impl SqliteUserRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self {
            pool,
            hasher: CredentialHasher::new(),
        }
    }
}

impl UserRepository for SqliteUserRepository {
    async fn user_exists(&self, username: &str) -> Result<bool, RepositoryError> {
        let row: Option<(i64,)> = sqlx::query_as("SELECT 1 FROM users WHERE username = ?")
            .bind(username)
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(row.is_some())
    }

    async fn create_user(&self, username: &str, password: &str) -> Result<(), RepositoryError> {
        let password_hash = self
            .hasher
            .hash_blocking(password)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        // The primary key makes this insert the single create-if-absent step.
        let result = sqlx::query(
            "INSERT INTO users (username, password_hash, created_at) VALUES (?, ?, ?)",
        )
        .bind(username)
        .bind(&password_hash)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool.writer)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => Err(
                RepositoryError::Conflict(format!("username '{username}' already exists")),
            ),
            Err(e) => Err(RepositoryError::Query(e.to_string())),
        }
    }

    async fn verify_credential(
        &self,
        username: &str,
        password: &str,
    ) -> Result<bool, RepositoryError> {
        let row: Option<(String,)> =
            sqlx::query_as("SELECT password_hash FROM users WHERE username = ?")
                .bind(username)
                .fetch_optional(&self.pool.reader)
                .await
                .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let Some((stored,)) = row else {
            return Ok(false);
        };

        self.hasher
            .verify_blocking(password, stored)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))
    }
}
