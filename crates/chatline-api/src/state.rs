//! Application state wiring the services to a store adapter.
//!
//! AppState holds the service instances used by both CLI and REST API.
//! Services take boxed repositories, so the backend (SQLite or in-memory)
//! is picked at runtime from configuration.

use std::path::Path;
use std::sync::Arc;

use chatline_core::repository::box_conversation::BoxConversationRepository;
use chatline_core::repository::box_user::BoxUserRepository;
use chatline_core::service::conversation::ConversationService;
use chatline_core::service::identity::IdentityService;
use chatline_infra::config::resolve_database_url;
use chatline_infra::memory::MemoryStore;
use chatline_infra::sqlite::conversation::SqliteConversationRepository;
use chatline_infra::sqlite::pool::DatabasePool;
use chatline_infra::sqlite::user::SqliteUserRepository;
use chatline_types::config::{ServerConfig, StorageBackend};

/// Shared application state holding all services.
///
/// Used by both CLI commands and REST API handlers.
#[derive(Clone)]
pub struct AppState {
    pub identity: Arc<IdentityService>,
    pub conversations: Arc<ConversationService>,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// Initialize the application state: open the configured store, wire services.
    pub async fn init(config: ServerConfig, data_dir: &Path) -> anyhow::Result<Self> {
        match config.storage.backend {
            StorageBackend::Memory => {
                tracing::info!("Using in-memory store; data is lost on exit");
                Ok(Self::in_memory(config))
            }
            StorageBackend::Sqlite => {
                tokio::fs::create_dir_all(data_dir).await?;
                let db_url = resolve_database_url(&config, data_dir);
                let db_pool = DatabasePool::new(&db_url).await?;

                Ok(Self::from_repositories(
                    BoxUserRepository::new(SqliteUserRepository::new(db_pool.clone())),
                    BoxConversationRepository::new(SqliteConversationRepository::new(db_pool)),
                    config,
                ))
            }
        }
    }

    /// State backed by a fresh in-memory store.
    pub fn in_memory(config: ServerConfig) -> Self {
        let store = MemoryStore::new();
        Self::from_repositories(
            BoxUserRepository::new(store.clone()),
            BoxConversationRepository::new(store),
            config,
        )
    }

    fn from_repositories(
        users: BoxUserRepository,
        conversations: BoxConversationRepository,
        config: ServerConfig,
    ) -> Self {
        let users = Arc::new(users);
        let conversations = Arc::new(conversations);

        Self {
            identity: Arc::new(IdentityService::new(users.clone())),
            conversations: Arc::new(ConversationService::new(
                users,
                conversations,
                config.history.partial_bounds,
            )),
            config: Arc::new(config),
        }
    }
}
