use std::sync::Arc;

use crate::config::{AppConfig, StorageBackend};
use crate::database::{DatabaseError, DatabaseManager, MemoryProductStore, PgProductStore, ProductStore};
use crate::middleware::{IdentityProvider, JwtIdentityProvider};

/// Collaborators shared by every request. Built once at startup and cloned
/// into each handler by axum.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ProductStore>,
    pub identity: Arc<dyn IdentityProvider>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(
        store: Arc<dyn ProductStore>,
        identity: Arc<dyn IdentityProvider>,
        config: AppConfig,
    ) -> Self {
        Self {
            store,
            identity,
            config: Arc::new(config),
        }
    }

    /// Wire the configured backend and a JWT identity provider
    pub async fn from_config(config: AppConfig) -> Result<Self, DatabaseError> {
        let store: Arc<dyn ProductStore> = match config.database.backend {
            StorageBackend::Postgres => {
                let pool = DatabaseManager::connect(&config.database).await?;
                if config.database.run_migrations {
                    DatabaseManager::migrate(&pool).await?;
                }
                Arc::new(PgProductStore::new(pool))
            }
            StorageBackend::Memory => {
                tracing::warn!("Using in-memory product store; data is lost on restart");
                Arc::new(MemoryProductStore::new())
            }
        };

        if config.security.jwt_secret.is_empty() {
            tracing::warn!("JWT_SECRET is not set; every caller will be treated as anonymous");
        }
        let identity = Arc::new(JwtIdentityProvider::new(config.security.jwt_secret.clone()));

        Ok(Self::new(store, identity, config))
    }
}
