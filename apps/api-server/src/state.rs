//! Application state - shared across all handlers.

use std::sync::Arc;

use quill_core::error::RepoError;
use quill_core::ports::PostRepository;
use quill_infra::InMemoryDocumentStore;
use quill_infra::database::InMemoryPostRepository;

#[cfg(feature = "mongo")]
use quill_infra::database::MongoPostRepository;
#[cfg(feature = "mongo")]
use quill_infra::{MongoConfig, MongoDocumentStore};

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<dyn PostRepository>,
    pub author_id: String,
    pub environment: String,
}

impl AppState {
    /// Build the application state, connecting to the configured store.
    ///
    /// A configured database that cannot be reached is an error; without one
    /// the server runs on the in-memory store.
    pub async fn new(config: &AppConfig) -> Result<Self, RepoError> {
        let db = &config.database;

        #[cfg(feature = "mongo")]
        let posts: Arc<dyn PostRepository> = match &db.url {
            Some(url) => {
                let store = MongoDocumentStore::connect(&MongoConfig {
                    url: url.clone(),
                    app_name: config.telemetry.service_name.clone(),
                    connect_timeout: db.operation_timeout,
                })
                .await?;
                Arc::new(
                    MongoPostRepository::new(store)
                        .with_partitioning(db.partitioning.clone())
                        .with_timeout(db.operation_timeout),
                )
            }
            None => {
                tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
                Self::in_memory_repository(config)
            }
        };

        #[cfg(not(feature = "mongo"))]
        let posts: Arc<dyn PostRepository> = {
            if db.url.is_some() {
                tracing::warn!("DATABASE_URL ignored: built without the mongo feature");
            }
            tracing::info!("Running without mongo feature - using in-memory store");
            Self::in_memory_repository(config)
        };

        // Fail before serving traffic if the store is not answering.
        posts.ping().await?;

        tracing::info!(
            partitioning = ?db.partitioning,
            timeout_secs = db.operation_timeout.as_secs(),
            "Application state initialized"
        );

        Ok(Self {
            posts,
            author_id: config.author_id.clone(),
            environment: config.env.clone(),
        })
    }

    fn in_memory_repository(config: &AppConfig) -> Arc<dyn PostRepository> {
        Arc::new(
            InMemoryPostRepository::new(InMemoryDocumentStore::new())
                .with_partitioning(config.database.partitioning.clone())
                .with_timeout(config.database.operation_timeout),
        )
    }
}
