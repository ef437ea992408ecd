use std::time::Duration;

use mongodb::Client;
use mongodb::bson::doc;
use mongodb::options::ClientOptions;

use quill_core::error::RepoError;

use super::mongo::map_mongo_error;

/// Configuration for the MongoDB connection.
#[derive(Debug, Clone)]
pub struct MongoConfig {
    pub url: String,
    pub app_name: String,
    pub connect_timeout: Duration,
}

/// MongoDB document store.
///
/// Holds one client (and its internal connection pool) for the whole process.
/// Tenants select databases/collections on that client, never a new connection.
#[derive(Clone)]
pub struct MongoDocumentStore {
    pub(crate) client: Client,
}

impl MongoDocumentStore {
    /// Connect and verify the server answers a ping before returning.
    pub async fn connect(config: &MongoConfig) -> Result<Self, RepoError> {
        tracing::info!("Initializing MongoDB connection...");

        let mut options = ClientOptions::parse(config.url.as_str())
            .await
            .map_err(|e| RepoError::Connection(e.to_string()))?;
        options.app_name = Some(config.app_name.clone());
        options.connect_timeout = Some(config.connect_timeout);
        options.server_selection_timeout = Some(config.connect_timeout);

        let client =
            Client::with_options(options).map_err(|e| RepoError::Connection(e.to_string()))?;
        let store = Self { client };

        tokio::time::timeout(config.connect_timeout, store.run_ping())
            .await
            .map_err(|_| RepoError::Timeout(config.connect_timeout))??;

        tracing::info!(app = %config.app_name, "MongoDB connected");
        Ok(store)
    }

    pub(crate) async fn run_ping(&self) -> Result<(), RepoError> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(map_mongo_error)?;
        Ok(())
    }
}
