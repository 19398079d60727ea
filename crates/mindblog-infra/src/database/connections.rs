use std::time::Duration;

use mongodb::bson::doc;
use mongodb::options::ClientOptions;
use mongodb::{Client, Database};

use mindblog_core::error::RepoError;

use super::MongoPostRepository;

/// Configuration for the document store.
#[derive(Debug, Clone)]
pub struct MongoConfig {
    pub uri: String,
    pub database: String,
    /// Ceiling applied to connecting and to every individual call.
    pub timeout: Duration,
}

impl Default for MongoConfig {
    fn default() -> Self {
        Self {
            uri: "mongodb://localhost:27017".to_string(),
            database: "mindblog".to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

/// An established, pinged connection to the blog database.
pub struct MongoConnection {
    pub db: Database,
    pub timeout: Duration,
}

impl MongoConnection {
    /// Connect and ping. Any failure here is meant to stop the process.
    pub async fn connect(config: &MongoConfig) -> Result<Self, RepoError> {
        tracing::info!(database = %config.database, "Connecting to MongoDB...");

        let mut options = ClientOptions::parse(&config.uri)
            .await
            .map_err(|e| RepoError::Connection(e.to_string()))?;
        options.app_name = Some("mindblog-api".to_string());
        options.connect_timeout = Some(config.timeout);
        options.server_selection_timeout = Some(config.timeout);

        let client =
            Client::with_options(options).map_err(|e| RepoError::Connection(e.to_string()))?;
        let db = client.database(&config.database);

        tokio::time::timeout(config.timeout, db.run_command(doc! { "ping": 1 }).into_future())
            .await
            .map_err(|_| RepoError::Timeout(config.timeout))?
            .map_err(|e| RepoError::Connection(e.to_string()))?;

        tracing::info!(database = %config.database, "MongoDB connected");

        Ok(Self {
            db,
            timeout: config.timeout,
        })
    }

    pub fn post_repository(&self) -> MongoPostRepository {
        MongoPostRepository::new(&self.db, self.timeout)
    }
}
