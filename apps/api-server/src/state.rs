//! Application state - shared across all handlers and middleware.

use std::sync::Arc;

use mindblog_core::domain::{AdminCredentials, mask_email};
use mindblog_core::error::RepoError;
use mindblog_core::ports::{PasswordService, PostRepository, RateLimiter, TokenService};
use mindblog_infra::{
    Argon2PasswordService, InMemoryPostRepository, JwtTokenService, SlidingWindowRateLimiter,
};

#[cfg(feature = "mongo")]
use mindblog_infra::{MongoConfig, MongoConnection};

use crate::config::AppConfig;

/// Where posts are kept for the lifetime of the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageMode {
    Mongo,
    InMemory,
}

impl StorageMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageMode::Mongo => "mongodb",
            StorageMode::InMemory => "in-memory",
        }
    }
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<dyn PostRepository>,
    pub tokens: Arc<dyn TokenService>,
    pub passwords: Arc<dyn PasswordService>,
    pub credentials: Arc<AdminCredentials>,
    pub limiter: Arc<dyn RateLimiter>,
    pub storage: StorageMode,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    ///
    /// A configured store that cannot be reached, or whose slug index cannot
    /// be created, is an error: the server must not start half-wired.
    pub async fn init(config: &AppConfig) -> Result<Self, RepoError> {
        let (posts, storage) = Self::post_repository(config).await?;
        posts.ensure_indexes().await?;

        let credentials = AdminCredentials::new(
            config.admin_email.clone(),
            config.admin_password_hash.clone(),
        );
        tracing::info!(admin = %mask_email(credentials.email()), "Admin account loaded");

        let state = Self {
            posts,
            tokens: Arc::new(JwtTokenService::new(config.jwt.clone())),
            passwords: Arc::new(Argon2PasswordService::new()),
            credentials: Arc::new(credentials),
            limiter: Arc::new(SlidingWindowRateLimiter::new(config.rate_limit.clone())),
            storage,
        };

        tracing::info!(storage = state.storage.as_str(), "Application state initialized");
        Ok(state)
    }

    #[cfg(feature = "mongo")]
    async fn post_repository(
        config: &AppConfig,
    ) -> Result<(Arc<dyn PostRepository>, StorageMode), RepoError> {
        match &config.store {
            Some(store) => {
                let connection = MongoConnection::connect(&MongoConfig {
                    uri: store.uri.clone(),
                    database: store.database.clone(),
                    timeout: store.timeout,
                })
                .await?;
                Ok((Arc::new(connection.post_repository()), StorageMode::Mongo))
            }
            None => {
                tracing::warn!("MONGODB_URI not set. Running without database (in-memory mode).");
                Ok((Arc::new(InMemoryPostRepository::new()), StorageMode::InMemory))
            }
        }
    }

    #[cfg(not(feature = "mongo"))]
    async fn post_repository(
        config: &AppConfig,
    ) -> Result<(Arc<dyn PostRepository>, StorageMode), RepoError> {
        if config.store.is_some() {
            tracing::warn!("MONGODB_URI ignored: built without the mongo feature");
        }
        tracing::info!("Running without mongo feature - using in-memory repository");
        Ok((Arc::new(InMemoryPostRepository::new()), StorageMode::InMemory))
    }
}
