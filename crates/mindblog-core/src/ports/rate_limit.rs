//! Rate limiting port.

use async_trait::async_trait;
use std::time::Duration;

/// Rate limiter trait - per-client request throttling.
#[async_trait]
pub trait RateLimiter: Send + Sync {
    /// Check whether `key` may make another request and record it if so.
    /// A rejected attempt is not recorded.
    async fn check(&self, key: &str) -> Result<RateLimitResult, RateLimitError>;

    /// Forget clients that have been quiet for at least `idle_for`.
    /// Returns how many keys were dropped.
    async fn purge_idle(&self, idle_for: Duration) -> usize;
}

/// Result of a rate limit check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimitResult {
    pub allowed: bool,
    pub remaining: u32,
    pub reset_after: Duration,
}

/// Rate limit errors.
#[derive(Debug, thiserror::Error)]
pub enum RateLimitError {
    #[error("Backend error: {0}")]
    Backend(String),
}
