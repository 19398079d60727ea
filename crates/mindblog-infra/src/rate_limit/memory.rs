//! In-memory sliding window rate limiter, keyed by client address.

use std::collections::{HashMap, VecDeque};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::sync::Mutex;

use mindblog_core::ports::{RateLimitError, RateLimitResult, RateLimiter};

/// In-memory rate limiter configuration.
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    /// Maximum requests per window. Zero is treated as one.
    pub max_requests: u32,
    /// Window duration.
    pub window: Duration,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: 10,
            window: Duration::from_secs(1),
        }
    }
}

/// Per-key log of recent request instants.
///
/// A single mutex guards the whole map, so prune-check-record is atomic across
/// every key. Limits are per-process, not shared between instances.
pub struct SlidingWindowRateLimiter {
    windows: Mutex<HashMap<String, VecDeque<Instant>>>,
    max_requests: usize,
    window: Duration,
}

impl SlidingWindowRateLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            windows: Mutex::new(HashMap::new()),
            max_requests: config.max_requests.max(1) as usize,
            window: config.window,
        }
    }

    /// Number of keys currently tracked.
    pub async fn tracked_keys(&self) -> usize {
        self.windows.lock().await.len()
    }

    fn prune(times: &mut VecDeque<Instant>, now: Instant, window: Duration) {
        while let Some(oldest) = times.front() {
            if now.duration_since(*oldest) < window {
                break;
            }
            times.pop_front();
        }
    }
}

impl Default for SlidingWindowRateLimiter {
    fn default() -> Self {
        Self::new(RateLimitConfig::default())
    }
}

#[async_trait]
impl RateLimiter for SlidingWindowRateLimiter {
    async fn check(&self, key: &str) -> Result<RateLimitResult, RateLimitError> {
        let now = Instant::now();
        let mut windows = self.windows.lock().await;

        let times = windows.entry(key.to_string()).or_default();
        Self::prune(times, now, self.window);

        // Oldest entry leaving the window frees the next slot.
        let reset_after = times
            .front()
            .map(|oldest| self.window.saturating_sub(now.duration_since(*oldest)))
            .unwrap_or(self.window);

        if times.len() >= self.max_requests {
            tracing::debug!(key, ?reset_after, "Rate limit reached");
            return Ok(RateLimitResult {
                allowed: false,
                remaining: 0,
                reset_after,
            });
        }

        times.push_back(now);
        let remaining = (self.max_requests - times.len()) as u32;

        Ok(RateLimitResult {
            allowed: true,
            remaining,
            reset_after,
        })
    }

    async fn purge_idle(&self, idle_for: Duration) -> usize {
        let now = Instant::now();
        let mut windows = self.windows.lock().await;
        let before = windows.len();

        windows.retain(|_, times| {
            times
                .back()
                .is_some_and(|newest| now.duration_since(*newest) < idle_for)
        });

        let purged = before - windows.len();
        if purged > 0 {
            tracing::debug!(purged, remaining = windows.len(), "Evicted idle rate limit keys");
        }
        purged
    }
}
