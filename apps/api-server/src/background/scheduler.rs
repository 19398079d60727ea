//! Cron-style job scheduler using tokio-cron-scheduler.

use std::sync::Arc;
use std::time::Duration;

use tokio_cron_scheduler::{Job, JobScheduler, JobSchedulerError};

use mindblog_core::ports::RateLimiter;

/// Every minute, at second zero.
const RATE_LIMIT_SWEEP: &str = "0 * * * * *";

/// Scheduler configuration.
#[derive(Debug, Clone)]
pub struct SchedulerConfig {
    /// Enable scheduler.
    pub enabled: bool,
    /// Rate-limit keys quiet for this long are dropped by the sweep.
    pub rate_limit_idle: Duration,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            rate_limit_idle: Duration::from_secs(300),
        }
    }
}

/// Cron job scheduler wrapper.
pub struct Scheduler {
    inner: JobScheduler,
    config: SchedulerConfig,
}

impl Scheduler {
    /// Create a new scheduler.
    pub async fn new(config: SchedulerConfig) -> Result<Self, JobSchedulerError> {
        let inner = JobScheduler::new().await?;
        Ok(Self { inner, config })
    }

    /// Add a cron job (six fields, seconds first).
    pub async fn add_cron<F, Fut>(
        &self,
        schedule: &str,
        task: F,
    ) -> Result<uuid::Uuid, JobSchedulerError>
    where
        F: Fn() -> Fut + Send + Sync + Clone + 'static,
        Fut: std::future::Future<Output = ()> + Send + 'static,
    {
        let job = Job::new_async(schedule, move |_uuid, _lock| {
            let task = task.clone();
            Box::pin(async move {
                task().await;
            })
        })?;

        let id = self.inner.add(job).await?;
        tracing::info!(schedule = %schedule, job_id = %id, "Cron job registered");
        Ok(id)
    }

    /// Start the scheduler.
    pub async fn start(&self) -> Result<(), JobSchedulerError> {
        if !self.config.enabled {
            tracing::info!("Scheduler disabled");
            return Ok(());
        }

        self.inner.start().await?;
        tracing::info!("Scheduler started");
        Ok(())
    }

    /// Stop the scheduler.
    pub async fn shutdown(&mut self) -> Result<(), JobSchedulerError> {
        self.inner.shutdown().await?;
        tracing::info!("Scheduler stopped");
        Ok(())
    }
}

/// Register the rate-limiter sweep and start the scheduler.
pub async fn spawn_maintenance(
    config: SchedulerConfig,
    limiter: Arc<dyn RateLimiter>,
) -> Result<Scheduler, JobSchedulerError> {
    let idle_for = config.rate_limit_idle;
    let scheduler = Scheduler::new(config).await?;

    scheduler
        .add_cron(RATE_LIMIT_SWEEP, move || {
            let limiter = limiter.clone();
            async move {
                let purged = limiter.purge_idle(idle_for).await;
                if purged > 0 {
                    tracing::debug!(purged, "Idle rate-limit keys evicted");
                }
            }
        })
        .await?;

    scheduler.start().await?;
    Ok(scheduler)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mindblog_infra::SlidingWindowRateLimiter;

    #[tokio::test]
    async fn test_maintenance_registers_while_disabled() {
        let limiter: Arc<dyn RateLimiter> = Arc::new(SlidingWindowRateLimiter::default());
        let config = SchedulerConfig {
            enabled: false,
            ..Default::default()
        };

        assert!(spawn_maintenance(config, limiter).await.is_ok());
    }

    #[tokio::test]
    async fn test_rejects_malformed_schedule() {
        let scheduler = Scheduler::new(SchedulerConfig::default()).await.unwrap();

        let result = scheduler.add_cron("not a schedule", || async {}).await;
        assert!(result.is_err());
    }
}
