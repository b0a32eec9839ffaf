use tokio_cron_scheduler::{Job, JobScheduler};
use std::sync::Arc;
use std::time::Duration;
use crate::inline::registry::CallbackRegistry;
use crate::utils::logging::log_sweep;

/// Default pause between sweep passes.
pub const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 60;

/// Recurring job that purges callback entries past their deadline.
///
/// This is the only thing that reclaims one-shot buttons nobody clicked and
/// reusable buttons nobody comes back to.
pub struct ExpirySweeper {
    registry: Arc<CallbackRegistry>,
    scheduler: JobScheduler,
    interval: Duration,
}

impl ExpirySweeper {
    /// Create the scheduler without starting it.
    pub async fn new(
        registry: Arc<CallbackRegistry>,
        interval: Duration,
    ) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let scheduler = JobScheduler::new().await?;

        Ok(Self {
            registry,
            scheduler,
            interval,
        })
    }

    /// Schedule the repeated sweep and start the scheduler.
    pub async fn start(&mut self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let registry = self.registry.clone();

        let sweep_job = Job::new_repeated_async(self.interval, move |_uuid, _l| {
            let registry = registry.clone();
            Box::pin(async move {
                sweep(&registry);
            })
        })?;

        self.scheduler.add(sweep_job).await?;
        self.scheduler.start().await?;

        tracing::info!(
            "Expiry sweeper started - checking every {}s",
            self.interval.as_secs()
        );
        Ok(())
    }

    /// Shut the scheduler down.
    pub async fn stop(&mut self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.scheduler.shutdown().await?;
        Ok(())
    }

    /// Run one pass immediately. Returns the number of evicted entries.
    pub fn sweep_now(&self) -> usize {
        sweep(&self.registry)
    }
}

fn sweep(registry: &CallbackRegistry) -> usize {
    let evicted = registry.evict_expired();
    log_sweep(evicted, registry.len());
    evicted
}
