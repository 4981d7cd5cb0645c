//! Pruning of idle rate limiter keys.

use std::sync::Arc;
use tracing::debug;

use super::scheduler::{Job, JobError, JobFrequency};
use crate::middleware::RateLimiterState;

pub struct RateLimiterCleanupJob {
    limiter: Arc<RateLimiterState>,
}

impl RateLimiterCleanupJob {
    pub fn new(limiter: Arc<RateLimiterState>) -> Self {
        Self { limiter }
    }
}

#[async_trait::async_trait]
impl Job for RateLimiterCleanupJob {
    fn name(&self) -> &'static str {
        "rate_limiter_cleanup"
    }

    fn frequency(&self) -> JobFrequency {
        JobFrequency::Minutes(1)
    }

    async fn execute(&self) -> Result<(), JobError> {
        let before = self.limiter.tracked_clients();
        self.limiter.retain_recent();
        debug!(
            before,
            after = self.limiter.tracked_clients(),
            "Rate limiter keys pruned"
        );
        Ok(())
    }
}
