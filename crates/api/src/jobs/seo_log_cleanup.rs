//! Retention for the SEO index log.

use chrono::{Duration, Utc};
use persistence::repositories::SeoIndexLogRepository;
use sqlx::PgPool;
use tracing::info;

use super::scheduler::{Job, JobError, JobFrequency};

/// Deletes index log rows older than the retention period once a day.
///
/// The notifier only reads rows inside its window, so any retention longer
/// than that window leaves rate limiting unaffected.
pub struct SeoLogCleanupJob {
    repo: SeoIndexLogRepository,
    retention_days: u32,
}

impl SeoLogCleanupJob {
    pub fn new(pool: PgPool, retention_days: u32) -> Self {
        Self {
            repo: SeoIndexLogRepository::new(pool),
            retention_days,
        }
    }

    pub fn cutoff(&self, now: chrono::DateTime<Utc>) -> chrono::DateTime<Utc> {
        now - Duration::days(i64::from(self.retention_days))
    }
}

#[async_trait::async_trait]
impl Job for SeoLogCleanupJob {
    fn name(&self) -> &'static str {
        "seo_log_cleanup"
    }

    fn frequency(&self) -> JobFrequency {
        JobFrequency::Daily
    }

    async fn execute(&self) -> Result<(), JobError> {
        let cutoff = self.cutoff(Utc::now());
        let deleted = self.repo.delete_older_than(cutoff).await?;
        info!(deleted, cutoff = %cutoff, "Old SEO index log rows removed");
        Ok(())
    }
}
