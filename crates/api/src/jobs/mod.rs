//! Background job scheduler and job implementations.

mod pool_metrics;
mod rate_limiter_cleanup;
mod scheduler;
mod seo_log_cleanup;

pub use pool_metrics::PoolMetricsJob;
pub use rate_limiter_cleanup::RateLimiterCleanupJob;
pub use scheduler::{run_once, Job, JobError, JobFrequency, JobScheduler};
pub use seo_log_cleanup::SeoLogCleanupJob;
