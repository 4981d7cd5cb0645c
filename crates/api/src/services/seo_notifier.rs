//! Search-engine sitemap notification with a shared rate window.
//!
//! The window is enforced from `seo_index_logs`: a run is refused while any
//! ping row is younger than the window. Check, pings and log writes happen
//! inside one transaction holding an advisory lock, so concurrent callers
//! queue up and the second one sees the first one's rows.

use domain::models::{IndexAction, NotifyResponse, PingOutcome, SearchEngine};
use domain::services::{RateDecision, RateWindow};
use persistence::repositories::SeoIndexLogRepository;
use sqlx::PgPool;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

use super::search_engines::SearchEnginePinger;
use crate::middleware::metrics::record_search_engine_ping;

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[derive(Debug)]
pub enum NotifyOutcome {
    Completed(NotifyResponse),
    RateLimited { retry_after_secs: u64 },
}

pub struct SeoNotifier {
    pool: PgPool,
    pinger: Arc<dyn SearchEnginePinger>,
    window: RateWindow,
    sitemap_url: String,
}

impl SeoNotifier {
    pub fn new(
        pool: PgPool,
        pinger: Arc<dyn SearchEnginePinger>,
        window: RateWindow,
        sitemap_url: impl Into<String>,
    ) -> Self {
        Self {
            pool,
            pinger,
            window,
            sitemap_url: sitemap_url.into(),
        }
    }

    pub async fn notify(&self) -> Result<NotifyOutcome, NotifyError> {
        let mut tx = self.pool.begin().await?;
        SeoIndexLogRepository::acquire_ping_lock(&mut tx).await?;

        let now = chrono::Utc::now();
        let actions: Vec<&str> = IndexAction::PING_ACTIONS.iter().map(|a| a.as_str()).collect();
        let last = SeoIndexLogRepository::latest_since(&mut tx, &actions, self.window.cutoff(now))
            .await?;

        if let RateDecision::Limited { retry_after_secs } = self.window.check(last, now) {
            info!(retry_after_secs, "Search engine notification rate limited");
            tx.rollback().await?;
            return Ok(NotifyOutcome::RateLimited { retry_after_secs });
        }

        let google = self.ping(SearchEngine::Google).await;
        let bing = self.ping(SearchEngine::Bing).await;

        let rows = [google.to_log(&self.sitemap_url), bing.to_log(&self.sitemap_url)];
        SeoIndexLogRepository::insert_batch(&mut tx, &rows).await?;
        tx.commit().await?;

        let response = NotifyResponse::from_outcomes(&google, &bing, &self.sitemap_url);
        info!(
            sitemap_url = %self.sitemap_url,
            google = google.success(),
            bing = bing.success(),
            "Search engines notified"
        );
        Ok(NotifyOutcome::Completed(response))
    }

    async fn ping(&self, engine: SearchEngine) -> PingOutcome {
        let outcome = self.pinger.ping(engine, &self.sitemap_url).await;
        if !outcome.success() {
            warn!(
                engine = %engine,
                status = ?outcome.status,
                error = ?outcome.error,
                "Search engine did not accept the sitemap ping"
            );
        }
        record_search_engine_ping(engine.as_str(), outcome.success());
        outcome
    }
}
