//! IndexNow URL submission.

use async_trait::async_trait;
use domain::models::{
    indexnow::is_accepted_status, IndexAction, IndexNowPayload, IndexNowSettings,
    IndexNowSubmitResponse, NewSeoIndexLog, INDEXNOW_SETTING_NAME,
};
use persistence::repositories::{SeoIndexLogRepository, SeoSettingRepository};
use reqwest::Client;
use sqlx::PgPool;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

use crate::middleware::metrics::record_indexnow_submission;

#[derive(Debug, Error)]
pub enum IndexNowError {
    #[error("IndexNow request failed: {0}")]
    Transport(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Posts a submission payload and returns the endpoint's HTTP status.
#[async_trait]
pub trait IndexNowClient: Send + Sync {
    async fn submit(&self, payload: &IndexNowPayload) -> Result<u16, IndexNowError>;
}

pub struct HttpIndexNowClient {
    client: Client,
    endpoint: String,
}

impl HttpIndexNowClient {
    pub fn new(client: Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl IndexNowClient for HttpIndexNowClient {
    async fn submit(&self, payload: &IndexNowPayload) -> Result<u16, IndexNowError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(payload)
            .send()
            .await
            .map_err(|e| IndexNowError::Transport(e.to_string()))?;
        Ok(response.status().as_u16())
    }
}

/// Result of a submission request.
#[derive(Debug)]
pub enum SubmitOutcome {
    Submitted(IndexNowSubmitResponse),
    /// No usable `indexnow` settings row; nothing was sent.
    Skipped,
}

/// Looks up the IndexNow settings, submits one URL and logs the attempt.
pub struct IndexNowSubmitter {
    pool: PgPool,
    client: Arc<dyn IndexNowClient>,
}

impl IndexNowSubmitter {
    pub fn new(pool: PgPool, client: Arc<dyn IndexNowClient>) -> Self {
        Self { pool, client }
    }

    pub async fn submit(&self, path: &str) -> Result<SubmitOutcome, IndexNowError> {
        let settings = SeoSettingRepository::new(self.pool.clone())
            .get(INDEXNOW_SETTING_NAME)
            .await?
            .and_then(|row| row.value_as::<IndexNowSettings>())
            .and_then(|s| s.resolve());

        let Some(settings) = settings else {
            info!("IndexNow not configured, skipping submission");
            record_indexnow_submission("skipped");
            return Ok(SubmitOutcome::Skipped);
        };

        let url = settings.url_for(path);
        let payload = settings.payload_for(&url);

        match self.client.submit(&payload).await {
            Ok(status) => {
                let success = is_accepted_status(status);
                info!(url = %url, status, success, "IndexNow submission answered");
                record_indexnow_submission(if success { "accepted" } else { "rejected" });
                self.record(NewSeoIndexLog {
                    action: IndexAction::IndexnowSubmit,
                    target_url: url.clone(),
                    status_code: Some(i32::from(status)),
                    success,
                    error_message: None,
                })
                .await;
                Ok(SubmitOutcome::Submitted(IndexNowSubmitResponse {
                    success,
                    status,
                    url,
                }))
            }
            Err(e) => {
                warn!(url = %url, error = %e, "IndexNow submission failed");
                record_indexnow_submission("error");
                self.record(NewSeoIndexLog {
                    action: IndexAction::IndexnowSubmit,
                    target_url: url,
                    status_code: None,
                    success: false,
                    error_message: Some(e.to_string()),
                })
                .await;
                Err(e)
            }
        }
    }

    /// Log write failures do not change the submission result.
    async fn record(&self, row: NewSeoIndexLog) {
        if let Err(e) = SeoIndexLogRepository::new(self.pool.clone())
            .insert(&row)
            .await
        {
            warn!(error = %e, target_url = %row.target_url, "Failed to record IndexNow log row");
        }
    }
}
