//! Outbound sitemap pings to search engines.

use async_trait::async_trait;
use domain::models::{PingOutcome, SearchEngine};
use reqwest::Client;
use tracing::{info, warn};

use crate::config::SeoConfig;

/// Sends a sitemap ping to one search engine.
///
/// Failures are reported in the returned [`PingOutcome`], never as errors.
#[async_trait]
pub trait SearchEnginePinger: Send + Sync {
    async fn ping(&self, engine: SearchEngine, sitemap_url: &str) -> PingOutcome;
}

/// Pings over HTTP: `GET {endpoint}?sitemap={url}`.
pub struct HttpSearchEnginePinger {
    client: Client,
    google_ping_url: String,
    bing_ping_url: String,
}

impl HttpSearchEnginePinger {
    pub fn new(client: Client, config: &SeoConfig) -> Self {
        Self {
            client,
            google_ping_url: config.google_ping_url.clone(),
            bing_ping_url: config.bing_ping_url.clone(),
        }
    }

    fn endpoint(&self, engine: SearchEngine) -> &str {
        match engine {
            SearchEngine::Google => &self.google_ping_url,
            SearchEngine::Bing => &self.bing_ping_url,
        }
    }
}

#[async_trait]
impl SearchEnginePinger for HttpSearchEnginePinger {
    async fn ping(&self, engine: SearchEngine, sitemap_url: &str) -> PingOutcome {
        let result = self
            .client
            .get(self.endpoint(engine))
            .query(&[("sitemap", sitemap_url)])
            .send()
            .await;

        match result {
            Ok(response) => {
                let status = response.status().as_u16();
                info!(engine = %engine, status, "Search engine ping answered");
                PingOutcome::responded(engine, status)
            }
            Err(e) => {
                warn!(engine = %engine, error = %e, "Search engine ping failed");
                PingOutcome::failed(engine, e.to_string())
            }
        }
    }
}
