//! Application services.

pub mod indexnow;
pub mod search_engines;
pub mod seo_notifier;
pub mod sitemap;

use std::sync::Arc;
use std::time::Duration;

pub use indexnow::{HttpIndexNowClient, IndexNowClient, IndexNowError, IndexNowSubmitter, SubmitOutcome};
pub use search_engines::{HttpSearchEnginePinger, SearchEnginePinger};
pub use seo_notifier::{NotifyError, NotifyOutcome, SeoNotifier};
pub use sitemap::{generate_sitemap, SitemapError};

use crate::config::SeoConfig;

/// Clients for third-party calls, swappable in tests.
#[derive(Clone)]
pub struct OutboundClients {
    pub pinger: Arc<dyn SearchEnginePinger>,
    pub indexnow: Arc<dyn IndexNowClient>,
}

impl OutboundClients {
    /// HTTP clients sharing one connection pool and the configured timeout.
    pub fn http(config: &SeoConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.outbound_timeout_secs))
            .user_agent(concat!("deen-api/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            pinger: Arc::new(HttpSearchEnginePinger::new(client.clone(), config)),
            indexnow: Arc::new(HttpIndexNowClient::new(
                client,
                config.indexnow_endpoint.clone(),
            )),
        })
    }
}
