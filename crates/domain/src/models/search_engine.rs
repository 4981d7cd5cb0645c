//! Search-engine ping models.

use serde::Serialize;

use super::seo_index_log::{IndexAction, NewSeoIndexLog};

/// Search engines notified about sitemap changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchEngine {
    Google,
    Bing,
}

impl SearchEngine {
    /// Engines in the order they are pinged.
    pub const ALL: [SearchEngine; 2] = [SearchEngine::Google, SearchEngine::Bing];

    pub fn as_str(&self) -> &'static str {
        match self {
            SearchEngine::Google => "google",
            SearchEngine::Bing => "bing",
        }
    }

    pub fn log_action(&self) -> IndexAction {
        match self {
            SearchEngine::Google => IndexAction::PingGoogle,
            SearchEngine::Bing => IndexAction::PingBing,
        }
    }
}

impl std::fmt::Display for SearchEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Result of one outbound ping. Failures are values, never errors.
#[derive(Debug, Clone, PartialEq)]
pub struct PingOutcome {
    pub engine: SearchEngine,
    /// HTTP status, absent when the request never got a response.
    pub status: Option<u16>,
    pub error: Option<String>,
}

impl PingOutcome {
    pub fn responded(engine: SearchEngine, status: u16) -> Self {
        Self {
            engine,
            status: Some(status),
            error: None,
        }
    }

    pub fn failed(engine: SearchEngine, error: impl Into<String>) -> Self {
        Self {
            engine,
            status: None,
            error: Some(error.into()),
        }
    }

    pub fn success(&self) -> bool {
        matches!(self.status, Some(code) if (200..300).contains(&code))
    }

    /// Log row describing this ping.
    pub fn to_log(&self, sitemap_url: &str) -> NewSeoIndexLog {
        NewSeoIndexLog {
            action: self.engine.log_action(),
            target_url: sitemap_url.to_string(),
            status_code: self.status.map(i32::from),
            success: self.success(),
            error_message: self.error.clone(),
        }
    }
}

/// Per-engine part of the notifier response.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct EngineResult {
    pub success: bool,
    pub status: Option<u16>,
}

impl From<&PingOutcome> for EngineResult {
    fn from(o: &PingOutcome) -> Self {
        Self {
            success: o.success(),
            status: o.status,
        }
    }
}

/// Response body of a notifier run that was not rate limited.
#[derive(Debug, Clone, Serialize)]
pub struct NotifyResponse {
    pub success: bool,
    pub google: EngineResult,
    pub bing: EngineResult,
    pub sitemap_url: String,
}

impl NotifyResponse {
    /// Overall success requires every engine to have accepted the ping.
    pub fn from_outcomes(google: &PingOutcome, bing: &PingOutcome, sitemap_url: &str) -> Self {
        Self {
            success: google.success() && bing.success(),
            google: google.into(),
            bing: bing.into(),
            sitemap_url: sitemap_url.to_string(),
        }
    }
}

/// Response body of a rate-limited notifier run.
#[derive(Debug, Clone, Serialize)]
pub struct RateLimitedResponse {
    pub success: bool,
    pub reason: &'static str,
    pub retry_after_secs: u64,
}

impl RateLimitedResponse {
    pub fn new(retry_after_secs: u64) -> Self {
        Self {
            success: false,
            reason: "rate_limited",
            retry_after_secs,
        }
    }
}
