//! SEO index log domain model.
//!
//! Append-only audit of outbound indexing calls. The ping rows double as the
//! rate-limit record for the search-engine notifier.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of outbound indexing call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexAction {
    PingGoogle,
    PingBing,
    IndexnowSubmit,
}

impl IndexAction {
    /// Actions that count towards the notifier rate limit.
    pub const PING_ACTIONS: [IndexAction; 2] = [IndexAction::PingGoogle, IndexAction::PingBing];

    pub fn as_str(&self) -> &'static str {
        match self {
            IndexAction::PingGoogle => "ping_google",
            IndexAction::PingBing => "ping_bing",
            IndexAction::IndexnowSubmit => "indexnow_submit",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "ping_google" => Some(IndexAction::PingGoogle),
            "ping_bing" => Some(IndexAction::PingBing),
            "indexnow_submit" => Some(IndexAction::IndexnowSubmit),
            _ => None,
        }
    }

    pub fn is_ping(&self) -> bool {
        Self::PING_ACTIONS.contains(self)
    }
}

impl std::fmt::Display for IndexAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A persisted log row.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SeoIndexLog {
    pub id: i64,
    /// Raw action string; unknown values from older rows are kept verbatim.
    pub action: String,
    pub target_url: String,
    pub status_code: Option<i32>,
    pub success: bool,
    pub error_message: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A log row about to be written.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSeoIndexLog {
    pub action: IndexAction,
    pub target_url: String,
    pub status_code: Option<i32>,
    pub success: bool,
    pub error_message: Option<String>,
}

/// Query parameters for listing log rows.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListIndexLogsQuery {
    pub cursor: Option<String>,
    pub limit: Option<i64>,
}

/// Response for listing log rows, newest first.
#[derive(Debug, Clone, Serialize)]
pub struct ListIndexLogsResponse {
    pub logs: Vec<SeoIndexLog>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_strings() {
        assert_eq!(IndexAction::PingGoogle.as_str(), "ping_google");
        assert_eq!(IndexAction::PingBing.as_str(), "ping_bing");
        assert_eq!(IndexAction::IndexnowSubmit.as_str(), "indexnow_submit");
        assert_eq!(IndexAction::parse("ping_bing"), Some(IndexAction::PingBing));
        assert_eq!(IndexAction::parse("ping_yandex"), None);
    }

    #[test]
    fn test_is_ping() {
        assert!(IndexAction::PingGoogle.is_ping());
        assert!(IndexAction::PingBing.is_ping());
        assert!(!IndexAction::IndexnowSubmit.is_ping());
    }

    #[test]
    fn test_serde_matches_as_str() {
        for action in [
            IndexAction::PingGoogle,
            IndexAction::PingBing,
            IndexAction::IndexnowSubmit,
        ] {
            let json = serde_json::to_string(&action).unwrap();
            assert_eq!(json, format!("\"{}\"", action.as_str()));
        }
    }
}
