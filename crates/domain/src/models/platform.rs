//! Client platform identifiers.

use serde::{Deserialize, Serialize};

/// Platform a settings/content row targets.
///
/// `All` marks rows that apply to every client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Web,
    Android,
    Ios,
    All,
}

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Web => "web",
            Platform::Android => "android",
            Platform::Ios => "ios",
            Platform::All => "all",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "web" => Some(Platform::Web),
            "android" => Some(Platform::Android),
            "ios" => Some(Platform::Ios),
            "all" => Some(Platform::All),
            _ => None,
        }
    }

    /// Whether a row stored for `self` is visible to a client on `target`.
    pub fn applies_to(&self, target: Platform) -> bool {
        *self == Platform::All || target == Platform::All || *self == target
    }

    /// Whether this is a native app shell (as opposed to the browser build).
    pub fn is_native(&self) -> bool {
        matches!(self, Platform::Android | Platform::Ios)
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
