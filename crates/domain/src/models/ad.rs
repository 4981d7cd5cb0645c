//! Ad slot content.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::platform::Platform;
use crate::services::client_context::AdDelivery;

/// How an ad is rendered by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdType {
    /// Third-party script loaded in the browser.
    Script,
    /// Native SDK placement inside the app shell.
    Native,
    /// Self-hosted image banner.
    Image,
}

impl AdType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdType::Script => "script",
            AdType::Native => "native",
            AdType::Image => "image",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "script" => Some(AdType::Script),
            "native" => Some(AdType::Native),
            "image" => Some(AdType::Image),
            _ => None,
        }
    }

    /// Whether a client using `delivery` can render this ad type.
    pub fn renderable_with(&self, delivery: AdDelivery) -> bool {
        match delivery {
            AdDelivery::None => false,
            AdDelivery::Script => matches!(self, AdType::Script | AdType::Image),
            AdDelivery::Native => matches!(self, AdType::Native | AdType::Image),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Ad {
    pub id: Uuid,
    pub name: String,
    pub placement: String,
    pub platform: Platform,
    pub ad_type: AdType,
    pub image_url: Option<String>,
    pub target_url: Option<String>,
    pub script_src: Option<String>,
    pub is_active: bool,
    pub priority: i32,
    pub starts_at: Option<DateTime<Utc>>,
    pub ends_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Ad {
    /// Active and inside its scheduling window at `now`.
    pub fn is_live(&self, now: DateTime<Utc>) -> bool {
        self.is_active
            && self.starts_at.map_or(true, |s| s <= now)
            && self.ends_at.map_or(true, |e| e > now)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ListAdsQuery {
    pub placement: String,
    pub platform: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ListAdsResponse {
    pub delivery: AdDelivery,
    pub ads: Vec<Ad>,
}

/// Create/replace payload for an ad.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct SaveAdRequest {
    #[validate(length(min = 1, max = 200, message = "Name must be 1-200 characters"))]
    pub name: String,

    #[validate(length(min = 1, max = 100, message = "Placement must be 1-100 characters"))]
    pub placement: String,

    pub platform: Platform,

    pub ad_type: AdType,

    #[validate(url(message = "Image URL must be a valid URL"))]
    pub image_url: Option<String>,

    #[validate(url(message = "Target URL must be a valid URL"))]
    pub target_url: Option<String>,

    #[validate(url(message = "Script source must be a valid URL"))]
    pub script_src: Option<String>,

    #[serde(default = "default_active")]
    pub is_active: bool,

    #[serde(default)]
    #[validate(range(min = -1000, max = 1000, message = "Priority must be between -1000 and 1000"))]
    pub priority: i32,

    pub starts_at: Option<DateTime<Utc>>,
    pub ends_at: Option<DateTime<Utc>>,
}

fn default_active() -> bool {
    true
}

impl SaveAdRequest {
    /// Checks cross-field rules the derive cannot express.
    pub fn validate_consistency(&self) -> Result<(), String> {
        if let (Some(start), Some(end)) = (self.starts_at, self.ends_at) {
            if end <= start {
                return Err("ends_at must be after starts_at".to_string());
            }
        }
        if self.ad_type == AdType::Script && self.script_src.is_none() {
            return Err("script ads require script_src".to_string());
        }
        if self.ad_type == AdType::Image && self.image_url.is_none() {
            return Err("image ads require image_url".to_string());
        }
        Ok(())
    }
}
