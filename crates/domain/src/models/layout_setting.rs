//! Per-platform layout settings.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::platform::Platform;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub struct LayoutSetting {
    pub platform: Platform,
    pub theme: String,
    pub show_footer: bool,
    pub show_bottom_nav: bool,
    pub show_ads: bool,
    pub updated_at: Option<DateTime<Utc>>,
}

impl LayoutSetting {
    /// Settings used when no row exists for the platform.
    pub fn defaults_for(platform: Platform) -> Self {
        Self {
            platform,
            theme: "light".to_string(),
            show_footer: true,
            show_bottom_nav: true,
            show_ads: true,
            updated_at: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct UpdateLayoutSettingRequest {
    #[validate(length(min = 1, max = 50, message = "Theme must be 1-50 characters"))]
    pub theme: String,
    pub show_footer: bool,
    pub show_bottom_nav: bool,
    pub show_ads: bool,
}
