//! Home/page section configuration.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::platform::Platform;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct PageSection {
    pub id: Uuid,
    pub page: String,
    pub section_key: String,
    pub title: Option<String>,
    pub is_visible: bool,
    pub sort_order: i32,
    /// `None` means the section applies to every platform.
    pub platform: Option<Platform>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl PageSection {
    pub fn visible_on(&self, platform: Platform) -> bool {
        self.is_visible && self.platform.map_or(true, |p| p.applies_to(platform))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ListPageSectionsQuery {
    pub page: String,
    pub platform: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ListPageSectionsResponse {
    pub sections: Vec<PageSection>,
    pub total: usize,
}

/// Upsert keyed by `(page, section_key)`.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct UpsertPageSectionRequest {
    #[validate(length(min = 1, max = 100, message = "Page must be 1-100 characters"))]
    pub page: String,

    #[validate(length(min = 1, max = 100, message = "Section key must be 1-100 characters"))]
    pub section_key: String,

    #[validate(length(max = 200, message = "Title must be at most 200 characters"))]
    pub title: Option<String>,

    #[serde(default = "default_visible")]
    pub is_visible: bool,

    #[serde(default)]
    #[validate(range(min = 0, max = 10000, message = "Sort order must be between 0 and 10000"))]
    pub sort_order: i32,

    pub platform: Option<Platform>,
}

fn default_visible() -> bool {
    true
}
