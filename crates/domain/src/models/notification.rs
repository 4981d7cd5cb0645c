//! In-app notifications (announcements shown in the app banner area).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::platform::Platform;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Notification {
    pub id: Uuid,
    pub title: String,
    pub body: String,
    pub link_url: Option<String>,
    pub platform: Option<Platform>,
    pub is_active: bool,
    pub starts_at: Option<DateTime<Utc>>,
    pub expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ListNotificationsQuery {
    pub platform: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ListNotificationsResponse {
    pub notifications: Vec<Notification>,
    pub total: usize,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct CreateNotificationRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,

    #[validate(length(min = 1, max = 2000, message = "Body must be 1-2000 characters"))]
    pub body: String,

    #[validate(url(message = "Link must be a valid URL"))]
    pub link_url: Option<String>,

    pub platform: Option<Platform>,

    pub starts_at: Option<DateTime<Utc>>,
    pub expires_at: Option<DateTime<Utc>>,
}
