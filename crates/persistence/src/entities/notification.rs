//! Notification entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::{Notification, Platform};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the notifications table.
#[derive(Debug, Clone, FromRow)]
pub struct NotificationEntity {
    pub id: Uuid,
    pub title: String,
    pub body: String,
    pub link_url: Option<String>,
    pub platform: Option<String>,
    pub is_active: bool,
    pub starts_at: Option<DateTime<Utc>>,
    pub expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<NotificationEntity> for Notification {
    fn from(entity: NotificationEntity) -> Self {
        Self {
            id: entity.id,
            title: entity.title,
            body: entity.body,
            link_url: entity.link_url,
            platform: entity.platform.as_deref().and_then(Platform::parse),
            is_active: entity.is_active,
            starts_at: entity.starts_at,
            expires_at: entity.expires_at,
            created_at: entity.created_at,
        }
    }
}
