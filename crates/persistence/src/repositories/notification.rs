//! Notifications repository.

use chrono::{DateTime, Utc};
use domain::models::{CreateNotificationRequest, Platform};
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::NotificationEntity;
use crate::metrics::QueryTimer;

#[derive(Clone)]
pub struct NotificationRepository {
    pool: PgPool,
}

impl NotificationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Active notifications that have started and not yet expired, newest first.
    pub async fn list_active(
        &self,
        platform: Option<Platform>,
        now: DateTime<Utc>,
    ) -> Result<Vec<NotificationEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_active_notifications");
        let platform = platform
            .filter(|p| *p != Platform::All)
            .map(|p| p.as_str());
        let result = sqlx::query_as::<_, NotificationEntity>(
            r#"
            SELECT id, title, body, link_url, platform, is_active, starts_at, expires_at,
                   created_at
            FROM notifications
            WHERE is_active = TRUE
              AND ($1::text IS NULL OR platform IS NULL OR platform = 'all' OR platform = $1)
              AND (starts_at IS NULL OR starts_at <= $2)
              AND (expires_at IS NULL OR expires_at > $2)
            ORDER BY created_at DESC
            "#,
        )
        .bind(platform)
        .bind(now)
        .fetch_all(&self.pool)
        .await;
        timer.record_result(&result);
        result
    }

    pub async fn create(
        &self,
        request: &CreateNotificationRequest,
    ) -> Result<NotificationEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_notification");
        let result = sqlx::query_as::<_, NotificationEntity>(
            r#"
            INSERT INTO notifications (title, body, link_url, platform, starts_at, expires_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, title, body, link_url, platform, is_active, starts_at, expires_at,
                      created_at
            "#,
        )
        .bind(&request.title)
        .bind(&request.body)
        .bind(&request.link_url)
        .bind(request.platform.map(|p| p.as_str()))
        .bind(request.starts_at)
        .bind(request.expires_at)
        .fetch_one(&self.pool)
        .await;
        timer.record_result(&result);
        result
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("delete_notification");
        let result = sqlx::query("DELETE FROM notifications WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await;
        timer.record_result(&result);
        Ok(result?.rows_affected() > 0)
    }
}
