//! SEO index log entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::SeoIndexLog;
use sqlx::FromRow;

/// Database row mapping for the seo_index_logs table.
#[derive(Debug, Clone, FromRow)]
pub struct SeoIndexLogEntity {
    pub id: i64,
    pub action: String,
    pub target_url: String,
    pub status_code: Option<i32>,
    pub success: bool,
    pub error_message: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<SeoIndexLogEntity> for SeoIndexLog {
    fn from(entity: SeoIndexLogEntity) -> Self {
        Self {
            id: entity.id,
            action: entity.action,
            target_url: entity.target_url,
            status_code: entity.status_code,
            success: entity.success,
            error_message: entity.error_message,
            created_at: entity.created_at,
        }
    }
}
