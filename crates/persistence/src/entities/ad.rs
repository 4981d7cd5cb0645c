//! Ad entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::{Ad, AdType, Platform};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the ads table.
#[derive(Debug, Clone, FromRow)]
pub struct AdEntity {
    pub id: Uuid,
    pub name: String,
    pub placement: String,
    pub platform: String,
    pub ad_type: String,
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

impl From<AdEntity> for Ad {
    fn from(entity: AdEntity) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            placement: entity.placement,
            platform: Platform::parse(&entity.platform).unwrap_or(Platform::All),
            // Column is CHECK-constrained; image is the inert fallback.
            ad_type: AdType::parse(&entity.ad_type).unwrap_or(AdType::Image),
            image_url: entity.image_url,
            target_url: entity.target_url,
            script_src: entity.script_src,
            is_active: entity.is_active,
            priority: entity.priority,
            starts_at: entity.starts_at,
            ends_at: entity.ends_at,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}
