//! Page section entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::{PageSection, Platform};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the page_sections table.
#[derive(Debug, Clone, FromRow)]
pub struct PageSectionEntity {
    pub id: Uuid,
    pub page: String,
    pub section_key: String,
    pub title: Option<String>,
    pub is_visible: bool,
    pub sort_order: i32,
    pub platform: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<PageSectionEntity> for PageSection {
    fn from(entity: PageSectionEntity) -> Self {
        Self {
            id: entity.id,
            page: entity.page,
            section_key: entity.section_key,
            title: entity.title,
            is_visible: entity.is_visible,
            sort_order: entity.sort_order,
            platform: entity.platform.as_deref().and_then(Platform::parse),
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}
