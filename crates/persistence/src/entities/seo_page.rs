//! SEO page entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::SeoPage;
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the seo_pages table.
#[derive(Debug, Clone, FromRow)]
pub struct SeoPageEntity {
    pub id: Uuid,
    pub path: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub robots: Option<String>,
    pub changefreq: Option<String>,
    pub priority: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<SeoPageEntity> for SeoPage {
    fn from(entity: SeoPageEntity) -> Self {
        Self {
            id: entity.id,
            path: entity.path,
            title: entity.title,
            description: entity.description,
            robots: entity.robots,
            changefreq: entity.changefreq,
            priority: entity.priority,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}
