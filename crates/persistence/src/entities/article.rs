//! Article entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::PublishedArticle;
use sqlx::FromRow;
use uuid::Uuid;

/// Sitemap projection of a row in the articles table.
#[derive(Debug, Clone, FromRow)]
pub struct PublishedArticleEntity {
    pub id: Uuid,
    pub slug: String,
    pub title: String,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<PublishedArticleEntity> for PublishedArticle {
    fn from(entity: PublishedArticleEntity) -> Self {
        Self {
            id: entity.id,
            slug: entity.slug,
            title: entity.title,
            published_at: entity.published_at,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}
