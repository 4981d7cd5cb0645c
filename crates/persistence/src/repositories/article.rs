//! Article repository for database operations.

use sqlx::PgPool;

use crate::entities::PublishedArticleEntity;
use crate::metrics::QueryTimer;

/// Read access to the published-content table.
#[derive(Clone)]
pub struct ArticleRepository {
    pool: PgPool,
}

impl ArticleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Published articles, most recently modified first.
    pub async fn list_published(&self) -> Result<Vec<PublishedArticleEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_published_articles");
        let result = sqlx::query_as::<_, PublishedArticleEntity>(
            r#"
            SELECT id, slug, title, published_at, created_at, updated_at
            FROM articles
            WHERE is_published = TRUE
            ORDER BY COALESCE(updated_at, published_at, created_at) DESC, slug
            "#,
        )
        .fetch_all(&self.pool)
        .await;
        timer.record_result(&result);
        result
    }
}
