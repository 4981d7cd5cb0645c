//! SEO page repository for database operations.

use domain::models::UpsertSeoPageRequest;
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::SeoPageEntity;
use crate::metrics::QueryTimer;

/// Repository for the seo_pages table.
#[derive(Clone)]
pub struct SeoPageRepository {
    pool: PgPool,
}

impl SeoPageRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// All SEO pages, ordered by path.
    pub async fn list_all(&self) -> Result<Vec<SeoPageEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_seo_pages");
        let result = sqlx::query_as::<_, SeoPageEntity>(
            r#"
            SELECT id, path, title, description, robots, changefreq, priority,
                   created_at, updated_at
            FROM seo_pages
            ORDER BY path
            "#,
        )
        .fetch_all(&self.pool)
        .await;
        timer.record_result(&result);
        result
    }

    /// Insert or update the page stored under `path`.
    pub async fn upsert(
        &self,
        path: &str,
        request: &UpsertSeoPageRequest,
    ) -> Result<SeoPageEntity, sqlx::Error> {
        let timer = QueryTimer::new("upsert_seo_page");
        let result = sqlx::query_as::<_, SeoPageEntity>(
            r#"
            INSERT INTO seo_pages (path, title, description, robots, changefreq, priority)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (path)
            DO UPDATE SET title = $2, description = $3, robots = $4,
                          changefreq = $5, priority = $6, updated_at = NOW()
            RETURNING id, path, title, description, robots, changefreq, priority,
                      created_at, updated_at
            "#,
        )
        .bind(path)
        .bind(&request.title)
        .bind(&request.description)
        .bind(&request.robots)
        .bind(&request.changefreq)
        .bind(request.priority)
        .fetch_one(&self.pool)
        .await;
        timer.record_result(&result);
        result
    }

    /// Returns true when a row was deleted.
    pub async fn delete(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("delete_seo_page");
        let result = sqlx::query("DELETE FROM seo_pages WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await;
        timer.record_result(&result);
        Ok(result?.rows_affected() > 0)
    }
}
