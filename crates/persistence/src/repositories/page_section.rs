//! Page sections repository.

use domain::models::{Platform, UpsertPageSectionRequest};
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::PageSectionEntity;
use crate::metrics::QueryTimer;

#[derive(Clone)]
pub struct PageSectionRepository {
    pool: PgPool,
}

impl PageSectionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Visible sections of `page`. A `None` or `all` platform skips the
    /// platform filter; rows with a NULL or `all` platform always match.
    pub async fn list_visible(
        &self,
        page: &str,
        platform: Option<Platform>,
    ) -> Result<Vec<PageSectionEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_page_sections");
        let platform = platform
            .filter(|p| *p != Platform::All)
            .map(|p| p.as_str());
        let result = sqlx::query_as::<_, PageSectionEntity>(
            r#"
            SELECT id, page, section_key, title, is_visible, sort_order, platform,
                   created_at, updated_at
            FROM page_sections
            WHERE page = $1
              AND is_visible = TRUE
              AND ($2::text IS NULL OR platform IS NULL OR platform = 'all' OR platform = $2)
            ORDER BY sort_order, section_key
            "#,
        )
        .bind(page)
        .bind(platform)
        .fetch_all(&self.pool)
        .await;
        timer.record_result(&result);
        result
    }

    /// Insert or update the section identified by page and section key.
    pub async fn upsert(
        &self,
        request: &UpsertPageSectionRequest,
    ) -> Result<PageSectionEntity, sqlx::Error> {
        let timer = QueryTimer::new("upsert_page_section");
        let result = sqlx::query_as::<_, PageSectionEntity>(
            r#"
            INSERT INTO page_sections (page, section_key, title, is_visible, sort_order, platform)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (page, section_key)
            DO UPDATE SET title = $3, is_visible = $4, sort_order = $5,
                          platform = $6, updated_at = NOW()
            RETURNING id, page, section_key, title, is_visible, sort_order, platform,
                      created_at, updated_at
            "#,
        )
        .bind(&request.page)
        .bind(&request.section_key)
        .bind(&request.title)
        .bind(request.is_visible)
        .bind(request.sort_order)
        .bind(request.platform.map(|p| p.as_str()))
        .fetch_one(&self.pool)
        .await;
        timer.record_result(&result);
        result
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("delete_page_section");
        let result = sqlx::query("DELETE FROM page_sections WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await;
        timer.record_result(&result);
        Ok(result?.rows_affected() > 0)
    }
}
