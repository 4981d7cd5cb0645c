//! Ads repository.

use chrono::{DateTime, Utc};
use domain::models::{Platform, SaveAdRequest};
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::AdEntity;
use crate::metrics::QueryTimer;

const AD_COLUMNS: &str = "id, name, placement, platform, ad_type, image_url, target_url, \
     script_src, is_active, priority, starts_at, ends_at, created_at, updated_at";

#[derive(Clone)]
pub struct AdRepository {
    pool: PgPool,
}

impl AdRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Active ads for a placement whose schedule covers `now`, highest
    /// priority first.
    pub async fn list_live(
        &self,
        placement: &str,
        platform: Option<Platform>,
        now: DateTime<Utc>,
    ) -> Result<Vec<AdEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_live_ads");
        let platform = platform
            .filter(|p| *p != Platform::All)
            .map(|p| p.as_str());
        let sql = format!(
            r#"
            SELECT {AD_COLUMNS}
            FROM ads
            WHERE placement = $1
              AND is_active = TRUE
              AND ($2::text IS NULL OR platform = 'all' OR platform = $2)
              AND (starts_at IS NULL OR starts_at <= $3)
              AND (ends_at IS NULL OR ends_at > $3)
            ORDER BY priority DESC, created_at DESC
            "#
        );
        let result = sqlx::query_as::<_, AdEntity>(&sql)
            .bind(placement)
            .bind(platform)
            .bind(now)
            .fetch_all(&self.pool)
            .await;
        timer.record_result(&result);
        result
    }

    pub async fn create(&self, request: &SaveAdRequest) -> Result<AdEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_ad");
        let sql = format!(
            r#"
            INSERT INTO ads (name, placement, platform, ad_type, image_url, target_url,
                             script_src, is_active, priority, starts_at, ends_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING {AD_COLUMNS}
            "#
        );
        let result = bind_save(sqlx::query_as::<_, AdEntity>(&sql), request)
            .fetch_one(&self.pool)
            .await;
        timer.record_result(&result);
        result
    }

    /// Replaces every editable column. Returns `None` for an unknown id.
    pub async fn update(
        &self,
        id: Uuid,
        request: &SaveAdRequest,
    ) -> Result<Option<AdEntity>, sqlx::Error> {
        let timer = QueryTimer::new("update_ad");
        let sql = format!(
            r#"
            UPDATE ads
            SET name = $1, placement = $2, platform = $3, ad_type = $4, image_url = $5,
                target_url = $6, script_src = $7, is_active = $8, priority = $9,
                starts_at = $10, ends_at = $11, updated_at = NOW()
            WHERE id = $12
            RETURNING {AD_COLUMNS}
            "#
        );
        let result = bind_save(sqlx::query_as::<_, AdEntity>(&sql), request)
            .bind(id)
            .fetch_optional(&self.pool)
            .await;
        timer.record_result(&result);
        result
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("delete_ad");
        let result = sqlx::query("DELETE FROM ads WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await;
        timer.record_result(&result);
        Ok(result?.rows_affected() > 0)
    }
}

type AdQuery<'q> =
    sqlx::query::QueryAs<'q, sqlx::Postgres, AdEntity, sqlx::postgres::PgArguments>;

/// Binds `$1..$11` in column order shared by insert and update.
fn bind_save<'q>(query: AdQuery<'q>, request: &'q SaveAdRequest) -> AdQuery<'q> {
    query
        .bind(&request.name)
        .bind(&request.placement)
        .bind(request.platform.as_str())
        .bind(request.ad_type.as_str())
        .bind(&request.image_url)
        .bind(&request.target_url)
        .bind(&request.script_src)
        .bind(request.is_active)
        .bind(request.priority)
        .bind(request.starts_at)
        .bind(request.ends_at)
}
