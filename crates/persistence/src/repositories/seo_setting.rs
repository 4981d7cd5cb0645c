//! SEO settings repository.

use sqlx::PgPool;

use crate::entities::SeoSettingEntity;
use crate::metrics::QueryTimer;

#[derive(Clone)]
pub struct SeoSettingRepository {
    pool: PgPool,
}

impl SeoSettingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn get(&self, name: &str) -> Result<Option<SeoSettingEntity>, sqlx::Error> {
        let timer = QueryTimer::new("get_seo_setting");
        let result = sqlx::query_as::<_, SeoSettingEntity>(
            r#"
            SELECT id, setting_name, setting_value, created_at, updated_at
            FROM seo_settings
            WHERE setting_name = $1
            "#,
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await;
        timer.record_result(&result);
        result
    }

    pub async fn upsert(
        &self,
        name: &str,
        value: serde_json::Value,
    ) -> Result<SeoSettingEntity, sqlx::Error> {
        let timer = QueryTimer::new("upsert_seo_setting");
        let result = sqlx::query_as::<_, SeoSettingEntity>(
            r#"
            INSERT INTO seo_settings (setting_name, setting_value)
            VALUES ($1, $2)
            ON CONFLICT (setting_name)
            DO UPDATE SET setting_value = $2, updated_at = NOW()
            RETURNING id, setting_name, setting_value, created_at, updated_at
            "#,
        )
        .bind(name)
        .bind(value)
        .fetch_one(&self.pool)
        .await;
        timer.record_result(&result);
        result
    }
}
