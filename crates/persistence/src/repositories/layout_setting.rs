//! Layout settings repository.

use domain::models::{Platform, UpdateLayoutSettingRequest};
use sqlx::PgPool;

use crate::entities::LayoutSettingEntity;
use crate::metrics::QueryTimer;

/// One row per platform.
#[derive(Clone)]
pub struct LayoutSettingRepository {
    pool: PgPool,
}

impl LayoutSettingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_platform(
        &self,
        platform: Platform,
    ) -> Result<Option<LayoutSettingEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_layout_setting");
        let result = sqlx::query_as::<_, LayoutSettingEntity>(
            r#"
            SELECT id, platform, theme, show_footer, show_bottom_nav, show_ads, updated_at
            FROM layout_settings
            WHERE platform = $1
            "#,
        )
        .bind(platform.as_str())
        .fetch_optional(&self.pool)
        .await;
        timer.record_result(&result);
        result
    }

    pub async fn upsert(
        &self,
        platform: Platform,
        request: &UpdateLayoutSettingRequest,
    ) -> Result<LayoutSettingEntity, sqlx::Error> {
        let timer = QueryTimer::new("upsert_layout_setting");
        let result = sqlx::query_as::<_, LayoutSettingEntity>(
            r#"
            INSERT INTO layout_settings (platform, theme, show_footer, show_bottom_nav, show_ads)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (platform)
            DO UPDATE SET theme = $2, show_footer = $3, show_bottom_nav = $4,
                          show_ads = $5, updated_at = NOW()
            RETURNING id, platform, theme, show_footer, show_bottom_nav, show_ads, updated_at
            "#,
        )
        .bind(platform.as_str())
        .bind(&request.theme)
        .bind(request.show_footer)
        .bind(request.show_bottom_nav)
        .bind(request.show_ads)
        .fetch_one(&self.pool)
        .await;
        timer.record_result(&result);
        result
    }
}
