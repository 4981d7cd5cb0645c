//! Layout setting entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::{LayoutSetting, Platform};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the layout_settings table.
#[derive(Debug, Clone, FromRow)]
pub struct LayoutSettingEntity {
    pub id: Uuid,
    pub platform: String,
    pub theme: String,
    pub show_footer: bool,
    pub show_bottom_nav: bool,
    pub show_ads: bool,
    pub updated_at: DateTime<Utc>,
}

impl From<LayoutSettingEntity> for LayoutSetting {
    fn from(entity: LayoutSettingEntity) -> Self {
        Self {
            platform: Platform::parse(&entity.platform).unwrap_or(Platform::All),
            theme: entity.theme,
            show_footer: entity.show_footer,
            show_bottom_nav: entity.show_bottom_nav,
            show_ads: entity.show_ads,
            updated_at: Some(entity.updated_at),
        }
    }
}
