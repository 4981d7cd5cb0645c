//! SEO setting entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the seo_settings table.
///
/// `setting_value` is free-form JSON; callers deserialize it into the
/// typed settings for the row they asked for.
#[derive(Debug, Clone, FromRow)]
pub struct SeoSettingEntity {
    pub id: Uuid,
    pub setting_name: String,
    pub setting_value: serde_json::Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SeoSettingEntity {
    /// Deserializes the stored value, returning `None` when it has the wrong shape.
    pub fn value_as<T: serde::de::DeserializeOwned>(&self) -> Option<T> {
        match serde_json::from_value(self.setting_value.clone()) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(
                    setting = %self.setting_name,
                    error = %e,
                    "Stored SEO setting has unexpected shape"
                );
                None
            }
        }
    }
}
