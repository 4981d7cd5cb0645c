//! Published article domain model.
//!
//! Articles are the published-content rows that contribute secondary
//! sitemap entries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Path prefix under which articles are served by the front end.
pub const ARTICLE_PATH_PREFIX: &str = "/articles/";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct PublishedArticle {
    pub id: Uuid,
    pub slug: String,
    pub title: String,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl PublishedArticle {
    /// Site path derived from the slug.
    pub fn path(&self) -> String {
        format!(
            "{}{}",
            ARTICLE_PATH_PREFIX,
            self.slug.trim().trim_start_matches('/')
        )
    }

    pub fn last_modified(&self) -> DateTime<Utc> {
        self.updated_at
            .or(self.published_at)
            .unwrap_or(self.created_at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn article(slug: &str) -> PublishedArticle {
        PublishedArticle {
            id: Uuid::new_v4(),
            slug: slug.to_string(),
            title: "Title".to_string(),
            published_at: Some(Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap()),
            created_at: Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap(),
            updated_at: None,
        }
    }

    #[test]
    fn test_path() {
        assert_eq!(article("ramadan-guide").path(), "/articles/ramadan-guide");
        assert_eq!(article("/leading").path(), "/articles/leading");
    }

    #[test]
    fn test_last_modified_prefers_updated_then_published() {
        let mut a = article("x");
        assert_eq!(a.last_modified(), a.published_at.unwrap());
        let updated = Utc.with_ymd_and_hms(2024, 4, 1, 0, 0, 0).unwrap();
        a.updated_at = Some(updated);
        assert_eq!(a.last_modified(), updated);
        a.updated_at = None;
        a.published_at = None;
        assert_eq!(a.last_modified(), a.created_at);
    }
}
