//! SEO page domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationErrors};

/// Metadata describing one indexable URL of the site.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SeoPage {
    pub id: Uuid,
    pub path: String,
    pub title: Option<String>,
    pub description: Option<String>,
    /// Robots policy, e.g. `index, follow` or `noindex, nofollow`.
    pub robots: Option<String>,
    pub changefreq: Option<String>,
    pub priority: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl SeoPage {
    /// True when the robots policy excludes this page from indexing.
    pub fn is_noindex(&self) -> bool {
        self.robots
            .as_deref()
            .map(|r| r.to_ascii_lowercase().contains("noindex"))
            .unwrap_or(false)
    }

    /// Last modification time, falling back to creation.
    pub fn last_modified(&self) -> DateTime<Utc> {
        self.updated_at.unwrap_or(self.created_at)
    }
}

/// Request payload for creating or updating an SEO page (keyed by path).
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct UpsertSeoPageRequest {
    #[validate(custom(function = "shared::validation::validate_site_path"))]
    pub path: String,

    #[validate(length(max = 200, message = "Title must be at most 200 characters"))]
    pub title: Option<String>,

    #[validate(length(max = 500, message = "Description must be at most 500 characters"))]
    pub description: Option<String>,

    #[validate(length(max = 100, message = "Robots must be at most 100 characters"))]
    pub robots: Option<String>,

    #[validate(custom(function = "shared::validation::validate_change_frequency"))]
    pub changefreq: Option<String>,

    #[validate(range(min = 0.0, max = 1.0, message = "Priority must be between 0.0 and 1.0"))]
    pub priority: Option<f64>,
}

impl UpsertSeoPageRequest {
    /// Validates the request, adding the leading `/` to a path given without
    /// one. A blank path is rejected, never mapped to the root page.
    pub fn validated(mut self) -> Result<Self, ValidationErrors> {
        if !self.path.trim().is_empty() {
            self.path = shared::validation::normalize_path(&self.path);
        }
        self.validate()?;
        Ok(self)
    }
}

/// Response payload for SEO page operations.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SeoPageResponse {
    pub id: Uuid,
    pub path: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub robots: Option<String>,
    pub changefreq: Option<String>,
    pub priority: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<SeoPage> for SeoPageResponse {
    fn from(p: SeoPage) -> Self {
        Self {
            id: p.id,
            path: p.path,
            title: p.title,
            description: p.description,
            robots: p.robots,
            changefreq: p.changefreq,
            priority: p.priority,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

/// Response for listing SEO pages.
#[derive(Debug, Clone, Serialize)]
pub struct ListSeoPagesResponse {
    pub pages: Vec<SeoPageResponse>,
    pub total: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(robots: Option<&str>) -> SeoPage {
        SeoPage {
            id: Uuid::new_v4(),
            path: "/quran".to_string(),
            title: None,
            description: None,
            robots: robots.map(str::to_string),
            changefreq: None,
            priority: None,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    #[test]
    fn test_is_noindex() {
        assert!(page(Some("noindex, nofollow")).is_noindex());
        assert!(page(Some("NOINDEX")).is_noindex());
        assert!(page(Some("follow,NoIndex")).is_noindex());
        assert!(!page(Some("index, follow")).is_noindex());
        assert!(!page(None).is_noindex());
    }

    #[test]
    fn test_last_modified_falls_back_to_created() {
        let p = page(None);
        assert_eq!(p.last_modified(), p.created_at);
    }

    #[test]
    fn test_upsert_request_validation() {
        let ok = UpsertSeoPageRequest {
            path: "/hadith".to_string(),
            title: Some("Hadith".to_string()),
            description: None,
            robots: None,
            changefreq: Some("daily".to_string()),
            priority: Some(0.9),
        };
        assert!(ok.validate().is_ok());

        let bad_priority = UpsertSeoPageRequest {
            priority: Some(1.5),
            ..ok.clone()
        };
        assert!(bad_priority.validate().is_err());

        let bad_freq = UpsertSeoPageRequest {
            changefreq: Some("sometimes".to_string()),
            ..ok.clone()
        };
        assert!(bad_freq.validate().is_err());

        let bad_path = UpsertSeoPageRequest {
            path: "hadith".to_string(),
            ..ok
        };
        assert!(bad_path.validate().is_err());
    }

    #[test]
    fn test_validated_normalizes_relative_path() {
        let request = UpsertSeoPageRequest {
            path: " hadith ".to_string(),
            title: None,
            description: None,
            robots: None,
            changefreq: None,
            priority: None,
        };
        assert_eq!(request.validated().unwrap().path, "/hadith");
    }

    #[test]
    fn test_validated_rejects_blank_path() {
        for path in ["", "   "] {
            let request = UpsertSeoPageRequest {
                path: path.to_string(),
                title: None,
                description: None,
                robots: Some("noindex".to_string()),
                changefreq: None,
                priority: Some(0.1),
            };
            let errors = request.validated().unwrap_err();
            assert!(errors.field_errors().contains_key("path"));
        }
    }
}
