//! Sitemap generation from the database.

use domain::models::{PublishedArticle, SeoPage};
use domain::services::{build_entries, render_urlset};
use persistence::repositories::{ArticleRepository, SeoPageRepository};
use sqlx::PgPool;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum SitemapError {
    #[error("Failed to load SEO pages: {0}")]
    SeoPages(#[from] sqlx::Error),
}

/// Renders the XML sitemap for `origin`.
///
/// SEO pages are required. Articles are best effort: a failed article query
/// still yields a sitemap with the SEO page entries.
pub async fn generate_sitemap(pool: &PgPool, origin: &str) -> Result<String, SitemapError> {
    let pages: Vec<SeoPage> = SeoPageRepository::new(pool.clone())
        .list_all()
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    let articles: Vec<PublishedArticle> = match ArticleRepository::new(pool.clone())
        .list_published()
        .await
    {
        Ok(rows) => rows.into_iter().map(Into::into).collect(),
        Err(e) => {
            warn!(error = %e, "Failed to load articles for sitemap, continuing without them");
            Vec::new()
        }
    };

    let entries = build_entries(origin, &pages, &articles);
    info!(
        origin = %origin,
        seo_pages = pages.len(),
        articles = articles.len(),
        entries = entries.len(),
        "Sitemap generated"
    );
    Ok(render_urlset(&entries))
}
