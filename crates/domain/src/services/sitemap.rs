//! Sitemap building and XML rendering.
//!
//! SEO pages are the primary source; published articles add secondary
//! entries for paths no SEO page already describes.

use chrono::NaiveDate;
use std::collections::HashSet;

use crate::models::{PublishedArticle, SeoPage};

/// Sitemap protocol namespace.
pub const SITEMAP_NAMESPACE: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// Priority for SEO pages that do not set one.
pub const DEFAULT_SEO_PRIORITY: f64 = 0.8;

/// Fixed priority for content-derived entries.
pub const CONTENT_PRIORITY: f64 = 0.6;

/// Change frequency for entries that do not set one.
pub const DEFAULT_CHANGEFREQ: &str = "weekly";

/// One `<url>` element.
#[derive(Debug, Clone, PartialEq)]
pub struct SitemapEntry {
    pub loc: String,
    pub lastmod: Option<NaiveDate>,
    pub changefreq: String,
    pub priority: f64,
}

/// Builds sitemap entries for `origin` (scheme + host, no trailing slash).
///
/// Pages whose robots policy contains `noindex` are dropped. Article paths
/// that match any SEO page path (indexable or not) are skipped, so an
/// explicit SEO row always wins over derived content.
pub fn build_entries(
    origin: &str,
    pages: &[SeoPage],
    articles: &[PublishedArticle],
) -> Vec<SitemapEntry> {
    let origin = origin.trim_end_matches('/');
    let mut claimed: HashSet<String> = pages
        .iter()
        .map(|p| shared::validation::normalize_path(&p.path))
        .collect();

    let mut indexable: Vec<&SeoPage> = pages.iter().filter(|p| !p.is_noindex()).collect();
    indexable.sort_by(|a, b| {
        effective_priority(b)
            .total_cmp(&effective_priority(a))
            .then_with(|| a.path.cmp(&b.path))
    });

    let mut entries = Vec::with_capacity(indexable.len() + articles.len());
    let mut emitted: HashSet<String> = HashSet::new();

    for page in indexable {
        let path = shared::validation::normalize_path(&page.path);
        if !emitted.insert(path.clone()) {
            continue;
        }
        entries.push(SitemapEntry {
            loc: format!("{}{}", origin, path),
            lastmod: Some(page.last_modified().date_naive()),
            changefreq: page
                .changefreq
                .as_deref()
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .unwrap_or(DEFAULT_CHANGEFREQ)
                .to_string(),
            priority: effective_priority(page),
        });
    }

    for article in articles {
        let path = article.path();
        if !claimed.insert(path.clone()) {
            continue;
        }
        entries.push(SitemapEntry {
            loc: format!("{}{}", origin, path),
            lastmod: Some(article.last_modified().date_naive()),
            changefreq: DEFAULT_CHANGEFREQ.to_string(),
            priority: CONTENT_PRIORITY,
        });
    }

    entries
}

fn effective_priority(page: &SeoPage) -> f64 {
    page.priority
        .filter(|p| p.is_finite())
        .map(|p| p.clamp(0.0, 1.0))
        .unwrap_or(DEFAULT_SEO_PRIORITY)
}

/// Renders a `urlset` document.
pub fn render_urlset(entries: &[SitemapEntry]) -> String {
    let mut xml = String::with_capacity(128 + entries.len() * 160);
    xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    xml.push_str(&format!("<urlset xmlns=\"{}\">\n", SITEMAP_NAMESPACE));

    for entry in entries {
        xml.push_str("  <url>\n");
        xml.push_str(&format!("    <loc>{}</loc>\n", xml_escape(&entry.loc)));
        if let Some(lastmod) = entry.lastmod {
            xml.push_str(&format!(
                "    <lastmod>{}</lastmod>\n",
                lastmod.format("%Y-%m-%d")
            ));
        }
        xml.push_str(&format!(
            "    <changefreq>{}</changefreq>\n",
            xml_escape(&entry.changefreq)
        ));
        xml.push_str(&format!("    <priority>{:.1}</priority>\n", entry.priority));
        xml.push_str("  </url>\n");
    }

    xml.push_str("</urlset>\n");
    xml
}

/// Escapes the five XML special characters.
pub fn xml_escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

/// Picks the origin the sitemap URLs are built on.
///
/// Order: explicit `host` parameter, then the request `Host` header (scheme
/// from `X-Forwarded-Proto`, default https), then `fallback`.
pub fn resolve_origin(
    host_param: Option<&str>,
    host_header: Option<&str>,
    forwarded_proto: Option<&str>,
    fallback: &str,
) -> String {
    if let Some(host) = host_param.map(str::trim).filter(|h| !h.is_empty()) {
        let origin = if host.starts_with("http://") || host.starts_with("https://") {
            host.to_string()
        } else {
            format!("https://{}", host)
        };
        return origin.trim_end_matches('/').to_string();
    }

    if let Some(host) = host_header.map(str::trim).filter(|h| !h.is_empty()) {
        let scheme = forwarded_proto
            .and_then(|p| p.split(',').next())
            .map(str::trim)
            .filter(|p| *p == "http" || *p == "https")
            .unwrap_or("https");
        return format!("{}://{}", scheme, host.trim_end_matches('/'));
    }

    fallback.trim_end_matches('/').to_string()
}
