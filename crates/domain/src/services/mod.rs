//! Pure domain logic shared by the HTTP layer and background jobs.

pub mod client_context;
pub mod rate_window;
pub mod sitemap;

pub use client_context::{AdDelivery, ClientContext, EmbeddingContext};
pub use rate_window::{RateDecision, RateWindow};
pub use sitemap::{build_entries, render_urlset, resolve_origin, SitemapEntry};
