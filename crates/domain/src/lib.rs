//! Domain layer for the Deen backend.
//!
//! This crate contains:
//! - Domain models (SEO pages, index log, content and settings rows)
//! - Request/response payloads shared by the HTTP layer
//! - Pure business logic (sitemap building, rate windows, client detection)

pub mod models;
pub mod services;
