//! HTTP route handlers.

pub mod admin_content;
pub mod admin_seo;
pub mod content;
pub mod functions;
pub mod health;
