//! Custom Axum extractors.

pub mod client_context;

pub use client_context::Client;
