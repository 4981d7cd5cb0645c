//! Shared utilities and common types for the Deen backend.
//!
//! This crate provides common functionality used across all other crates:
//! - Cryptographic utilities (hashing, constant-time comparison)
//! - Cursor pagination
//! - Common validation logic

pub mod crypto;
pub mod pagination;
pub mod validation;
