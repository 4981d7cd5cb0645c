//! Cryptographic utilities for admin key hashing and comparison.

use sha2::{Digest, Sha256};

/// Computes SHA-256 hash of the input and returns it as a hex string.
pub fn sha256_hex(input: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    hex::encode(hasher.finalize())
}

/// Compares two byte slices in constant time with respect to their contents.
///
/// Slices of different length compare unequal immediately.
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b.iter()).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

/// Checks a presented key against a stored SHA-256 hex digest.
pub fn verify_key(presented: &str, expected_sha256_hex: &str) -> bool {
    let digest = sha256_hex(presented);
    constant_time_eq(
        digest.as_bytes(),
        expected_sha256_hex.trim().to_ascii_lowercase().as_bytes(),
    )
}
