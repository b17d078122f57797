//! Content fingerprints for duplicate detection.
//!
//! Text is trimmed, lowercased and whitespace-collapsed before hashing, so
//! re-extracted copies of the same document share a fingerprint.

use sha2::{Digest, Sha256};

/// Lowercase hex SHA-256 of the normalized text (64 characters).
///
/// # Example
///
/// ```rust
/// use medscan::discovery::fingerprint;
///
/// assert_eq!(fingerprint("Aging  research\n"), fingerprint("aging research"));
/// assert_eq!(fingerprint("x").len(), 64);
/// ```
#[must_use]
pub fn fingerprint(text: &str) -> String {
    let mut hasher = Sha256::new();
    for (i, word) in text.split_whitespace().enumerate() {
        if i > 0 {
            hasher.update(b" ");
        }
        hasher.update(word.to_lowercase().as_bytes());
    }
    hex::encode(hasher.finalize())
}
