//! Content Hash Value Object
//!
//! SHA-256 digest of generated notebook content. Two runs over identical
//! input produce the same hash; the run report and `diff` use it to show
//! that regeneration is byte-identical.

use std::fmt;

use sha2::{Digest, Sha256};

/// Content hash value object (`sha256:<hex>`)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContentHash(String);

impl ContentHash {
    /// Prefix for SHA-256 hashes
    pub const PREFIX: &'static str = "sha256:";

    /// Compute SHA-256 of content
    pub fn from_content(content: &str) -> Self {
        let hash = Sha256::digest(content.as_bytes());
        Self(format!("{}{:x}", Self::PREFIX, hash))
    }

    /// Get the full hash string with prefix
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Get just the hex part without prefix
    pub fn hex(&self) -> &str {
        self.0.strip_prefix(Self::PREFIX).unwrap_or(&self.0)
    }

    /// First `len` hex characters (used for stable notebook cell ids)
    pub fn short(&self, len: usize) -> &str {
        let hex = self.hex();
        &hex[..len.min(hex.len())]
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for ContentHash {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
