//! Content hashing for deduplication.

use std::fmt;

use md5::{Digest, Md5};

/// 128-bit digest of downloaded content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContentFingerprint([u8; 16]);

impl ContentFingerprint {
    /// Compute the fingerprint of a full byte buffer.
    pub fn of(content: &[u8]) -> Self {
        let mut hasher = Md5::new();
        hasher.update(content);

        let mut digest = [0u8; 16];
        digest.copy_from_slice(&hasher.finalize());
        Self(digest)
    }
}

impl fmt::Display for ContentFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.0 {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_digest() {
        assert_eq!(
            ContentFingerprint::of(b"").to_string(),
            "d41d8cd98f00b204e9800998ecf8427e"
        );
        assert_eq!(
            ContentFingerprint::of(b"abc").to_string(),
            "900150983cd24fb0d6963f7d28e17f72"
        );
    }

    #[test]
    fn test_different_content_differs() {
        assert_ne!(
            ContentFingerprint::of(b"image-a"),
            ContentFingerprint::of(b"image-b")
        );
        assert_eq!(
            ContentFingerprint::of(b"image-a"),
            ContentFingerprint::of(b"image-a")
        );
    }
}
